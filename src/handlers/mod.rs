// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (access token)

pub mod public;
pub mod protected;
