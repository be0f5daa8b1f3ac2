// handlers/protected/mod.rs - Protected handlers (access token required)
//
// Routed behind `jwt_auth_middleware`, which places `AuthUser` into the
// request extensions. Listing can be opened up with
// `api.require_auth_for_listing = false`, so handlers take the user as optional.

pub mod product;
