// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints. None of these require an access token.

pub mod login;    // POST /auth/login
pub mod logout;   // POST /auth/logout
pub mod register; // POST /auth/register

pub use login::login_post;
pub use logout::logout_post;
pub use register::register_post;
