pub mod cookies;
pub mod format;
