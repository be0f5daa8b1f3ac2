pub mod product;
pub mod user;

pub use product::{CreateProduct, Product};
pub use user::{LoginUser, RegisterUser, User};
