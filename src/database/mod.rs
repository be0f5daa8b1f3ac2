pub mod manager;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{ProductRepository, UserRepository};
