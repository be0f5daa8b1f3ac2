pub mod list; // GET /getProducts

pub use list::list_get;
