pub mod create; // POST /createProduct
pub mod show;   // GET /getProduct/:key

pub use create::create_post;
pub use show::show_get;
