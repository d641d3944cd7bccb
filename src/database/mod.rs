pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryUserStore;
pub use repository::PgUserStore;
pub use store::{StoreError, UserStore};
