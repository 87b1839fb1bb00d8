pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod stores;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryRepository, MemoryStore};
pub use postgres::PgStore;
pub use repository::{Entity, Repository};
pub use stores::Stores;
