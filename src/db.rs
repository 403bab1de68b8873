pub mod receivable_store;
pub use receivable_store::{ReceivableFilter, ReceivableStore, StoreError};
pub mod memory_store;
pub use memory_store::InMemoryReceivableStore;
pub mod postgres_store;
pub use postgres_store::PgReceivableStore;
