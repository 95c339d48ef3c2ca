pub mod mem_store;
pub mod pg_store;
pub mod record_store;

pub use mem_store::MemStore;
pub use pg_store::PgStore;
pub use record_store::RecordStore;
