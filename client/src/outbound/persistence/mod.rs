//! State snapshot persistence adapters.

mod file_snapshot;
mod memory;

pub use file_snapshot::{FileStatePersistence, STORAGE_KEY};
pub use memory::InMemoryStatePersistence;
