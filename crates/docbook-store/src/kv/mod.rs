//! Key-value store adapters and collection helpers

mod collection;
mod file;
pub mod keys;
mod memory;

pub use collection::{get_collection, get_flag, set_collection, set_flag};
pub use file::FileStore;
pub use memory::MemoryStore;
