//! Key-value store implementations for the custom-event port.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
