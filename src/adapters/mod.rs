// Adapters layer: concrete record stores behind the BoxStore port.

pub mod file;
pub mod memory;
pub mod rest;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use rest::RestStore;
