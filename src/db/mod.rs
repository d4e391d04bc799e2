pub mod store;

pub use store::JsonFileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;
