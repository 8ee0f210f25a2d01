pub mod app_config;
pub mod backend;
pub mod file_store;
pub mod memory_store;
pub mod seed;

pub use backend::{catalog_options, open_store};
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use seed::SeedSource;
