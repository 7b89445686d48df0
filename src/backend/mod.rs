pub mod memory;
pub mod rest;
pub mod traits;
pub mod types;

pub use memory::MemoryBackend;
pub use rest::RestBackend;
pub use traits::{AuthProvider, ObjectStorage, RecordStore};
pub use types::PropertyQuery;
