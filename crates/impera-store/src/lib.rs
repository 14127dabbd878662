pub mod memory;
pub mod snapshot;
pub mod traits;

pub use memory::MemoryStore;
pub use snapshot::DataSnapshot;
pub use traits::{EntityStore, NewMessage};
