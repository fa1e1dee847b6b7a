pub mod session;
pub mod tier;

mod memory;
pub use memory::MemoryTier;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web_storage::WebStorageTier;

pub use session::{PersistenceStrategy, SessionRecord, SessionStore};
pub use tier::{KeyValueTier, Tier};
