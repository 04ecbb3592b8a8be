//! Counter stores backing sequence fields
//!
//! - `memory` - Process-local store
//! - `file` - JSON file per cache name, shared across processes

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Key delimiter used when a counter key is built from several field values
pub const KEY_DELIMITER: &str = "-";

/// Persistent key→counter mapping.
///
/// Implementations must run [`CounterStore::update`] under mutual exclusion
/// for a given key: two concurrent updates of one key never observe the same
/// previous value.
pub trait CounterStore: Send + Sync {
    /// Returns the stored counter, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<u64>>;

    /// Overwrite the counter for `key`
    fn set(&self, key: &str, value: u64) -> Result<()>;

    /// Atomically read, advance and write the counter for `key`.
    ///
    /// `advance` receives the previous value and returns the next one. When it
    /// fails, nothing is written and its error is returned.
    fn update(
        &self,
        key: &str,
        advance: &mut dyn FnMut(Option<u64>) -> Result<u64>,
    ) -> Result<u64>;
}

impl<S: CounterStore + ?Sized> CounterStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<u64>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: u64) -> Result<()> {
        (**self).set(key, value)
    }

    fn update(
        &self,
        key: &str,
        advance: &mut dyn FnMut(Option<u64>) -> Result<u64>,
    ) -> Result<u64> {
        (**self).update(key, advance)
    }
}
