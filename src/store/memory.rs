use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::Result;

use super::CounterStore;

/// In-memory counter store.
///
/// Updates go through DashMap's entry API, which holds the shard lock for the
/// key while the counter is advanced.
#[derive(Debug, Default)]
pub struct MemoryStore {
    counters: DashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl CounterStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u64>> {
        Ok(self.counters.get(key).map(|entry| *entry))
    }

    fn set(&self, key: &str, value: u64) -> Result<()> {
        self.counters.insert(key.to_owned(), value);
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        advance: &mut dyn FnMut(Option<u64>) -> Result<u64>,
    ) -> Result<u64> {
        match self.counters.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                let next = advance(Some(*entry.get()))?;
                entry.insert(next);
                Ok(next)
            }
            Entry::Vacant(entry) => {
                let next = advance(None)?;
                entry.insert(next);
                Ok(next)
            }
        }
    }
}
