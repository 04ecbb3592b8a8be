use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::trace;

use crate::error::{IdGenError, Result};

use super::CounterStore;

type Counters = BTreeMap<String, u64>;

/// Counter store persisted as `<dir>/<cache_name>.json`.
///
/// Every access takes an advisory lock on `<dir>/<cache_name>.lock`
/// (exclusive for writes, shared for reads), so processes sharing the cache
/// directory serialize their read-modify-write cycles. The lock is released
/// when the lock file handle is dropped.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    /// Open (creating the directory if needed) the store named `cache_name`
    pub fn open(dir: impl AsRef<Path>, cache_name: &str) -> Result<Self> {
        if cache_name.is_empty() || cache_name.starts_with('.') || cache_name.contains(['/', '\\']) {
            return Err(IdGenError::Store(format!("invalid cache name {cache_name:?}")));
        }

        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        Ok(Self {
            data_path: dir.join(format!("{cache_name}.json")),
            lock_path: dir.join(format!("{cache_name}.lock")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.data_path
    }

    fn lock_file(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| io_error(&self.lock_path, e))
    }

    fn lock_exclusive(&self) -> Result<File> {
        let file = self.lock_file()?;
        file.lock_exclusive()
            .map_err(|e| io_error(&self.lock_path, e))?;
        Ok(file)
    }

    fn lock_shared(&self) -> Result<File> {
        let file = self.lock_file()?;
        file.lock_shared()
            .map_err(|e| io_error(&self.lock_path, e))?;
        Ok(file)
    }

    fn load(&self) -> Result<Counters> {
        match fs::read(&self.data_path) {
            Ok(bytes) if bytes.is_empty() => Ok(Counters::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                IdGenError::Store(format!("{}: {e}", self.data_path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Counters::new()),
            Err(e) => Err(io_error(&self.data_path, e)),
        }
    }

    fn save(&self, counters: &Counters) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(counters)
            .map_err(|e| IdGenError::Store(format!("{}: {e}", self.data_path.display())))?;

        // readers never see a half-written file
        let tmp_path = self.data_path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).map_err(|e| io_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.data_path).map_err(|e| io_error(&self.data_path, e))
    }
}

impl CounterStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<u64>> {
        let _lock = self.lock_shared()?;
        Ok(self.load()?.get(key).copied())
    }

    fn set(&self, key: &str, value: u64) -> Result<()> {
        let _lock = self.lock_exclusive()?;
        let mut counters = self.load()?;
        counters.insert(key.to_owned(), value);
        self.save(&counters)
    }

    fn update(
        &self,
        key: &str,
        advance: &mut dyn FnMut(Option<u64>) -> Result<u64>,
    ) -> Result<u64> {
        let _lock = self.lock_exclusive()?;
        let mut counters = self.load()?;
        let next = advance(counters.get(key).copied())?;
        counters.insert(key.to_owned(), next);
        self.save(&counters)?;
        trace!(path = %self.data_path.display(), key, next, "counter persisted");
        Ok(next)
    }
}

fn io_error(path: &Path, err: io::Error) -> IdGenError {
    IdGenError::Store(format!("{}: {err}", path.display()))
}
