use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::ProgressState;

pub const COMPLETED_CHALLENGES_KEY: &str = "codele-completed-challenges";
pub const LAST_PLAYED_DATE_KEY: &str = "codele-last-played-date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// String-keyed storage for the progress ledger.
pub trait ProgressBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl ProgressBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Readers see either the old file or the new one, never a partial write.
        let tmp = self.dir.join(format!(".{}.tmp", key));
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, self.path_for(key)).map_err(write_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Owner of the persisted [`ProgressState`].
///
/// Every mutating call updates the in-memory ledger first and then writes
/// the full ledger to the backend. A failed write leaves the store marked
/// as pending; the next mutating call writes again even if it would
/// otherwise be a no-op.
pub struct ProgressStore<B: ProgressBackend> {
    backend: B,
    state: ProgressState,
    pending_write: bool,
}

impl<B: ProgressBackend> ProgressStore<B> {
    pub fn open(backend: B) -> Self {
        let mut store = Self {
            backend,
            state: ProgressState::default(),
            pending_write: false,
        };
        store.load();
        store
    }

    /// Re-reads the ledger. Unreadable or corrupt data is treated as a
    /// fresh start.
    pub fn load(&mut self) -> ProgressState {
        self.state = match self.read_state() {
            Ok(state) => state,
            Err(e) => {
                warn!("discarding stored progress: {}", e);
                ProgressState::default()
            }
        };
        self.state.clone()
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Adds `id` to the completed set. Returns whether it was newly added.
    pub fn record_completion(&mut self, id: u32) -> Result<bool, StoreError> {
        let added = self.state.completed_ids.insert(id);
        if added || self.pending_write {
            self.persist()?;
        }
        Ok(added)
    }

    pub fn record_daily_played(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        self.state.last_played_date = Some(date);
        self.persist()
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.state = ProgressState::default();
        self.persist()
    }

    fn read_state(&self) -> Result<ProgressState, StoreError> {
        let mut state = ProgressState::default();

        if let Some(raw) = self.backend.get(COMPLETED_CHALLENGES_KEY)? {
            let ids: Vec<u32> = serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                key: COMPLETED_CHALLENGES_KEY.to_string(),
                reason: e.to_string(),
            })?;
            state.completed_ids.extend(ids);
        }

        if let Some(raw) = self.backend.get(LAST_PLAYED_DATE_KEY)? {
            let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
                StoreError::Corrupt {
                    key: LAST_PLAYED_DATE_KEY.to_string(),
                    reason: e.to_string(),
                }
            })?;
            state.last_played_date = Some(date);
        }

        Ok(state)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let result = self.write_state();
        self.pending_write = result.is_err();
        if result.is_ok() {
            debug!(
                completed = self.state.completed_ids.len(),
                last_played = ?self.state.last_played_date,
                "progress saved"
            );
        }
        result
    }

    fn write_state(&mut self) -> Result<(), StoreError> {
        if self.state.completed_ids.is_empty() {
            self.backend.remove(COMPLETED_CHALLENGES_KEY)?;
        } else {
            let ids: Vec<u32> = self.state.completed_ids.iter().copied().collect();
            let json = serde_json::to_string(&ids).map_err(|e| StoreError::Corrupt {
                key: COMPLETED_CHALLENGES_KEY.to_string(),
                reason: e.to_string(),
            })?;
            self.backend.set(COMPLETED_CHALLENGES_KEY, &json)?;
        }

        match self.state.last_played_date {
            Some(date) => {
                let value = date.format(DATE_FORMAT).to_string();
                self.backend.set(LAST_PLAYED_DATE_KEY, &value)
            }
            None => self.backend.remove(LAST_PLAYED_DATE_KEY),
        }
    }
}
