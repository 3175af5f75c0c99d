//! Flat-file giveaway store.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::warn;

use crate::error::AppError;
use crate::model::giveaway::GiveawayRecord;

/// Whole-file JSON persistence for giveaway records.
///
/// Every mutation follows read-modify-write semantics on the entire
/// collection: [`GiveawayStore::update`] loads the full mapping, applies one
/// change, and rewrites the file, all under a single writer lock. The lock is
/// the mutual-exclusion gate that keeps concurrent join/settle handlers from
/// silently dropping each other's changes. Reads do not take the lock;
/// instead every rewrite lands through an atomic rename, so a reader always
/// opens a complete file, never a half-written one.
///
/// Failure handling is availability-over-durability: a missing file is
/// created empty, and an unparsable file is treated as an empty mapping.
pub struct GiveawayStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl GiveawayStore {
    /// Creates a store backed by the given file path. The file itself is
    /// created lazily on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the full id → record mapping.
    ///
    /// # Returns
    /// - `Ok(map)` - The parsed collection; empty if the file was missing
    ///   (it is created) or could not be parsed (accepted data loss)
    /// - `Err(AppError::IoErr)` - The file exists but could not be read, or
    ///   the empty file could not be created
    pub async fn load(&self) -> Result<HashMap<String, GiveawayRecord>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        "Giveaway store {} is unreadable, starting empty: {err}",
                        self.path.display()
                    );
                    HashMap::new()
                }
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.write(&HashMap::new()).await?;
                Ok(HashMap::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetches a single record by id.
    pub async fn get(&self, id: &str) -> Result<Option<GiveawayRecord>, AppError> {
        Ok(self.load().await?.get(id).cloned())
    }

    /// Finds a record by the Discord message displaying it.
    ///
    /// Staff commands address giveaways by message id, which is the one id
    /// visible in the client UI.
    pub async fn find_by_message(
        &self,
        guild_id: u64,
        message_id: u64,
    ) -> Result<Option<GiveawayRecord>, AppError> {
        Ok(self
            .load()
            .await?
            .into_values()
            .find(|record| record.guild_id == guild_id && record.message_id == message_id))
    }

    /// Applies one mutation to the collection under the writer lock.
    ///
    /// Loads the full mapping, runs `mutate` on it, rewrites the file, and
    /// returns whatever `mutate` returned. The closure runs synchronously
    /// while the lock is held; callers do any notification work after this
    /// returns, so the durable state change is never blocked on Discord.
    pub async fn update<F, T>(&self, mutate: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut HashMap<String, GiveawayRecord>) -> T,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let outcome = mutate(&mut records);
        self.write(&records).await?;
        Ok(outcome)
    }

    // Stage into a sibling file and rename over the target. `tokio::fs::write`
    // truncates before writing, which would expose a partial file to the
    // lock-free read paths; the rename swaps complete states only.
    async fn write(&self, records: &HashMap<String, GiveawayRecord>) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let staging = self.path.with_extension("tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}
