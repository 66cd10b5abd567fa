use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// A record that can live in a [`Collection`]: serializable and addressable
/// by a string id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// One persisted collection. Rows sit in an id-ordered map behind an async
/// lock, so unsorted reads always observe primary-key order. When a data
/// directory is configured every mutation rewrites the collection's JSON
/// document through a temp file + rename; without one the collection is
/// purely in-memory.
///
/// Mutations apply atomically in memory (single writer section). Durability
/// is best-effort: a failed persist surfaces as [`Error::Storage`] with the
/// in-memory state already advanced.
#[derive(Clone)]
pub struct Collection<T: Record> {
    name: &'static str,
    path: Option<PathBuf>,
    rows: Arc<RwLock<BTreeMap<String, T>>>,
}

impl<T: Record> Collection<T> {
    pub(crate) fn in_memory(name: &'static str) -> Self {
        Self {
            name,
            path: None,
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub(crate) async fn open(name: &'static str, dir: &Path) -> Result<Self> {
        let path = dir.join(format!("{}.json", name));
        let rows = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let records: Vec<T> = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::Storage(format!("{} document is corrupt: {}", name, e)))?;
                records
                    .into_iter()
                    .map(|record| (record.id().to_string(), record))
                    .collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        tracing::info!(collection = name, rows = rows.len(), "loaded collection");

        Ok(Self {
            name,
            path: Some(path),
            rows: Arc::new(RwLock::new(rows)),
        })
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    /// Upsert by the record's own id.
    pub async fn put(&self, record: T) -> Result<()> {
        let mut rows = self.rows.write().await;
        rows.insert(record.id().to_string(), record);
        self.persist(&rows).await
    }

    pub async fn bulk_put(&self, records: Vec<T>) -> Result<()> {
        let mut rows = self.rows.write().await;
        for record in records {
            rows.insert(record.id().to_string(), record);
        }
        self.persist(&rows).await
    }

    /// Returns whether the id was present.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let removed = rows.remove(id).is_some();
        if removed {
            self.persist(&rows).await?;
        }
        Ok(removed)
    }

    /// Removes every row matching the predicate, returning how many went.
    pub async fn delete_where(&self, pred: impl Fn(&T) -> bool) -> Result<usize> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, row| !pred(row));
        let removed = before - rows.len();
        if removed > 0 {
            self.persist(&rows).await?;
        }
        Ok(removed)
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.rows.read().await.len())
    }

    /// Every row, in id order.
    pub async fn all(&self) -> Result<Vec<T>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    pub async fn find_where(&self, pred: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|row| pred(row))
            .cloned()
            .collect())
    }

    /// First match in id order, so repeated calls against an unchanged
    /// collection agree.
    pub async fn find_first(&self, pred: impl Fn(&T) -> bool) -> Result<Option<T>> {
        Ok(self.rows.read().await.values().find(|row| pred(row)).cloned())
    }

    async fn persist(&self, rows: &BTreeMap<String, T>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let snapshot: Vec<&T> = rows.values().collect();
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| Error::Storage(format!("{} serialize failed: {}", self.name, e)))?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| Error::Storage(format!("write {} failed: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| Error::Storage(format!("rename into {} failed: {}", path.display(), e)))?;
        tracing::debug!(collection = self.name, rows = rows.len(), "persisted collection");
        Ok(())
    }
}
