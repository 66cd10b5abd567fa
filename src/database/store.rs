use std::path::Path;

use crate::database::collection::{Collection, Record};
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::candidate::Candidate;
use crate::models::job::Job;

impl Record for Job {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Candidate {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Assessment {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Handle on the three collections. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Database {
    pub jobs: Collection<Job>,
    pub candidates: Collection<Candidate>,
    pub assessments: Collection<Assessment>,
}

impl Database {
    /// Opens (creating if needed) a data directory with one JSON document
    /// per collection.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::Storage(format!("create {} failed: {}", dir.display(), e)))?;

        Ok(Self {
            jobs: Collection::open("jobs", dir).await?,
            candidates: Collection::open("candidates", dir).await?,
            assessments: Collection::open("assessments", dir).await?,
        })
    }

    /// Ephemeral database with identical semantics and no disk backing.
    pub fn in_memory() -> Self {
        Self {
            jobs: Collection::in_memory("jobs"),
            candidates: Collection::in_memory("candidates"),
            assessments: Collection::in_memory("assessments"),
        }
    }
}
