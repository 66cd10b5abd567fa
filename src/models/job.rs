use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub status: JobStatus,
    pub tags: Vec<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Board position, maintained by reorder. Dense from 0 on a fresh store.
    pub order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Draft => "draft",
            JobStatus::Archived => "archived",
        }
    }
}

/// Sort keys accepted by the jobs listing. Anything unrecognized falls back
/// to board order, which is also the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    #[default]
    Order,
    Title,
    CreatedAt,
}

impl JobSort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("title") => JobSort::Title,
            Some("createdAt") => JobSort::CreatedAt,
            _ => JobSort::Order,
        }
    }
}
