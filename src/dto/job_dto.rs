use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::{Job, JobStatus};
use crate::query::{Page, Pagination};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1))]
    pub page_size: Option<u32>,
    pub sort: Option<String>,
}

/// Creation payload. Every field is defaulted so sparse bodies are
/// tolerated; rejecting an empty title is a presentation concern, not an
/// ingestion one.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateJobPayload {
    pub title: String,
    pub description: String,
    pub status: JobStatus,
    pub tags: Vec<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub department: String,
}

/// Shallow-merge patch: provided fields overwrite, absent ones are kept.
/// `order` is deliberately missing here; reorder owns it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateJobPayload {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPayload {
    pub job_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub pagination: Pagination,
}

impl From<Page<Job>> for JobListResponse {
    fn from(value: Page<Job>) -> Self {
        Self {
            jobs: value.items,
            pagination: value.pagination,
        }
    }
}
