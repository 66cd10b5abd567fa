use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::{Candidate, Note, Stage, TimelineEvent};
use crate::query::{Page, Pagination};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub stage: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1))]
    pub page_size: Option<u32>,
}

/// Shallow-merge patch. `notes` and `timeline`, when present, replace the
/// stored lists wholesale; appending a note goes through the notes endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_id: Option<String>,
    pub stage: Option<Stage>,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<Vec<String>>,
    pub notes: Option<Vec<Note>>,
    pub timeline: Option<Vec<TimelineEvent>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AddNotePayload {
    pub content: String,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<Candidate>,
    pub pagination: Pagination,
}

impl From<Page<Candidate>> for CandidateListResponse {
    fn from(value: Page<Candidate>) -> Self {
        Self {
            candidates: value.items,
            pagination: value.pagination,
        }
    }
}
