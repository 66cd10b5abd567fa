pub mod assessments;
pub mod candidates;
pub mod jobs;

use crate::api::assessments_api::AssessmentsApi;
use crate::api::candidates_api::CandidatesApi;
use crate::api::jobs_api::JobsApi;

/// Lifecycle phase a slice presents to the UI, derived from the loading
/// flag and the one-shot error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Error,
}

pub(crate) fn phase_of(loading: bool, error: Option<&str>) -> Phase {
    if loading {
        Phase::Loading
    } else if error.is_some() {
        Phase::Error
    } else {
        Phase::Idle
    }
}

/// The three slices wired together the way the UI mounts them.
pub struct AppClient {
    pub jobs: jobs::JobsStore,
    pub candidates: candidates::CandidatesStore,
    pub assessments: assessments::AssessmentsStore,
}

impl AppClient {
    pub fn new(jobs: JobsApi, candidates: CandidatesApi, assessments: AssessmentsApi) -> Self {
        Self {
            jobs: jobs::JobsStore::new(jobs),
            candidates: candidates::CandidatesStore::new(candidates),
            assessments: assessments::AssessmentsStore::new(assessments),
        }
    }
}
