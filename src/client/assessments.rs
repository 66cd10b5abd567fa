use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::api::assessments_api::AssessmentsApi;
use crate::client::Phase;
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::utils;

/// Snapshot of the assessments slice. `by_job` is keyed by job id, which is
/// how the builder looks assessments up; `all` backs the overview list.
#[derive(Debug, Clone, Default)]
pub struct AssessmentsState {
    pub by_job: HashMap<String, Assessment>,
    pub all: Vec<Assessment>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AssessmentsState {
    pub fn phase(&self) -> Phase {
        crate::client::phase_of(self.loading, self.error.as_deref())
    }

    pub fn assessment_for_job(&self, job_id: &str) -> Option<&Assessment> {
        self.by_job.get(job_id)
    }
}

#[derive(Debug, Clone)]
pub enum AssessmentsAction {
    Pending,
    AllLoaded(Vec<Assessment>),
    Loaded(Assessment),
    Saved(Assessment),
    Deleted(String),
    Failed(String),
    ClearError,
    ClearForJob(String),
}

/// Pure transition function for the assessments slice.
pub fn reduce(mut state: AssessmentsState, action: AssessmentsAction) -> AssessmentsState {
    match action {
        AssessmentsAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        AssessmentsAction::AllLoaded(assessments) => {
            state.loading = false;
            state.all = assessments;
        }
        AssessmentsAction::Loaded(assessment) => {
            state.loading = false;
            state.by_job.insert(assessment.job_id.clone(), assessment);
        }
        AssessmentsAction::Saved(assessment) => {
            state.loading = false;
            state
                .by_job
                .insert(assessment.job_id.clone(), assessment.clone());
            if let Some(row) = state.all.iter_mut().find(|row| row.id == assessment.id) {
                *row = assessment;
            } else {
                state.all.push(assessment);
            }
        }
        AssessmentsAction::Deleted(job_id) => {
            state.loading = false;
            state.by_job.remove(&job_id);
            state.all.retain(|assessment| assessment.job_id != job_id);
        }
        AssessmentsAction::Failed(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        AssessmentsAction::ClearError => state.error = None,
        AssessmentsAction::ClearForJob(job_id) => {
            state.by_job.remove(&job_id);
        }
    }
    state
}

/// Fresh builder draft for a job with no stored assessment. Nothing is
/// written until the user saves it.
pub fn empty_draft(job_id: &str) -> Assessment {
    let now = utils::time::now();
    Assessment {
        id: format!("assessment-{}", job_id),
        job_id: job_id.to_string(),
        title: "New Assessment".to_string(),
        description: String::new(),
        sections: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// The assessments slice over the simulated boundary. Dispatch and error
/// conventions match [`JobsStore`].
///
/// [`JobsStore`]: crate::client::jobs::JobsStore
pub struct AssessmentsStore {
    api: AssessmentsApi,
    state: RwLock<AssessmentsState>,
}

impl AssessmentsStore {
    pub fn new(api: AssessmentsApi) -> Self {
        Self {
            api,
            state: RwLock::new(AssessmentsState::default()),
        }
    }

    pub fn state(&self) -> AssessmentsState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the recorded error and clears it, so it surfaces once.
    pub fn take_error(&self) -> Option<String> {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .error
            .take()
    }

    pub fn clear_error(&self) {
        self.apply(AssessmentsAction::ClearError);
    }

    /// Drops the cached assessment for a job, typically when the builder
    /// closes without saving.
    pub fn clear_for_job(&self, job_id: &str) {
        self.apply(AssessmentsAction::ClearForJob(job_id.to_string()));
    }

    pub async fn fetch_all(&self) -> Result<()> {
        self.apply(AssessmentsAction::Pending);
        let result = self.api.list_all().await;
        self.settle(result, AssessmentsAction::AllLoaded)
    }

    pub async fn fetch_for_job(&self, job_id: &str) -> Result<()> {
        self.apply(AssessmentsAction::Pending);
        let result = self.api.get_by_job_id(job_id).await;
        self.settle(result, AssessmentsAction::Loaded)
    }

    /// Like [`fetch_for_job`], but a job with no stored assessment gets a
    /// fresh draft in the cache instead of an error, which is what the
    /// builder wants when it opens.
    ///
    /// [`fetch_for_job`]: AssessmentsStore::fetch_for_job
    pub async fn ensure_for_job(&self, job_id: &str) -> Result<()> {
        self.apply(AssessmentsAction::Pending);
        match self.api.get_by_job_id(job_id).await {
            Ok(assessment) => {
                self.apply(AssessmentsAction::Loaded(assessment));
                Ok(())
            }
            Err(Error::NotFound(_)) => {
                tracing::debug!(job_id, "no stored assessment, starting a draft");
                self.apply(AssessmentsAction::Loaded(empty_draft(job_id)));
                Ok(())
            }
            Err(err) => {
                self.apply(AssessmentsAction::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn save(&self, assessment: Assessment) -> Result<()> {
        self.apply(AssessmentsAction::Pending);
        let result = self.api.save(assessment).await;
        self.settle(result, AssessmentsAction::Saved)
    }

    pub async fn delete_for_job(&self, job_id: &str) -> Result<()> {
        self.apply(AssessmentsAction::Pending);
        let result = self.api.delete_by_job_id(job_id).await;
        self.settle(result, |_| AssessmentsAction::Deleted(job_id.to_string()))
    }

    fn apply(&self, action: AssessmentsAction) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = reduce(std::mem::take(&mut *state), action);
        *state = next;
    }

    fn settle<T>(
        &self,
        result: Result<T>,
        on_ok: impl FnOnce(T) -> AssessmentsAction,
    ) -> Result<()> {
        match result {
            Ok(value) => {
                self.apply(on_ok(value));
                Ok(())
            }
            Err(err) => {
                self.apply(AssessmentsAction::Failed(err.to_string()));
                Err(err)
            }
        }
    }
}
