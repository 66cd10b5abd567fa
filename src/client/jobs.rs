use std::sync::{PoisonError, RwLock};

use crate::api::jobs_api::JobsApi;
use crate::client::Phase;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::Result;
use crate::models::job::Job;
use crate::query::Pagination;

/// Snapshot of the jobs slice.
#[derive(Debug, Clone)]
pub struct JobsState {
    pub jobs: Vec<Job>,
    pub current_job: Option<Job>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: JobListQuery,
    pub pagination: Pagination,
}

impl Default for JobsState {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            current_job: None,
            loading: false,
            error: None,
            filters: JobListQuery {
                search: Some(String::new()),
                status: Some("all".to_string()),
                page: Some(1),
                page_size: Some(10),
                sort: Some("order".to_string()),
            },
            pagination: Pagination::default(),
        }
    }
}

impl JobsState {
    pub fn phase(&self) -> Phase {
        crate::client::phase_of(self.loading, self.error.as_deref())
    }

    pub fn job_by_id(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }
}

/// Transitions the jobs slice responds to. `Pending` and `Failed` bracket
/// every request; the rest settle a specific operation or are dispatched
/// synchronously by the UI.
#[derive(Debug, Clone)]
pub enum JobsAction {
    Pending,
    JobsLoaded { jobs: Vec<Job>, pagination: Pagination },
    JobLoaded(Job),
    JobCreated(Job),
    JobUpdated(Job),
    JobDeleted(String),
    JobsReordered(Vec<String>),
    Failed(String),
    SetFilters(JobListQuery),
    SetPage(u32),
    ClearError,
    ClearCurrentJob,
}

/// Pure transition function. The store applies it under its lock; tests can
/// drive it directly without any async plumbing.
pub fn reduce(mut state: JobsState, action: JobsAction) -> JobsState {
    match action {
        JobsAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        JobsAction::JobsLoaded { jobs, pagination } => {
            state.loading = false;
            state.jobs = jobs;
            state.pagination = pagination;
        }
        JobsAction::JobLoaded(job) => {
            state.loading = false;
            state.current_job = Some(job);
        }
        JobsAction::JobCreated(job) => {
            state.loading = false;
            state.jobs.insert(0, job);
            state.pagination.total_items += 1;
        }
        JobsAction::JobUpdated(job) => {
            state.loading = false;
            if let Some(row) = state.jobs.iter_mut().find(|row| row.id == job.id) {
                *row = job.clone();
            }
            if state
                .current_job
                .as_ref()
                .is_some_and(|current| current.id == job.id)
            {
                state.current_job = Some(job);
            }
        }
        JobsAction::JobDeleted(id) => {
            state.loading = false;
            state.jobs.retain(|job| job.id != id);
            state.pagination.total_items = state.pagination.total_items.saturating_sub(1);
            if state
                .current_job
                .as_ref()
                .is_some_and(|current| current.id == id)
            {
                state.current_job = None;
            }
        }
        JobsAction::JobsReordered(ids) => {
            // Rearrange the cached rows to match the confirmed order; ids
            // the cache does not hold are dropped.
            state.loading = false;
            let mut rearranged = Vec::with_capacity(state.jobs.len());
            for id in &ids {
                if let Some(job) = state.jobs.iter().find(|job| &job.id == id) {
                    rearranged.push(job.clone());
                }
            }
            state.jobs = rearranged;
        }
        JobsAction::Failed(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        JobsAction::SetFilters(patch) => {
            // Any filter change sends the view back to page one.
            merge_filters(&mut state.filters, patch);
            state.filters.page = Some(1);
            state.pagination.current_page = 1;
        }
        JobsAction::SetPage(page) => {
            state.filters.page = Some(page);
            state.pagination.current_page = page;
        }
        JobsAction::ClearError => state.error = None,
        JobsAction::ClearCurrentJob => state.current_job = None,
    }
    state
}

fn merge_filters(filters: &mut JobListQuery, patch: JobListQuery) {
    if let Some(search) = patch.search {
        filters.search = Some(search);
    }
    if let Some(status) = patch.status {
        filters.status = Some(status);
    }
    if let Some(page_size) = patch.page_size {
        filters.page_size = Some(page_size);
    }
    if let Some(sort) = patch.sort {
        filters.sort = Some(sort);
    }
}

/// The jobs slice: a locked snapshot plus the async dispatch methods that
/// drive it through the simulated boundary.
///
/// Dispatch methods take `&self`, so overlapping calls race freely and the
/// last response to settle wins. A failed dispatch records the message on
/// the slice and also returns the error to the caller.
pub struct JobsStore {
    api: JobsApi,
    state: RwLock<JobsState>,
}

impl JobsStore {
    pub fn new(api: JobsApi) -> Self {
        Self {
            api,
            state: RwLock::new(JobsState::default()),
        }
    }

    /// Current snapshot of the slice.
    pub fn state(&self) -> JobsState {
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

    pub fn set_filters(&self, patch: JobListQuery) {
        self.apply(JobsAction::SetFilters(patch));
    }

    pub fn set_page(&self, page: u32) {
        self.apply(JobsAction::SetPage(page));
    }

    pub fn clear_error(&self) {
        self.apply(JobsAction::ClearError);
    }

    pub fn clear_current_job(&self) {
        self.apply(JobsAction::ClearCurrentJob);
    }

    /// Fetches the listing for the filters currently on the slice.
    pub async fn fetch_jobs(&self) -> Result<()> {
        self.apply(JobsAction::Pending);
        let filters = self.state().filters;
        let result = self.api.list(&filters).await;
        self.settle(result, |page| JobsAction::JobsLoaded {
            jobs: page.items,
            pagination: page.pagination,
        })
    }

    pub async fn fetch_job(&self, id: &str) -> Result<()> {
        self.apply(JobsAction::Pending);
        let result = self.api.get(id).await;
        self.settle(result, JobsAction::JobLoaded)
    }

    pub async fn create_job(&self, payload: CreateJobPayload) -> Result<()> {
        self.apply(JobsAction::Pending);
        let result = self.api.create(payload).await;
        self.settle(result, JobsAction::JobCreated)
    }

    pub async fn update_job(&self, id: &str, payload: UpdateJobPayload) -> Result<()> {
        self.apply(JobsAction::Pending);
        let result = self.api.update(id, payload).await;
        self.settle(result, JobsAction::JobUpdated)
    }

    pub async fn delete_job(&self, id: &str) -> Result<()> {
        self.apply(JobsAction::Pending);
        let result = self.api.remove(id).await;
        self.settle(result, |_| JobsAction::JobDeleted(id.to_string()))
    }

    pub async fn reorder_jobs(&self, ids: Vec<String>) -> Result<()> {
        self.apply(JobsAction::Pending);
        let result = self.api.reorder(&ids).await;
        self.settle(result, move |_| JobsAction::JobsReordered(ids))
    }

    fn apply(&self, action: JobsAction) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = reduce(std::mem::take(&mut *state), action);
        *state = next;
    }

    fn settle<T>(&self, result: Result<T>, on_ok: impl FnOnce(T) -> JobsAction) -> Result<()> {
        match result {
            Ok(value) => {
                self.apply(on_ok(value));
                Ok(())
            }
            Err(err) => {
                self.apply(JobsAction::Failed(err.to_string()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStatus;
    use crate::utils;

    fn job(id: &str, title: &str, order: u32) -> Job {
        let now = utils::time::now();
        Job {
            id: id.to_string(),
            title: title.to_string(),
            slug: utils::slug::slugify(title),
            description: String::new(),
            status: JobStatus::Active,
            tags: Vec::new(),
            location: String::new(),
            job_type: String::new(),
            department: String::new(),
            order,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pending_clears_a_stale_error() {
        let mut state = JobsState::default();
        state.error = Some("Simulated API failure".to_string());

        let state = reduce(state, JobsAction::Pending);

        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn created_job_is_prepended_and_counted() {
        let mut state = JobsState::default();
        state.jobs = vec![job("job-1", "Backend Engineer", 0)];
        state.pagination.total_items = 1;

        let state = reduce(state, JobsAction::JobCreated(job("job-2", "Designer", 1)));

        assert_eq!(state.jobs[0].id, "job-2");
        assert_eq!(state.pagination.total_items, 2);
        assert!(!state.loading);
    }

    #[test]
    fn update_refreshes_list_row_and_current_job() {
        let mut state = JobsState::default();
        state.jobs = vec![job("job-1", "Backend Engineer", 0)];
        state.current_job = Some(job("job-1", "Backend Engineer", 0));

        let mut updated = job("job-1", "Platform Engineer", 0);
        updated.status = JobStatus::Archived;
        let state = reduce(state, JobsAction::JobUpdated(updated));

        assert_eq!(state.jobs[0].title, "Platform Engineer");
        assert_eq!(
            state.current_job.as_ref().map(|job| job.title.as_str()),
            Some("Platform Engineer")
        );
    }

    #[test]
    fn delete_drops_row_and_clears_matching_current_job() {
        let mut state = JobsState::default();
        state.jobs = vec![job("job-1", "Backend Engineer", 0)];
        state.current_job = Some(job("job-1", "Backend Engineer", 0));
        state.pagination.total_items = 1;

        let state = reduce(state, JobsAction::JobDeleted("job-1".to_string()));

        assert!(state.jobs.is_empty());
        assert!(state.current_job.is_none());
        assert_eq!(state.pagination.total_items, 0);
    }

    #[test]
    fn reorder_rearranges_cache_and_drops_unknown_ids() {
        let mut state = JobsState::default();
        state.jobs = vec![
            job("job-a", "A", 0),
            job("job-b", "B", 1),
            job("job-c", "C", 2),
        ];

        let state = reduce(
            state,
            JobsAction::JobsReordered(vec![
                "job-c".to_string(),
                "job-missing".to_string(),
                "job-a".to_string(),
                "job-b".to_string(),
            ]),
        );

        let ids: Vec<&str> = state.jobs.iter().map(|job| job.id.as_str()).collect();
        assert_eq!(ids, vec!["job-c", "job-a", "job-b"]);
    }

    #[test]
    fn changing_filters_resets_to_page_one() {
        let mut state = JobsState::default();
        state.filters.page = Some(4);
        state.pagination.current_page = 4;

        let state = reduce(
            state,
            JobsAction::SetFilters(JobListQuery {
                status: Some("archived".to_string()),
                ..JobListQuery::default()
            }),
        );

        assert_eq!(state.filters.status.as_deref(), Some("archived"));
        assert_eq!(state.filters.page, Some(1));
        assert_eq!(state.pagination.current_page, 1);
        // Untouched filters keep their previous values.
        assert_eq!(state.filters.search.as_deref(), Some(""));
    }

    #[test]
    fn set_page_moves_filters_and_pagination_together() {
        let state = reduce(JobsState::default(), JobsAction::SetPage(3));

        assert_eq!(state.filters.page, Some(3));
        assert_eq!(state.pagination.current_page, 3);
    }

    #[test]
    fn failure_parks_the_message_and_stops_loading() {
        let state = reduce(JobsState::default(), JobsAction::Pending);
        let state = reduce(
            state,
            JobsAction::Failed("Simulated API failure".to_string()),
        );

        assert!(!state.loading);
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.error.as_deref(), Some("Simulated API failure"));
    }
}
