use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::api::candidates_api::CandidatesApi;
use crate::client::Phase;
use crate::dto::candidate_dto::{CandidateListQuery, UpdateCandidatePayload};
use crate::error::Result;
use crate::models::candidate::{Candidate, Note, Stage};
use crate::query::Pagination;

/// Snapshot of the candidates slice. `candidates` backs the paginated list
/// view, `job_candidates` backs the kanban board for one job, and
/// `current_candidate` backs the profile page. The same record can appear
/// in all three.
#[derive(Debug, Clone)]
pub struct CandidatesState {
    pub candidates: Vec<Candidate>,
    pub job_candidates: Vec<Candidate>,
    pub current_candidate: Option<Candidate>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: CandidateListQuery,
    pub pagination: Pagination,
}

impl Default for CandidatesState {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            job_candidates: Vec::new(),
            current_candidate: None,
            loading: false,
            error: None,
            filters: CandidateListQuery {
                search: Some(String::new()),
                stage: Some("all".to_string()),
                page: Some(1),
                page_size: Some(10),
            },
            pagination: Pagination::default(),
        }
    }
}

impl CandidatesState {
    pub fn phase(&self) -> Phase {
        crate::client::phase_of(self.loading, self.error.as_deref())
    }

    pub fn candidate_by_id(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn candidates_for_job(&self, job_id: &str) -> Vec<&Candidate> {
        self.candidates
            .iter()
            .filter(|candidate| candidate.job_id == job_id)
            .collect()
    }

    /// Buckets the board rows into the six pipeline columns. Every stage is
    /// present in the result, empty columns included.
    pub fn by_stage(&self, job_id: &str) -> BTreeMap<Stage, Vec<&Candidate>> {
        let mut columns: BTreeMap<Stage, Vec<&Candidate>> = BTreeMap::new();
        for stage in Stage::ALL {
            columns.insert(stage, Vec::new());
        }
        for candidate in &self.job_candidates {
            if candidate.job_id == job_id {
                if let Some(column) = columns.get_mut(&candidate.stage) {
                    column.push(candidate);
                }
            }
        }
        columns
    }
}

#[derive(Debug, Clone)]
pub enum CandidatesAction {
    Pending,
    CandidatesLoaded {
        candidates: Vec<Candidate>,
        pagination: Pagination,
    },
    CandidateLoaded(Candidate),
    CandidateUpdated(Candidate),
    StageChanged(Candidate),
    NoteAdded {
        candidate_id: String,
        note: Note,
    },
    JobCandidatesLoaded(Vec<Candidate>),
    Failed(String),
    SetFilters(CandidateListQuery),
    SetPage(u32),
    ClearError,
    ClearCurrentCandidate,
}

/// Pure transition function for the candidates slice.
pub fn reduce(mut state: CandidatesState, action: CandidatesAction) -> CandidatesState {
    match action {
        CandidatesAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        CandidatesAction::CandidatesLoaded {
            candidates,
            pagination,
        } => {
            state.loading = false;
            state.candidates = candidates;
            state.pagination = pagination;
        }
        CandidatesAction::CandidateLoaded(candidate) => {
            state.loading = false;
            state.current_candidate = Some(candidate);
        }
        CandidatesAction::CandidateUpdated(candidate) => {
            state.loading = false;
            if let Some(row) = state
                .candidates
                .iter_mut()
                .find(|row| row.id == candidate.id)
            {
                *row = candidate.clone();
            }
            if state
                .current_candidate
                .as_ref()
                .is_some_and(|current| current.id == candidate.id)
            {
                state.current_candidate = Some(candidate);
            }
        }
        CandidatesAction::StageChanged(candidate) => {
            // A stage move can be visible on the list, the board and the
            // profile at once, so all three caches are reconciled.
            state.loading = false;
            if let Some(row) = state
                .candidates
                .iter_mut()
                .find(|row| row.id == candidate.id)
            {
                *row = candidate.clone();
            }
            if let Some(row) = state
                .job_candidates
                .iter_mut()
                .find(|row| row.id == candidate.id)
            {
                *row = candidate.clone();
            }
            if state
                .current_candidate
                .as_ref()
                .is_some_and(|current| current.id == candidate.id)
            {
                state.current_candidate = Some(candidate);
            }
        }
        CandidatesAction::NoteAdded { candidate_id, note } => {
            state.loading = false;
            if let Some(row) = state
                .candidates
                .iter_mut()
                .find(|row| row.id == candidate_id)
            {
                row.notes.push(note.clone());
            }
            if let Some(current) = state
                .current_candidate
                .as_mut()
                .filter(|current| current.id == candidate_id)
            {
                current.notes.push(note);
            }
        }
        CandidatesAction::JobCandidatesLoaded(candidates) => {
            state.loading = false;
            state.job_candidates = candidates;
        }
        CandidatesAction::Failed(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        CandidatesAction::SetFilters(patch) => {
            merge_filters(&mut state.filters, patch);
            state.filters.page = Some(1);
            state.pagination.current_page = 1;
        }
        CandidatesAction::SetPage(page) => {
            state.filters.page = Some(page);
            state.pagination.current_page = page;
        }
        CandidatesAction::ClearError => state.error = None,
        CandidatesAction::ClearCurrentCandidate => state.current_candidate = None,
    }
    state
}

fn merge_filters(filters: &mut CandidateListQuery, patch: CandidateListQuery) {
    if let Some(search) = patch.search {
        filters.search = Some(search);
    }
    if let Some(stage) = patch.stage {
        filters.stage = Some(stage);
    }
    if let Some(page_size) = patch.page_size {
        filters.page_size = Some(page_size);
    }
}

/// The candidates slice over the simulated boundary. See [`JobsStore`] for
/// the dispatch and error conventions; this store follows the same ones.
///
/// [`JobsStore`]: crate::client::jobs::JobsStore
pub struct CandidatesStore {
    api: CandidatesApi,
    state: RwLock<CandidatesState>,
}

impl CandidatesStore {
    pub fn new(api: CandidatesApi) -> Self {
        Self {
            api,
            state: RwLock::new(CandidatesState::default()),
        }
    }

    pub fn state(&self) -> CandidatesState {
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

    pub fn set_filters(&self, patch: CandidateListQuery) {
        self.apply(CandidatesAction::SetFilters(patch));
    }

    pub fn set_page(&self, page: u32) {
        self.apply(CandidatesAction::SetPage(page));
    }

    pub fn clear_error(&self) {
        self.apply(CandidatesAction::ClearError);
    }

    pub fn clear_current_candidate(&self) {
        self.apply(CandidatesAction::ClearCurrentCandidate);
    }

    pub async fn fetch_candidates(&self) -> Result<()> {
        self.apply(CandidatesAction::Pending);
        let filters = self.state().filters;
        let result = self.api.list(&filters).await;
        self.settle(result, |page| CandidatesAction::CandidatesLoaded {
            candidates: page.items,
            pagination: page.pagination,
        })
    }

    pub async fn fetch_candidate(&self, id: &str) -> Result<()> {
        self.apply(CandidatesAction::Pending);
        let result = self.api.get(id).await;
        self.settle(result, CandidatesAction::CandidateLoaded)
    }

    pub async fn update_candidate(&self, id: &str, payload: UpdateCandidatePayload) -> Result<()> {
        self.apply(CandidatesAction::Pending);
        let result = self.api.update(id, payload).await;
        self.settle(result, CandidatesAction::CandidateUpdated)
    }

    /// Moves a candidate to another pipeline stage. `moved_by` is recorded
    /// in the log only; the stored record keeps no mover.
    pub async fn change_stage(
        &self,
        id: &str,
        stage: Stage,
        moved_by: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(
            candidate_id = id,
            stage = stage.as_str(),
            moved_by = ?moved_by,
            "stage change requested"
        );
        self.apply(CandidatesAction::Pending);
        let result = self.api.change_stage(id, stage).await;
        self.settle(result, CandidatesAction::StageChanged)
    }

    pub async fn add_note(
        &self,
        id: &str,
        content: String,
        created_by: Option<String>,
    ) -> Result<()> {
        self.apply(CandidatesAction::Pending);
        let result = self.api.add_note(id, content, created_by).await;
        self.settle(result, |note| CandidatesAction::NoteAdded {
            candidate_id: id.to_string(),
            note,
        })
    }

    /// Loads the board rows for one job into `job_candidates`.
    pub async fn fetch_for_job(&self, job_id: &str) -> Result<()> {
        self.apply(CandidatesAction::Pending);
        let result = self.api.list_by_job(job_id).await;
        self.settle(result, CandidatesAction::JobCandidatesLoaded)
    }

    fn apply(&self, action: CandidatesAction) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = reduce(std::mem::take(&mut *state), action);
        *state = next;
    }

    fn settle<T>(
        &self,
        result: Result<T>,
        on_ok: impl FnOnce(T) -> CandidatesAction,
    ) -> Result<()> {
        match result {
            Ok(value) => {
                self.apply(on_ok(value));
                Ok(())
            }
            Err(err) => {
                self.apply(CandidatesAction::Failed(err.to_string()));
                Err(err)
            }
        }
    }
}
