use crate::api::sim::Simulation;
use crate::dto::candidate_dto::{CandidateListQuery, UpdateCandidatePayload};
use crate::error::Result;
use crate::models::candidate::{Candidate, Note, Stage};
use crate::query::Page;
use crate::services::candidate_service::CandidateService;

/// Author recorded on notes when the caller does not name one.
pub const DEFAULT_NOTE_AUTHOR: &str = "user@company.com";

#[derive(Clone)]
pub struct CandidatesApi {
    service: CandidateService,
    sim: Simulation,
}

impl CandidatesApi {
    pub fn new(service: CandidateService, sim: Simulation) -> Self {
        Self { service, sim }
    }

    pub async fn list(&self, query: &CandidateListQuery) -> Result<Page<Candidate>> {
        self.sim
            .call("candidates.list", self.service.list(query))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Candidate> {
        self.sim.call("candidates.get", self.service.get(id)).await
    }

    pub async fn update(&self, id: &str, payload: UpdateCandidatePayload) -> Result<Candidate> {
        self.sim
            .call("candidates.update", self.service.update(id, payload))
            .await
    }

    pub async fn change_stage(&self, id: &str, stage: Stage) -> Result<Candidate> {
        self.sim
            .call("candidates.change_stage", self.service.change_stage(id, stage))
            .await
    }

    pub async fn list_by_job(&self, job_id: &str) -> Result<Vec<Candidate>> {
        self.sim
            .call("candidates.list_by_job", self.service.list_by_job(job_id))
            .await
    }

    pub async fn add_note(
        &self,
        id: &str,
        content: String,
        created_by: Option<String>,
    ) -> Result<Note> {
        let created_by = created_by.unwrap_or_else(|| DEFAULT_NOTE_AUTHOR.to_string());
        self.sim
            .call("candidates.add_note", self.service.add_note(id, content, created_by))
            .await
    }
}
