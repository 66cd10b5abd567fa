use crate::database::store::Database;
use crate::dto::candidate_dto::{CandidateListQuery, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, Note, Stage};
use crate::query::{contains_ci, paginate, Page, PageRequest};
use crate::utils::{id, time};

#[derive(Clone)]
pub struct CandidateService {
    db: Database,
}

impl CandidateService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Candidates have no sort parameter; the listing keeps storage order.
    pub async fn list(&self, query: &CandidateListQuery) -> Result<Page<Candidate>> {
        let mut candidates = self.db.candidates.all().await?;

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            candidates.retain(|candidate| {
                contains_ci(&candidate.name, search) || contains_ci(&candidate.email, search)
            });
        }
        if let Some(stage) = query.stage.as_deref() {
            if stage != "all" {
                candidates.retain(|candidate| candidate.stage.as_str() == stage);
            }
        }

        let request = PageRequest {
            page: query.page.unwrap_or(1),
            page_size: query.page_size.unwrap_or(10),
        };
        Ok(paginate(candidates, request))
    }

    pub async fn get(&self, id: &str) -> Result<Candidate> {
        self.db
            .candidates
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    /// Shallow merge. Candidates carry no `updatedAt`, so nothing is bumped.
    pub async fn update(&self, id: &str, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let mut candidate = self.get(id).await?;

        if let Some(name) = payload.name {
            candidate.name = name;
        }
        if let Some(email) = payload.email {
            candidate.email = email;
        }
        if let Some(phone) = payload.phone {
            candidate.phone = phone;
        }
        if let Some(job_id) = payload.job_id {
            candidate.job_id = job_id;
        }
        if let Some(stage) = payload.stage {
            candidate.stage = stage;
        }
        if let Some(avatar) = payload.avatar {
            candidate.avatar = avatar;
        }
        if let Some(location) = payload.location {
            candidate.location = location;
        }
        if let Some(experience) = payload.experience {
            candidate.experience = experience;
        }
        if let Some(skills) = payload.skills {
            candidate.skills = skills;
        }
        if let Some(notes) = payload.notes {
            candidate.notes = notes;
        }
        if let Some(timeline) = payload.timeline {
            candidate.timeline = timeline;
        }

        self.db.candidates.put(candidate.clone()).await?;
        Ok(candidate)
    }

    pub async fn change_stage(&self, id: &str, stage: Stage) -> Result<Candidate> {
        let candidate = self
            .update(
                id,
                UpdateCandidatePayload {
                    stage: Some(stage),
                    ..UpdateCandidatePayload::default()
                },
            )
            .await?;
        tracing::info!(candidate_id = id, stage = stage.as_str(), "moved candidate");
        Ok(candidate)
    }

    pub async fn list_by_job(&self, job_id: &str) -> Result<Vec<Candidate>> {
        self.db
            .candidates
            .find_where(|candidate| candidate.job_id == job_id)
            .await
    }

    /// Appends a note; never touches the existing ones.
    pub async fn add_note(
        &self,
        candidate_id: &str,
        content: String,
        created_by: String,
    ) -> Result<Note> {
        let mut candidate = self.get(candidate_id).await?;
        let note = Note {
            id: id::prefixed("note"),
            content,
            created_at: time::now(),
            created_by,
        };
        candidate.notes.push(note.clone());
        self.db.candidates.put(candidate).await?;
        Ok(note)
    }
}
