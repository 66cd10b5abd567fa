use crate::database::store::Database;
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;

#[derive(Clone)]
pub struct AssessmentService {
    db: Database,
}

impl AssessmentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<Assessment>> {
        self.db.assessments.all().await
    }

    /// First match in id order. One-per-job is enforced at write time, so a
    /// well-formed store has at most one row to find.
    pub async fn get_by_job_id(&self, job_id: &str) -> Result<Assessment> {
        self.db
            .assessments
            .find_first(|assessment| assessment.job_id == job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Assessment not found".to_string()))
    }

    /// Upsert by id. Any other stored assessment claiming the same job is
    /// pruned, so a job never accumulates duplicates.
    pub async fn save(&self, assessment: Assessment) -> Result<Assessment> {
        let job_id = assessment.job_id.clone();
        let keep = assessment.id.clone();
        self.db
            .assessments
            .delete_where(|other| other.job_id == job_id && other.id != keep)
            .await?;
        self.db.assessments.put(assessment.clone()).await?;
        tracing::info!(job_id = %job_id, assessment_id = %keep, "saved assessment");
        Ok(assessment)
    }

    /// Removes every assessment for the job, duplicates included.
    pub async fn delete_by_job_id(&self, job_id: &str) -> Result<()> {
        let removed = self
            .db
            .assessments
            .delete_where(|assessment| assessment.job_id == job_id)
            .await?;
        if removed == 0 {
            return Err(Error::NotFound("Assessment not found".to_string()));
        }
        tracing::info!(job_id, removed, "deleted assessments");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time;

    fn assessment(id: &str, job_id: &str, title: &str) -> Assessment {
        let now = time::now();
        Assessment {
            id: id.to_string(),
            job_id: job_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn service() -> AssessmentService {
        AssessmentService::new(Database::in_memory())
    }

    #[tokio::test]
    async fn get_by_job_id_without_a_row_is_not_found() {
        let err = service().get_by_job_id("job-x").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "Assessment not found");
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let assessments = service();
        assessments
            .save(assessment("assessment-job-1", "job-1", "Screening quiz"))
            .await
            .unwrap();

        let found = assessments.get_by_job_id("job-1").await.unwrap();
        assert_eq!(found.id, "assessment-job-1");
        assert_eq!(found.title, "Screening quiz");
    }

    #[tokio::test]
    async fn save_prunes_other_rows_for_the_same_job() {
        let assessments = service();
        assessments
            .save(assessment("assessment-old", "job-1", "Old"))
            .await
            .unwrap();
        assessments
            .save(assessment("assessment-job-1", "job-1", "Replacement"))
            .await
            .unwrap();

        let all = assessments.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "assessment-job-1");
    }

    #[tokio::test]
    async fn delete_removes_every_row_sharing_the_job_id() {
        let assessments = service();
        // Seeded directly, bypassing save's pruning, like a malformed store.
        assessments
            .db
            .assessments
            .bulk_put(vec![
                assessment("assessment-1", "job-x", "First"),
                assessment("assessment-2", "job-x", "Second"),
                assessment("assessment-3", "job-y", "Other"),
            ])
            .await
            .unwrap();

        assessments.delete_by_job_id("job-x").await.unwrap();

        let remaining = assessments.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].job_id, "job-y");
    }

    #[tokio::test]
    async fn delete_with_no_match_is_not_found() {
        let err = service().delete_by_job_id("job-x").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
