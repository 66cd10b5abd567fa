use crate::api::sim::Simulation;
use crate::error::Result;
use crate::models::assessment::Assessment;
use crate::services::assessment_service::AssessmentService;

#[derive(Clone)]
pub struct AssessmentsApi {
    service: AssessmentService,
    sim: Simulation,
}

impl AssessmentsApi {
    pub fn new(service: AssessmentService, sim: Simulation) -> Self {
        Self { service, sim }
    }

    pub async fn list_all(&self) -> Result<Vec<Assessment>> {
        self.sim
            .call("assessments.list_all", self.service.list_all())
            .await
    }

    pub async fn get_by_job_id(&self, job_id: &str) -> Result<Assessment> {
        self.sim
            .call("assessments.get_by_job_id", self.service.get_by_job_id(job_id))
            .await
    }

    pub async fn save(&self, assessment: Assessment) -> Result<Assessment> {
        self.sim
            .call("assessments.save", self.service.save(assessment))
            .await
    }

    pub async fn delete_by_job_id(&self, job_id: &str) -> Result<()> {
        self.sim
            .call("assessments.delete_by_job_id", self.service.delete_by_job_id(job_id))
            .await
    }
}
