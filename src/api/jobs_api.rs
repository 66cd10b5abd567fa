use crate::api::sim::Simulation;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::Result;
use crate::models::job::Job;
use crate::query::Page;
use crate::services::job_service::JobService;

/// Jobs surface of the simulated remote API: the same operations as
/// [`JobService`], each routed through the latency/failure gate.
#[derive(Clone)]
pub struct JobsApi {
    service: JobService,
    sim: Simulation,
}

impl JobsApi {
    pub fn new(service: JobService, sim: Simulation) -> Self {
        Self { service, sim }
    }

    pub async fn list(&self, query: &JobListQuery) -> Result<Page<Job>> {
        self.sim.call("jobs.list", self.service.list(query)).await
    }

    pub async fn get(&self, id: &str) -> Result<Job> {
        self.sim.call("jobs.get", self.service.get(id)).await
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        self.sim
            .call("jobs.create", self.service.create(payload))
            .await
    }

    pub async fn update(&self, id: &str, payload: UpdateJobPayload) -> Result<Job> {
        self.sim
            .call("jobs.update", self.service.update(id, payload))
            .await
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.sim.call("jobs.remove", self.service.remove(id)).await
    }

    pub async fn reorder(&self, ids: &[String]) -> Result<()> {
        self.sim
            .call("jobs.reorder", self.service.reorder(ids))
            .await
    }
}
