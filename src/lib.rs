pub mod api;
pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;
pub mod utils;

use crate::api::assessments_api::AssessmentsApi;
use crate::api::candidates_api::CandidatesApi;
use crate::api::jobs_api::JobsApi;
use crate::api::sim::Simulation;
use crate::database::store::Database;
use crate::services::assessment_service::AssessmentService;
use crate::services::candidate_service::CandidateService;
use crate::services::job_service::JobService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jobs_api: JobsApi,
    pub candidates_api: CandidatesApi,
    pub assessments_api: AssessmentsApi,
}

impl AppState {
    pub fn new(db: Database, sim: Simulation) -> Self {
        let jobs_api = JobsApi::new(JobService::new(db.clone()), sim.clone());
        let candidates_api = CandidatesApi::new(CandidateService::new(db.clone()), sim.clone());
        let assessments_api = AssessmentsApi::new(AssessmentService::new(db.clone()), sim);

        Self {
            db,
            jobs_api,
            candidates_api,
            assessments_api,
        }
    }
}
