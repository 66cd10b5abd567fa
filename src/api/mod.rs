pub mod assessments_api;
pub mod candidates_api;
pub mod jobs_api;
pub mod sim;
