use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::assessment::{Assessment, Section};
use crate::utils::time;

/// Body of an assessment save. The job id always comes from the route path,
/// so one sent in the body is ignored; id and timestamps fall back to the
/// builder's conventions when absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveAssessmentPayload {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub sections: Vec<Section>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SaveAssessmentPayload {
    pub fn into_assessment(self, job_id: String) -> Assessment {
        let now = time::now();
        Assessment {
            id: self
                .id
                .unwrap_or_else(|| format!("assessment-{}", job_id)),
            job_id,
            title: self.title,
            description: self.description,
            sections: self.sections,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}
