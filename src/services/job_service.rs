use crate::database::store::Database;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobSort};
use crate::query::{contains_ci, paginate, Page, PageRequest};
use crate::utils::{id, slug, time};

#[derive(Clone)]
pub struct JobService {
    db: Database,
}

impl JobService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, query: &JobListQuery) -> Result<Page<Job>> {
        let mut jobs = self.db.jobs.all().await?;
        jobs.sort_by_key(|job| job.order);

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            jobs.retain(|job| {
                contains_ci(&job.title, search) || job.tags.iter().any(|tag| contains_ci(tag, search))
            });
        }
        if let Some(status) = query.status.as_deref() {
            if status != "all" {
                // An unrecognized status matches nothing rather than erroring.
                jobs.retain(|job| job.status.as_str() == status);
            }
        }

        match JobSort::from_param(query.sort.as_deref()) {
            JobSort::Order => jobs.sort_by_key(|job| job.order),
            JobSort::Title => jobs.sort_by(|a, b| a.title.cmp(&b.title)),
            JobSort::CreatedAt => jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        let request = PageRequest {
            page: query.page.unwrap_or(1),
            page_size: query.page_size.unwrap_or(10),
        };
        Ok(paginate(jobs, request))
    }

    pub async fn get(&self, id: &str) -> Result<Job> {
        self.db
            .jobs
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let now = time::now();
        let slug = slug::slugify(&payload.title);
        // Append to the end of the board.
        let order = self.db.jobs.count().await? as u32;

        let job = Job {
            id: id::prefixed("job"),
            title: payload.title,
            slug,
            description: payload.description,
            status: payload.status,
            tags: payload.tags,
            location: payload.location,
            job_type: payload.job_type,
            department: payload.department,
            created_at: now,
            updated_at: now,
            order,
        };
        self.db.jobs.put(job.clone()).await?;
        tracing::info!(job_id = %job.id, title = %job.title, "created job");
        Ok(job)
    }

    pub async fn update(&self, id: &str, payload: UpdateJobPayload) -> Result<Job> {
        let mut job = self.get(id).await?;

        if let Some(title) = payload.title {
            job.title = title;
        }
        if let Some(slug) = payload.slug {
            job.slug = slug;
        }
        if let Some(description) = payload.description {
            job.description = description;
        }
        if let Some(status) = payload.status {
            job.status = status;
        }
        if let Some(tags) = payload.tags {
            job.tags = tags;
        }
        if let Some(location) = payload.location {
            job.location = location;
        }
        if let Some(job_type) = payload.job_type {
            job.job_type = job_type;
        }
        if let Some(department) = payload.department {
            job.department = department;
        }
        job.updated_at = time::now();

        self.db.jobs.put(job.clone()).await?;
        Ok(job)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        if !self.db.jobs.delete(id).await? {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        tracing::info!(job_id = id, "deleted job");
        Ok(())
    }

    /// Rewrites every listed job's `order` to its index in `ids`. Ids absent
    /// from the store are skipped silently; untouched jobs keep their order.
    pub async fn reorder(&self, ids: &[String]) -> Result<()> {
        let now = time::now();
        let mut touched = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            if let Some(mut job) = self.db.jobs.get(id).await? {
                job.order = index as u32;
                job.updated_at = now;
                touched.push(job);
            }
        }
        self.db.jobs.bulk_put(touched).await?;
        tracing::info!(count = ids.len(), "reordered jobs");
        Ok(())
    }
}
