//! Job board repository.

use chrono::Utc;
use druk_core::jobs::JobSearchFilter;
use druk_core::status::JobApplicationStatus;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info};

use super::constraint::{
    FK_JOB_APPLICATIONS_JOB, FK_JOBS_BUSINESS, is_foreign_key_violation, violates_foreign_key,
};
use crate::entities::{job_applications, jobs};

/// Error types for job board operations.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Job not found.
    #[error("Job not found: {0}")]
    NotFound(i32),

    /// A referenced user or business does not exist.
    #[error("Unknown {entity}: {id}")]
    UnknownReference {
        /// What was referenced.
        entity: &'static str,
        /// The id that did not resolve.
        id: i32,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for posting a job.
#[derive(Debug, Clone)]
pub struct CreateJobInput {
    /// Posting user.
    pub posted_by: i32,
    /// Hiring business, if any.
    pub business_id: Option<i32>,
    /// Job title.
    pub title: String,
    /// Role description.
    pub description: String,
    /// Sector, e.g. Technology.
    pub category: String,
    /// Entry, Mid, Senior, ...
    pub experience_level: String,
    /// Town or "Remote".
    pub location: String,
    /// full-time, part-time, contract.
    pub employment_type: String,
    /// Required skills.
    pub skills: Vec<String>,
}

/// Input for applying to a job.
#[derive(Debug, Clone)]
pub struct ApplyJobInput {
    /// Applying user.
    pub applicant_id: i32,
    /// Optional cover letter.
    pub cover_letter: Option<String>,
    /// Optional link to a resume.
    pub resume_url: Option<String>,
}

/// Job board repository.
#[derive(Debug, Clone, Copy)]
pub struct JobRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> JobRepository<'a> {
    /// Creates a new job repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts an active job.
    ///
    /// # Errors
    ///
    /// Returns `UnknownReference` if the poster or business does not exist.
    pub async fn create(&self, input: CreateJobInput) -> Result<jobs::Model, JobError> {
        let posted_by = input.posted_by;
        let business_id = input.business_id;
        let job = jobs::ActiveModel {
            business_id: Set(input.business_id),
            posted_by: Set(input.posted_by),
            title: Set(input.title),
            description: Set(input.description),
            category: Set(input.category),
            experience_level: Set(input.experience_level),
            location: Set(input.location),
            employment_type: Set(input.employment_type),
            skills: Set(input.skills),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let job = job.insert(self.db).await.map_err(|e| match business_id {
            Some(id) if violates_foreign_key(&e, FK_JOBS_BUSINESS) => JobError::UnknownReference {
                entity: "business",
                id,
            },
            _ if is_foreign_key_violation(&e) => JobError::UnknownReference {
                entity: "user",
                id: posted_by,
            },
            _ => JobError::Database(e),
        })?;

        info!(job_id = job.id, posted_by, "Job posted");
        Ok(job)
    }

    /// Searches active jobs, newest first.
    ///
    /// An empty filter returns every active job.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search(&self, filter: &JobSearchFilter) -> Result<Vec<jobs::Model>, DbErr> {
        debug!(?filter, "Searching jobs");

        let mut condition = Condition::all().add(jobs::Column::IsActive.eq(true));

        if let Some(category) = &filter.category {
            condition = condition.add(jobs::Column::Category.eq(category.as_str()));
        }
        if let Some(level) = &filter.experience_level {
            condition = condition.add(jobs::Column::ExperienceLevel.eq(level.as_str()));
        }
        if let Some(pattern) = filter.keyword_pattern() {
            condition = condition.add(
                Expr::col((jobs::Entity, jobs::Column::Title))
                    .ilike(LikeExpr::new(pattern).escape('\\')),
            );
        }

        jobs::Entity::find()
            .filter(condition)
            .order_by_desc(jobs::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Gets a job by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the job does not exist.
    pub async fn get(&self, id: i32) -> Result<jobs::Model, JobError> {
        jobs::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(JobError::NotFound(id))
    }

    /// Applies to a job with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the job does not exist, `UnknownReference` if
    /// the applicant does not.
    pub async fn apply(
        &self,
        job_id: i32,
        input: ApplyJobInput,
    ) -> Result<job_applications::Model, JobError> {
        self.get(job_id).await?;

        let applicant_id = input.applicant_id;
        let application = job_applications::ActiveModel {
            job_id: Set(job_id),
            applicant_id: Set(input.applicant_id),
            cover_letter: Set(input.cover_letter),
            resume_url: Set(input.resume_url),
            status: Set(JobApplicationStatus::Pending.as_str().to_string()),
            applied_at: Set(Utc::now().into()),
            ..Default::default()
        };

        // The job may have been removed since it was read above.
        let application = application.insert(self.db).await.map_err(|e| {
            if violates_foreign_key(&e, FK_JOB_APPLICATIONS_JOB) {
                JobError::NotFound(job_id)
            } else if is_foreign_key_violation(&e) {
                JobError::UnknownReference {
                    entity: "user",
                    id: applicant_id,
                }
            } else {
                JobError::Database(e)
            }
        })?;

        info!(job_id, applicant_id, "Job application submitted");
        Ok(application)
    }

    /// Lists the applications to one job, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn applications_for_job(
        &self,
        job_id: i32,
    ) -> Result<Vec<job_applications::Model>, DbErr> {
        job_applications::Entity::find()
            .filter(job_applications::Column::JobId.eq(job_id))
            .order_by_desc(job_applications::Column::AppliedAt)
            .all(self.db)
            .await
    }

    /// Lists the applications a user has made, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn applications_by_user(
        &self,
        applicant_id: i32,
    ) -> Result<Vec<job_applications::Model>, DbErr> {
        job_applications::Entity::find()
            .filter(job_applications::Column::ApplicantId.eq(applicant_id))
            .order_by_desc(job_applications::Column::AppliedAt)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
