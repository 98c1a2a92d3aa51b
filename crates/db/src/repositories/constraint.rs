//! Classification of constraint violations reported by Postgres.

use sea_orm::{DbErr, SqlErr};

/// `jobs.business_id` references `businesses`.
pub(crate) const FK_JOBS_BUSINESS: &str = "fk_jobs_business";

/// `job_applications.job_id` references `jobs`.
pub(crate) const FK_JOB_APPLICATIONS_JOB: &str = "fk_job_applications_job";

/// Returns true if `err` is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Returns true if `err` is a foreign key violation, e.g. an unknown owner id.
pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Returns true if `err` is a violation of the foreign key named `constraint`.
pub(crate) fn violates_foreign_key(err: &DbErr, constraint: &str) -> bool {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
            names_constraint(&message, constraint)
        }
        _ => false,
    }
}

/// Postgres names the constraint at the end of the violation message:
/// `... violates foreign key constraint "fk_jobs_business"`.
fn names_constraint(message: &str, constraint: &str) -> bool {
    message.contains(&format!("constraint \"{constraint}\""))
}
