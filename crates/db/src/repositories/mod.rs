//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub(crate) mod constraint;

pub mod activity;
pub mod business;
pub mod catalog;
pub mod dashboard;
pub mod job;
pub mod product;
pub mod residency;
pub mod user;

pub use activity::{ActivityError, ActivityRepository, Completion};
pub use business::{BusinessError, BusinessRepository, CreateBusinessInput};
pub use catalog::CatalogRepository;
pub use dashboard::DashboardRepository;
pub use job::{ApplyJobInput, CreateJobInput, JobError, JobRepository};
pub use product::{CreateProductInput, ProductError, ProductFilter, ProductRepository};
pub use residency::{CreateResidencyInput, ResidencyError, ResidencyRepository, StatusChange};
pub use user::{CreateUserInput, UserError, UserRepository, award_points_in};
