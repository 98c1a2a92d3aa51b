//! Entity re-exports.

pub use super::businesses::Entity as Businesses;
pub use super::cultural_activities::Entity as CulturalActivities;
pub use super::government_services::Entity as GovernmentServices;
pub use super::job_applications::Entity as JobApplications;
pub use super::jobs::Entity as Jobs;
pub use super::mini_apps::Entity as MiniApps;
pub use super::products::Entity as Products;
pub use super::residency_applications::Entity as ResidencyApplications;
pub use super::user_activities::Entity as UserActivities;
pub use super::users::Entity as Users;
