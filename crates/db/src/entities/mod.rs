//! `SeaORM` entity definitions.
//!
//! One module per table that the repositories read or write. Every model
//! serialises with camelCase keys, which is the wire format of the API.

pub mod prelude;

pub mod businesses;
pub mod cultural_activities;
pub mod government_services;
pub mod job_applications;
pub mod jobs;
pub mod mini_apps;
pub mod products;
pub mod residency_applications;
pub mod user_activities;
pub mod users;
