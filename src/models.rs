pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod warehouse;
