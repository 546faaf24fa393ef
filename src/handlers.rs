pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod dashboard;
