pub mod analytics_service;
pub mod auth;
pub mod credentials;
pub mod dashboard_service;
pub mod session_store;
