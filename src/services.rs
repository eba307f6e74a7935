pub mod auth;
pub mod dashboard_service;
pub mod session;
pub mod tenancy_service;
