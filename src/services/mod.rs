pub mod access_control;
pub mod auth_service;
pub mod project_service;
pub mod review_service;
pub mod search_service;
pub mod user_service;
