pub mod auth_service;
pub mod gemini_service;
pub mod plano_service;
pub mod user_service;
