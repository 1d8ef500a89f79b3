pub mod auth_handlers;
pub mod mw_auth;
pub mod plano_handlers;
pub mod routes;
