pub mod plano;
pub mod user;
