// src/state.rs
use crate::services::gemini_service::GeminiClient;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Cliente HTTP para a API de geração (Gemini)
    pub gemini: GeminiClient,
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}

impl axum::extract::FromRef<AppState> for GeminiClient {
    fn from_ref(state: &AppState) -> GeminiClient {
        state.gemini.clone()
    }
}
