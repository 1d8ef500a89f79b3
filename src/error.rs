// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    // POST /api/generate sem sessão válida
    #[error("Não autorizado")]
    Unauthorized,

    // Algum dos quatro campos obrigatórios em falta ou vazio
    #[error("Campos obrigatórios em falta")]
    CamposObrigatorios,

    // A API Gemini respondeu com status de erro (detalhe só no log)
    #[error("Falha ao comunicar com a IA: {0}")]
    GeminiIndisponivel(String),

    // A API Gemini respondeu 200 mas o texto não é o JSON esperado
    #[error("Resposta da IA fora do formato esperado: {0}")]
    GeminiRespostaInvalida(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Converte AppError numa resposta JSON { "error": "..." }.
// O detalhe do erro fica apenas no log do servidor; o cliente recebe
// sempre uma mensagem genérica.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Não autorizado"),
            AppError::CamposObrigatorios => (
                StatusCode::BAD_REQUEST,
                "Todos os campos obrigatórios devem ser preenchidos",
            ),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Email ou senha inválidos.")
            }
            AppError::GeminiIndisponivel(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Falha ao comunicar com a IA.")
            }
            AppError::GeminiRespostaInvalida(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A IA devolveu uma resposta que não foi possível interpretar.",
            ),
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Falha ao salvar o plano de aula no banco de dados.",
            ),
            AppError::EnvVarError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::PasswordHashingError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar credenciais.",
            ),
            AppError::SessionError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro na gestão da sua sessão.",
            ),
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        (status, Json(json!({ "error": user_message }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
