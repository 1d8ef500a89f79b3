// src/web/mw_auth.rs
use crate::error::AppError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Middleware que protege as páginas: sem sessão, redireciona para /login.
// (A rota /api/generate NÃO passa por aqui; a API valida a sessão no próprio
// handler para responder 401 em JSON em vez de redirecionar.)
pub async fn require_auth(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<String>("user_id").await {
        Ok(Some(user_id)) => {
            tracing::debug!("Autenticação MW: utilizador '{}' autenticado.", user_id);
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: sem sessão, redirecionando para /login");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            tracing::error!("Autenticação MW: erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!(
                "Erro ao verificar sessão: {}",
                e
            )))
        }
    }
}
