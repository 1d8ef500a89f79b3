// src/web/plano_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::plano::NovoPlanoPayload,
    services::plano_service,
    state::AppState,
    templates::GeradorPage,
};
use askama::Template;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::{Html, IntoResponse},
};
use tower_sessions::Session;

// GET / (protegida por mw_auth)
pub async fn pagina_gerador(session: Session) -> AppResult<impl IntoResponse> {
    let user_email = session
        .get::<String>("user_email")
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    let template = GeradorPage { user_email };
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Falha ao renderizar página do gerador: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

// POST /api/generate
// Valida a sessão aqui mesmo (e não no mw_auth) para responder 401 em JSON.
// Fluxo: sessão → validação → prompt → Gemini → parse → insert → resposta.
pub async fn handle_gerar_plano(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<NovoPlanoPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    // A sessão é verificada antes de tocar no corpo: sem login a resposta
    // é sempre 401, mesmo quando o corpo nem é JSON.
    let user_id = session
        .get::<String>("user_id")
        .await
        .map_err(|e| AppError::SessionError(format!("Erro ao ler sessão: {}", e)))?
        .ok_or(AppError::Unauthorized)?;

    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("Corpo de /api/generate ilegível: {}", e);
        AppError::CamposObrigatorios
    })?;

    let pedido = payload.validar()?;
    tracing::info!(
        "Gerando plano de aula para '{}' ({}, {}, {} min)",
        pedido.tema_aula,
        pedido.disciplina,
        pedido.ano_escolar,
        pedido.duracao_minutos
    );

    let gerado = state.gemini.gerar_plano(&pedido).await?;

    // O insert é o último passo: qualquer falha anterior não deixa rasto na DB
    let plano = plano_service::inserir_plano(&state.db_pool, &user_id, &pedido, &gerado).await?;
    tracing::info!("📝 Plano de aula {} guardado para {}", plano.id, user_id);

    Ok(Json(plano))
}
