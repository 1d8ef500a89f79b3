// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{CredenciaisForm, User},
    services::{auth_service, user_service},
    state::AppState,
    templates::LoginPage,
};
use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect},
};
use tower_sessions::Session;

// Renderiza a página de login com uma mensagem de erro opcional
fn render_login(error: Option<String>) -> AppResult<Html<String>> {
    let template = LoginPage { error };
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template de login: {}", e);
        AppError::InternalServerError
    })
}

// Autentica a sessão após login/cadastro bem-sucedido
async fn autenticar_sessao(session: &Session, user: &User) -> AppResult<()> {
    session
        .cycle_id()
        .await // Gera novo ID de sessão (segurança)
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert("user_id", &user.id)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;
    session
        .insert("user_email", &user.email)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;
    Ok(())
}

// GET /login
pub async fn show_login_form(session: Session) -> AppResult<impl IntoResponse> {
    // Já logado? Vai direto para o gerador.
    if session.get::<String>("user_id").await.ok().flatten().is_some() {
        tracing::debug!("GET /login: utilizador já logado, redirecionando para /");
        return Ok(Redirect::to("/").into_response());
    }
    Ok(render_login(None)?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredenciaisForm>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Tentativa de login para: {}", form.email);

    let Some(user) = user_service::find_user_by_email(&state.db_pool, &form.email).await? else {
        tracing::warn!("Utilizador não encontrado: {}", form.email);
        // Mensagem genérica, igual para email e senha errados
        return Ok(render_login(Some("Email ou senha inválidos.".to_string()))?.into_response());
    };

    if !auth_service::verify_password(&form.password, &user.password_hash).await? {
        tracing::warn!("Senha incorreta para: {}", form.email);
        return Ok(render_login(Some("Email ou senha inválidos.".to_string()))?.into_response());
    }

    autenticar_sessao(&session, &user).await?;
    tracing::info!("✅ Login bem-sucedido para: {}", user.email);
    Ok(Redirect::to("/").into_response())
}

// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredenciaisForm>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Tentativa de cadastro para: {}", form.email);

    if form.email.is_empty() || form.password.is_empty() {
        return Ok(
            render_login(Some("Preencha email e senha para se cadastrar.".to_string()))?
                .into_response(),
        );
    }

    let hash = auth_service::hash_password(&form.password).await?;
    let user = match user_service::create_user(&state.db_pool, &form.email, &hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::warn!("Cadastro com email já registado: {}", form.email);
            return Ok(
                render_login(Some("Este email já está registado.".to_string()))?.into_response(),
            );
        }
        Err(e) => return Err(e.into()),
    };

    // Cadastro já deixa o utilizador autenticado
    autenticar_sessao(&session, &user).await?;
    tracing::info!("✅ Cadastro bem-sucedido para: {}", user.email);
    Ok(Redirect::to("/").into_response())
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<String> = session.get("user_id").await.ok().flatten();

    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    if let Some(id) = user_id {
        tracing::info!("🚪 Utilizador '{}' desligado.", id);
    } else {
        tracing::info!("🚪 Sessão anónima desligada.");
    }

    Ok(Redirect::to("/login"))
}
