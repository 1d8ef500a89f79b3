// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, mw_auth, plano_handlers},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route(
            "/login",
            get(auth_handlers::show_login_form).post(auth_handlers::handle_login),
        )
        .route("/signup", post(auth_handlers::handle_signup))
        .route("/logout", get(auth_handlers::handle_logout))
        // A API valida a sessão no handler (401 JSON, nunca redirect)
        .route("/api/generate", post(plano_handlers::handle_gerar_plano));

    // --- Rotas Autenticadas ---
    // Exigem login; sem sessão, mw_auth redireciona para /login
    let authenticated_routes = Router::new()
        .route("/", get(plano_handlers::pagina_gerador))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}
