#![allow(dead_code)]

use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
use axum_test::{TestServer, TestServerConfig};
use gerador_aulas::{services::gemini_service::GeminiClient, state::AppState, web};
use serde_json::{json, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use time::Duration;
use tokio::net::TcpListener;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

// Pool SQLite em memória com as migrações aplicadas.
// max_connections(1) para que todas as queries vejam a mesma base.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

// Servidor de teste com a mesma pilha de sessões da aplicação real
// e o cliente Gemini apontado para `gemini_base_url`.
pub async fn create_test_server(pool: SqlitePool, gemini_base_url: &str) -> TestServer {
    let session_store = SqliteStore::new(pool.clone())
        .with_table_name("sessions")
        .unwrap();
    session_store.migrate().await.unwrap();

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));

    let state = AppState {
        db_pool: pool,
        gemini: GeminiClient::new("chave-de-teste", gemini_base_url),
    };

    let app = web::routes::create_router(state).layer(session_layer);

    let config = TestServerConfig {
        // Guarda os cookies de sessão entre requisições
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(app, config).unwrap()
}

// Sobe um servidor HTTP local que imita o endpoint generateContent do Gemini,
// respondendo sempre com o status e corpo dados. Devolve a base URL.
pub async fn mock_gemini(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/v1beta/models/{model}",
        post(move |_: Path<String>| {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

// Envelope do Gemini com o texto embutido em candidates[0].content.parts[0].text
pub fn envelope_gemini(texto: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": texto } ] } }
        ]
    })
}

// Texto de plano de aula no esquema estrito esperado pelo endpoint
pub fn texto_plano_valido() -> String {
    json!({
        "introducao_ludica": "Comece a aula com uma viagem imaginária pelo espaço.",
        "objetivo_bncc": "Compreender o Sistema Solar (EF06CI13).",
        "passo_a_passo": [
            { "etapa": "Introdução (10 min)", "descricao": "Conversa inicial sobre os planetas." },
            { "etapa": "Desenvolvimento (30 min)", "descricao": "Construção de uma maquete em grupos." },
            { "etapa": "Conclusão (10 min)", "descricao": "Apresentação das maquetes e revisão." }
        ],
        "rubrica_avaliacao": [
            { "criterio": "Participação", "descricao": "Avalia o engajamento do aluno." },
            { "criterio": "Compreensão do Conceito", "descricao": "Avalia a explicação com as próprias palavras." }
        ]
    })
    .to_string()
}

// Corpo de pedido completo para POST /api/generate
pub fn payload_valido() -> Value {
    json!({
        "disciplina": "Ciências",
        "ano_escolar": "6º ano",
        "tema_aula": "Sistema Solar",
        "duracao_minutos": 50,
        "detalhes_adicionais": "Turma participativa"
    })
}

// Cadastra um utilizador novo; o cookie de sessão fica guardado no servidor de teste.
pub async fn cadastrar_e_logar(server: &TestServer, email: &str) {
    let resposta = server
        .post("/signup")
        .form(&[("email", email), ("password", "senha-muito-secreta")])
        .await;
    resposta.assert_status(StatusCode::SEE_OTHER);
}

pub async fn contar_planos(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM planos_aula")
        .fetch_one(pool)
        .await
        .unwrap()
}
