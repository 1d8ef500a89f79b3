// src/services/user_service.rs
use crate::{error::AppResult, models::user::User};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Busca um utilizador pelo email (usado no login).
pub async fn find_user_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por email: {}", email);
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(db_pool)
    .await?;

    Ok(user)
}

/// Cria um utilizador novo com o hash já calculado.
/// Devolve sqlx::Error em caso de email duplicado (constraint UNIQUE);
/// o handler de cadastro trata esse caso.
pub async fn create_user(
    db_pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    tracing::debug!("Criando utilizador {} ({})", email, id);

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash)
        VALUES (?1, ?2, ?3)
        RETURNING id, email, password_hash, created_at
        "#,
    )
    .bind(&id)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db_pool)
    .await
}
