// src/models/user.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String, // UUID v4
    pub email: String,
    pub password_hash: String,
    pub created_at: Option<NaiveDateTime>,
}

// Dados do formulário de login/cadastro (os dois botões submetem os mesmos campos)
#[derive(Debug, Deserialize)]
pub struct CredenciaisForm {
    pub email: String,
    pub password: String,
}
