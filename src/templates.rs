// src/templates.rs
use askama::Template;

// Struct para o template `login.html` (ficheiro em templates/)
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    // Mensagem de erro opcional (credenciais erradas, email já registado)
    pub error: Option<String>,
}

// Página principal com o formulário do gerador de planos de aula.
// O resultado é renderizado no browser via fetch para /api/generate.
#[derive(Template)]
#[template(path = "gerador.html")]
pub struct GeradorPage {
    pub user_email: String,
}
