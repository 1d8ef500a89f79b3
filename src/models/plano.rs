// src/models/plano.rs
use crate::error::{AppError, AppResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Payload recebido em POST /api/generate ---

// Todos os campos são Option para que a validação consiga devolver 400
// com a mensagem fixa, em vez de falhar na desserialização.
#[derive(Debug, Default, Deserialize)]
pub struct NovoPlanoPayload {
    pub disciplina: Option<String>,
    pub ano_escolar: Option<String>,
    pub tema_aula: Option<String>,
    pub duracao_minutos: Option<i64>,
    pub detalhes_adicionais: Option<String>,
}

impl NovoPlanoPayload {
    // Regra "truthy" do formulário original: string vazia e duração
    // zero/ausente contam como campo em falta.
    pub fn validar(self) -> AppResult<PlanoRequest> {
        let disciplina = self.disciplina.filter(|s| !s.is_empty());
        let ano_escolar = self.ano_escolar.filter(|s| !s.is_empty());
        let tema_aula = self.tema_aula.filter(|s| !s.is_empty());
        let duracao_minutos = self.duracao_minutos.filter(|d| *d != 0);

        match (disciplina, ano_escolar, tema_aula, duracao_minutos) {
            (Some(disciplina), Some(ano_escolar), Some(tema_aula), Some(duracao_minutos)) => {
                Ok(PlanoRequest {
                    disciplina,
                    ano_escolar,
                    tema_aula,
                    duracao_minutos,
                    detalhes_adicionais: self.detalhes_adicionais,
                })
            }
            _ => Err(AppError::CamposObrigatorios),
        }
    }
}

// Pedido já validado, com os quatro campos obrigatórios garantidos.
#[derive(Debug, Clone)]
pub struct PlanoRequest {
    pub disciplina: String,
    pub ano_escolar: String,
    pub tema_aula: String,
    pub duracao_minutos: i64,
    pub detalhes_adicionais: Option<String>,
}

// --- Esquema estrito que a IA deve devolver ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Etapa {
    pub etapa: String,
    pub descricao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterioRubrica {
    pub criterio: String,
    pub descricao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanoGerado {
    pub introducao_ludica: String,
    pub objetivo_bncc: String,
    pub passo_a_passo: Vec<Etapa>,
    pub rubrica_avaliacao: Vec<CriterioRubrica>,
}

// --- Linha persistida na tabela 'planos_aula' ---

// As listas ficam guardadas como JSON em colunas TEXT; esta struct
// espelha a tabela tal como o SQLite a devolve.
#[derive(Debug, FromRow)]
pub struct PlanoAulaRow {
    pub id: String,
    pub user_id: String,
    pub disciplina: String,
    pub ano_escolar: String,
    pub tema_aula: String,
    pub duracao_minutos: i64,
    pub detalhes_adicionais: Option<String>,
    pub introducao_ludica: String,
    pub objetivo_bncc: String,
    pub passo_a_passo: String,
    pub rubrica_avaliacao: String,
    pub created_at: Option<NaiveDateTime>,
}

// Plano de aula completo, tal como devolvido ao cliente.
#[derive(Debug, Clone, Serialize)]
pub struct PlanoAula {
    pub id: String,
    pub user_id: String,
    pub disciplina: String,
    pub ano_escolar: String,
    pub tema_aula: String,
    pub duracao_minutos: i64,
    pub detalhes_adicionais: Option<String>,
    pub introducao_ludica: String,
    pub objetivo_bncc: String,
    pub passo_a_passo: Vec<Etapa>,
    pub rubrica_avaliacao: Vec<CriterioRubrica>,
    pub created_at: Option<NaiveDateTime>,
}

impl TryFrom<PlanoAulaRow> for PlanoAula {
    type Error = serde_json::Error;

    fn try_from(row: PlanoAulaRow) -> Result<Self, Self::Error> {
        Ok(PlanoAula {
            id: row.id,
            user_id: row.user_id,
            disciplina: row.disciplina,
            ano_escolar: row.ano_escolar,
            tema_aula: row.tema_aula,
            duracao_minutos: row.duracao_minutos,
            detalhes_adicionais: row.detalhes_adicionais,
            introducao_ludica: row.introducao_ludica,
            objetivo_bncc: row.objetivo_bncc,
            passo_a_passo: serde_json::from_str(&row.passo_a_passo)?,
            rubrica_avaliacao: serde_json::from_str(&row.rubrica_avaliacao)?,
            created_at: row.created_at,
        })
    }
}
