// src/services/plano_service.rs
use crate::{
    error::{AppError, AppResult},
    models::plano::{PlanoAula, PlanoAulaRow, PlanoGerado, PlanoRequest},
};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Insere um plano de aula (pedido + conteúdo gerado) e devolve a linha completa.
/// É o último passo do fluxo de geração: se algo anterior falhar, nada é escrito.
pub async fn inserir_plano(
    db_pool: &SqlitePool,
    user_id: &str,
    pedido: &PlanoRequest,
    gerado: &PlanoGerado,
) -> AppResult<PlanoAula> {
    let id = Uuid::new_v4().to_string();
    let passo_a_passo = serde_json::to_string(&gerado.passo_a_passo)
        .map_err(|_| AppError::InternalServerError)?;
    let rubrica_avaliacao = serde_json::to_string(&gerado.rubrica_avaliacao)
        .map_err(|_| AppError::InternalServerError)?;

    tracing::debug!("Inserindo plano de aula {} para utilizador {}", id, user_id);

    let row = sqlx::query_as::<_, PlanoAulaRow>(
        r#"
        INSERT INTO planos_aula (
            id, user_id,
            disciplina, ano_escolar, tema_aula, duracao_minutos, detalhes_adicionais,
            introducao_ludica, objetivo_bncc, passo_a_passo, rubrica_avaliacao
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        RETURNING
            id, user_id,
            disciplina, ano_escolar, tema_aula, duracao_minutos, detalhes_adicionais,
            introducao_ludica, objetivo_bncc, passo_a_passo, rubrica_avaliacao,
            created_at
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(&pedido.disciplina)
    .bind(&pedido.ano_escolar)
    .bind(&pedido.tema_aula)
    .bind(pedido.duracao_minutos)
    .bind(&pedido.detalhes_adicionais)
    .bind(&gerado.introducao_ludica)
    .bind(&gerado.objetivo_bncc)
    .bind(&passo_a_passo)
    .bind(&rubrica_avaliacao)
    .fetch_one(db_pool)
    .await?;

    PlanoAula::try_from(row).map_err(|e| {
        tracing::error!("Linha de planos_aula com JSON inválido: {}", e);
        AppError::InternalServerError
    })
}
