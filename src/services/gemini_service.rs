// src/services/gemini_service.rs
use crate::{
    error::{AppError, AppResult},
    models::plano::{PlanoGerado, PlanoRequest},
};
use serde::{Deserialize, Serialize};

const GEMINI_API_URL_PADRAO: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODELO: &str = "gemini-1.5-flash-latest";

/// Monta o prompt pedagógico com os campos do pedido embutidos.
/// Os valores entram sem qualquer escaping, tal como no formulário original.
pub fn montar_prompt(pedido: &PlanoRequest) -> String {
    let detalhes = pedido
        .detalhes_adicionais
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("Nenhum");

    format!(
        r#"
    Você é um assistente pedagógico especializado na criação de planos de aula inovadores e alinhados à BNCC.
    Sua tarefa é criar um plano de aula para o seguinte contexto:
    - Disciplina: {disciplina}
    - Ano Escolar: {ano_escolar}
    - Tema da Aula: {tema_aula}
    - Duração da Aula: {duracao_minutos} minutos
    - Detalhes Adicionais: {detalhes}

    Por favor, gere o plano de aula no seguinte formato JSON, sem incluir markdown (apenas o objeto JSON puro):
    {{
      "introducao_ludica": "Uma descrição criativa e engajadora para iniciar a aula e capturar a atenção dos alunos.",
      "objetivo_bncc": "Liste o principal objetivo de aprendizagem, mencionando o código da habilidade da BNCC correspondente, se possível.",
      "passo_a_passo": [
        {{ "etapa": "Introdução (10 min)", "descricao": "Descrição da atividade inicial." }},
        {{ "etapa": "Desenvolvimento (30 min)", "descricao": "Descrição da atividade principal." }},
        {{ "etapa": "Conclusão (10 min)", "descricao": "Descrição da atividade de fechamento e revisão." }}
      ],
      "rubrica_avaliacao": [
        {{ "criterio": "Participação", "descricao": "Avalia o engajamento do aluno nas atividades." }},
        {{ "criterio": "Compreensão do Conceito", "descricao": "Avalia a capacidade do aluno de explicar o tema com suas próprias palavras." }},
        {{ "criterio": "Aplicação Prática", "descricao": "Avalia a performance do aluno na atividade principal." }}
      ]
    }}
  "#,
        disciplina = pedido.disciplina,
        ano_escolar = pedido.ano_escolar,
        tema_aula = pedido.tema_aula,
        duracao_minutos = pedido.duracao_minutos,
        detalhes = detalhes,
    )
}

// --- Corpo do pedido para a API Gemini ---

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

// --- Envelope da resposta ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

// O texto do plano vem aninhado em candidates[0].content.parts[0].text
fn extrair_texto(envelope: GeminiResponse) -> AppResult<String> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| {
            AppError::GeminiRespostaInvalida("envelope sem candidatos/partes".to_string())
        })
}

/// Cliente para a API generativa. Uma única chamada best-effort por pedido,
/// sem retry e sem timeout configurado.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        GeminiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Lê GEMINI_API_KEY (obrigatória) e GEMINI_API_URL (opcional, útil em testes).
    pub fn from_env() -> AppResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")?;
        let base_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| GEMINI_API_URL_PADRAO.to_string());
        Ok(Self::new(api_key, base_url))
    }

    /// Envia o prompt ao Gemini e interpreta o plano devolvido.
    pub async fn gerar_plano(&self, pedido: &PlanoRequest) -> AppResult<PlanoGerado> {
        let prompt = montar_prompt(pedido);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, GEMINI_MODELO
        );

        let corpo = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        tracing::debug!("Chamando API Gemini para tema '{}'", pedido.tema_aula);
        let resposta = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&corpo)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Falha de rede ao chamar a API Gemini: {:?}", e);
                AppError::GeminiIndisponivel(e.to_string())
            })?;

        if !resposta.status().is_success() {
            let status = resposta.status();
            let corpo_erro = resposta.text().await.unwrap_or_default();
            tracing::error!("Erro da API Gemini ({}): {}", status, corpo_erro);
            return Err(AppError::GeminiIndisponivel(format!("status {}", status)));
        }

        let envelope: GeminiResponse = resposta.json().await.map_err(|e| {
            tracing::error!("Envelope da API Gemini ilegível: {:?}", e);
            AppError::GeminiRespostaInvalida(e.to_string())
        })?;

        let texto = extrair_texto(envelope)?;

        serde_json::from_str::<PlanoGerado>(&texto).map_err(|e| {
            tracing::error!("Texto devolvido pela IA não é o JSON esperado: {}", e);
            AppError::GeminiRespostaInvalida(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pedido_exemplo() -> PlanoRequest {
        PlanoRequest {
            disciplina: "Ciências".into(),
            ano_escolar: "6º ano".into(),
            tema_aula: "Sistema Solar".into(),
            duracao_minutos: 50,
            detalhes_adicionais: None,
        }
    }

    #[test]
    fn prompt_embute_todos_os_campos() {
        let prompt = montar_prompt(&pedido_exemplo());
        assert!(prompt.contains("- Disciplina: Ciências"));
        assert!(prompt.contains("- Ano Escolar: 6º ano"));
        assert!(prompt.contains("- Tema da Aula: Sistema Solar"));
        assert!(prompt.contains("- Duração da Aula: 50 minutos"));
        assert!(prompt.contains("- Detalhes Adicionais: Nenhum"));
        // o modelo deve devolver JSON puro
        assert!(prompt.contains("\"passo_a_passo\""));
        assert!(prompt.contains("\"rubrica_avaliacao\""));
    }

    #[test]
    fn prompt_usa_detalhes_quando_presentes() {
        let pedido = PlanoRequest {
            detalhes_adicionais: Some("turma com 40 alunos".into()),
            ..pedido_exemplo()
        };
        let prompt = montar_prompt(&pedido);
        assert!(prompt.contains("- Detalhes Adicionais: turma com 40 alunos"));
        assert!(!prompt.contains("- Detalhes Adicionais: Nenhum"));
    }

    #[test]
    fn detalhes_vazios_contam_como_nenhum() {
        let pedido = PlanoRequest {
            detalhes_adicionais: Some(String::new()),
            ..pedido_exemplo()
        };
        assert!(montar_prompt(&pedido).contains("- Detalhes Adicionais: Nenhum"));
    }

    #[test]
    fn extrai_texto_do_envelope() {
        let envelope: GeminiResponse = serde_json::from_str(
            r#"{ "candidates": [ { "content": { "parts": [ { "text": "{}" } ] } } ] }"#,
        )
        .unwrap();
        assert_eq!(extrair_texto(envelope).unwrap(), "{}");
    }

    #[test]
    fn envelope_sem_candidatos_e_erro() {
        let envelope: GeminiResponse = serde_json::from_str(r#"{ "candidates": [] }"#).unwrap();
        assert!(matches!(
            extrair_texto(envelope),
            Err(AppError::GeminiRespostaInvalida(_))
        ));
    }
}
