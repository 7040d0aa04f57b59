use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::invite::{DEFAULT_TEMPLATE, GROUP_LINK_TOKEN, GROUP_TOKEN, NAME_TOKEN, REVEAL_LINK_TOKEN};

/// A preset tone offered for template generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub label: &'static str,
    pub instruction: &'static str,
}

pub const TONES: &[Tone] = &[
    Tone { label: "Divertido", instruction: "Engraçado e descontraído" },
    Tone { label: "Natalino", instruction: "Espírito de Natal caloroso" },
    Tone { label: "Misterioso", instruction: "Misterioso e instigante" },
    Tone { label: "Formal", instruction: "Direto e educado" },
];

/// Used when no generation service is configured.
pub const LOCAL_TEMPLATE: &str = "Olá *{{NOME}}*! (Mensagem gerada localmente pois a IA não está configurada).\n\nO Sorteio do Amigo Invisível do grupo *{{GRUPO}}* foi realizado!\n\n🤫 *VEJA QUEM VOCÊ TIROU:* \n{{LINK_REVELACAO}}\n\n🎁 *PARTICIPE DO GRUPO:* \n{{LINK_GRUPO}}";

pub fn find_tone(label: &str) -> Option<&'static Tone> {
    TONES.iter().find(|t| t.label.eq_ignore_ascii_case(label.trim()))
}

/// Check that the service is running and reachable.
pub fn check_service(host: &str) -> Result<(), String> {
    ureq::get(host)
        .timeout(Duration::from_secs(3))
        .call()
        .map_err(|_| format!("Cannot connect to the text service at {}. Is it running?", host))?;
    Ok(())
}

/// Drafts a message template in the given tone. Never fails: without a
/// configured service, or when the service errors, a static template comes back.
pub fn generate_template(config: &Config, tone: &str) -> String {
    let host = match &config.ollama_host {
        Some(h) => h,
        None => {
            warn!("No OLLAMA_HOST configured, using the local template");
            return LOCAL_TEMPLATE.to_string();
        }
    };

    match request_template(host, &config.model, tone) {
        Ok(template) => {
            info!(tone, "message template generated");
            template
        }
        Err(e) => {
            warn!(error = %e, "template generation failed, using the default template");
            DEFAULT_TEMPLATE.to_string()
        }
    }
}

pub fn build_prompt(tone: &str) -> String {
    format!(
        r#"Crie um modelo de mensagem de WhatsApp curto, convidativo e formatado para um grupo de Amigo Invisível.

O objetivo da mensagem é fornecer DOIS links para o participante:
1. Um link para ele descobrir quem tirou (revelação).
2. Um link para entrar no grupo social e postar o que quer ganhar.

O tom da mensagem deve ser: {tone}.

Regras OBRIGATÓRIAS:
1. Use a variável {NAME_TOKEN} para o nome da pessoa.
2. Use a variável {GROUP_TOKEN} para o nome do grupo.
3. Use {REVEAL_LINK_TOKEN} para o link onde ela descobre o amigo secreto.
4. Use {GROUP_LINK_TOKEN} para o link da página do grupo/lista de desejos.
5. NÃO utilize emojis.
6. Formatação de WhatsApp (*negrito*) permitida.
Responda somente com o texto da mensagem."#
    )
}

fn request_template(host: &str, model: &str, tone: &str) -> Result<String, String> {
    let request_body = serde_json::json!({
        "model": model,
        "messages": [
            { "role": "user", "content": build_prompt(tone) }
        ],
        "stream": false
    });

    let api_url = format!("{}/api/chat", host);

    let response = ureq::post(&api_url)
        .set("Content-Type", "application/json")
        .timeout(Duration::from_secs(60))
        .send_json(request_body)
        .map_err(|e| match e {
            ureq::Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                let snippet: String = body.chars().take(200).collect();
                format!("Text service request failed (HTTP {}): {}", code, snippet)
            }
            ureq::Error::Transport(t) => format!("Could not connect to the text service: {}", t),
        })?;

    let json: serde_json::Value = response
        .into_json()
        .map_err(|e| format!("Failed to parse text service response: {}", e))?;

    extract_template(&json)
}

/// Pulls the message text out of a chat response and tidies it up.
fn extract_template(json: &serde_json::Value) -> Result<String, String> {
    let content = json
        .pointer("/message/content")
        .and_then(|v| v.as_str())
        .ok_or("No content in text service response")?;

    let cleaned = strip_fences(content.trim()).trim().to_string();
    if cleaned.is_empty() {
        return Err("Text service returned an empty message".into());
    }
    Ok(cleaned)
}

// Small models like to wrap answers in ``` blocks.
fn strip_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_tone_and_placeholders() {
        let prompt = build_prompt("Misterioso e instigante");
        assert!(prompt.contains("O tom da mensagem deve ser: Misterioso e instigante."));
        for token in [NAME_TOKEN, GROUP_TOKEN, REVEAL_LINK_TOKEN, GROUP_LINK_TOKEN] {
            assert!(prompt.contains(token), "missing {}", token);
        }
    }

    #[test]
    fn extract_template_reads_message_content() {
        let json = serde_json::json!({ "message": { "content": "  Oi {{NOME}}!  \n" } });
        assert_eq!(extract_template(&json).unwrap(), "Oi {{NOME}}!");
    }

    #[test]
    fn extract_template_strips_code_fences() {
        let json = serde_json::json!({ "message": { "content": "```text\nOi {{NOME}}\n```" } });
        assert_eq!(extract_template(&json).unwrap(), "Oi {{NOME}}");
    }

    #[test]
    fn extract_template_rejects_missing_or_empty_content() {
        assert!(extract_template(&serde_json::json!({})).is_err());
        let empty = serde_json::json!({ "message": { "content": "   " } });
        assert!(extract_template(&empty).is_err());
    }

    #[test]
    fn unconfigured_service_falls_back_to_local_template() {
        let config = Config::default();
        assert_eq!(generate_template(&config, "Direto e educado"), LOCAL_TEMPLATE);
    }

    #[test]
    fn find_tone_is_case_insensitive() {
        assert_eq!(find_tone("natalino").map(|t| t.instruction), Some("Espírito de Natal caloroso"));
        assert!(find_tone("sarcástico").is_none());
    }
}
