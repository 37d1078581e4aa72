// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

const FALLBACK_LANG: &str = "pt";

// Mensagens de erro por idioma. Chave -> texto.
const PT: &[(&str, &str)] = &[
    ("validation_error", "Um ou mais campos são inválidos."),
    ("email_already_exists", "Este e-mail já está em uso."),
    ("invalid_credentials", "Email ou senha incorretos, ou conta inativa!"),
    ("invalid_token", "Token de autenticação inválido ou ausente."),
    ("forbidden", "Você precisa da permissão '{capability}' para realizar esta ação."),
    ("user_not_found", "Usuário não encontrado."),
    ("reseller_not_found", "Revenda não encontrada."),
    ("customer_not_found", "Cliente não encontrado."),
    ("plan_not_found", "Plano não encontrado."),
    ("banner_not_found", "Banner não encontrado."),
    ("content_not_found", "Nenhum título encontrado no acervo."),
    ("invalid_date", "Data inválida. Use AAAA-MM-DD ou RFC 3339."),
    ("invalid_phone_number", "Número de WhatsApp inválido."),
    ("internal_error", "Ocorreu um erro inesperado."),
];

const EN: &[(&str, &str)] = &[
    ("validation_error", "One or more fields are invalid."),
    ("email_already_exists", "This e-mail is already in use."),
    ("invalid_credentials", "Wrong e-mail or password, or inactive account."),
    ("invalid_token", "Missing or invalid authentication token."),
    ("forbidden", "You need the '{capability}' permission to perform this action."),
    ("user_not_found", "User not found."),
    ("reseller_not_found", "Reseller not found."),
    ("customer_not_found", "Customer not found."),
    ("plan_not_found", "Plan not found."),
    ("banner_not_found", "Banner not found."),
    ("content_not_found", "No matching title in the catalog."),
    ("invalid_date", "Invalid date. Use YYYY-MM-DD or RFC 3339."),
    ("invalid_phone_number", "Invalid WhatsApp number."),
    ("internal_error", "An unexpected error occurred."),
];

#[derive(Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<&'static str, HashMap<&'static str, &'static str>>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self {
            messages: Arc::new(messages),
        }
    }

    /// Idioma desconhecido cai no português; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.messages
                    .get(FALLBACK_LANG)
                    .and_then(|table| table.get(key))
            })
            .map(|message| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "plan_not_found"), "Plano não encontrado.");
        assert_eq!(store.translate("en", "plan_not_found"), "Plan not found.");
    }

    #[test]
    fn every_key_exists_in_both_languages() {
        for (key, _) in PT {
            assert!(EN.iter().any(|(k, _)| k == key), "faltando em en: {key}");
        }
    }
}
