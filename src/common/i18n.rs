// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    ("validation_failed", "One or more fields are invalid."),
    ("malformed_request", "Malformed request: {detail}"),
    ("cannot_preset_id", "Cannot pre-set the Id field."),
    ("cannot_modify_id", "Cannot modify the Id field."),
    ("receivable_not_found", "Receivable {id} was not found."),
    ("store_unavailable", "Entity set 'Receivables' is null."),
    ("write_conflict", "Receivable {id} was modified by another request."),
    ("internal_error", "An unexpected error occurred."),
    // Mensagens de validação de campo
    ("required", "This field is required."),
    ("length_1_50", "Must be between 1 and 50 characters."),
    ("max_50", "Must be at most 50 characters."),
    ("invalid_currency_code", "Must be a 3-letter ISO 4217 currency code."),
];

const PT: &[(&str, &str)] = &[
    ("validation_failed", "Um ou mais campos são inválidos."),
    ("malformed_request", "Requisição malformada: {detail}"),
    ("cannot_preset_id", "Não é possível definir o campo Id."),
    ("cannot_modify_id", "Não é possível alterar o campo Id."),
    ("receivable_not_found", "Título {id} não encontrado."),
    ("store_unavailable", "O repositório de títulos não está disponível."),
    ("write_conflict", "O título {id} foi alterado por outra requisição."),
    ("internal_error", "Ocorreu um erro inesperado."),
    ("required", "Campo obrigatório."),
    ("length_1_50", "Deve ter entre 1 e 50 caracteres."),
    ("max_50", "Deve ter no máximo 50 caracteres."),
    ("invalid_currency_code", "Deve ser um código de moeda ISO 4217 de 3 letras."),
];

/// Catálogo de mensagens por idioma. Chaves desconhecidas caem no inglês
/// e, em último caso, na própria chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let catalogs = [("en", EN), ("pt", PT)]
            .into_iter()
            .map(|(lang, entries)| (lang, entries.iter().copied().collect::<HashMap<_, _>>()))
            .collect();

        Self { catalogs }
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.catalogs.contains_key(lang)
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|catalog| catalog.get(key)))
            .map(|message| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
