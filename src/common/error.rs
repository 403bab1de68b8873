// src/common/error.rs

use std::{collections::HashMap, sync::LazyLock};

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{common::i18n::I18nStore, db::StoreError, middleware::i18n::Locale};

// Catálogo usado quando o erro sai sem passar por um handler (rejeições de extractor)
static DEFAULT_I18N: LazyLock<I18nStore> = LazyLock::new(I18nStore::new);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // JSON, query string ou path que o axum não conseguiu extrair
    #[error("Requisição malformada: {0}")]
    MalformedRequest(String),

    #[error("O Id não pode ser definido pelo cliente")]
    CannotPresetId,

    #[error("O Id não pode ser alterado")]
    CannotModifyId,

    #[error("Título {0} não encontrado")]
    ReceivableNotFound(i64),

    #[error("Store de títulos não inicializado")]
    MissingStore,

    // Conflito otimista com o registro ainda existente: quem chamou decide se tenta de novo
    #[error("Conflito de escrita no título {0}")]
    WriteConflict(i64),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::WriteConflict(id) => AppError::WriteConflict(id),
            StoreError::Database(e) => AppError::DatabaseError(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

/// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MalformedRequest(_)
            | AppError::CannotPresetId
            | AppError::CannotModifyId => StatusCode::BAD_REQUEST,
            AppError::ReceivableNotFound(_) | AppError::MissingStore => StatusCode::NOT_FOUND,
            AppError::WriteConflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::MalformedRequest(_) => "malformed_request",
            AppError::CannotPresetId => "cannot_preset_id",
            AppError::CannotModifyId => "cannot_modify_id",
            AppError::ReceivableNotFound(_) => "receivable_not_found",
            AppError::MissingStore => "store_unavailable",
            AppError::WriteConflict(_) => "write_conflict",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();
        let template = i18n.translate(&locale.0, self.message_key());

        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(key) => i18n.translate(&locale.0, key),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError { status, message: template, details: Some(details) }
            }
            AppError::MalformedRequest(detail) => ApiError {
                status,
                message: template.replace("{detail}", &detail),
                details: None,
            },
            AppError::ReceivableNotFound(id) => ApiError {
                status,
                message: template.replace("{id}", &id.to_string()),
                details: None,
            },
            AppError::WriteConflict(id) => {
                tracing::warn!("Conflito de escrita não resolvido no título {}", id);
                ApiError { status, message: template.replace("{id}", &id.to_string()), details: None }
            }
            ref e if status.is_server_error() => {
                // O detalhe fica só no log, nunca na resposta
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError { status, message: template, details: None }
            }
            _ => ApiError { status, message: template, details: None },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &DEFAULT_I18N).into_response()
    }
}
