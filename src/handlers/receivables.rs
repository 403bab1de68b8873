// src/handlers/receivables.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{receivable::Receivable, report::ReceivablesReport},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Considera apenas títulos emitidos DEPOIS desta data (comparação estrita)
    #[param(value_type = Option<String>, format = DateTime, example = "2023-09-09T22:08:15.367Z")]
    pub start_date: Option<DateTime<Utc>>,

    /// Omite a lista de títulos e devolve só o resumo
    #[serde(default)]
    #[param(example = false)]
    pub summary_only: bool,
}

// GET /api/receivables
#[utoipa::path(
    get,
    path = "/api/receivables",
    tag = "Receivables",
    params(ReportQuery),
    responses(
        (status = 200, description = "Resumo por status e moeda (e a lista, se pedida)", body = ReceivablesReport),
        (status = 400, description = "Query string inválida"),
        (status = 404, description = "Store indisponível")
    )
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Query(query), _): WithRejection<Query<ReportQuery>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    // Sem startDate, todos os títulos com data de emissão entram
    let report = app_state.receivable_service
        .report(query.start_date, query.summary_only)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/receivables/{id}
#[utoipa::path(
    get,
    path = "/api/receivables/{id}",
    tag = "Receivables",
    params(
        ("id" = i64, Path, description = "ID do título")
    ),
    responses(
        (status = 200, description = "Título encontrado", body = Receivable),
        (status = 404, description = "Título não encontrado")
    )
)]
pub async fn get_receivable(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let receivable = app_state.receivable_service
        .find(id)
        .await
        .and_then(|found| found.ok_or(AppError::ReceivableNotFound(id)))
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(receivable)))
}

// PUT /api/receivables/{id}
#[utoipa::path(
    put,
    path = "/api/receivables/{id}",
    tag = "Receivables",
    request_body = Receivable,
    params(
        ("id" = i64, Path, description = "ID do título")
    ),
    responses(
        (status = 204, description = "Título atualizado"),
        (status = 400, description = "Dados inválidos ou Id divergente do path"),
        (status = 404, description = "Título não encontrado"),
        (status = 409, description = "Conflito de escrita concorrente")
    )
)]
pub async fn update_receivable(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(mut payload), _): WithRejection<Json<Receivable>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    // Id omitido no corpo vem do path; se vier, tem que ser o mesmo
    match payload.id {
        None => payload.id = Some(id),
        Some(body_id) if body_id != id => {
            return Err(AppError::CannotModifyId.to_api_error(&locale, &app_state.i18n_store));
        }
        Some(_) => {}
    }

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let updated = app_state.receivable_service
        .update(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    if !updated {
        return Err(AppError::ReceivableNotFound(id).to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/receivables
#[utoipa::path(
    post,
    path = "/api/receivables",
    tag = "Receivables",
    request_body = Receivable,
    responses(
        (status = 201, description = "Título criado", body = Receivable,
            headers(("Location" = String, description = "URL do novo título"))),
        (status = 400, description = "Dados inválidos ou Id pré-definido")
    )
)]
pub async fn create_receivable(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<Receivable>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    if payload.id.is_some() {
        return Err(AppError::CannotPresetId.to_api_error(&locale, &app_state.i18n_store));
    }

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state.receivable_service
        .create(payload)
        .await
        .map_err(|app_err| match app_err {
            // Sem store na criação é erro de configuração, não "não encontrado"
            AppError::MissingStore => AppError::InternalServerError(anyhow::anyhow!(
                "Entity set 'Receivables' is null."
            )),
            other => other,
        })
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let location = match created.id {
        Some(id) => format!("/api/receivables/{}", id),
        None => {
            return Err(AppError::InternalServerError(anyhow::anyhow!("Store não atribuiu id ao título"))
                .to_api_error(&locale, &app_state.i18n_store));
        }
    };

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

// DELETE /api/receivables/{id}
#[utoipa::path(
    delete,
    path = "/api/receivables/{id}",
    tag = "Receivables",
    params(
        ("id" = i64, Path, description = "ID do título")
    ),
    responses(
        (status = 204, description = "Título removido (ou já inexistente)")
    )
)]
pub async fn delete_receivable(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.receivable_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
