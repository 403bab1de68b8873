// src/docs.rs

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Receivables API",
        description = "Cadastro de títulos a receber e relatório por status e moeda"
    ),
    paths(
        // --- Receivables ---
        handlers::receivables::get_report,
        handlers::receivables::get_receivable,
        handlers::receivables::update_receivable,
        handlers::receivables::create_receivable,
        handlers::receivables::delete_receivable,
    ),
    components(
        schemas(
            // --- Receivables ---
            models::receivable::Receivable,

            // --- Report ---
            models::report::ReceivableStatus,
            models::report::Stats,
            models::report::ReceivablesReport,
        )
    ),
    tags(
        (name = "Receivables", description = "Títulos a receber e relatório consolidado")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
