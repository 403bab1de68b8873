// src/startup.rs

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{config::AppState, docs, handlers};

pub fn build_router(app_state: AppState, with_swagger: bool) -> Router {
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/receivables"
               ,get(handlers::receivables::get_report)
               .post(handlers::receivables::create_receivable)
        )
        .route("/api/receivables/{id}"
               ,get(handlers::receivables::get_receivable)
               .put(handlers::receivables::update_receivable)
               .delete(handlers::receivables::delete_receivable)
        )
        .with_state(app_state);

    // Swagger só em desenvolvimento
    let app = if with_swagger {
        app.merge(docs::swagger_ui())
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}
