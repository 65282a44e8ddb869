mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::report::ReportBuilder;
use crate::sessions::SessionRegistry;

/// Shared handler state: the per-session stores and the report settings.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    pub reports: ReportBuilder,
}

impl AppState {
    pub fn new(reports: ReportBuilder) -> Self {
        Self::with_sessions(SessionRegistry::new(), reports)
    }

    pub fn with_sessions(sessions: SessionRegistry, reports: ReportBuilder) -> Self {
        Self { sessions, reports }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Form vocabulary
        .route("/species", get(handlers::list_species))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::get_session).delete(handlers::end_session),
        )
        // Records
        .route(
            "/sessions/{id}/records",
            post(handlers::add_record).delete(handlers::clear_records),
        )
        // Export
        .route("/sessions/{id}/report", get(handlers::export_report))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
