use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, patch, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{CommentService, IssueService, OfficerService, StatusTransitionService};
use crate::state::SharedState;

mod comments;
mod error;
pub mod extract;
mod issues;
mod observability;
mod officers;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn issue_service(&self) -> &Arc<dyn IssueService> {
        &self.shared.issue_service
    }

    #[must_use]
    pub fn transition_service(&self) -> &Arc<dyn StatusTransitionService> {
        &self.shared.transition_service
    }

    #[must_use]
    pub fn comment_service(&self) -> &Arc<dyn CommentService> {
        &self.shared.comment_service
    }

    #[must_use]
    pub fn officer_service(&self) -> &Arc<dyn OfficerService> {
        &self.shared.officer_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = cors_layer(&state.config().server.cors_allowed_origins);

    let api_router = Router::new()
        .route(
            "/issues",
            get(issues::list_issues).post(issues::create_issue),
        )
        .route(
            "/issues/{id}",
            get(issues::get_issue)
                .put(issues::update_issue)
                .delete(issues::delete_issue),
        )
        .route("/issues/{id}/status", patch(issues::transition_status))
        .route("/issues/{id}/comment", post(comments::add_comment))
        .route("/issues/{id}/comments", get(comments::list_comments))
        .route(
            "/comments/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/officers", get(officers::list_officers));

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(system::health_live))
        .route("/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_requests))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = if origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    layer
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
