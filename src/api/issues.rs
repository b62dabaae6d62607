//! Issue endpoints.
//!
//! Handlers parse and delegate; rules live in [`crate::services::IssueService`]
//! and [`crate::services::StatusTransitionService`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::extract::JsonBody;
use super::validation::parse_id;
use super::{ApiError, ApiResponse, AppState, ListIssuesQuery, StatusTransitionRequest};
use crate::db::IssueRecord;
use crate::domain::{IssueId, OfficerId, StatusId};
use crate::services::IssueInput;

/// `POST /api/issues`
pub async fn create_issue(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<IssueInput>,
) -> Result<ApiResponse<IssueRecord>, ApiError> {
    let issue = state.issue_service().create_issue(input).await?;
    Ok(ApiResponse::created(issue))
}

/// `GET /api/issues?status=CODE`
///
/// An empty `status` is the same as no filter.
pub async fn list_issues(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListIssuesQuery>,
) -> Result<ApiResponse<Vec<IssueRecord>>, ApiError> {
    let status = query.status.as_deref().filter(|s| !s.is_empty());
    let issues = state.issue_service().list_issues(status).await?;
    Ok(ApiResponse::ok(issues))
}

/// `GET /api/issues/{id}`
pub async fn get_issue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<IssueRecord>, ApiError> {
    let id = IssueId::new(parse_id(&id, "issue")?);
    let issue = state.issue_service().get_issue(id).await?;
    Ok(ApiResponse::ok(issue))
}

/// `PUT /api/issues/{id}`
pub async fn update_issue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<IssueInput>,
) -> Result<ApiResponse<IssueRecord>, ApiError> {
    let id = IssueId::new(parse_id(&id, "issue")?);
    let issue = state.issue_service().update_issue(id, input).await?;
    Ok(ApiResponse::ok(issue))
}

/// `DELETE /api/issues/{id}`
pub async fn delete_issue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = IssueId::new(parse_id(&id, "issue")?);
    state.issue_service().delete_issue(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /api/issues/{id}/status`
pub async fn transition_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<StatusTransitionRequest>,
) -> Result<ApiResponse<IssueRecord>, ApiError> {
    let id = IssueId::new(parse_id(&id, "issue")?);
    let issue = state
        .transition_service()
        .transition_status(
            id,
            StatusId::new(request.new_status_id),
            OfficerId::new(request.changed_by),
            request.comment,
        )
        .await?;
    Ok(ApiResponse::ok(issue))
}
