use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::extract::JsonBody;
use super::validation::parse_id;
use super::{ApiError, ApiResponse, AppState, CreateCommentRequest, UpdateCommentRequest};
use crate::db::CommentRecord;
use crate::domain::{CommentId, IssueId, UserId};

/// `POST /api/issues/{id}/comment`
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<CreateCommentRequest>,
) -> Result<ApiResponse<CommentRecord>, ApiError> {
    let issue_id = IssueId::new(parse_id(&id, "issue")?);
    let comment = state
        .comment_service()
        .add_comment(issue_id, UserId::new(request.user_id), request.content)
        .await?;
    Ok(ApiResponse::created(comment))
}

/// `GET /api/issues/{id}/comments`
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<CommentRecord>>, ApiError> {
    let issue_id = IssueId::new(parse_id(&id, "issue")?);
    let comments = state.comment_service().list_comments(issue_id).await?;
    Ok(ApiResponse::ok(comments))
}

pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<CommentRecord>, ApiError> {
    let id = CommentId::new(parse_id(&id, "comment")?);
    let comment = state.comment_service().get_comment(id).await?;
    Ok(ApiResponse::ok(comment))
}

pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateCommentRequest>,
) -> Result<ApiResponse<CommentRecord>, ApiError> {
    let id = CommentId::new(parse_id(&id, "comment")?);
    let comment = state
        .comment_service()
        .update_comment(id, request.content)
        .await?;
    Ok(ApiResponse::ok(comment))
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = CommentId::new(parse_id(&id, "comment")?);
    state.comment_service().delete_comment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
