use super::ServiceError;
use crate::db::CommentRecord;
use crate::domain::{CommentId, IssueId, UserId};

#[async_trait::async_trait]
pub trait CommentService: Send + Sync {
    /// Adds a comment to an existing issue and returns it with its author
    /// and issue.
    async fn add_comment(
        &self,
        issue_id: IssueId,
        user_id: UserId,
        content: String,
    ) -> Result<CommentRecord, ServiceError>;

    /// Comments of one issue, newest first, each with its author.
    async fn list_comments(&self, issue_id: IssueId) -> Result<Vec<CommentRecord>, ServiceError>;

    async fn get_comment(&self, id: CommentId) -> Result<CommentRecord, ServiceError>;

    async fn update_comment(
        &self,
        id: CommentId,
        content: String,
    ) -> Result<CommentRecord, ServiceError>;

    async fn delete_comment(&self, id: CommentId) -> Result<(), ServiceError>;
}
