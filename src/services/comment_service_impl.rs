//! `SeaORM` implementation of the `CommentService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{CommentRecord, Store};
use crate::domain::drafts::CommentDraft;
use crate::domain::validation::Validate;
use crate::domain::{CommentId, IssueId, UserId};
use crate::entities::comments;
use crate::services::ServiceError;
use crate::services::comment_service::CommentService;

pub struct SeaOrmCommentService {
    store: Store,
}

impl SeaOrmCommentService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn ensure_issue(&self, issue_id: IssueId) -> Result<(), ServiceError> {
        let exists = self
            .store
            .issue_exists(issue_id.value())
            .await
            .map_err(ServiceError::storage("fetch issue"))?;
        if exists {
            Ok(())
        } else {
            Err(ServiceError::not_found("Issue", issue_id.value()))
        }
    }

    async fn find(&self, id: CommentId) -> Result<comments::Model, ServiceError> {
        self.store
            .get_comment(id.value())
            .await
            .map_err(ServiceError::storage("fetch comment"))?
            .ok_or(ServiceError::not_found("Comment", id.value()))
    }

    async fn load_one(&self, comment: comments::Model) -> Result<CommentRecord, ServiceError> {
        let id = comment.comment_id;
        self.store
            .load_comment_relations(vec![comment], true)
            .await
            .map_err(ServiceError::storage("fetch comment"))?
            .pop()
            .ok_or(ServiceError::not_found("Comment", id))
    }
}

#[async_trait]
impl CommentService for SeaOrmCommentService {
    async fn add_comment(
        &self,
        issue_id: IssueId,
        user_id: UserId,
        content: String,
    ) -> Result<CommentRecord, ServiceError> {
        let draft = CommentDraft {
            issue_id: issue_id.value(),
            user_id: user_id.value(),
            content,
        };
        ServiceError::check(draft.validate())?;
        self.ensure_issue(issue_id).await?;

        let user_exists = self
            .store
            .user_exists(draft.user_id)
            .await
            .map_err(ServiceError::storage("validate user"))?;
        if !user_exists {
            return Err(ServiceError::reference("User", "user_id", draft.user_id));
        }

        let comment = self
            .store
            .insert_comment(&draft)
            .await
            .map_err(ServiceError::storage("create comment"))?;

        info!(
            comment_id = comment.comment_id,
            issue_id = comment.issue_id,
            "Comment added"
        );

        self.load_one(comment).await
    }

    async fn list_comments(&self, issue_id: IssueId) -> Result<Vec<CommentRecord>, ServiceError> {
        self.ensure_issue(issue_id).await?;

        let comments = self
            .store
            .list_comments_for_issue(issue_id.value())
            .await
            .map_err(ServiceError::storage("fetch comments"))?;

        self.store
            .load_comment_relations(comments, false)
            .await
            .map_err(ServiceError::storage("fetch comments"))
    }

    async fn get_comment(&self, id: CommentId) -> Result<CommentRecord, ServiceError> {
        let comment = self.find(id).await?;
        self.load_one(comment).await
    }

    async fn update_comment(
        &self,
        id: CommentId,
        content: String,
    ) -> Result<CommentRecord, ServiceError> {
        let existing = self.find(id).await?;

        let draft = CommentDraft {
            issue_id: existing.issue_id,
            user_id: existing.user_id,
            content,
        };
        ServiceError::check(draft.validate())?;

        let updated = self
            .store
            .update_comment_content(existing, &draft.content)
            .await
            .map_err(ServiceError::storage("update comment"))?;

        self.load_one(updated).await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<(), ServiceError> {
        let removed = self
            .store
            .delete_comment(id.value())
            .await
            .map_err(ServiceError::storage("delete comment"))?;
        if !removed {
            return Err(ServiceError::not_found("Comment", id.value()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::temp_store;
    use crate::domain::drafts::IssueDraft;

    async fn fixture() -> (SeaOrmCommentService, IssueId) {
        let store = temp_store().await;
        store.seed_defaults().await.unwrap();
        let issue = store
            .insert_issue(&IssueDraft {
                reporter_id: 1,
                assignee_id: None,
                status_id: 1,
                title: "Heating off".to_string(),
                description: String::new(),
                priority: "high".to_string(),
            })
            .await
            .unwrap();
        (SeaOrmCommentService::new(store), IssueId::new(issue.issue_id))
    }

    #[tokio::test]
    async fn comments_list_newest_first() {
        let (service, issue_id) = fixture().await;
        for text in ["first", "second", "third"] {
            service
                .add_comment(issue_id, UserId::new(1), text.to_string())
                .await
                .unwrap();
        }

        let listed = service.list_comments(issue_id).await.unwrap();
        let contents: Vec<_> = listed.iter().map(|c| c.comment.content.as_str()).collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
        assert!(listed.iter().all(|c| c.user.is_some() && c.issue.is_none()));
    }

    #[tokio::test]
    async fn comment_on_missing_issue_is_not_found() {
        let (service, _) = fixture().await;
        let err = service
            .add_comment(IssueId::new(404), UserId::new(1), "hello".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Issue", .. }));
    }

    #[tokio::test]
    async fn unknown_author_is_reference_error() {
        let (service, issue_id) = fixture().await;
        let err = service
            .add_comment(issue_id, UserId::new(9), "hello".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ReferenceNotFound { field: "user_id", .. }
        ));
    }

    #[tokio::test]
    async fn edit_then_delete() {
        let (service, issue_id) = fixture().await;
        let created = service
            .add_comment(issue_id, UserId::new(1), "typo".to_string())
            .await
            .unwrap();
        let id = CommentId::new(created.comment.comment_id);

        let edited = service.update_comment(id, "fixed".to_string()).await.unwrap();
        assert_eq!(edited.comment.content, "fixed");
        assert_eq!(edited.issue.unwrap().issue_id, issue_id.value());

        assert!(matches!(
            service.update_comment(id, String::new()).await,
            Err(ServiceError::Validation(_))
        ));

        service.delete_comment(id).await.unwrap();
        assert!(matches!(
            service.delete_comment(id).await,
            Err(ServiceError::NotFound { entity: "Comment", .. })
        ));
    }
}
