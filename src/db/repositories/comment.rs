use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::drafts::CommentDraft;
use crate::entities::{comments, issues, prelude::*, users};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    #[serde(flatten)]
    pub comment: comments::Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<users::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<issues::Model>,
}

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<comments::Model>> {
        Comments::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query comment by ID")
    }

    /// Newest first.
    pub async fn list_for_issue(&self, issue_id: i32) -> Result<Vec<comments::Model>> {
        Comments::find()
            .filter(comments::Column::IssueId.eq(issue_id))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::CommentId)
            .all(&self.conn)
            .await
            .context("Failed to list comments")
    }

    pub async fn insert(&self, draft: &CommentDraft) -> Result<comments::Model> {
        comments::ActiveModel {
            issue_id: Set(draft.issue_id),
            user_id: Set(draft.user_id),
            content: Set(draft.content.clone()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert comment")
    }

    pub async fn update_content(
        &self,
        existing: comments::Model,
        content: &str,
    ) -> Result<comments::Model> {
        let id = existing.comment_id;
        let mut active: comments::ActiveModel = existing.into();
        active.content = Set(content.to_string());
        active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update comment {id}"))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Comments::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete comment {id}"))?;
        Ok(result.rows_affected > 0)
    }

    /// Always attaches the author; the parent issue only when `with_issue`.
    pub async fn load_relations(
        &self,
        comments: Vec<comments::Model>,
        with_issue: bool,
    ) -> Result<Vec<CommentRecord>> {
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = comments.iter().map(|c| c.user_id).collect();
        let users: HashMap<i32, users::Model> = Users::find()
            .filter(users::Column::UserId.is_in(user_ids))
            .all(&self.conn)
            .await
            .context("Failed to load comment authors")?
            .into_iter()
            .map(|u| (u.user_id, u))
            .collect();

        let issues: HashMap<i32, issues::Model> = if with_issue {
            let ids: Vec<i32> = comments.iter().map(|c| c.issue_id).collect();
            Issues::find()
                .filter(issues::Column::IssueId.is_in(ids))
                .all(&self.conn)
                .await
                .context("Failed to load comment issues")?
                .into_iter()
                .map(|i| (i.issue_id, i))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(comments
            .into_iter()
            .map(|comment| CommentRecord {
                user: users.get(&comment.user_id).cloned(),
                issue: issues.get(&comment.issue_id).cloned(),
                comment,
            })
            .collect())
    }
}
