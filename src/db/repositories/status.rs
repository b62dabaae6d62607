use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::domain::drafts::StatusDraft;
use crate::entities::{issue_statuses, prelude::*};

pub struct StatusRepository {
    conn: DatabaseConnection,
}

impl StatusRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = IssueStatuses::find()
            .filter(issue_statuses::Column::StatusId.eq(id))
            .count(&self.conn)
            .await
            .context("Failed to check status existence")?;
        Ok(count > 0)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Option<issue_statuses::Model>> {
        IssueStatuses::find()
            .filter(issue_statuses::Column::StatusCode.eq(code))
            .one(&self.conn)
            .await
            .context("Failed to query status by code")
    }

    pub async fn create(&self, draft: &StatusDraft) -> Result<issue_statuses::Model> {
        issue_statuses::ActiveModel {
            status_code: Set(draft.status_code.clone()),
            display_name: Set(draft.display_name.clone()),
            description: Set(draft.description.clone()),
            color: Set(draft.color.clone()),
            display_order: Set(draft.display_order),
            is_active: Set(draft.is_active),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert status '{}'", draft.status_code))
    }
}
