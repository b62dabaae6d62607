use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::drafts::PersonDraft;
use crate::entities::{officers, prelude::*};

pub struct OfficerRepository {
    conn: DatabaseConnection,
}

impl OfficerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<officers::Model>> {
        Officers::find()
            .order_by_asc(officers::Column::OfficerId)
            .all(&self.conn)
            .await
            .context("Failed to list officers")
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Officers::find()
            .filter(officers::Column::OfficerId.eq(id))
            .count(&self.conn)
            .await
            .context("Failed to check officer existence")?;
        Ok(count > 0)
    }

    pub async fn find_by_name(&self, full_name: &str) -> Result<Option<officers::Model>> {
        Officers::find()
            .filter(officers::Column::FullName.eq(full_name))
            .one(&self.conn)
            .await
            .context("Failed to query officer by name")
    }

    pub async fn create(&self, draft: &PersonDraft) -> Result<officers::Model> {
        let now = chrono::Utc::now();
        officers::ActiveModel {
            full_name: Set(draft.full_name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert officer")
    }
}
