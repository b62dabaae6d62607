use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::domain::drafts::PersonDraft;
use crate::entities::{prelude::*, users};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::UserId.eq(id))
            .count(&self.conn)
            .await
            .context("Failed to check user existence")?;
        Ok(count > 0)
    }

    pub async fn find_by_name(&self, full_name: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::FullName.eq(full_name))
            .one(&self.conn)
            .await
            .context("Failed to query user by name")
    }

    pub async fn create(&self, draft: &PersonDraft) -> Result<users::Model> {
        let now = chrono::Utc::now();
        let user = users::ActiveModel {
            full_name: Set(draft.full_name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;
        Ok(user)
    }
}
