use crate::entities::{comments, issue_status_history, issues};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_issues_status_id")
                    .table(issues::Entity)
                    .col(issues::Column::StatusId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issue_status_history_issue_id")
                    .table(issue_status_history::Entity)
                    .col(issue_status_history::Column::IssueId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_issue_id_created_at")
                    .table(comments::Entity)
                    .col(comments::Column::IssueId)
                    .col(comments::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_comments_issue_id_created_at", "comments"),
            ("idx_issue_status_history_issue_id", "issue_status_history"),
            ("idx_issues_status_id", "issues"),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
