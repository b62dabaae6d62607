use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::IssueIncludes;
use crate::domain::drafts::{CommentDraft, IssueDraft, PersonDraft, StatusDraft};
use crate::entities::{comments, issue_status_history, issue_statuses, issues, officers, users};

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::comment::CommentRecord;
pub use repositories::issue::{IssueRecord, TransitionOutcome};
pub use seed::SeedReport;

/// Handle to the relational store. Cloning is cheap; every clone shares the
/// same connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1, 10).await
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::with_pool_options(
            &config.url,
            config.max_connections,
            config.min_connections,
            config.connect_timeout_seconds,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
        connect_timeout_seconds: u64,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout_seconds))
            .acquire_timeout(Duration::from_secs(connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to database")?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn officer_repo(&self) -> repositories::officer::OfficerRepository {
        repositories::officer::OfficerRepository::new(self.conn.clone())
    }

    fn status_repo(&self) -> repositories::status::StatusRepository {
        repositories::status::StatusRepository::new(self.conn.clone())
    }

    fn issue_repo(&self) -> repositories::issue::IssueRepository {
        repositories::issue::IssueRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    // Users

    pub async fn user_exists(&self, id: i32) -> Result<bool> {
        self.user_repo().exists(id).await
    }

    pub async fn find_user_by_name(&self, full_name: &str) -> Result<Option<users::Model>> {
        self.user_repo().find_by_name(full_name).await
    }

    pub async fn create_user(&self, draft: &PersonDraft) -> Result<users::Model> {
        self.user_repo().create(draft).await
    }

    // Officers

    pub async fn list_officers(&self) -> Result<Vec<officers::Model>> {
        self.officer_repo().list_all().await
    }

    pub async fn officer_exists(&self, id: i32) -> Result<bool> {
        self.officer_repo().exists(id).await
    }

    pub async fn find_officer_by_name(&self, full_name: &str) -> Result<Option<officers::Model>> {
        self.officer_repo().find_by_name(full_name).await
    }

    pub async fn create_officer(&self, draft: &PersonDraft) -> Result<officers::Model> {
        self.officer_repo().create(draft).await
    }

    // Statuses

    pub async fn status_exists(&self, id: i32) -> Result<bool> {
        self.status_repo().exists(id).await
    }

    pub async fn get_status_by_code(&self, code: &str) -> Result<Option<issue_statuses::Model>> {
        self.status_repo().get_by_code(code).await
    }

    pub async fn create_status(&self, draft: &StatusDraft) -> Result<issue_statuses::Model> {
        self.status_repo().create(draft).await
    }

    // Issues

    pub async fn get_issue(&self, id: i32) -> Result<Option<issues::Model>> {
        self.issue_repo().get(id).await
    }

    pub async fn issue_exists(&self, id: i32) -> Result<bool> {
        self.issue_repo().exists(id).await
    }

    pub async fn list_issues(&self, status_code: Option<&str>) -> Result<Vec<issues::Model>> {
        self.issue_repo().list(status_code).await
    }

    pub async fn insert_issue(&self, draft: &IssueDraft) -> Result<issues::Model> {
        self.issue_repo().insert(draft).await
    }

    pub async fn replace_issue(
        &self,
        existing: issues::Model,
        draft: &IssueDraft,
    ) -> Result<issues::Model> {
        self.issue_repo().replace(existing, draft).await
    }

    pub async fn delete_issue(&self, id: i32) -> Result<bool> {
        self.issue_repo().delete(id).await
    }

    pub async fn load_issue_relations(
        &self,
        issues: Vec<issues::Model>,
        includes: IssueIncludes,
    ) -> Result<Vec<IssueRecord>> {
        self.issue_repo().load_relations(issues, includes).await
    }

    pub async fn transition_issue_status(
        &self,
        issue_id: i32,
        new_status_id: i32,
        changed_by: i32,
        comment: &str,
    ) -> Result<TransitionOutcome> {
        self.issue_repo()
            .transition_status(issue_id, new_status_id, changed_by, comment)
            .await
    }

    pub async fn status_history(&self, issue_id: i32) -> Result<Vec<issue_status_history::Model>> {
        self.issue_repo().history(issue_id).await
    }

    // Comments

    pub async fn get_comment(&self, id: i32) -> Result<Option<comments::Model>> {
        self.comment_repo().get(id).await
    }

    pub async fn list_comments_for_issue(&self, issue_id: i32) -> Result<Vec<comments::Model>> {
        self.comment_repo().list_for_issue(issue_id).await
    }

    pub async fn insert_comment(&self, draft: &CommentDraft) -> Result<comments::Model> {
        self.comment_repo().insert(draft).await
    }

    pub async fn update_comment_content(
        &self,
        existing: comments::Model,
        content: &str,
    ) -> Result<comments::Model> {
        self.comment_repo().update_content(existing, content).await
    }

    pub async fn delete_comment(&self, id: i32) -> Result<bool> {
        self.comment_repo().delete(id).await
    }

    pub async fn load_comment_relations(
        &self,
        comments: Vec<comments::Model>,
        with_issue: bool,
    ) -> Result<Vec<CommentRecord>> {
        self.comment_repo()
            .load_relations(comments, with_issue)
            .await
    }

    pub async fn seed_defaults(&self) -> Result<SeedReport> {
        seed::seed_defaults(self).await
    }
}

#[cfg(test)]
pub(crate) async fn temp_store() -> Store {
    let path = std::env::temp_dir().join(format!("issuetrack-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("temporary store")
}
