use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CommentService, IssueService, OfficerService, SeaOrmCommentService, SeaOrmIssueService,
    SeaOrmOfficerService, SeaOrmStatusTransitionService, StatusTransitionService,
};

/// Everything a request handler may touch. Configuration is read-only once
/// the server is running.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub issue_service: Arc<dyn IssueService>,

    pub transition_service: Arc<dyn StatusTransitionService>,

    pub comment_service: Arc<dyn CommentService>,

    pub officer_service: Arc<dyn OfficerService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.database).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already opened store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let issue_service =
            Arc::new(SeaOrmIssueService::new(store.clone())) as Arc<dyn IssueService>;
        let transition_service = Arc::new(SeaOrmStatusTransitionService::new(store.clone()))
            as Arc<dyn StatusTransitionService>;
        let comment_service =
            Arc::new(SeaOrmCommentService::new(store.clone())) as Arc<dyn CommentService>;
        let officer_service =
            Arc::new(SeaOrmOfficerService::new(store.clone())) as Arc<dyn OfficerService>;

        Self {
            config: Arc::new(config),
            store,
            issue_service,
            transition_service,
            comment_service,
            officer_service,
        }
    }
}
