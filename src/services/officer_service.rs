use async_trait::async_trait;

use super::ServiceError;
use crate::db::Store;
use crate::entities::officers;

#[async_trait]
pub trait OfficerService: Send + Sync {
    /// All officers ordered by id.
    async fn list_officers(&self) -> Result<Vec<officers::Model>, ServiceError>;
}

pub struct SeaOrmOfficerService {
    store: Store,
}

impl SeaOrmOfficerService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OfficerService for SeaOrmOfficerService {
    async fn list_officers(&self) -> Result<Vec<officers::Model>, ServiceError> {
        self.store
            .list_officers()
            .await
            .map_err(ServiceError::storage("fetch officers"))
    }
}
