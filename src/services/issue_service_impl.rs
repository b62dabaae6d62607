//! `SeaORM` implementation of the `IssueService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{IssueRecord, Store};
use crate::domain::drafts::IssueDraft;
use crate::domain::validation::{FieldError, Validate};
use crate::domain::{IssueId, IssueIncludes};
use crate::entities::issues;
use crate::services::ServiceError;
use crate::services::issue_service::{IssueInput, IssueService};

pub struct SeaOrmIssueService {
    store: Store,
}

impl SeaOrmIssueService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn check_references(&self, draft: &IssueDraft) -> Result<(), ServiceError> {
        let reporter_exists = self
            .store
            .user_exists(draft.reporter_id)
            .await
            .map_err(ServiceError::storage("validate reporter"))?;
        if !reporter_exists {
            return Err(ServiceError::reference(
                "Reporter",
                "reporter_id",
                draft.reporter_id,
            ));
        }

        let status_exists = self
            .store
            .status_exists(draft.status_id)
            .await
            .map_err(ServiceError::storage("validate status"))?;
        if !status_exists {
            return Err(ServiceError::reference("Status", "status_id", draft.status_id));
        }

        if let Some(assignee_id) = draft.assignee_id {
            let assignee_exists = self
                .store
                .officer_exists(assignee_id)
                .await
                .map_err(ServiceError::storage("validate assignee"))?;
            if !assignee_exists {
                return Err(ServiceError::reference("Assignee", "assignee_id", assignee_id));
            }
        }

        Ok(())
    }

    async fn load_one(
        &self,
        issue: issues::Model,
        includes: IssueIncludes,
    ) -> Result<IssueRecord, ServiceError> {
        let id = issue.issue_id;
        self.store
            .load_issue_relations(vec![issue], includes)
            .await
            .map_err(ServiceError::storage("fetch issue"))?
            .pop()
            .ok_or(ServiceError::not_found("Issue", id))
    }
}

#[async_trait]
impl IssueService for SeaOrmIssueService {
    async fn create_issue(&self, input: IssueInput) -> Result<IssueRecord, ServiceError> {
        let draft = input.into_draft();
        ServiceError::check(draft.validate())?;
        self.check_references(&draft).await?;

        let issue = self
            .store
            .insert_issue(&draft)
            .await
            .map_err(ServiceError::storage("create issue"))?;

        info!(
            issue_id = issue.issue_id,
            reporter_id = issue.reporter_id,
            "Issue created"
        );

        self.load_one(issue, IssueIncludes::SUMMARY).await
    }

    async fn get_issue(&self, id: IssueId) -> Result<IssueRecord, ServiceError> {
        let issue = self
            .store
            .get_issue(id.value())
            .await
            .map_err(ServiceError::storage("fetch issue"))?
            .ok_or(ServiceError::not_found("Issue", id.value()))?;

        self.load_one(issue, IssueIncludes::DETAIL).await
    }

    async fn list_issues(
        &self,
        status_code: Option<&str>,
    ) -> Result<Vec<IssueRecord>, ServiceError> {
        let issues = self
            .store
            .list_issues(status_code)
            .await
            .map_err(ServiceError::storage("fetch issues"))?;

        self.store
            .load_issue_relations(issues, IssueIncludes::SUMMARY)
            .await
            .map_err(ServiceError::storage("fetch issues"))
    }

    async fn update_issue(
        &self,
        id: IssueId,
        input: IssueInput,
    ) -> Result<IssueRecord, ServiceError> {
        let existing = self
            .store
            .get_issue(id.value())
            .await
            .map_err(ServiceError::storage("fetch issue"))?
            .ok_or(ServiceError::not_found("Issue", id.value()))?;

        let draft = input.overlay(&existing);
        let mut errors = draft.validate();
        if draft.status_id != existing.status_id && draft.status_id > 0 {
            errors.push(FieldError::new(
                "status_id",
                "status_id can only be changed through the status endpoint",
            ));
        }
        ServiceError::check(errors)?;
        self.check_references(&draft).await?;

        let updated = self
            .store
            .replace_issue(existing, &draft)
            .await
            .map_err(ServiceError::storage("update issue"))?;

        info!(issue_id = updated.issue_id, "Issue updated");

        self.load_one(updated, IssueIncludes::SUMMARY).await
    }

    async fn delete_issue(&self, id: IssueId) -> Result<(), ServiceError> {
        let removed = self
            .store
            .delete_issue(id.value())
            .await
            .map_err(ServiceError::storage("delete issue"))?;

        if !removed {
            return Err(ServiceError::not_found("Issue", id.value()));
        }

        info!(issue_id = id.value(), "Issue deleted");
        Ok(())
    }
}
