//! `SeaORM` implementation of the `StatusTransitionService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::{IssueRecord, Store, TransitionOutcome};
use crate::domain::validation::Validator;
use crate::domain::{IssueId, IssueIncludes, OfficerId, StatusId};
use crate::services::ServiceError;
use crate::services::status_transition_service::StatusTransitionService;

pub struct SeaOrmStatusTransitionService {
    store: Store,
}

impl SeaOrmStatusTransitionService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StatusTransitionService for SeaOrmStatusTransitionService {
    async fn transition_status(
        &self,
        issue_id: IssueId,
        new_status_id: StatusId,
        changed_by: OfficerId,
        comment: String,
    ) -> Result<IssueRecord, ServiceError> {
        ServiceError::check(
            Validator::new()
                .required_id("new_status_id", new_status_id.value())
                .required_id("changed_by", changed_by.value())
                .finish(),
        )?;

        if !self
            .store
            .issue_exists(issue_id.value())
            .await
            .map_err(ServiceError::storage("fetch issue"))?
        {
            return Err(ServiceError::not_found("Issue", issue_id.value()));
        }

        if !self
            .store
            .status_exists(new_status_id.value())
            .await
            .map_err(ServiceError::storage("validate status"))?
        {
            return Err(ServiceError::reference(
                "Status",
                "new_status_id",
                new_status_id.value(),
            ));
        }

        if !self
            .store
            .officer_exists(changed_by.value())
            .await
            .map_err(ServiceError::storage("validate officer"))?
        {
            return Err(ServiceError::reference(
                "Officer",
                "changed_by",
                changed_by.value(),
            ));
        }

        let outcome = self
            .store
            .transition_issue_status(
                issue_id.value(),
                new_status_id.value(),
                changed_by.value(),
                &comment,
            )
            .await
            .map_err(ServiceError::storage("update status"))?;

        let history = match outcome {
            TransitionOutcome::Applied(history) => history,
            TransitionOutcome::IssueNotFound => {
                return Err(ServiceError::not_found("Issue", issue_id.value()));
            }
            TransitionOutcome::StatusNotFound => {
                return Err(ServiceError::reference(
                    "Status",
                    "new_status_id",
                    new_status_id.value(),
                ));
            }
            TransitionOutcome::Stale => {
                warn!(
                    issue_id = issue_id.value(),
                    new_status_id = new_status_id.value(),
                    "Status transition lost a race with a concurrent update"
                );
                return Err(ServiceError::Conflict(format!(
                    "Issue {issue_id} status was changed concurrently"
                )));
            }
        };

        metrics::counter!("issue_status_transitions_total").increment(1);
        info!(
            issue_id = history.issue_id,
            old_status_id = history.old_status_id,
            new_status_id = history.new_status_id,
            changed_by = history.changed_by,
            "Issue status changed"
        );

        let issue = self
            .store
            .get_issue(issue_id.value())
            .await
            .map_err(ServiceError::storage("fetch updated issue"))?
            .ok_or(ServiceError::not_found("Issue", issue_id.value()))?;

        self.store
            .load_issue_relations(vec![issue], IssueIncludes::SUMMARY)
            .await
            .map_err(ServiceError::storage("fetch updated issue"))?
            .pop()
            .ok_or(ServiceError::not_found("Issue", issue_id.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::temp_store;
    use crate::domain::drafts::IssueDraft;

    async fn fixture() -> (Store, i32) {
        let store = temp_store().await;
        store.seed_defaults().await.unwrap();
        let issue = store
            .insert_issue(&IssueDraft {
                reporter_id: 1,
                assignee_id: None,
                status_id: 1,
                title: "Window cracked".to_string(),
                description: String::new(),
                priority: "low".to_string(),
            })
            .await
            .unwrap();
        (store, issue.issue_id)
    }

    #[tokio::test]
    async fn transition_records_previous_status() {
        let (store, issue_id) = fixture().await;
        let service = SeaOrmStatusTransitionService::new(store.clone());

        let record = service
            .transition_status(
                IssueId::new(issue_id),
                StatusId::new(3),
                OfficerId::new(1),
                "fixed".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(record.issue.status_id, 3);
        assert_eq!(record.status.unwrap().status_code, "closed");

        let history = store.status_history(issue_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].old_status_id, Some(1));
        assert_eq!(history[0].new_status_id, 3);
        assert_eq!(history[0].comment, "fixed");
    }

    #[tokio::test]
    async fn unknown_officer_is_rejected_before_writing() {
        let (store, issue_id) = fixture().await;
        let service = SeaOrmStatusTransitionService::new(store.clone());

        let err = service
            .transition_status(
                IssueId::new(issue_id),
                StatusId::new(2),
                OfficerId::new(77),
                String::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ReferenceNotFound {
                entity: "Officer",
                ..
            }
        ));
        assert_eq!(store.get_issue(issue_id).await.unwrap().unwrap().status_id, 1);
        assert!(store.status_history(issue_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_status_names_the_status_field() {
        let (store, issue_id) = fixture().await;
        let service = SeaOrmStatusTransitionService::new(store.clone());

        let err = service
            .transition_status(
                IssueId::new(issue_id),
                StatusId::new(42),
                OfficerId::new(1),
                String::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ReferenceNotFound {
                entity: "Status",
                field: "new_status_id",
                id: 42,
            }
        ));
        assert!(store.status_history(issue_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_ids_fail_validation() {
        let (store, issue_id) = fixture().await;
        let service = SeaOrmStatusTransitionService::new(store);

        let err = service
            .transition_status(
                IssueId::new(issue_id),
                StatusId::new(0),
                OfficerId::new(0),
                String::new(),
            )
            .await
            .unwrap_err();
        let ServiceError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["new_status_id", "changed_by"]);
    }

    #[tokio::test]
    async fn missing_issue_is_not_found() {
        let (store, _) = fixture().await;
        let service = SeaOrmStatusTransitionService::new(store);

        let err = service
            .transition_status(
                IssueId::new(500),
                StatusId::new(2),
                OfficerId::new(1),
                String::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Issue", .. }));
    }
}
