//! Domain service for issue CRUD.
//!
//! Status changes never go through [`IssueService::update_issue`]; they belong
//! to [`crate::services::StatusTransitionService`] so that every change is
//! recorded in the history table.

use serde::{Deserialize, Deserializer};

use super::ServiceError;
use crate::db::IssueRecord;
use crate::domain::IssueId;
use crate::domain::drafts::IssueDraft;
use crate::entities::issues::{self, Priority};

/// Incoming issue fields for create and replace.
///
/// Absent fields keep their stored value on replace. `assignee_id: null`
/// clears the assignee, which a plain `Option` could not express.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IssueInput {
    pub reporter_id: Option<i32>,
    #[serde(deserialize_with = "present")]
    pub assignee_id: Option<Option<i32>>,
    pub status_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl IssueInput {
    /// Draft for a new issue. Missing ids become zero so validation reports
    /// them as required; a missing priority becomes `medium`.
    #[must_use]
    pub fn into_draft(self) -> IssueDraft {
        IssueDraft {
            reporter_id: self.reporter_id.unwrap_or_default(),
            assignee_id: self.assignee_id.flatten(),
            status_id: self.status_id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self
                .priority
                .unwrap_or_else(|| Priority::default().as_str().to_string()),
        }
    }

    /// Overlays the provided fields on a stored issue.
    #[must_use]
    pub fn overlay(self, existing: &issues::Model) -> IssueDraft {
        IssueDraft {
            reporter_id: self.reporter_id.unwrap_or(existing.reporter_id),
            assignee_id: self.assignee_id.unwrap_or(existing.assignee_id),
            status_id: self.status_id.unwrap_or(existing.status_id),
            title: self.title.unwrap_or_else(|| existing.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| existing.description.clone()),
            priority: self
                .priority
                .unwrap_or_else(|| existing.priority.as_str().to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait IssueService: Send + Sync {
    /// Creates an issue after checking its reporter, status and assignee.
    async fn create_issue(&self, input: IssueInput) -> Result<IssueRecord, ServiceError>;

    /// Fetches one issue with its full status history.
    async fn get_issue(&self, id: IssueId) -> Result<IssueRecord, ServiceError>;

    /// Lists issues, optionally only those whose status has `status_code`.
    async fn list_issues(&self, status_code: Option<&str>)
    -> Result<Vec<IssueRecord>, ServiceError>;

    async fn update_issue(
        &self,
        id: IssueId,
        input: IssueInput,
    ) -> Result<IssueRecord, ServiceError>;

    async fn delete_issue(&self, id: IssueId) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> issues::Model {
        let now = chrono::Utc::now();
        issues::Model {
            issue_id: 7,
            reporter_id: 1,
            assignee_id: Some(2),
            status_id: 1,
            title: "Broken lift".to_string(),
            description: "Stuck on floor 3".to_string(),
            priority: Priority::High,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn overlay_keeps_absent_fields() {
        let input: IssueInput = serde_json::from_str(r#"{"title":"Broken lift again"}"#).unwrap();
        let draft = input.overlay(&stored());
        assert_eq!(draft.title, "Broken lift again");
        assert_eq!(draft.assignee_id, Some(2));
        assert_eq!(draft.priority, "high");
        assert_eq!(draft.status_id, 1);
    }

    #[test]
    fn explicit_null_clears_assignee() {
        let input: IssueInput = serde_json::from_str(r#"{"assignee_id":null}"#).unwrap();
        assert_eq!(input.assignee_id, Some(None));
        assert_eq!(input.overlay(&stored()).assignee_id, None);
    }

    #[test]
    fn missing_fields_on_create_fail_validation() {
        use crate::domain::validation::Validate;

        let draft = IssueInput::default().into_draft();
        let fields: Vec<_> = draft.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["reporter_id", "status_id", "title"]);
        assert_eq!(draft.priority, "medium");
    }
}
