//! Moves issues between workflow statuses.
//!
//! Any status may follow any other, including itself. Each transition writes
//! the new status and one history row in a single transaction.

use super::ServiceError;
use crate::db::IssueRecord;
use crate::domain::{IssueId, OfficerId, StatusId};

#[async_trait::async_trait]
pub trait StatusTransitionService: Send + Sync {
    /// Applies the transition and returns the issue with its reporter,
    /// assignee, status and comments.
    async fn transition_status(
        &self,
        issue_id: IssueId,
        new_status_id: StatusId,
        changed_by: OfficerId,
        comment: String,
    ) -> Result<IssueRecord, ServiceError>;
}
