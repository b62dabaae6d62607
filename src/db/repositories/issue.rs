use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::IssueIncludes;
use crate::domain::drafts::IssueDraft;
use crate::entities::{
    comments, issue_status_history, issue_statuses, issues, officers, prelude::*, users,
};

/// An issue together with whichever relations the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    #[serde(flatten)]
    pub issue: issues::Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<users::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<officers::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<issue_statuses::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_history: Option<Vec<issue_status_history::Model>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<comments::Model>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status written and history row recorded in the same transaction.
    Applied(issue_status_history::Model),
    IssueNotFound,
    StatusNotFound,
    /// The issue's status changed between the read and the conditional write.
    Stale,
}

pub struct IssueRepository {
    conn: DatabaseConnection,
}

impl IssueRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<issues::Model>> {
        Issues::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query issue by ID")
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Issues::find()
            .filter(issues::Column::IssueId.eq(id))
            .count(&self.conn)
            .await
            .context("Failed to check issue existence")?;
        Ok(count > 0)
    }

    /// Lists issues in id order, optionally restricted to one status code.
    /// An unknown code matches nothing.
    pub async fn list(&self, status_code: Option<&str>) -> Result<Vec<issues::Model>> {
        let mut query = Issues::find();
        if let Some(code) = status_code {
            query = query
                .inner_join(IssueStatuses)
                .filter(issue_statuses::Column::StatusCode.eq(code));
        }
        query
            .order_by_asc(issues::Column::IssueId)
            .all(&self.conn)
            .await
            .context("Failed to list issues")
    }

    pub async fn insert(&self, draft: &IssueDraft) -> Result<issues::Model> {
        let now = Utc::now();
        issues::ActiveModel {
            reporter_id: Set(draft.reporter_id),
            assignee_id: Set(draft.assignee_id),
            status_id: Set(draft.status_id),
            title: Set(draft.title.clone()),
            description: Set(draft.description.clone()),
            priority: Set(draft.priority()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert issue")
    }

    pub async fn replace(&self, existing: issues::Model, draft: &IssueDraft) -> Result<issues::Model> {
        let id = existing.issue_id;
        let mut active: issues::ActiveModel = existing.into();
        active.reporter_id = Set(draft.reporter_id);
        active.assignee_id = Set(draft.assignee_id);
        active.status_id = Set(draft.status_id);
        active.title = Set(draft.title.clone());
        active.description = Set(draft.description.clone());
        active.priority = Set(draft.priority());
        active.updated_at = Set(Utc::now());

        active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update issue {id}"))
    }

    /// Comments and history go with the issue through the cascading keys.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Issues::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete issue {id}"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn history(&self, issue_id: i32) -> Result<Vec<issue_status_history::Model>> {
        IssueStatusHistory::find()
            .filter(issue_status_history::Column::IssueId.eq(issue_id))
            .order_by_asc(issue_status_history::Column::ChangedAt)
            .order_by_asc(issue_status_history::Column::HistoryId)
            .all(&self.conn)
            .await
            .context("Failed to query status history")
    }

    /// Moves an issue to `new_status_id` and records the move.
    ///
    /// The issue row is written before it is read, so competing transitions
    /// queue on SQLite's write lock. The status update only matches while the
    /// row still carries the status read under that lock. Returning early
    /// drops the transaction, which rolls it back.
    pub async fn transition_status(
        &self,
        issue_id: i32,
        new_status_id: i32,
        changed_by: i32,
        comment: &str,
    ) -> Result<TransitionOutcome> {
        if IssueStatuses::find_by_id(new_status_id)
            .one(&self.conn)
            .await
            .context("Failed to read target status")?
            .is_none()
        {
            return Ok(TransitionOutcome::StatusNotFound);
        }

        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to begin transition transaction")?;

        // The first statement must be a write so SQLite takes the write lock
        // here and waits out its busy timeout instead of failing a later upgrade.
        let claimed = Issues::update_many()
            .col_expr(issues::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(issues::Column::IssueId.eq(issue_id))
            .exec(&txn)
            .await
            .context("Failed to lock issue for transition")?;
        if claimed.rows_affected == 0 {
            return Ok(TransitionOutcome::IssueNotFound);
        }
        let now = Utc::now();

        let Some(issue) = Issues::find_by_id(issue_id)
            .one(&txn)
            .await
            .context("Failed to read issue for transition")?
        else {
            return Ok(TransitionOutcome::IssueNotFound);
        };
        let old_status_id = issue.status_id;

        let result = Issues::update_many()
            .col_expr(issues::Column::StatusId, Expr::value(new_status_id))
            .col_expr(issues::Column::UpdatedAt, Expr::value(now))
            .filter(issues::Column::IssueId.eq(issue_id))
            .filter(issues::Column::StatusId.eq(old_status_id))
            .exec(&txn)
            .await
            .context("Failed to update issue status")?;

        if result.rows_affected != 1 {
            return Ok(TransitionOutcome::Stale);
        }

        let history = issue_status_history::ActiveModel {
            issue_id: Set(issue_id),
            old_status_id: Set(Some(old_status_id)),
            new_status_id: Set(new_status_id),
            changed_by: Set(changed_by),
            comment: Set(comment.to_string()),
            changed_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to record status history")?;

        txn.commit()
            .await
            .context("Failed to commit transition transaction")?;

        Ok(TransitionOutcome::Applied(history))
    }

    /// Attaches the requested relations, keeping the input order.
    pub async fn load_relations(
        &self,
        issues: Vec<issues::Model>,
        includes: IssueIncludes,
    ) -> Result<Vec<IssueRecord>> {
        if issues.is_empty() {
            return Ok(Vec::new());
        }

        let reporters: HashMap<i32, users::Model> = if includes.reporter {
            let ids: Vec<i32> = issues.iter().map(|i| i.reporter_id).collect();
            Users::find()
                .filter(users::Column::UserId.is_in(ids))
                .all(&self.conn)
                .await
                .context("Failed to load reporters")?
                .into_iter()
                .map(|u| (u.user_id, u))
                .collect()
        } else {
            HashMap::new()
        };

        let assignees: HashMap<i32, officers::Model> = if includes.assignee {
            let ids: Vec<i32> = issues.iter().filter_map(|i| i.assignee_id).collect();
            if ids.is_empty() {
                HashMap::new()
            } else {
                Officers::find()
                    .filter(officers::Column::OfficerId.is_in(ids))
                    .all(&self.conn)
                    .await
                    .context("Failed to load assignees")?
                    .into_iter()
                    .map(|o| (o.officer_id, o))
                    .collect()
            }
        } else {
            HashMap::new()
        };

        let statuses: HashMap<i32, issue_statuses::Model> = if includes.status {
            let ids: Vec<i32> = issues.iter().map(|i| i.status_id).collect();
            IssueStatuses::find()
                .filter(issue_statuses::Column::StatusId.is_in(ids))
                .all(&self.conn)
                .await
                .context("Failed to load statuses")?
                .into_iter()
                .map(|s| (s.status_id, s))
                .collect()
        } else {
            HashMap::new()
        };

        let mut comments = if includes.comments {
            Some(
                issues
                    .load_many(Comments, &self.conn)
                    .await
                    .context("Failed to load issue comments")?,
            )
        } else {
            None
        };

        let mut history = if includes.status_history {
            Some(
                issues
                    .load_many(IssueStatusHistory, &self.conn)
                    .await
                    .context("Failed to load status history")?,
            )
        } else {
            None
        };

        let records = issues
            .into_iter()
            .enumerate()
            .map(|(idx, issue)| {
                let comments = comments.as_mut().map(|all| {
                    let mut list = std::mem::take(&mut all[idx]);
                    list.sort_by_key(|c| (c.created_at, c.comment_id));
                    list
                });
                let status_history = history.as_mut().map(|all| {
                    let mut list = std::mem::take(&mut all[idx]);
                    list.sort_by_key(|h| (h.changed_at, h.history_id));
                    list
                });
                IssueRecord {
                    reporter: reporters.get(&issue.reporter_id).cloned(),
                    assignee: issue.assignee_id.and_then(|id| assignees.get(&id).cloned()),
                    status: statuses.get(&issue.status_id).cloned(),
                    status_history,
                    comments,
                    issue,
                }
            })
            .collect();

        Ok(records)
    }
}
