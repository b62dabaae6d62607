//! Audit trail of status transitions. Rows are insert-only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue_status_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub history_id: i32,

    pub issue_id: i32,

    pub old_status_id: Option<i32>,

    pub new_status_id: i32,

    pub changed_by: i32,

    #[sea_orm(column_type = "Text")]
    pub comment: String,

    pub changed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::issues::Entity",
        from = "Column::IssueId",
        to = "super::issues::Column::IssueId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Issue,
    #[sea_orm(
        belongs_to = "super::issue_statuses::Entity",
        from = "Column::OldStatusId",
        to = "super::issue_statuses::Column::StatusId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    OldStatus,
    #[sea_orm(
        belongs_to = "super::issue_statuses::Entity",
        from = "Column::NewStatusId",
        to = "super::issue_statuses::Column::StatusId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    NewStatus,
    #[sea_orm(
        belongs_to = "super::officers::Entity",
        from = "Column::ChangedBy",
        to = "super::officers::Column::OfficerId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    ChangedByOfficer,
}

impl Related<super::issues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issue.def()
    }
}

impl Related<super::officers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangedByOfficer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
