use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "officers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub officer_id: i32,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub full_name: String,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::issues::Entity")]
    AssignedIssues,
    #[sea_orm(has_many = "super::issue_status_history::Entity")]
    StatusHistory,
}

impl Related<super::issues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedIssues.def()
    }
}

impl Related<super::issue_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
