use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A named workflow state. Any status may follow any other.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub status_id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(50))")]
    pub status_code: String,

    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub display_name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// `#RRGGBB`
    #[sea_orm(column_type = "String(StringLen::N(7))")]
    pub color: String,

    #[sea_orm(default_value = 0)]
    pub display_order: i32,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::issues::Entity")]
    Issues,
}

impl Related<super::issues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
