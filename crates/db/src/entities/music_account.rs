//! Linked music streaming account (per-user API credentials).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "music_account")]
pub struct Model {
    /// Owning user; one linked account per user
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    #[serde(skip_serializing)]
    pub access_token: String,

    #[serde(skip_serializing)]
    pub refresh_token: String,

    /// Space-separated granted scopes
    #[sea_orm(nullable)]
    pub scope: Option<String>,

    /// When `access_token` stops being accepted
    pub expires_at: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
