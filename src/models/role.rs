use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub authority: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_roles::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_roles::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for role entries nested in user payloads. Only the id is honoured on
/// writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: Option<i32>,
    #[serde(default)]
    pub authority: String,
}

impl From<Model> for RoleDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            authority: model.authority,
        }
    }
}
