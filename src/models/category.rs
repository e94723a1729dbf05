use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_categories::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API requests and responses. On product payloads only the id of
/// each entry is honoured; the name is resolved from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
}

impl CategoryDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        Ok(())
    }
}

impl From<Model> for CategoryDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
        }
    }
}
