use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::category::CategoryDto;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub date: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_categories::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API requests and responses. Category entries carry only their id
/// on writes; the write path resolves each id against the store and rebuilds
/// the association set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub date: DateTime<Utc>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}

impl ProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.price <= 0.0 {
            return Err("Price must be positive".to_string());
        }
        if self.categories.iter().any(|c| c.id.is_none()) {
            return Err("Category references require an id".to_string());
        }
        Ok(())
    }
}

impl From<Model> for ProductDto {
    fn from(model: Model) -> Self {
        // Dates are stored as RFC 3339 text; fall back to the epoch on rows
        // written before the column was normalized.
        let date = DateTime::parse_from_rfc3339(&model.date)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_default();

        Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            price: model.price,
            date,
            image_url: model.image_url,
            categories: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(date: &str) -> Model {
        Model {
            id: 1,
            name: "Smart TV".to_string(),
            description: "55 inch 4K panel".to_string(),
            price: 2190.0,
            date: date.to_string(),
            image_url: None,
            created_at: "2020-07-13T20:50:07Z".to_string(),
            updated_at: "2020-07-13T20:50:07Z".to_string(),
        }
    }

    #[test]
    fn maps_stored_date_to_utc() {
        let dto = ProductDto::from(model("2020-07-13T20:50:07Z"));
        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.date.to_rfc3339(), "2020-07-13T20:50:07+00:00");
    }

    #[test]
    fn unparseable_date_falls_back_to_epoch() {
        let dto = ProductDto::from(model("not-a-date"));
        assert_eq!(dto.date, DateTime::<Utc>::default());
    }

    #[test]
    fn rejects_blank_name_and_non_positive_price() {
        let mut dto = ProductDto::from(model("2020-07-13T20:50:07Z"));
        dto.name = "  ".to_string();
        assert!(dto.validate().is_err());

        let mut dto = ProductDto::from(model("2020-07-13T20:50:07Z"));
        dto.price = 0.0;
        assert!(dto.validate().is_err());
    }
}
