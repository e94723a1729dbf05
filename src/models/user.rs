use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::role::RoleDto;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_roles::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_roles::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API requests and responses. The password field is write-only:
/// it is read on insert, hashed before storage and never serialized back.
/// Role entries carry only their id on writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleDto>,
}

impl UserDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("First name is required".to_string());
        }
        if !valid_email(&self.email) {
            return Err("A valid e-mail is required".to_string());
        }
        if self.roles.iter().any(|r| r.id.is_none()) {
            return Err("Role references require an id".to_string());
        }
        Ok(())
    }

    /// Insert payloads additionally carry the initial password.
    pub fn validate_insert(&self) -> Result<(), String> {
        self.validate()?;
        match self.password.as_deref() {
            Some(p) if !p.trim().is_empty() => Ok(()),
            _ => Err("Password is required".to_string()),
        }
    }
}

fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

impl From<Model> for UserDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            password: None,
            roles: Vec::new(),
        }
    }
}
