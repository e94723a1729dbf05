use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::auth;
use crate::models::{RoleDto, UserDto};
use crate::models::{role, user, user_roles};

use super::{Page, PageRequest, ServiceError};

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<UserDto>, ServiceError> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;

    let mut dtos = Vec::with_capacity(users.len());
    for model in users {
        dtos.push(to_dto_with_roles(db, model).await?);
    }

    Ok(dtos)
}

pub async fn find_all_paged(
    db: &DatabaseConnection,
    request: PageRequest,
) -> Result<Page<UserDto>, ServiceError> {
    let paginator = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .paginate(db, request.size);

    let totals = paginator.num_items_and_pages().await?;
    let users = paginator.fetch_page(request.page).await?;

    let mut content = Vec::with_capacity(users.len());
    for model in users {
        content.push(to_dto_with_roles(db, model).await?);
    }

    Ok(Page {
        content,
        page: request.page,
        size: request.size,
        total_elements: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<UserDto, ServiceError> {
    let user = user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", id)))?;

    to_dto_with_roles(db, user).await
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, ServiceError> {
    Ok(user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn authorities(
    db: &DatabaseConnection,
    user: &user::Model,
) -> Result<Vec<String>, ServiceError> {
    let roles = user.find_related(role::Entity).all(db).await?;
    Ok(roles.into_iter().map(|r| r.authority).collect())
}

pub async fn insert(db: &DatabaseConnection, dto: UserDto) -> Result<UserDto, ServiceError> {
    let password = dto
        .password
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ServiceError::Internal("password missing on insert".to_string()))?;
    let password_hash = auth::hash_password(password).map_err(ServiceError::Internal)?;

    let now = chrono::Utc::now().to_rfc3339();
    let txn = db.begin().await?;

    let user = user::ActiveModel {
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        email: Set(dto.email),
        password_hash: Set(password_hash),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match user.insert(&txn).await {
        Ok(model) => model,
        Err(e) => {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ServiceError::Database("Email already in use".to_string())
                }
                _ => e.into(),
            })
        }
    };

    let roles = sync_roles(&txn, model.id, &dto.roles).await?;
    txn.commit().await?;

    let mut result = UserDto::from(model);
    result.roles = roles.into_iter().map(RoleDto::from).collect();
    Ok(result)
}

/// Profile fields only. The stored credential never changes here.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    dto: UserDto,
) -> Result<UserDto, ServiceError> {
    let txn = db.begin().await?;

    let user = user::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", id)))?;

    let mut user: user::ActiveModel = user.into();
    user.first_name = Set(dto.first_name);
    user.last_name = Set(dto.last_name);
    user.email = Set(dto.email);
    user.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = match user.update(&txn).await {
        Ok(model) => model,
        Err(e) => {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ServiceError::Database("Email already in use".to_string())
                }
                _ => e.into(),
            })
        }
    };

    let roles = sync_roles(&txn, model.id, &dto.roles).await?;
    txn.commit().await?;

    let mut result = UserDto::from(model);
    result.roles = roles.into_iter().map(RoleDto::from).collect();
    Ok(result)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    user_roles::Entity::delete_many()
        .filter(user_roles::Column::UserId.eq(id))
        .exec(&txn)
        .await?;

    let result = user::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!("Id not found {}", id)));
    }

    txn.commit().await?;
    Ok(())
}

/// Role-side mirror of the category synchronizer: drop the join rows, resolve
/// every declared id, rebuild the set, all inside the caller's transaction.
async fn sync_roles(
    txn: &DatabaseTransaction,
    user_id: i32,
    roles: &[RoleDto],
) -> Result<Vec<role::Model>, ServiceError> {
    user_roles::Entity::delete_many()
        .filter(user_roles::Column::UserId.eq(user_id))
        .exec(txn)
        .await?;

    let mut ids: Vec<i32> = roles.iter().filter_map(|r| r.id).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut resolved = Vec::with_capacity(ids.len());
    for role_id in ids {
        let role = role::Entity::find_by_id(role_id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", role_id)))?;

        let link = user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        };
        user_roles::Entity::insert(link)
            .exec_without_returning(txn)
            .await?;

        resolved.push(role);
    }

    Ok(resolved)
}

async fn to_dto_with_roles(
    db: &DatabaseConnection,
    model: user::Model,
) -> Result<UserDto, ServiceError> {
    let roles = model.find_related(role::Entity).all(db).await?;

    let mut dto = UserDto::from(model);
    dto.roles = roles.into_iter().map(RoleDto::from).collect();
    Ok(dto)
}
