use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use crate::models::CategoryDto;
use crate::models::category::{self, Entity as CategoryEntity};
use crate::models::product_categories;

use super::{Page, PageRequest, ServiceError};

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<CategoryDto>, ServiceError> {
    let categories = CategoryEntity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;

    Ok(categories.into_iter().map(CategoryDto::from).collect())
}

pub async fn find_all_paged(
    db: &DatabaseConnection,
    request: PageRequest,
) -> Result<Page<CategoryDto>, ServiceError> {
    let paginator = CategoryEntity::find()
        .order_by_asc(category::Column::Name)
        .paginate(db, request.size);

    let totals = paginator.num_items_and_pages().await?;
    let categories = paginator.fetch_page(request.page).await?;

    Ok(Page {
        content: categories.into_iter().map(CategoryDto::from).collect(),
        page: request.page,
        size: request.size,
        total_elements: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<CategoryDto, ServiceError> {
    let category = CategoryEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", id)))?;

    Ok(CategoryDto::from(category))
}

pub async fn insert(
    db: &DatabaseConnection,
    dto: CategoryDto,
) -> Result<CategoryDto, ServiceError> {
    let now = chrono::Utc::now().to_rfc3339();

    let category = category::ActiveModel {
        name: Set(dto.name),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = category.insert(db).await?;
    Ok(CategoryDto::from(model))
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    dto: CategoryDto,
) -> Result<CategoryDto, ServiceError> {
    let category = CategoryEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", id)))?;

    let mut category: category::ActiveModel = category.into();
    category.name = Set(dto.name);
    category.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = category.update(db).await?;
    Ok(CategoryDto::from(model))
}

/// Categories are the referenced side of the product association, so the
/// store may veto the delete. Dependents are checked up front for a clear
/// signal; rows linked between the check and the delete still trip the
/// foreign key constraint, which translates the same way.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let dependents = product_categories::Entity::find()
        .filter(product_categories::Column::CategoryId.eq(id))
        .count(db)
        .await?;

    if dependents > 0 {
        return Err(ServiceError::Database(
            "Resource cannot be deleted because it has dependent records".to_string(),
        ));
    }

    match CategoryEntity::delete_by_id(id).exec(db).await {
        Ok(result) if result.rows_affected == 0 => {
            Err(ServiceError::NotFound(format!("Id not found {}", id)))
        }
        Ok(_) => Ok(()),
        Err(e) => match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(ServiceError::Database(
                "Resource cannot be deleted because it has dependent records".to_string(),
            )),
            _ => Err(e.into()),
        },
    }
}
