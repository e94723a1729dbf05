use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::models::{CategoryDto, ProductDto};
use crate::models::{category, product, product_categories};

use super::{Page, PageRequest, ServiceError};

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<ProductDto>, ServiceError> {
    let products = product::Entity::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;

    tracing::info!("query returned {} products", products.len());

    let mut dtos = Vec::with_capacity(products.len());
    for model in products {
        dtos.push(to_dto_with_categories(db, model).await?);
    }

    Ok(dtos)
}

pub async fn find_all_paged(
    db: &DatabaseConnection,
    request: PageRequest,
) -> Result<Page<ProductDto>, ServiceError> {
    let paginator = product::Entity::find()
        .order_by_asc(product::Column::Id)
        .paginate(db, request.size);

    let totals = paginator.num_items_and_pages().await?;
    let products = paginator.fetch_page(request.page).await?;

    let mut content = Vec::with_capacity(products.len());
    for model in products {
        content.push(to_dto_with_categories(db, model).await?);
    }

    Ok(Page {
        content,
        page: request.page,
        size: request.size,
        total_elements: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<ProductDto, ServiceError> {
    let product = product::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", id)))?;

    to_dto_with_categories(db, product).await
}

pub async fn insert(db: &DatabaseConnection, dto: ProductDto) -> Result<ProductDto, ServiceError> {
    let now = chrono::Utc::now().to_rfc3339();
    let txn = db.begin().await?;

    let product = product::ActiveModel {
        name: Set(dto.name),
        description: Set(dto.description),
        price: Set(dto.price),
        date: Set(dto.date.to_rfc3339()),
        image_url: Set(dto.image_url),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = product.insert(&txn).await?;
    let categories = sync_categories(&txn, model.id, &dto.categories).await?;
    txn.commit().await?;

    let mut result = ProductDto::from(model);
    result.categories = categories.into_iter().map(CategoryDto::from).collect();
    Ok(result)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    dto: ProductDto,
) -> Result<ProductDto, ServiceError> {
    let txn = db.begin().await?;

    let product = product::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", id)))?;

    let mut product: product::ActiveModel = product.into();
    product.name = Set(dto.name);
    product.description = Set(dto.description);
    product.price = Set(dto.price);
    product.date = Set(dto.date.to_rfc3339());
    product.image_url = Set(dto.image_url);
    product.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = product.update(&txn).await?;
    let categories = sync_categories(&txn, model.id, &dto.categories).await?;
    txn.commit().await?;

    let mut result = ProductDto::from(model);
    result.categories = categories.into_iter().map(CategoryDto::from).collect();
    Ok(result)
}

/// Products own their category links, so the join rows go with the product.
/// Both deletes commit together; a missing id rolls the join-row delete back.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    product_categories::Entity::delete_many()
        .filter(product_categories::Column::ProductId.eq(id))
        .exec(&txn)
        .await?;

    let result = product::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!("Id not found {}", id)));
    }

    txn.commit().await?;
    Ok(())
}

/// Replaces the product's stored category set with the ids declared on the
/// DTO: all join rows are dropped, each declared id is resolved against the
/// category store, and the set is rebuilt inside the caller's transaction.
/// One unresolvable id fails the whole operation and nothing is committed.
async fn sync_categories(
    txn: &DatabaseTransaction,
    product_id: i32,
    categories: &[CategoryDto],
) -> Result<Vec<category::Model>, ServiceError> {
    product_categories::Entity::delete_many()
        .filter(product_categories::Column::ProductId.eq(product_id))
        .exec(txn)
        .await?;

    let mut ids: Vec<i32> = categories.iter().filter_map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut resolved = Vec::with_capacity(ids.len());
    for category_id in ids {
        let category = category::Entity::find_by_id(category_id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Id not found {}", category_id)))?;

        let link = product_categories::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
        };
        product_categories::Entity::insert(link)
            .exec_without_returning(txn)
            .await?;

        resolved.push(category);
    }

    Ok(resolved)
}

async fn to_dto_with_categories(
    db: &DatabaseConnection,
    model: product::Model,
) -> Result<ProductDto, ServiceError> {
    let categories = model.find_related(category::Entity).all(db).await?;

    let mut dto = ProductDto::from(model);
    dto.categories = categories.into_iter().map(CategoryDto::from).collect();
    Ok(dto)
}
