use crate::auth::hash_password;
use crate::models::{category, product, product_categories, role, user, user_roles};
use sea_orm::*;

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if category::Entity::find().count(db).await? > 0 {
        tracing::debug!("Catalog already populated, skipping seed");
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    // 1. Categories
    let books_id = category::ActiveModel {
        name: Set("Books".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?
    .id;

    let electronics_id = category::ActiveModel {
        name: Set("Electronics".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?
    .id;

    let computers_id = category::ActiveModel {
        name: Set("Computers".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?
    .id;

    // 2. Products
    let products = [
        (
            "The Lord of the Rings",
            "An epic fantasy adventure in one volume",
            90.5,
            books_id,
        ),
        (
            "Smart TV",
            "55 inch 4K panel with streaming apps",
            2190.0,
            electronics_id,
        ),
        (
            "Macbook Pro",
            "Apple laptop for professional work",
            1250.0,
            computers_id,
        ),
        ("PC Gamer", "Entry level gaming desktop", 1200.0, computers_id),
        (
            "Rails for Dummies",
            "A gentle introduction to web development",
            100.99,
            books_id,
        ),
        (
            "PC Gamer Ex",
            "Gaming desktop with extended storage",
            1350.0,
            computers_id,
        ),
        (
            "PC Gamer X",
            "Gaming desktop with a faster GPU",
            1300.0,
            computers_id,
        ),
        (
            "PC Gamer Alfa",
            "Flagship gaming desktop",
            1850.0,
            computers_id,
        ),
    ];

    for (name, description, price, category_id) in products {
        let product_id = product::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.to_owned()),
            price: Set(price),
            date: Set("2020-07-13T20:50:07Z".to_owned()),
            image_url: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?
        .id;

        let link = product_categories::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
        };
        product_categories::Entity::insert(link)
            .exec_without_returning(db)
            .await?;
    }

    // 3. Roles
    let operator_id = role::ActiveModel {
        authority: Set("ROLE_OPERATOR".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?
    .id;

    let admin_id = role::ActiveModel {
        authority: Set("ROLE_ADMIN".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?
    .id;

    // 4. Users
    let password_hash = hash_password("123456").map_err(DbErr::Custom)?;

    let alex_id = user::ActiveModel {
        first_name: Set("Alex".to_owned()),
        last_name: Set("Brown".to_owned()),
        email: Set("alex@gmail.com".to_owned()),
        password_hash: Set(password_hash.clone()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?
    .id;

    let maria_id = user::ActiveModel {
        first_name: Set("Maria".to_owned()),
        last_name: Set("Green".to_owned()),
        email: Set("maria@gmail.com".to_owned()),
        password_hash: Set(password_hash),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?
    .id;

    for (user_id, role_id) in [
        (alex_id, operator_id),
        (maria_id, operator_id),
        (maria_id, admin_id),
    ] {
        let link = user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        };
        user_roles::Entity::insert(link)
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}
