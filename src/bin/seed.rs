use grocery_storefront::{
    config::database_url,
    db::{create_orm_conn, create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let url = database_url()?;

    // Ensure the local schema exists before seeding it.
    run_migrations(&create_orm_conn(&url).await?).await?;
    let pool = create_pool(&url).await?;

    let fresh = seed_categories(&pool).await?;
    let store_id = seed_store(&pool).await?;
    seed_products(&pool, store_id).await?;

    println!("Seed completed. Fresh produce category ID: {fresh}, store ID: {store_id}");
    Ok(())
}

async fn ensure_category(
    pool: &sqlx::PgPool,
    name: &str,
    description: &str,
    parent_id: Option<i64>,
) -> anyhow::Result<i64> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM categories WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO categories (name, description, parent_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .bind(parent_id)
    .fetch_one(pool)
    .await?;
    println!("Ensured category {name} (id={id})");
    Ok(id)
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<i64> {
    let fresh = ensure_category(pool, "Fresh Produce", "Fruit and vegetables", None).await?;
    let breakfast = ensure_category(pool, "Breakfast", "Cereal, bread and spreads", None).await?;
    ensure_category(pool, "Fruit", "Seasonal fruit", Some(fresh)).await?;
    ensure_category(pool, "Vegetables", "Greens and roots", Some(fresh)).await?;
    ensure_category(pool, "Cereal", "Oats, flakes and granola", Some(breakfast)).await?;
    Ok(fresh)
}

async fn seed_store(pool: &sqlx::PgPool) -> anyhow::Result<i64> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM supermarkets WHERE name = $1")
        .bind("Corner Market")
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO supermarkets (name, address, price, delivery_time, delivery_fee, main_image, gallery_images)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind("Corner Market")
    .bind("12 High Street")
    .bind("$$")
    .bind("20-30 min")
    .bind(1.99_f64)
    .bind("/stores/corner-market.jpg")
    .bind(vec!["/stores/corner-market-1.jpg".to_string()])
    .fetch_one(pool)
    .await?;
    println!("Seeded store Corner Market");
    Ok(id)
}

async fn seed_products(pool: &sqlx::PgPool, store_id: i64) -> anyhow::Result<()> {
    let products = vec![
        ("Bananas (6 pack)", "Ripe and sweet", 2.50, 120, "Fruit"),
        ("Gala Apples", "Crisp red apples", 3.20, 80, "Fruit"),
        ("Baby Spinach", "Washed, ready to eat", 1.80, 40, "Vegetables"),
        ("Rolled Oats", "1kg bag", 2.10, 60, "Cereal"),
        ("Sourdough Loaf", "Baked this morning", 4.00, 25, "Breakfast"),
    ];

    for (name, desc, price, quantity, category) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, price, quantity, image, categoryid, supermarketid)
            VALUES ($1, $2, $3, $4, $5, (SELECT id FROM categories WHERE name = $6), $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(quantity)
        .bind(format!("../assets/products/{}.png", name.to_lowercase().replace(' ', "-")))
        .bind(category)
        .bind(store_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
