use storefront_api::{config, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = config::database_url()?;

    let pool = create_pool(&database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let vendor_id = ensure_vendor(&pool, "Ferris Goods").await?;
    let category_id = ensure_category(&pool, "Merch", "Things for Rustaceans").await?;
    seed_products(&pool, vendor_id, category_id).await?;
    seed_cities(&pool).await?;

    println!("Seed completed. Vendor ID: {vendor_id}, Category ID: {category_id}");
    Ok(())
}

async fn ensure_vendor(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO vendors (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(pool)
    .await?;

    println!("Ensured vendor {name}");
    Ok(id)
}

async fn ensure_category(
    pool: &sqlx::PgPool,
    name: &str,
    description: &str,
) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO categories (id, name, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    println!("Ensured category {name}");
    Ok(id)
}

async fn seed_products(
    pool: &sqlx::PgPool,
    vendor_id: Uuid,
    category_id: Uuid,
) -> anyhow::Result<()> {
    // name, description, price, discounted price (minor units)
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 550_000_i64, 495_000_i64),
        ("Ferris Mug", "Coffee tastes better with Ferris", 120_000, 120_000),
        ("Rust Sticker Pack", "Decorate your laptop", 50_000, 40_000),
        ("E-book: Async Rust", "Learn async Rust patterns", 250_000, 199_000),
    ];

    for (name, desc, price, discounted_price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, discounted_price, vendor_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(discounted_price)
        .bind(vendor_id)
        .bind(category_id)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO product_sizes (id, product_id, size)
        SELECT gen_random_uuid(), p.id, s.size
        FROM products p
        CROSS JOIN (VALUES ('S'), ('M'), ('L'), ('XL')) AS s (size)
        WHERE p.name = 'Axum Hoodie'
        ON CONFLICT (product_id, size) DO NOTHING
        "#,
    )
    .execute(pool)
    .await?;

    println!("Seeded products");
    Ok(())
}

async fn seed_cities(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for name in ["Cairo", "Alexandria", "Giza"] {
        sqlx::query(
            r#"
            INSERT INTO cities (id, name)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM cities WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .execute(pool)
        .await?;
    }

    println!("Seeded cities");
    Ok(())
}
