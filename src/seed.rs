use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::{password::hash_secret_blocking, repo_types::User};

pub const SEED_USER_NAME: &str = "Test User";
pub const SEED_USER_EMAIL: &str = "test@example.com";
pub const SEED_USER_PASSWORD: &str = "password";

struct SeedProduct {
    id: i64,
    name: &'static str,
    description: &'static str,
    price: f64,
    category: &'static str,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: 1,
        name: "測試產品 A",
        description: "這是一個安全的描述。",
        price: 100.00,
        category: "電子產品",
    },
    SeedProduct {
        id: 2,
        name: "測試產品 B",
        description: "這是另一個安全的描述。",
        price: 200.00,
        category: "書籍",
    },
    SeedProduct {
        id: 3,
        name: "產品 C",
        description: r#"含有 <script>alert("XSS")</script> 的惡意描述"#,
        price: 50.00,
        category: "工具",
    },
    SeedProduct {
        id: 4,
        name: "商品 D",
        description: "正常商品",
        price: 150.00,
        category: "電子產品",
    },
    SeedProduct {
        id: 5,
        name: "商品 with SQL",
        description: "SELECT * FROM users",
        price: 250.00,
        category: "數據庫",
    },
];

/// Insert the demo user and products. Safe to run repeatedly.
pub async fn run(db: &SqlitePool) -> anyhow::Result<()> {
    let existing = User::find_by_email(db, SEED_USER_EMAIL).await?;
    if existing.is_none() {
        let hash = hash_secret_blocking(SEED_USER_PASSWORD.to_string()).await?;
        User::create_or_get(db, SEED_USER_NAME, SEED_USER_EMAIL, &hash).await?;
    }

    let mut tx = db.begin().await.context("begin seed tx")?;
    for p in PRODUCTS {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO products (id, name, description, price, category)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(p.id)
        .bind(p.name)
        .bind(p.description)
        .bind(p.price)
        .bind(p.category)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("seed product {}", p.id))?;
    }
    tx.commit().await.context("commit seed tx")?;

    info!(products = PRODUCTS.len(), "database seeded");
    Ok(())
}
