use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::products::dto::SearchFilters;
use crate::products::repo_types::Product;

/// Escape `LIKE` wildcards so `value` only ever matches as a literal
/// substring, then wrap it in `%…%`.
pub fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl Product {
    pub async fn find(db: &SqlitePool, id: i64) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    /// Products whose name and category contain the given filters. Filter
    /// values are always bound, never spliced into the SQL text.
    pub async fn search(db: &SqlitePool, filters: &SearchFilters) -> anyhow::Result<Vec<Product>> {
        let mut qb = search_query(filters);
        let rows = qb.build_query_as::<Product>().fetch_all(db).await?;
        Ok(rows)
    }
}

fn search_query(filters: &SearchFilters) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT id, name, description, price, category FROM products WHERE 1 = 1",
    );
    if let Some(name) = &filters.name {
        qb.push(" AND name LIKE ")
            .push_bind(contains_pattern(name))
            .push(r" ESCAPE '\'");
    }
    if let Some(category) = &filters.category {
        qb.push(" AND category LIKE ")
            .push_bind(contains_pattern(category))
            .push(r" ESCAPE '\'");
    }
    qb.push(" ORDER BY id");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn filters(name: Option<&str>, category: Option<&str>) -> SearchFilters {
        SearchFilters {
            name: name.map(String::from),
            category: category.map(String::from),
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("abc"), "%abc%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn filter_values_never_reach_sql_text() {
        let payload = "' OR 1=1 --";
        let qb = search_query(&filters(Some(payload), Some("x'; DROP TABLE products; --")));
        let sql = qb.sql();
        assert!(!sql.contains("OR 1=1"));
        assert!(!sql.contains("DROP"));
        assert_eq!(sql.matches('?').count(), 2);
    }

    #[tokio::test]
    async fn find_returns_seeded_product() {
        let state = AppState::in_memory().await.unwrap();
        let product = Product::find(&state.db, 1).await.unwrap().unwrap();
        assert_eq!(product.name, "測試產品 A");
        assert_eq!(product.category, "電子產品");
        assert_eq!(product.price, 100.0);
        assert!(Product::find(&state.db, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn no_filters_returns_everything() {
        let state = AppState::in_memory().await.unwrap();
        let all = Product::search(&state.db, &SearchFilters::default()).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn filters_combine_with_and() {
        let state = AppState::in_memory().await.unwrap();
        let by_name = Product::search(&state.db, &filters(Some("測試產品"), None)).await.unwrap();
        assert_eq!(names(&by_name), ["測試產品 A", "測試產品 B"]);

        let by_category = Product::search(&state.db, &filters(None, Some("電子產品")))
            .await
            .unwrap();
        assert_eq!(names(&by_category), ["測試產品 A", "商品 D"]);

        let both = Product::search(&state.db, &filters(Some("商品"), Some("電子")))
            .await
            .unwrap();
        assert_eq!(names(&both), ["商品 D"]);
    }

    #[tokio::test]
    async fn injection_payloads_match_nothing() {
        let state = AppState::in_memory().await.unwrap();
        for payload in ["' OR 1=1 --", "%' OR '1'='1", "\" OR \"\"=\"", "'; DROP TABLE products; --"] {
            let found = Product::search(&state.db, &filters(Some(payload), None))
                .await
                .unwrap();
            assert!(found.is_empty(), "payload {payload:?} matched {found:?}");
        }
        let all = Product::search(&state.db, &SearchFilters::default()).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn wildcards_are_literal() {
        let state = AppState::in_memory().await.unwrap();
        let found = Product::search(&state.db, &filters(Some("%"), None)).await.unwrap();
        assert!(found.is_empty());
        let found = Product::search(&state.db, &filters(Some("_"), None)).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn sql_looking_text_is_just_data() {
        let state = AppState::in_memory().await.unwrap();
        let found = Product::search(&state.db, &filters(Some("with SQL"), None)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "SELECT * FROM users");
    }
}
