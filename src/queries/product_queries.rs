use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Product, ProductQuery},
};

/// Runs the catalog search. Criteria are combined with AND; the free-text
/// term matches title, description or brand. Results are returned in
/// creation order (id ascending) so identical criteria against an unchanged
/// catalog always produce the same sequence.
pub async fn search_products(pool: &PgPool, query: ProductQuery) -> Result<Vec<Product>> {
    let query = query.normalized();

    let category = query.category.as_deref().map(like_pattern);
    let search = query.search.as_deref().map(like_pattern);

    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products
         WHERE ($1::text IS NULL OR category ILIKE $1)
           AND ($2::numeric IS NULL OR price >= $2)
           AND ($3::numeric IS NULL OR price <= $3)
           AND ($4::text IS NULL
                OR title ILIKE $4
                OR description ILIKE $4
                OR brand ILIKE $4)
         ORDER BY id ASC
         LIMIT $5::bigint",
    )
    .bind(category)
    .bind(query.min_price)
    .bind(query.max_price)
    .bind(search)
    .bind(query.limit)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> Result<HashMap<i32, Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(products.into_iter().map(|p| (p.id, p)).collect())
}

/// Escapes LIKE metacharacters so user input always means a literal
/// substring, then wraps it for a contains match.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_terms_become_contains_patterns() {
        assert_eq!(like_pattern("laptop"), "%laptop%");
    }

    #[test]
    fn percent_and_underscore_are_escaped() {
        assert_eq!(like_pattern("100%_wool"), "%100\\%\\_wool%");
    }

    #[test]
    fn backslash_is_escaped_first() {
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
