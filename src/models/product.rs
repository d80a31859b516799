use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub price: Decimal,
    pub discount: Decimal,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub in_stock: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display-oriented projection used when order lines are resolved back to
/// their products at read time. The order's own stored price fields remain
/// the billing source of truth.
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: i32,
    pub title: String,
    pub image_url: Option<String>,
    pub price: Decimal,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image_url: product.image_url.clone(),
            price: product.price,
        }
    }
}

/// Catalog search criteria. All recognized filters are conjunctive; the
/// free-text term matches any of title, description and brand.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub limit: Option<i64>,
}

impl ProductQuery {
    /// Blank text filters and non-positive limits are treated as absent.
    pub fn normalized(self) -> Self {
        Self {
            category: self.category.and_then(non_blank),
            min_price: self.min_price,
            max_price: self.max_price,
            search: self.search.and_then(non_blank),
            limit: self.limit.filter(|limit| *limit > 0),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_search_is_dropped() {
        let query = ProductQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };

        assert!(query.normalized().search.is_none());
    }

    #[test]
    fn search_term_is_trimmed() {
        let query = ProductQuery {
            search: Some("  laptop ".to_string()),
            ..Default::default()
        };

        assert_eq!(query.normalized().search.as_deref(), Some("laptop"));
    }

    #[test]
    fn non_positive_limit_is_dropped() {
        let query = ProductQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(query.normalized().limit.is_none());

        let query = ProductQuery {
            limit: Some(-3),
            ..Default::default()
        };
        assert!(query.normalized().limit.is_none());
    }

    #[test]
    fn positive_limit_and_prices_pass_through() {
        let query = ProductQuery {
            min_price: Some(Decimal::from(10)),
            max_price: Some(Decimal::from(99)),
            limit: Some(5),
            ..Default::default()
        };

        let normalized = query.normalized();
        assert_eq!(normalized.min_price, Some(Decimal::from(10)));
        assert_eq!(normalized.max_price, Some(Decimal::from(99)));
        assert_eq!(normalized.limit, Some(5));
    }

    #[test]
    fn blank_category_is_dropped() {
        let query = ProductQuery {
            category: Some(" ".to_string()),
            ..Default::default()
        };

        assert!(query.normalized().category.is_none());
    }
}
