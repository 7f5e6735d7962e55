//! Unit tests for catalog types

#[cfg(test)]
mod tests {
    use crate::catalog::types::{Product, ProductQuery};
    use crate::query::{QuerySnapshot, SortOrder};
    use chrono::{TimeZone, Utc};

    fn product(title: &str, price: f64, brand: &str, category: &str) -> Product {
        Product {
            id: "p1".to_string(),
            title: title.to_string(),
            price,
            brand_id: brand.to_string(),
            category_id: category.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_from_empty_snapshot() {
        let query = ProductQuery::from_snapshot(&QuerySnapshot::empty());
        assert_eq!(query.search, None);
        assert_eq!(query.sort, SortOrder::CreatedDesc);
        assert_eq!(query.page, 1);
        assert!(query.brand_ids.is_empty());
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let snapshot = QuerySnapshot::parse("minPrice=ten&maxPrice=-4&sort=cheapest&page=0");
        let query = ProductQuery::from_snapshot(&snapshot);
        assert_eq!(query.min_price, None);
        assert_eq!(query.max_price, None);
        assert_eq!(query.sort, SortOrder::CreatedDesc);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        let query = ProductQuery::from_snapshot(&QuerySnapshot::parse("search=+++"));
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_matches_all_filters() {
        let snapshot = QuerySnapshot::parse(
            "search=PUMP&minPrice=10&maxPrice=50.5&brandId=b1,b2&categoryId=c1",
        );
        let query = ProductQuery::from_snapshot(&snapshot);

        assert!(query.matches(&product("Garden pump", 50.5, "b2", "c1")));
        assert!(!query.matches(&product("Garden pump", 60.0, "b2", "c1")));
        assert!(!query.matches(&product("Garden pump", 9.99, "b2", "c1")));
        assert!(!query.matches(&product("Garden pump", 20.0, "b3", "c1")));
        assert!(!query.matches(&product("Garden pump", 20.0, "b1", "c2")));
        assert!(!query.matches(&product("Hose", 20.0, "b1", "c1")));
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(product("Hose", 3.5, "b1", "c1")).unwrap();
        assert_eq!(json["brandId"], "b1");
        assert!(json.get("createdAt").is_some());
    }
}
