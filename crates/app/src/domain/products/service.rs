//! Products service.

use mockall::automock;

use crate::domain::products::records::{DEMO_PRODUCTS, ProductRecord};

/// Maximum number of matches a product search returns.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Catalog service over [`DEMO_PRODUCTS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProductsService;

impl DemoProductsService {
    /// The demo catalog service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProductsService for DemoProductsService {
    fn list_products(&self) -> Vec<ProductRecord> {
        DEMO_PRODUCTS.to_vec()
    }

    fn get_product(&self, code: &str) -> Option<ProductRecord> {
        DEMO_PRODUCTS.iter().find(|p| p.code == code).copied()
    }

    fn search_products(&self, query: &str, selected: &[String]) -> Vec<ProductRecord> {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return Vec::new();
        }

        DEMO_PRODUCTS
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query) || p.code.to_lowercase().contains(&query)
            })
            .filter(|p| !selected.iter().any(|code| code == p.code))
            .take(SEARCH_RESULT_LIMIT)
            .copied()
            .collect()
    }
}

/// Product catalog lookups.
#[automock]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    fn list_products(&self) -> Vec<ProductRecord>;

    /// Retrieve a single product by code.
    fn get_product(&self, code: &str) -> Option<ProductRecord>;

    /// Case-insensitive search on name or code, skipping products already
    /// selected. A blank query matches nothing.
    fn search_products(&self, query: &str, selected: &[String]) -> Vec<ProductRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(products: &[ProductRecord]) -> Vec<&'static str> {
        products.iter().map(|p| p.code).collect()
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let results = DemoProductsService::new().search_products("vitamin", &[]);

        assert_eq!(codes(&results), ["B0001", "B0002"]);
    }

    #[test]
    fn search_matches_code() {
        let results = DemoProductsService::new().search_products("c000", &[]);

        assert_eq!(codes(&results), ["C0001", "C0002"]);
    }

    #[test]
    fn search_skips_selected_products() {
        let results =
            DemoProductsService::new().search_products("a000", &["A0002".to_string()]);

        assert_eq!(codes(&results), ["A0001", "A0003"]);
    }

    #[test]
    fn blank_search_returns_nothing() {
        assert!(DemoProductsService::new().search_products("   ", &[]).is_empty());
    }

    #[test]
    fn search_is_limited() {
        // Every demo product code contains a zero.
        let results = DemoProductsService::new().search_products("0", &[]);

        assert_eq!(results.len(), SEARCH_RESULT_LIMIT);
    }

    #[test]
    fn get_product_by_code() {
        let service = DemoProductsService::new();

        assert_eq!(
            service.get_product("E0001").map(|p| p.name),
            Some("Eye Drops")
        );
        assert_eq!(service.get_product("Z9999"), None);
    }
}
