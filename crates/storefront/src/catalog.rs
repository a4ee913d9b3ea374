//! Read-only product catalog.
//!
//! The catalog provider hands over an ordered sequence of products at
//! startup; the session engine treats it as static for the lifetime of the
//! session and never mutates it.

use std::collections::HashMap;

use verdantia_core::{Product, ProductId};

/// Immutable product collection with id-based lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from the provider's product sequence.
    ///
    /// Display order is preserved. If the provider ever supplies two records
    /// with the same id, the first occurrence wins for lookup; both remain
    /// in display order.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            index.entry(product.id.clone()).or_insert(position);
        }
        Self { products, index }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&pos| self.products.get(pos))
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products within a category, in display order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use verdantia_core::{CarbonFootprint, CurrencyCode, Price};

    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::new(100, CurrencyCode::USD),
            category: category.to_string(),
            description: String::new(),
            images: Vec::new(),
            specs: BTreeMap::new(),
            rating: 4.0,
            review_count: 10,
            ar_capable: false,
            stock: 5,
            carbon_footprint: CarbonFootprint::Neutral,
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![product("a", "audio"), product("b", "wearables")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&ProductId::new("b")).map(|p| p.name.as_str()),
            Some("Product b")
        );
        assert!(catalog.get(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let catalog = Catalog::new(vec![
            product("a", "audio"),
            product("b", "wearables"),
            product("c", "audio"),
        ]);
        let ids: Vec<_> = catalog
            .in_category("audio")
            .map(|p| p.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_duplicate_id_first_occurrence_wins() {
        let mut second = product("a", "audio");
        second.name = "Shadowed".to_string();
        let catalog = Catalog::new(vec![product("a", "audio"), second]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&ProductId::new("a")).map(|p| p.name.as_str()),
            Some("Product a")
        );
    }
}
