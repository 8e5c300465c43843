use serde::Serialize;

use crate::product::{Product, ProductStatus};

/// Headline numbers for the inventory dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryStats {
    pub total_products: usize,
    /// Sum of stock quantity times selling price.
    pub total_value: f64,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventoryStats {
    pub fn from_products(products: &[Product]) -> Self {
        let count = |status: ProductStatus| products.iter().filter(|p| p.status == status).count();
        Self {
            total_products: products.len(),
            total_value: products.iter().map(Product::stock_value).sum(),
            low_stock: count(ProductStatus::LowStock),
            out_of_stock: count(ProductStatus::OutOfStock),
        }
    }
}
