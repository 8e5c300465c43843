//! Sample catalog a fresh shop starts with.

use chrono::NaiveDate;

use localshop_core::{ProductId, StockLogId};

use crate::category::Category;
use crate::product::{Product, ProductStatus};
use crate::stock_log::{AdjustmentKind, StockLogEntry};

/// Products, categories and stock history of the sample shop.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Newest first.
    pub stock_log: Vec<StockLogEntry>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

struct Row {
    name: &'static str,
    category: &'static str,
    sub_category: &'static str,
    brand: &'static str,
    sku: &'static str,
    stock: u32,
    unit: &'static str,
    cost: f64,
    price: f64,
    expiry: Option<(i32, u32, u32)>,
    description: &'static str,
    status: ProductStatus,
    updated: (i32, u32, u32),
}

const ROWS: [Row; 8] = [
    Row {
        name: "Wireless Keyboard Pro",
        category: "Electronics",
        sub_category: "Computer Accessories",
        brand: "TechPro",
        sku: "WKB-001",
        stock: 45,
        unit: "piece",
        cost: 25.0,
        price: 49.99,
        expiry: None,
        description: "Premium wireless keyboard with RGB backlight",
        status: ProductStatus::InStock,
        updated: (2024, 12, 20),
    },
    Row {
        name: "Organic Green Tea",
        category: "Food & Beverage",
        sub_category: "Beverages",
        brand: "NaturePure",
        sku: "OGT-100",
        stock: 8,
        unit: "box",
        cost: 5.5,
        price: 12.99,
        expiry: Some((2025, 3, 15)),
        description: "100% organic green tea leaves",
        status: ProductStatus::LowStock,
        updated: (2024, 12, 19),
    },
    Row {
        name: "Premium Office Chair",
        category: "Furniture",
        sub_category: "Office Furniture",
        brand: "ErgoMax",
        sku: "POC-250",
        stock: 0,
        unit: "piece",
        cost: 120.0,
        price: 249.99,
        expiry: None,
        description: "Ergonomic office chair with lumbar support",
        status: ProductStatus::OutOfStock,
        updated: (2024, 12, 18),
    },
    Row {
        name: "LED Desk Lamp",
        category: "Electronics",
        sub_category: "Lighting",
        brand: "BrightLife",
        sku: "LDL-075",
        stock: 120,
        unit: "piece",
        cost: 15.0,
        price: 34.99,
        expiry: None,
        description: "Adjustable LED desk lamp with touch controls",
        status: ProductStatus::InStock,
        updated: (2024, 12, 21),
    },
    Row {
        name: "Protein Powder Chocolate",
        category: "Health & Wellness",
        sub_category: "Supplements",
        brand: "FitMax",
        sku: "PPC-500",
        stock: 3,
        unit: "container",
        cost: 22.0,
        price: 45.99,
        expiry: Some((2025, 1, 10)),
        description: "Premium whey protein powder",
        status: ProductStatus::LowStock,
        updated: (2024, 12, 20),
    },
    Row {
        name: "Yoga Mat Premium",
        category: "Health & Wellness",
        sub_category: "Fitness",
        brand: "ZenFit",
        sku: "YMP-200",
        stock: 65,
        unit: "piece",
        cost: 18.0,
        price: 39.99,
        expiry: None,
        description: "Non-slip yoga mat with carrying strap",
        status: ProductStatus::InStock,
        updated: (2024, 12, 21),
    },
    Row {
        name: "Smart Watch Series X",
        category: "Electronics",
        sub_category: "Wearables",
        brand: "TechPro",
        sku: "SWX-500",
        stock: 25,
        unit: "piece",
        cost: 180.0,
        price: 349.99,
        expiry: None,
        description: "Advanced smartwatch with health tracking",
        status: ProductStatus::InStock,
        updated: (2024, 12, 20),
    },
    Row {
        name: "Coffee Beans Premium Blend",
        category: "Food & Beverage",
        sub_category: "Coffee",
        brand: "BeanMasters",
        sku: "CBP-150",
        stock: 5,
        unit: "kg",
        cost: 12.0,
        price: 28.99,
        expiry: Some((2025, 6, 30)),
        description: "Premium arabica coffee beans",
        status: ProductStatus::LowStock,
        updated: (2024, 12, 19),
    },
];

impl SampleCatalog {
    pub fn load() -> Self {
        let products: Vec<Product> = ROWS
            .iter()
            .map(|row| Product {
                id: ProductId::new(),
                name: row.name.to_string(),
                category: row.category.to_string(),
                sub_category: row.sub_category.to_string(),
                brand: row.brand.to_string(),
                sku: row.sku.to_string(),
                stock_quantity: row.stock,
                unit_of_measure: row.unit.to_string(),
                cost_price: row.cost,
                selling_price: row.price,
                expiry_date: row.expiry.map(|(y, m, d)| date(y, m, d)),
                description: row.description.to_string(),
                image_url: String::new(),
                status: row.status,
                last_updated: date(row.updated.0, row.updated.1, row.updated.2),
            })
            .collect();

        let categories = vec![
            Category::new("Electronics", "Electronic devices and accessories").with_count(3),
            Category::new("Food & Beverage", "Food and beverage products").with_count(2),
            Category::new("Furniture", "Office and home furniture").with_count(1),
            Category::new("Health & Wellness", "Health and fitness products").with_count(2),
        ];

        let history = [
            (0, AdjustmentKind::Increase, 20, 25, 45, "New stock received from supplier", (2024, 12, 20), "Admin"),
            (1, AdjustmentKind::Decrease, 5, 13, 8, "Stock damaged during transport", (2024, 12, 19), "Manager"),
            (3, AdjustmentKind::Increase, 50, 70, 120, "Restocking after high demand", (2024, 12, 21), "Admin"),
        ];
        let mut stock_log: Vec<StockLogEntry> = history
            .into_iter()
            .map(|(index, kind, quantity, previous, new, reason, (y, m, d), user)| {
                let product = &products[index];
                StockLogEntry {
                    id: StockLogId::new(),
                    product_id: product.id,
                    product_name: product.name.clone(),
                    kind,
                    quantity,
                    previous_stock: previous,
                    new_stock: new,
                    reason: reason.to_string(),
                    date: date(y, m, d),
                    user: user.to_string(),
                }
            })
            .collect();
        stock_log.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            products,
            categories,
            stock_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::derive_status;

    #[test]
    fn sample_statuses_agree_with_thresholds() {
        let catalog = SampleCatalog::load();
        assert_eq!(catalog.products.len(), 8);
        for p in &catalog.products {
            assert_eq!(p.status, derive_status(p.stock_quantity, p.status), "{}", p.name);
        }
    }

    #[test]
    fn stock_log_is_newest_first() {
        let catalog = SampleCatalog::load();
        let dates: Vec<NaiveDate> = catalog.stock_log.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 12, 21), date(2024, 12, 20), date(2024, 12, 19)]);
        assert_eq!(catalog.stock_log[0].product_name, "LED Desk Lamp");
    }
}
