use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use localshop_core::{DomainError, DomainResult, Entity, ProductId};

/// Quantities at or below this value count as "Low Stock".
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Unit of measure used when none is given.
pub const DEFAULT_UNIT: &str = "piece";

/// Stock status of a catalog item.
///
/// Stored on the product rather than computed on read so that a manual
/// `Discontinued` survives; [`derive_status`] is the single recompute rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Discontinued")]
    Discontinued,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 4] = [
        ProductStatus::InStock,
        ProductStatus::LowStock,
        ProductStatus::OutOfStock,
        ProductStatus::Discontinued,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::InStock => "In Stock",
            ProductStatus::LowStock => "Low Stock",
            ProductStatus::OutOfStock => "Out of Stock",
            ProductStatus::Discontinued => "Discontinued",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProductStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown product status: {s:?}")))
    }
}

/// Recompute a product's status after its stock quantity changed.
///
/// `Discontinued` is a manual override and is kept as-is.
pub fn derive_status(quantity: u32, current: ProductStatus) -> ProductStatus {
    if current == ProductStatus::Discontinued {
        return ProductStatus::Discontinued;
    }
    match quantity {
        0 => ProductStatus::OutOfStock,
        q if q <= LOW_STOCK_THRESHOLD => ProductStatus::LowStock,
        _ => ProductStatus::InStock,
    }
}

/// Catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    /// Intended unique, not enforced.
    pub sku: String,
    pub stock_quantity: u32,
    pub unit_of_measure: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub expiry_date: Option<NaiveDate>,
    pub description: String,
    pub image_url: String,
    pub status: ProductStatus,
    pub last_updated: NaiveDate,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Build a product from the add/edit form.
    ///
    /// A form without an explicit status gets one derived from its quantity.
    pub fn from_form(id: ProductId, form: ProductForm, today: NaiveDate) -> Self {
        let status = form
            .status
            .unwrap_or_else(|| derive_status(form.stock_quantity, ProductStatus::InStock));
        Self {
            id,
            name: form.name,
            category: form.category,
            sub_category: form.sub_category,
            brand: form.brand,
            sku: form.sku,
            stock_quantity: form.stock_quantity,
            unit_of_measure: form.unit_of_measure,
            cost_price: form.cost_price,
            selling_price: form.selling_price,
            expiry_date: form.expiry_date,
            description: form.description,
            image_url: form.image_url,
            status,
            last_updated: today,
        }
    }

    /// Total value of the units on hand at the selling price.
    pub fn stock_value(&self) -> f64 {
        f64::from(self.stock_quantity) * self.selling_price
    }
}

/// Fields a user fills in when adding or editing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub sku: String,
    pub stock_quantity: u32,
    pub unit_of_measure: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub expiry_date: Option<NaiveDate>,
    pub description: String,
    pub image_url: String,
    pub status: Option<ProductStatus>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            sub_category: String::new(),
            brand: String::new(),
            sku: String::new(),
            stock_quantity: 0,
            unit_of_measure: DEFAULT_UNIT.to_string(),
            cost_price: 0.0,
            selling_price: 0.0,
            expiry_date: None,
            description: String::new(),
            image_url: String::new(),
            status: None,
        }
    }
}

impl ProductForm {
    /// Name, SKU and category are required (non-empty; whitespace counts as a value).
    pub fn validate(&self) -> DomainResult<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("sku", &self.sku),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, sku: &str, category: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            sku: sku.to_string(),
            category: category.to_string(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn derive_status_follows_thresholds() {
        assert_eq!(derive_status(0, ProductStatus::InStock), ProductStatus::OutOfStock);
        assert_eq!(derive_status(1, ProductStatus::OutOfStock), ProductStatus::LowStock);
        assert_eq!(derive_status(10, ProductStatus::InStock), ProductStatus::LowStock);
        assert_eq!(derive_status(11, ProductStatus::LowStock), ProductStatus::InStock);
    }

    #[test]
    fn derive_status_keeps_discontinued() {
        for qty in [0, 5, 500] {
            assert_eq!(
                derive_status(qty, ProductStatus::Discontinued),
                ProductStatus::Discontinued
            );
        }
    }

    #[test]
    fn status_parses_display_names() {
        for status in ProductStatus::ALL {
            assert_eq!(status.to_string().parse::<ProductStatus>().unwrap(), status);
        }
        assert_eq!("  low stock ".parse::<ProductStatus>().unwrap(), ProductStatus::LowStock);
        assert!("Sold Out".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_display_name() {
        let json = serde_json::to_string(&ProductStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"Out of Stock\"");
        let back: ProductStatus = serde_json::from_str("\"Low Stock\"").unwrap();
        assert_eq!(back, ProductStatus::LowStock);
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let err = form("", "", "Tools").validate().unwrap_err();
        assert_eq!(err, DomainError::validation("required fields missing: name, sku"));
        assert!(form("Hammer", "H-1", "Tools").validate().is_ok());
    }

    #[test]
    fn validate_only_rejects_empty_fields() {
        assert!(form(" ", "H-1", "Tools").validate().is_ok());
    }

    #[test]
    fn from_form_derives_status_when_absent() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let mut f = form("Tea", "T-1", "Food");
        f.stock_quantity = 4;
        let p = Product::from_form(ProductId::new(), f.clone(), today);
        assert_eq!(p.status, ProductStatus::LowStock);
        assert_eq!(p.last_updated, today);

        f.status = Some(ProductStatus::Discontinued);
        let p = Product::from_form(ProductId::new(), f, today);
        assert_eq!(p.status, ProductStatus::Discontinued);
    }

    #[test]
    fn default_form_uses_piece_unit() {
        assert_eq!(ProductForm::default().unit_of_measure, DEFAULT_UNIT);
    }
}
