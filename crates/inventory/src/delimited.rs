//! Comma-separated import/export of the product catalog.
//!
//! Import format: `name,sku,category,brand,stock,unit,costPrice,sellingPrice[,status]`
//! with the first line treated as a header. Rows with fewer than
//! [`MIN_IMPORT_FIELDS`] fields are dropped without an error.
//!
//! The round trip is lossy: ids are regenerated and sub-category, expiry,
//! description, image and last-updated are not exported.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use localshop_core::ProductId;

use crate::product::{DEFAULT_UNIT, Product, ProductStatus};

/// Header row written by [`render_products`].
pub const EXPORT_HEADER: [&str; 9] = [
    "Name",
    "SKU",
    "Category",
    "Brand",
    "Stock",
    "Unit",
    "Cost Price",
    "Selling Price",
    "Status",
];

/// Rows shorter than this are skipped on import.
pub const MIN_IMPORT_FIELDS: usize = 8;

#[derive(Debug, Error)]
pub enum DelimitedError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer flush failed: {0}")]
    Flush(String),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// File name used for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("inventory_{}.csv", date.format("%Y-%m-%d"))
}

/// Parse every well-formed data row into a new product.
///
/// The first physical line is the header and is dropped even when it is blank.
pub fn parse_products(text: &str, today: NaiveDate) -> Vec<Product> {
    let rows = text.split_once('\n').map_or("", |(_header, rest)| rest);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rows.as_bytes());

    let mut products = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = index + 2;
        match record {
            Ok(record) if record.len() >= MIN_IMPORT_FIELDS => {
                products.push(product_from_record(&record, today));
            }
            Ok(record) => {
                debug!(line, fields = record.len(), "skipping short import row");
            }
            Err(error) => {
                debug!(line, %error, "skipping unreadable import row");
            }
        }
    }
    products
}

fn product_from_record(record: &csv::StringRecord, today: NaiveDate) -> Product {
    let field = |index: usize| record.get(index).unwrap_or_default();

    let unit = match field(5) {
        "" => DEFAULT_UNIT.to_string(),
        unit => unit.to_string(),
    };
    let status = field(8).parse().unwrap_or(ProductStatus::InStock);

    Product {
        id: ProductId::new(),
        name: field(0).to_string(),
        sku: field(1).to_string(),
        category: field(2).to_string(),
        brand: field(3).to_string(),
        stock_quantity: parse_quantity(field(4)),
        unit_of_measure: unit,
        cost_price: parse_price(field(6)),
        selling_price: parse_price(field(7)),
        status,
        sub_category: String::new(),
        expiry_date: None,
        description: String::new(),
        image_url: String::new(),
        last_updated: today,
    }
}

/// Whole units; fractional input is truncated, negatives become 0, garbage becomes 0.
fn parse_quantity(raw: &str) -> u32 {
    let raw = raw.trim();
    let value = raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    });
    value.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32
}

fn parse_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Header plus one row per product, newline-terminated.
///
/// Fields containing commas or quotes are quoted, so names like
/// `"Pens, blue"` survive a round trip.
pub fn render_products<'a>(
    products: impl IntoIterator<Item = &'a Product>,
) -> Result<String, DelimitedError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for p in products {
        writer.write_record([
            p.name.clone(),
            p.sku.clone(),
            p.category.clone(),
            p.brand.clone(),
            p.stock_quantity.to_string(),
            p.unit_of_measure.clone(),
            p.cost_price.to_string(),
            p.selling_price.to_string(),
            p.status.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DelimitedError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductForm;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()
    }

    #[test]
    fn skips_header_and_short_rows() {
        let text = "name,sku,category,brand,stock,unit,cost,price,status\n\
                    Desk Lamp,LDL-075,Electronics,BrightLife,120,piece,15,34.99,In Stock\n\
                    broken,row,with,five,fields\n";
        let products = parse_products(text, today());

        assert_eq!(products.len(), 1);
        let lamp = &products[0];
        assert_eq!(lamp.name, "Desk Lamp");
        assert_eq!(lamp.stock_quantity, 120);
        assert_eq!(lamp.cost_price, 15.0);
        assert_eq!(lamp.selling_price, 34.99);
        assert_eq!(lamp.last_updated, today());
        assert!(lamp.description.is_empty());
        assert!(lamp.expiry_date.is_none());
    }

    #[test]
    fn blank_first_line_is_the_header() {
        let text = "\nMug,M-1,Home,Acme,7,piece,2,4\nCup,C-1,Home,Acme,3,piece,1,2\n";
        let names: Vec<String> = parse_products(text, today())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Mug", "Cup"]);
    }

    #[test]
    fn header_only_text_imports_nothing() {
        assert!(parse_products("name,sku,category,brand,stock,unit,cost,price", today()).is_empty());
        assert!(parse_products("", today()).is_empty());
    }

    #[test]
    fn fills_defaults_for_missing_or_bad_values() {
        let text = "header\nTea,T-1,Food,Pure,lots,,abc,,\nMug,M-1,Home,Acme,7.9,box,2,4\n";
        let products = parse_products(text, today());
        assert_eq!(products.len(), 2);

        let tea = &products[0];
        assert_eq!(tea.stock_quantity, 0);
        assert_eq!(tea.unit_of_measure, DEFAULT_UNIT);
        assert_eq!(tea.cost_price, 0.0);
        assert_eq!(tea.selling_price, 0.0);
        assert_eq!(tea.status, ProductStatus::InStock);

        let mug = &products[1];
        assert_eq!(mug.stock_quantity, 7);
        assert_eq!(mug.unit_of_measure, "box");
        assert_eq!(mug.status, ProductStatus::InStock);
    }

    #[test]
    fn reads_status_column_and_handles_crlf() {
        let text = "h\r\nChair,POC-250,Furniture,ErgoMax,0,piece,120,249.99,Out of Stock\r\n";
        let products = parse_products(text, today());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].status, ProductStatus::OutOfStock);
        assert_eq!(products[0].name, "Chair");
    }

    #[test]
    fn header_only_or_empty_input_imports_nothing() {
        assert!(parse_products("", today()).is_empty());
        assert!(parse_products("Name,SKU,Category\n", today()).is_empty());
    }

    #[test]
    fn renders_header_and_rows() {
        let form = ProductForm {
            name: "Wireless Keyboard Pro".to_string(),
            sku: "WKB-001".to_string(),
            category: "Electronics".to_string(),
            brand: "TechPro".to_string(),
            stock_quantity: 45,
            cost_price: 25.0,
            selling_price: 49.99,
            ..ProductForm::default()
        };
        let p = Product::from_form(ProductId::new(), form, today());
        let csv = render_products([&p]).unwrap();

        assert_eq!(
            csv,
            "Name,SKU,Category,Brand,Stock,Unit,Cost Price,Selling Price,Status\n\
             Wireless Keyboard Pro,WKB-001,Electronics,TechPro,45,piece,25,49.99,In Stock\n"
        );
    }

    #[test]
    fn export_then_import_keeps_catalog_fields() {
        let form = ProductForm {
            name: "Pens, blue".to_string(),
            sku: "PB-10".to_string(),
            category: "Stationery".to_string(),
            brand: "Inky".to_string(),
            stock_quantity: 3,
            unit_of_measure: "pack".to_string(),
            cost_price: 1.25,
            selling_price: 2.5,
            description: "dropped on export".to_string(),
            ..ProductForm::default()
        };
        let original = Product::from_form(ProductId::new(), form, today());
        let csv = render_products([&original]).unwrap();
        let imported = parse_products(&csv, today());

        assert_eq!(imported.len(), 1);
        let back = &imported[0];
        assert_ne!(back.id, original.id);
        assert_eq!(back.name, original.name);
        assert_eq!(back.sku, original.sku);
        assert_eq!(back.category, original.category);
        assert_eq!(back.brand, original.brand);
        assert_eq!(back.stock_quantity, original.stock_quantity);
        assert_eq!(back.unit_of_measure, original.unit_of_measure);
        assert_eq!(back.cost_price, original.cost_price);
        assert_eq!(back.selling_price, original.selling_price);
        assert_eq!(back.status, original.status);
        assert!(back.description.is_empty());
    }

    #[test]
    fn file_name_carries_iso_date() {
        assert_eq!(export_file_name(today()), "inventory_2024-12-21.csv");
    }
}
