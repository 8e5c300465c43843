//! The inventory ledger: catalog, categories, stock history and alerts.
//!
//! Every mutation runs to completion synchronously and reports its outcome on
//! the notification queue, warnings for rejected input and successes
//! otherwise. A rejected operation leaves the ledger unchanged.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use localshop_core::{CategoryId, DomainError, DomainResult, ProductId};

use crate::alerts;
use crate::category::Category;
use crate::delimited::{self, DelimitedError};
use crate::notification::{Notification, NotificationId, NotificationQueue, Severity, NOTIFICATION_TTL_SECS};
use crate::product::{Product, ProductForm, ProductStatus, derive_status};
use crate::seed::SampleCatalog;
use crate::stats::InventoryStats;
use crate::stock_log::{AdjustmentKind, DEFAULT_ACTOR, StockLogEntry};
use crate::view::{self, Page, ViewQuery};

/// Blocking confirmation step in front of destructive bulk actions.
pub trait Confirmation {
    /// Returns `true` if the user accepted `prompt`.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A confirmation answered ahead of time (e.g. a `confirm` flag on a request).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmed(pub bool);

impl Confirmation for Confirmed {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Field overwritten by a bulk update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkField {
    Category,
    Status,
    /// Selling price.
    Price,
}

/// Exported catalog text, ready to be handed to a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub content: String,
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// User recorded on stock log entries.
    pub actor: String,
    pub notification_ttl: TimeDelta,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            actor: DEFAULT_ACTOR.to_string(),
            notification_ttl: TimeDelta::seconds(NOTIFICATION_TTL_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InventoryLedger {
    actor: String,
    products: Vec<Product>,
    categories: Vec<Category>,
    /// Newest first.
    stock_log: Vec<StockLogEntry>,
    selection: Vec<ProductId>,
    notifications: NotificationQueue,
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl InventoryLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            actor: config.actor,
            products: Vec::new(),
            categories: Vec::new(),
            stock_log: Vec::new(),
            selection: Vec::new(),
            notifications: NotificationQueue::new(config.notification_ttl),
        }
    }

    /// Ledger preloaded with `catalog`. Does not run the alert scan.
    pub fn with_catalog(config: LedgerConfig, catalog: SampleCatalog) -> Self {
        let mut ledger = Self::new(config);
        ledger.products = catalog.products;
        ledger.categories = catalog.categories;
        ledger.stock_log = catalog.stock_log;
        ledger
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Stock history, newest first.
    pub fn stock_log(&self) -> &[StockLogEntry] {
        &self.stock_log
    }

    pub fn selection(&self) -> &[ProductId] {
        &self.selection
    }

    pub fn view(&self, query: &ViewQuery) -> Page<Product> {
        view::compute_view(&self.products, query)
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::from_products(&self.products)
    }

    /// Notifications still live at `now`, oldest first.
    pub fn notifications(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> + '_ {
        self.notifications.active(now)
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn sweep_notifications(&mut self, now: DateTime<Utc>) -> usize {
        self.notifications.sweep(now)
    }

    /// Raise low-stock and near-expiry alerts for the current catalog.
    ///
    /// Meant to run once, right after the catalog is loaded. Later mutations do
    /// not re-run it, so its alerts describe the catalog as it was at startup.
    pub fn run_startup_alert_scan(&mut self, at: DateTime<Utc>) -> usize {
        let alerts = alerts::scan(&self.products, at);
        let raised = alerts.len();
        for alert in alerts {
            debug!(product_id = %alert.product_id, severity = ?alert.severity, "inventory alert");
            self.notifications.push(alert.message, alert.severity, at);
        }
        info!(raised, "startup alert scan finished");
        raised
    }

    pub fn add_product(&mut self, form: ProductForm, at: DateTime<Utc>) -> DomainResult<ProductId> {
        if let Err(e) = form.validate() {
            self.warn("Please fill in all required fields", at);
            return Err(e);
        }

        let id = ProductId::new();
        let product = Product::from_form(id, form, at.date_naive());
        info!(product_id = %id, sku = %product.sku, "product added");
        self.products.push(product);
        self.succeed("Product added successfully!", at);
        Ok(id)
    }

    /// Replace every field of a product except its id.
    ///
    /// A form without a status re-derives it from the new quantity; an explicit
    /// status (including `Discontinued`) is stored as given. Unknown ids are
    /// rejected without a notification.
    pub fn edit_product(&mut self, id: ProductId, form: ProductForm, at: DateTime<Utc>) -> DomainResult<()> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            debug!(product_id = %id, "edit ignored: no such product");
            return Err(DomainError::not_found());
        };

        let status = form
            .status
            .unwrap_or_else(|| derive_status(form.stock_quantity, product.status));
        *product = Product::from_form(
            id,
            ProductForm {
                status: Some(status),
                ..form
            },
            at.date_naive(),
        );

        info!(product_id = %id, "product updated");
        self.succeed("Product updated successfully!", at);
        Ok(())
    }

    pub fn delete_product(&mut self, id: ProductId, at: DateTime<Utc>) -> DomainResult<()> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            debug!(product_id = %id, "delete ignored: no such product");
            return Err(DomainError::not_found());
        }
        self.selection.retain(|selected| *selected != id);

        info!(product_id = %id, "product deleted");
        self.succeed("Product deleted successfully!", at);
        Ok(())
    }

    /// Remove every product in `ids` once `confirmation` accepts.
    ///
    /// Returns how many products were actually removed.
    pub fn bulk_delete(
        &mut self,
        ids: &[ProductId],
        confirmation: &mut impl Confirmation,
        at: DateTime<Utc>,
    ) -> DomainResult<usize> {
        let prompt = format!("Delete {} products?", ids.len());
        if !confirmation.confirm(&prompt) {
            return Err(DomainError::not_confirmed(prompt));
        }

        let before = self.products.len();
        self.products.retain(|p| !ids.contains(&p.id));
        let removed = before - self.products.len();
        self.selection.clear();

        info!(requested = ids.len(), removed, "bulk delete");
        self.succeed(format!("{removed} products deleted successfully!"), at);
        Ok(removed)
    }

    /// Apply a stock adjustment and record it in the stock log.
    ///
    /// The new stock is clamped at zero and the status re-derived from it,
    /// except that a `Discontinued` product stays Discontinued; only an edit clears it.
    pub fn adjust_stock(
        &mut self,
        id: ProductId,
        kind: AdjustmentKind,
        quantity: i64,
        reason: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<StockLogEntry> {
        const INVALID: &str = "Please enter a valid quantity";

        let quantity = match u32::try_from(quantity) {
            Ok(q) if q > 0 => q,
            _ => {
                self.warn(INVALID, at);
                return Err(DomainError::validation(format!(
                    "quantity must be a positive whole number, got {quantity}"
                )));
            }
        };

        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            self.warn(INVALID, at);
            return Err(DomainError::not_found());
        };

        let entry = StockLogEntry::record(product, kind, quantity, reason, at.date_naive(), &self.actor);
        product.stock_quantity = entry.new_stock;
        product.status = derive_status(entry.new_stock, product.status);

        info!(
            product_id = %id,
            kind = ?kind,
            quantity,
            previous = entry.previous_stock,
            new = entry.new_stock,
            "stock adjusted"
        );
        self.stock_log.insert(0, entry.clone());
        self.succeed("Stock adjusted successfully!", at);
        Ok(entry)
    }

    /// Overwrite one field on every product in `ids` and clear the selection.
    ///
    /// `value` is stored as typed; only a completely empty value is rejected.
    /// Returns how many products were updated.
    pub fn bulk_update(
        &mut self,
        ids: &[ProductId],
        field: BulkField,
        value: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<usize> {
        if value.is_empty() {
            self.warn("Please select a value to update", at);
            return Err(DomainError::validation("bulk update value is empty"));
        }

        let change = match field {
            BulkField::Category => BulkChange::Category(value.to_string()),
            BulkField::Status => match value.parse::<ProductStatus>() {
                Ok(status) => BulkChange::Status(status),
                Err(e) => {
                    self.warn("Please select a valid status", at);
                    return Err(e);
                }
            },
            BulkField::Price => match value.trim().parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => BulkChange::Price(price),
                _ => {
                    self.warn("Please enter a valid price", at);
                    return Err(DomainError::validation(format!("invalid price: {value:?}")));
                }
            },
        };

        let mut updated = 0;
        for product in self.products.iter_mut().filter(|p| ids.contains(&p.id)) {
            match &change {
                BulkChange::Category(category) => product.category = category.clone(),
                BulkChange::Status(status) => product.status = *status,
                BulkChange::Price(price) => product.selling_price = *price,
            }
            updated += 1;
        }
        self.selection.clear();

        info!(field = ?field, updated, "bulk update");
        self.succeed(format!("{updated} products updated successfully!"), at);
        Ok(updated)
    }

    pub fn add_category(
        &mut self,
        name: &str,
        description: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<CategoryId> {
        if name.is_empty() {
            self.warn("Please enter category name", at);
            return Err(DomainError::validation("category name cannot be empty"));
        }

        let category = Category::new(name, description);
        let id = category.id;
        info!(category_id = %id, name, "category added");
        self.categories.push(category);
        self.succeed("Category added successfully!", at);
        Ok(id)
    }

    /// Remove a category once `confirmation` accepts. Products keep the name.
    pub fn delete_category(
        &mut self,
        id: CategoryId,
        confirmation: &mut impl Confirmation,
        at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Err(DomainError::not_found());
        };

        let prompt = format!("Delete category \"{}\"?", self.categories[index].name);
        if !confirmation.confirm(&prompt) {
            return Err(DomainError::not_confirmed(prompt));
        }

        let removed = self.categories.remove(index);
        info!(category_id = %id, name = %removed.name, "category deleted");
        self.succeed("Category deleted", at);
        Ok(())
    }

    /// Append every well-formed row of `text`; returns how many were imported.
    pub fn import_from_delimited_text(&mut self, text: &str, at: DateTime<Utc>) -> usize {
        let imported = delimited::parse_products(text, at.date_naive());
        let count = imported.len();
        self.products.extend(imported);

        info!(count, "products imported");
        self.succeed(format!("{count} products imported successfully!"), at);
        count
    }

    /// Render the products `query` filters to (all pages) as delimited text.
    pub fn export_to_delimited_text(
        &mut self,
        query: &ViewQuery,
        at: DateTime<Utc>,
    ) -> Result<Export, DelimitedError> {
        let visible = view::filter_and_sort(&self.products, query);
        let rows = visible.len();
        let content = delimited::render_products(visible)?;
        let file_name = delimited::export_file_name(at.date_naive());

        info!(rows, file_name = %file_name, "inventory exported");
        self.succeed("Export completed successfully!", at);
        Ok(Export {
            file_name,
            content,
            rows,
        })
    }

    /// Add or remove one product from the selection; returns whether it is now selected.
    pub fn toggle_selection(&mut self, id: ProductId) -> DomainResult<bool> {
        if let Some(index) = self.selection.iter().position(|selected| *selected == id) {
            self.selection.remove(index);
            return Ok(false);
        }
        if self.product(id).is_none() {
            return Err(DomainError::not_found());
        }
        self.selection.push(id);
        Ok(true)
    }

    /// Replace the selection with the known products among `ids`.
    pub fn select_all(&mut self, ids: &[ProductId]) {
        self.selection.clear();
        for id in ids {
            if !self.selection.contains(id) && self.product(*id).is_some() {
                self.selection.push(*id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn warn(&mut self, message: impl Into<String>, at: DateTime<Utc>) {
        self.notifications.push(message, Severity::Warning, at);
    }

    fn succeed(&mut self, message: impl Into<String>, at: DateTime<Utc>) {
        self.notifications.push(message, Severity::Success, at);
    }
}

enum BulkChange {
    Category(String),
    Status(ProductStatus),
    Price(f64),
}
