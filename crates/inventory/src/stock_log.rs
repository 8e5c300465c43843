use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use localshop_core::{Entity, ProductId, StockLogId};

use crate::product::Product;

/// Reason recorded when the user gives none.
pub const DEFAULT_REASON: &str = "No reason provided";

/// Acting user recorded on log entries unless configured otherwise.
pub const DEFAULT_ACTOR: &str = "Admin";

/// How a stock adjustment's quantity is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// Add the quantity to the current stock.
    Increase,
    /// Subtract the quantity from the current stock.
    Decrease,
    /// Set the stock to the quantity.
    Adjustment,
}

impl AdjustmentKind {
    /// New stock level after applying `quantity` to `current`, clamped to `0..=u32::MAX`.
    pub fn apply(self, current: u32, quantity: u32) -> u32 {
        let current = i64::from(current);
        let quantity = i64::from(quantity);
        let next = match self {
            AdjustmentKind::Increase => current + quantity,
            AdjustmentKind::Decrease => current - quantity,
            AdjustmentKind::Adjustment => quantity,
        };
        next.clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Immutable audit record of one stock mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLogEntry {
    pub id: StockLogId,
    pub product_id: ProductId,
    /// Snapshot of the product name at the time of the adjustment.
    pub product_name: String,
    pub kind: AdjustmentKind,
    /// Quantity the user entered (not the net delta).
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    pub reason: String,
    pub date: NaiveDate,
    pub user: String,
}

impl Entity for StockLogEntry {
    type Id = StockLogId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl StockLogEntry {
    /// Record an adjustment of `product` (taken before the change is applied).
    pub fn record(
        product: &Product,
        kind: AdjustmentKind,
        quantity: u32,
        reason: &str,
        date: NaiveDate,
        user: &str,
    ) -> Self {
        let reason = if reason.trim().is_empty() {
            DEFAULT_REASON.to_string()
        } else {
            reason.to_string()
        };
        Self {
            id: StockLogId::new(),
            product_id: product.id,
            product_name: product.name.clone(),
            kind,
            quantity,
            previous_stock: product.stock_quantity,
            new_stock: kind.apply(product.stock_quantity, quantity),
            reason,
            date,
            user: user.to_string(),
        }
    }
}
