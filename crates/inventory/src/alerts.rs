//! Low-stock and near-expiry alerts raised when the ledger is initialized.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use localshop_core::ProductId;

use crate::notification::Severity;
use crate::product::{LOW_STOCK_THRESHOLD, Product, ProductStatus};

/// Products expiring within this many days raise an alert.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub product_id: ProductId,
    pub message: String,
    pub severity: Severity,
}

/// Whole days until `expiry` (midnight UTC), rounded up.
///
/// Anything later today counts as 1; an expiry already passed is 0 or negative.
pub fn days_to_expiry(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expires_at = expiry.and_time(NaiveTime::MIN).and_utc();
    let millis = (expires_at - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Alerts for one snapshot of the catalog, in catalog order.
pub fn scan(products: &[Product], now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for product in products {
        if product.stock_quantity <= LOW_STOCK_THRESHOLD && product.status != ProductStatus::OutOfStock {
            alerts.push(Alert {
                product_id: product.id,
                message: format!(
                    "Low stock alert: {} has only {} units left",
                    product.name, product.stock_quantity
                ),
                severity: Severity::Warning,
            });
        }

        if let Some(expiry) = product.expiry_date {
            let days = days_to_expiry(expiry, now);
            if days > 0 && days <= EXPIRY_WINDOW_DAYS {
                alerts.push(Alert {
                    product_id: product.id,
                    message: format!("{} expires in {} days", product.name, days),
                    severity: Severity::Info,
                });
            }
        }
    }
    alerts
}
