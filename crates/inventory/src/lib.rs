//! Inventory ledger for a small shop.
//!
//! This crate holds the business rules for the product catalog, implemented as
//! synchronous in-memory domain logic (no HTTP, no storage). Callers pass the
//! business time into every mutation.

pub mod alerts;
pub mod category;
pub mod delimited;
pub mod ledger;
pub mod notification;
pub mod product;
pub mod seed;
pub mod stats;
pub mod stock_log;
pub mod view;

pub use category::Category;
pub use delimited::DelimitedError;
pub use ledger::{BulkField, Confirmation, Confirmed, Export, InventoryLedger, LedgerConfig};
pub use notification::{Notification, NotificationId, NotificationQueue, Severity};
pub use product::{LOW_STOCK_THRESHOLD, Product, ProductForm, ProductStatus, derive_status};
pub use seed::SampleCatalog;
pub use stats::InventoryStats;
pub use stock_log::{AdjustmentKind, StockLogEntry};
pub use view::{PAGE_SIZE, Page, SortDirection, SortKey, ViewQuery, compute_view, filter_and_sort};
