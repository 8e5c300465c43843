//! Shared application state: one in-memory inventory ledger behind a lock.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tokio::task::JoinHandle;

use localshop_inventory::{InventoryLedger, LedgerConfig, SampleCatalog};

use crate::config::ApiConfig;

pub struct AppServices {
    ledger: RwLock<InventoryLedger>,
}

impl AppServices {
    pub fn new(ledger: InventoryLedger) -> Self {
        Self {
            ledger: RwLock::new(ledger),
        }
    }

    /// Run `f` against a shared view of the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&InventoryLedger) -> R) -> R {
        let guard = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn write<R>(&self, f: impl FnOnce(&mut InventoryLedger) -> R) -> R {
        let mut guard = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Build the ledger from config: optional sample catalog, then the startup alert scan.
pub fn build_services(config: &ApiConfig) -> AppServices {
    let ledger_config = LedgerConfig {
        actor: config.actor.clone(),
        notification_ttl: TimeDelta::seconds(config.notification_ttl_secs),
    };

    let mut ledger = if config.seed_sample_data {
        InventoryLedger::with_catalog(ledger_config, SampleCatalog::load())
    } else {
        InventoryLedger::new(ledger_config)
    };

    let alerts = ledger.run_startup_alert_scan(Utc::now());
    tracing::info!(
        products = ledger.products().len(),
        categories = ledger.categories().len(),
        alerts,
        "inventory ledger ready"
    );

    AppServices::new(ledger)
}

/// Periodically drop expired notifications. Runs until the task is aborted.
pub fn spawn_notification_sweeper(services: Arc<AppServices>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = services.write(|ledger| ledger.sweep_notifications(Utc::now()));
            if removed > 0 {
                tracing::debug!(removed, "expired notifications swept");
            }
        }
    })
}
