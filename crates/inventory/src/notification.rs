//! Ephemeral user-facing alerts.
//!
//! Every notification carries its own expiry time. A single periodic
//! [`NotificationQueue::sweep`] removes expired entries, and
//! [`NotificationQueue::dismiss`] removes one immediately; there are no
//! per-notification timers to cancel.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Default lifetime of a notification, in seconds.
pub const NOTIFICATION_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl core::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Insertion-ordered queue of notifications with TTL metadata.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    ttl: TimeDelta,
    next_id: u64,
    items: VecDeque<Notification>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(TimeDelta::seconds(NOTIFICATION_TTL_SECS))
    }
}

impl NotificationQueue {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            ttl,
            next_id: 1,
            items: VecDeque::new(),
        }
    }

    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            message: message.into(),
            severity,
            created_at: now,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Remove a notification before it expires. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.items.iter().position(|n| n.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every expired notification; returns how many were removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        before - self.items.len()
    }

    /// Notifications still live at `now`, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> + '_ {
        self.items.iter().filter(move |n| !n.is_expired(now))
    }

    /// Every queued notification, including expired ones not yet swept.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 20, 9, 0, 0).unwrap()
    }

    #[test]
    fn push_assigns_increasing_ids_and_ttl() {
        let mut q = NotificationQueue::default();
        let a = q.push("first", Severity::Info, t0());
        let b = q.push("second", Severity::Success, t0());
        assert!(a < b);

        let first = q.iter().next().unwrap();
        assert_eq!(
            first.expires_at - first.created_at,
            TimeDelta::seconds(NOTIFICATION_TTL_SECS)
        );
    }

    #[test]
    fn expired_entries_are_hidden_before_sweep_and_removed_by_it() {
        let mut q = NotificationQueue::default();
        q.push("old", Severity::Warning, t0());
        q.push("new", Severity::Warning, t0() + TimeDelta::seconds(3));

        let at = t0() + TimeDelta::seconds(5);
        let active: Vec<_> = q.active(at).map(|n| n.message.as_str()).collect();
        assert_eq!(active, vec!["new"]);
        assert_eq!(q.len(), 2);

        assert_eq!(q.sweep(at), 1);
        assert_eq!(q.len(), 1);
        assert_eq!(q.sweep(t0() + TimeDelta::seconds(8)), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn dismiss_removes_immediately() {
        let mut q = NotificationQueue::default();
        let id = q.push("bye", Severity::Info, t0());
        assert!(q.dismiss(id));
        assert!(!q.dismiss(id));
        assert_eq!(q.sweep(t0() + TimeDelta::seconds(60)), 0);
    }
}
