//! The "prompt for review after delivery" gate.
//!
//! Tracks, per customer, which order ids have already had their review prompt
//! dismissed. The flag is set on dismissal rather than detection, so a reload
//! before dismissal re-shows the same prompt — idempotent across reloads by
//! design. The flags are a local cache of a server-confirmed fact:
//! [`ReviewGate::reconcile`] seeds them from the backend's own review list so
//! a fresh device converges instead of re-prompting for everything.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::domain::{Order, OrderStatus, Review};

pub struct ReviewGate {
    path: Option<PathBuf>,
    prompted: HashSet<u64>,
}

impl ReviewGate {
    /// Gate with no persistence; flags live for the process only.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            prompted: HashSet::new(),
        }
    }

    /// Gate backed by a JSON file. A missing or corrupt file degrades to an
    /// empty set; the worst outcome is a repeated prompt, never a lost order.
    pub fn load(path: PathBuf) -> Self {
        let prompted = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Vec<u64>>(&raw).ok())
            .map(HashSet::from_iter)
            .unwrap_or_default();
        Self {
            path: Some(path),
            prompted,
        }
    }

    /// Conventional per-customer file under the state directory.
    pub fn for_customer(state_dir: &Path, customer_id: u64) -> Self {
        Self::load(state_dir.join(format!("reviewed_orders_{customer_id}.json")))
    }

    pub fn has_prompted(&self, order_id: u64) -> bool {
        self.prompted.contains(&order_id)
    }

    /// Records that the prompt for this order was dismissed or completed.
    #[instrument(skip(self))]
    pub fn mark_prompted(&mut self, order_id: u64) {
        if self.prompted.insert(order_id) {
            info!(order_id, "Review prompt recorded");
            self.persist();
        }
    }

    /// The first delivered order (in list iteration order) whose prompt has
    /// not been dismissed yet. One prompt per poll cycle: callers show this
    /// one and ask again on a later cycle for the next.
    pub fn next_due<'a>(&self, orders: &'a [Order]) -> Option<&'a Order> {
        orders
            .iter()
            .find(|o| o.status == OrderStatus::Delivered && !self.has_prompted(o.id))
    }

    /// Seeds the flags from reviews the backend already has. An order the
    /// customer reviewed on another device must never prompt again here.
    pub fn reconcile(&mut self, reviews: &[Review]) {
        let mut changed = false;
        for review in reviews {
            changed |= self.prompted.insert(review.order_id);
        }
        if changed {
            info!(known = self.prompted.len(), "Review flags reconciled with backend");
            self.persist();
        }
    }

    fn persist(&self) {
        let Some(path) = &self.path else { return };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let mut ids: Vec<u64> = self.prompted.iter().copied().collect();
        ids.sort_unstable();
        let write = serde_json::to_string(&ids)
            .map_err(|e| e.to_string())
            .and_then(|raw| fs::write(path, raw).map_err(|e| e.to_string()));
        if let Err(e) = write {
            // Cache semantics: losing the write re-prompts, nothing worse.
            warn!(path = %path.display(), error = %e, "Failed to persist review flags");
        }
    }
}
