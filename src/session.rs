use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

/// The role this client is authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Customer,
    Restaurant,
    Admin,
}

/// Everything the backend handed us at login.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub token: String,
    pub role: Role,
    pub user_id: u64,
    /// Present only for restaurant-owner logins.
    pub restaurant_id: Option<u64>,
}

/// Explicit session context, passed to every component that needs identity.
///
/// Replaces the ambient token/role/id globals of a typical browser client: the
/// current identity is owned here, and consumers that must react to a forced
/// logout (a 401 from anywhere) subscribe to the watch channel instead of
/// re-reading global storage.
#[derive(Debug)]
pub struct Session {
    identity: watch::Sender<Option<Identity>>,
}

impl Session {
    pub fn new() -> Arc<Self> {
        let (identity, _) = watch::channel(None);
        Arc::new(Self { identity })
    }

    pub fn login(&self, identity: Identity) {
        info!(user_id = identity.user_id, role = ?identity.role, "Session established");
        let _ = self.identity.send_replace(Some(identity));
    }

    pub fn logout(&self) {
        info!("Session closed");
        let _ = self.identity.send_replace(None);
    }

    /// Clears all cached identity fields after the backend rejected our token.
    /// Subscribers observe the change and must route back to authentication.
    pub fn invalidate(&self) {
        if self.identity.borrow().is_some() {
            warn!("Session invalidated by an unauthorized response");
            let _ = self.identity.send_replace(None);
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.identity.borrow().as_ref().map(|i| i.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// Receiver that yields on every login/logout/invalidation.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }
}
