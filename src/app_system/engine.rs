use std::sync::Arc;

use tracing::info;

use crate::cart::CartStore;
use crate::chat::{ChatThread, LiveChat};
use crate::clients::{
    Api, AuthClient, CartClient, ChatClient, CustomerClient, OrderClient, RestaurantClient,
    ReviewClient,
};
use crate::config::Config;
use crate::domain::{Order, Sender};
use crate::error::{ApiError, ChatError};
use crate::review_gate::ReviewGate;
use crate::session::{Identity, Role, Session};
use crate::tracking::{OrderFeed, OrderScope, OrderTracker, ReviewFeed};

/// The engine behind every screen: one session, one transport, and a typed
/// client per backend concern. Live views (feeds, trackers, chats) are
/// constructed from here and own their pollers; each must be stopped when its
/// screen goes away (dropping one aborts its task as a backstop).
pub struct SyncEngine {
    config: Config,
    pub session: Arc<Session>,
    pub auth: AuthClient,
    pub restaurants: RestaurantClient,
    pub orders: OrderClient,
    pub reviews: ReviewClient,
    pub customers: CustomerClient,
    pub chat: ChatClient,
    cart: CartClient,
}

impl SyncEngine {
    pub fn new(config: Config) -> Self {
        let session = Session::new();
        let api = Arc::new(Api::new(config.base_url.clone(), Arc::clone(&session)));
        Self {
            config,
            session,
            auth: AuthClient::new(Arc::clone(&api)),
            restaurants: RestaurantClient::new(Arc::clone(&api)),
            orders: OrderClient::new(Arc::clone(&api)),
            reviews: ReviewClient::new(Arc::clone(&api)),
            customers: CustomerClient::new(Arc::clone(&api)),
            chat: ChatClient::new(Arc::clone(&api)),
            cart: CartClient::new(api),
        }
    }

    pub async fn login(&self, username: &str, password: &str, role: Role) -> Result<Identity, ApiError> {
        let identity = self.auth.login(username, password, role).await?;
        self.session.login(identity.clone());
        Ok(identity)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub fn cart_store(&self) -> CartStore {
        CartStore::new(self.cart.clone())
    }

    /// Review gate for the current customer, file-backed under the state
    /// directory. Without an authenticated customer the flags are
    /// process-local only.
    pub fn review_gate(&self) -> ReviewGate {
        match self.session.current() {
            Some(identity) if identity.role == Role::Customer => {
                ReviewGate::for_customer(&self.config.state_dir, identity.user_id)
            }
            _ => ReviewGate::in_memory(),
        }
    }

    /// Live order list scoped by the current role. The backend is the
    /// authority on visibility either way.
    pub fn order_feed(&self) -> OrderFeed {
        let scope = match self.session.current() {
            Some(Identity { role: Role::Admin, .. }) => OrderScope::Admin,
            Some(Identity {
                role: Role::Restaurant,
                restaurant_id: Some(id),
                ..
            }) => OrderScope::Restaurant(id),
            _ => OrderScope::Customer,
        };
        info!(?scope, "Starting order feed");
        OrderFeed::start(self.orders.clone(), scope)
    }

    pub fn track_order(&self, order_id: u64) -> OrderTracker {
        OrderTracker::start(self.orders.clone(), order_id)
    }

    /// Live review list for the restaurant owner's dashboard, if the session
    /// belongs to one.
    pub fn review_feed(&self) -> Option<ReviewFeed> {
        let restaurant_id = self.session.current()?.restaurant_id?;
        Some(ReviewFeed::start(self.reviews.clone(), restaurant_id))
    }

    /// Opens the support chat for an order, speaking as the current role.
    /// Fails until the order has resolved both participants.
    pub fn open_chat(&self, order: &Order) -> Result<LiveChat, ChatError> {
        let sender = match self.session.current().map(|i| i.role) {
            Some(Role::Restaurant) => Sender::Restaurant,
            _ => Sender::Customer,
        };
        let thread = ChatThread::open(self.chat.clone(), order, sender)?;
        Ok(LiveChat::start(thread))
    }
}
