//! Per-order support chat: optimistic-free local append plus poll-based
//! reconciliation.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::clients::chat_client::OutgoingMessage;
use crate::clients::ChatClient;
use crate::domain::{ChatMessage, Order, Sender};
use crate::error::ChatError;
use crate::poller::{Poller, CHAT_INTERVAL};

/// The message list for one (order, restaurant, customer) triple.
///
/// Opening requires a fully resolved [`Order`]; until the order knows its
/// restaurant and customer the thread cannot exist, which is the UI's
/// "block chat access" precondition expressed as a constructor.
#[derive(Debug)]
pub struct ChatThread {
    client: ChatClient,
    order_id: u64,
    restaurant_id: u64,
    customer_id: u64,
    sender: Sender,
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn open(client: ChatClient, order: &Order, sender: Sender) -> Result<Self, ChatError> {
        let restaurant_id = order
            .restaurant_id
            .ok_or(ChatError::UnresolvedRestaurant(order.id))?;
        let customer_id = order
            .customer_id
            .ok_or(ChatError::UnresolvedCustomer(order.id))?;
        Ok(Self {
            client,
            order_id: order.id,
            restaurant_id,
            customer_id,
            sender,
            messages: Vec::new(),
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Posts a message and appends the server's canonical copy — never a
    /// locally fabricated one, so a following poll cannot duplicate it under
    /// a different timestamp.
    #[instrument(skip(self, text), fields(order_id = self.order_id))]
    pub async fn send(&mut self, text: &str) -> Result<ChatMessage, ChatError> {
        let sent = self
            .client
            .send(&OutgoingMessage {
                order_id: self.order_id,
                restaurant_id: self.restaurant_id,
                customer_id: self.customer_id,
                sender: self.sender,
                message: text,
            })
            .await?;
        self.messages.push(sent.clone());
        Ok(sent)
    }

    /// Re-fetches the whole thread and replaces local state wholesale.
    #[instrument(skip(self), fields(order_id = self.order_id))]
    pub async fn refresh(&mut self) -> Result<(), ChatError> {
        let thread = self
            .client
            .fetch_thread(self.order_id, self.customer_id, self.restaurant_id)
            .await?;
        debug!(messages = thread.len(), "Thread reconciled");
        self.messages = thread;
        Ok(())
    }
}

/// A [`ChatThread`] kept fresh by the shared poller (3s interval).
pub struct LiveChat {
    thread: Arc<Mutex<ChatThread>>,
    poller: Poller,
}

impl LiveChat {
    pub fn start(thread: ChatThread) -> Self {
        let thread = Arc::new(Mutex::new(thread));
        let target = Arc::clone(&thread);
        let poller = Poller::start("chat", CHAT_INTERVAL, move || {
            let target = Arc::clone(&target);
            async move { target.lock().await.refresh().await }
        });
        Self { thread, poller }
    }

    pub async fn send(&self, text: &str) -> Result<ChatMessage, ChatError> {
        self.thread.lock().await.send(text).await
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.thread.lock().await.messages().to_vec()
    }

    /// Must be called when the chat view is torn down.
    pub async fn stop(self) {
        self.poller.stop().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::Api;
    use crate::domain::OrderStatus;
    use crate::session::{Identity, Role, Session};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chat_client(server: &MockServer) -> ChatClient {
        let session = Session::new();
        session.login(Identity {
            token: "tok".into(),
            role: Role::Customer,
            user_id: 4,
            restaurant_id: None,
        });
        ChatClient::new(Arc::new(Api::new(server.uri(), session)))
    }

    fn order(restaurant_id: Option<u64>, customer_id: Option<u64>) -> Order {
        Order {
            id: 11,
            customer_id,
            restaurant_id,
            items: Vec::new(),
            total: 26.6,
            status: OrderStatus::OutForDelivery,
            created_at: 0,
        }
    }

    fn wire_message(text: &str, sent_at: i64) -> serde_json::Value {
        serde_json::json!({
            "orderId": 11, "restaurantId": 3, "customerId": 4,
            "sender": "customer", "message": text, "sentAt": sent_at
        })
    }

    #[tokio::test]
    async fn thread_requires_a_resolved_order() {
        let server = MockServer::start().await;
        let client = chat_client(&server);

        let err = ChatThread::open(client.clone(), &order(None, Some(4)), Sender::Customer).unwrap_err();
        assert!(matches!(err, ChatError::UnresolvedRestaurant(11)));

        let err = ChatThread::open(client, &order(Some(3), None), Sender::Customer).unwrap_err();
        assert!(matches!(err, ChatError::UnresolvedCustomer(11)));
    }

    #[tokio::test]
    async fn send_appends_the_server_echo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/support/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(wire_message("hi there", 777)))
            .mount(&server)
            .await;

        let mut thread =
            ChatThread::open(chat_client(&server), &order(Some(3), Some(4)), Sender::Customer).unwrap();
        let sent = thread.send("hi there").await.unwrap();

        // The appended message is the canonical server object (it carries the
        // server-assigned timestamp), not a local fabrication.
        assert_eq!(sent.sent_at, 777);
        assert_eq!(thread.messages().len(), 1);
        assert_eq!(thread.messages()[0].message, "hi there");
    }

    #[tokio::test]
    async fn refresh_replaces_the_thread_wholesale() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/support/messages"))
            .and(query_param("orderId", "11"))
            .and(query_param("customerId", "4"))
            .and(query_param("restaurantId", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                wire_message("first", 1),
                wire_message("second", 2),
            ])))
            .mount(&server)
            .await;

        let mut thread =
            ChatThread::open(chat_client(&server), &order(Some(3), Some(4)), Sender::Customer).unwrap();
        thread.refresh().await.unwrap();
        assert_eq!(thread.messages().len(), 2);

        // A second refresh does not accumulate.
        thread.refresh().await.unwrap();
        assert_eq!(thread.messages().len(), 2);
    }
}
