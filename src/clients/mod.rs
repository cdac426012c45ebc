//! Typed clients over the shared HTTP transport. Each wraps [`http::Api`]
//! with the request shaping for one backend concern; none of them filters or
//! retries on its own.

pub mod auth_client;
pub mod cart_client;
pub mod chat_client;
pub mod customer_client;
pub mod http;
pub mod order_client;
pub mod restaurant_client;
pub mod review_client;

pub use auth_client::AuthClient;
pub use cart_client::CartClient;
pub use chat_client::ChatClient;
pub use customer_client::{CustomerClient, FavoriteOutcome, FavoriteRequest};
pub use http::Api;
pub use order_client::OrderClient;
pub use restaurant_client::RestaurantClient;
pub use review_client::ReviewClient;
