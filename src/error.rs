use thiserror::Error;

use crate::domain::OrderStatus;

/// Errors surfaced by the HTTP transport. Every non-2xx response is mapped
/// into one of these so callers can pattern-match on the condition instead of
/// inspecting raw status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: session is missing or expired")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Builds the typed error for a non-success response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Status { status, message },
        }
    }
}

/// Errors that can occur while staging the cart.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart line is missing a menu item id")]
    MissingMenuItemId,
    #[error("No restaurant id resolvable for cart line")]
    MissingRestaurantId,
    #[error("Cart already holds items from restaurant {current}, cannot add from restaurant {offered}")]
    MixedRestaurants { current: u64, offered: u64 },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid cart: {0}")]
    InvalidCart(String),
    #[error("Order cannot be cancelled from status {0}")]
    CannotCancel(OrderStatus),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors that can occur on a chat thread.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Order {0} has not resolved its restaurant id yet")]
    UnresolvedRestaurant(u64),
    #[error("Order {0} has not resolved its customer id yet")]
    UnresolvedCustomer(u64),
    #[error(transparent)]
    Api(#[from] ApiError),
}
