//! The cart staging area. Every mutation is a full round trip: the staged
//! list is pushed to the backend and local state is replaced by the
//! authoritative response. There is no optimistic merge anywhere, so the
//! local cart can never drift from what the server would create an order
//! from.

use tracing::{info, instrument, warn};

use crate::clients::CartClient;
use crate::domain::{Cart, CartItem, MenuItem};
use crate::error::CartError;

pub struct CartStore {
    client: CartClient,
    cart: Cart,
}

impl CartStore {
    pub fn new(client: CartClient) -> Self {
        Self {
            client,
            cart: Cart::empty(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Fetches the authoritative cart. A failed fetch (typically an
    /// unauthenticated session) yields an empty cart rather than an error;
    /// nothing downstream needs to special-case a missing cart.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> &Cart {
        match self.client.fetch().await {
            Ok(cart) => self.cart = cart,
            Err(e) => {
                warn!(error = %e, "Cart fetch failed, starting empty");
                self.cart = Cart::empty();
            }
        }
        &self.cart
    }

    /// Stages one more unit of a menu item: an existing line gains quantity,
    /// otherwise a new line is appended with quantity 1.
    ///
    /// Fails before any network call when the menu item has no id, or when the
    /// cart already holds items from a different restaurant.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn add(&mut self, item: &MenuItem, page_restaurant_id: Option<u64>) -> Result<&Cart, CartError> {
        let menu_item_id = item.id.ok_or(CartError::MissingMenuItemId)?;
        let restaurant_id = item
            .restaurant_id
            .or(page_restaurant_id)
            .ok_or(CartError::MissingRestaurantId)?;
        if let Some(current) = self.cart.restaurant_id() {
            if current != restaurant_id {
                return Err(CartError::MixedRestaurants {
                    current,
                    offered: restaurant_id,
                });
            }
        }

        let mut items = self.cart.items.clone();
        match items.iter_mut().find(|i| i.menu_item_id == menu_item_id) {
            Some(line) => {
                line.qty += 1;
                line.restaurant_id.get_or_insert(restaurant_id);
            }
            None => items.push(CartItem {
                menu_item_id,
                name: item.name.clone(),
                price: item.price,
                qty: 1,
                restaurant_id: Some(restaurant_id),
            }),
        }
        self.submit(items).await
    }

    /// Replaces a line's quantity. Zero is equivalent to removal.
    #[instrument(skip(self))]
    pub async fn set_item_quantity(&mut self, menu_item_id: u64, qty: u32) -> Result<&Cart, CartError> {
        if qty == 0 {
            return self.remove(menu_item_id).await;
        }
        let fallback = self.cart.restaurant_id();
        let mut items = self.cart.items.clone();
        for line in items.iter_mut().filter(|i| i.menu_item_id == menu_item_id) {
            line.qty = qty;
            if line.restaurant_id.is_none() {
                line.restaurant_id = fallback;
            }
        }
        self.submit(items).await
    }

    #[instrument(skip(self))]
    pub async fn remove(&mut self, menu_item_id: u64) -> Result<&Cart, CartError> {
        let items: Vec<CartItem> = self
            .cart
            .items
            .iter()
            .filter(|i| i.menu_item_id != menu_item_id)
            .cloned()
            .collect();
        self.submit(items).await
    }

    /// Updates the delivery address along with the current lines.
    #[instrument(skip(self, address))]
    pub async fn set_address(&mut self, address: &str) -> Result<&Cart, CartError> {
        let items = self.cart.items.clone();
        let cart = self.client.replace(&items, address).await?;
        self.cart = cart;
        Ok(&self.cart)
    }

    /// Destructive clear: the server is told first, local state resets only
    /// after the ack. Safe to call repeatedly.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<&Cart, CartError> {
        self.client.clear().await?;
        self.cart = Cart::empty();
        info!("Cart cleared");
        Ok(&self.cart)
    }

    async fn submit(&mut self, items: Vec<CartItem>) -> Result<&Cart, CartError> {
        let cart = self.client.replace(&items, &self.cart.address).await?;
        // Read-after-write: the server's response is the new truth.
        self.cart = cart;
        Ok(&self.cart)
    }
}
