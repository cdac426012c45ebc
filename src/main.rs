use std::env;
use std::time::Duration;

use tracing::{error, info, warn, Instrument};

use foodly_sync::app_system::{setup_tracing, SyncEngine};
use foodly_sync::clients::FavoriteRequest;
use foodly_sync::config::Config;
use foodly_sync::domain::{PaymentMethod, Review};
use foodly_sync::session::Role;

/// Demonstration session: logs in as a customer, stages a cart from the
/// first restaurant's menu, places an order, and watches it until the demo
/// window closes — reviewing and chatting along the way.
#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load();
    info!(base_url = %config.base_url, "Starting order sync engine");
    let engine = SyncEngine::new(config);

    let username = env::var("FOODLY_USERNAME").unwrap_or_else(|_| "demo".to_string());
    let password = env::var("FOODLY_PASSWORD").unwrap_or_else(|_| "demo".to_string());
    engine
        .login(&username, &password, Role::Customer)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("cart_staging");
    let (order, restaurant) = async {
        let restaurants = engine.restaurants.list().await.map_err(|e| e.to_string())?;
        let restaurant = restaurants.first().cloned().ok_or("no restaurants available")?;
        info!(restaurant = %restaurant.name, "Browsing menu");

        let menu = engine.restaurants.menu(restaurant.id).await.map_err(|e| e.to_string())?;
        let item = menu.first().ok_or("menu is empty")?;

        let mut cart = engine.cart_store();
        cart.load().await;
        cart.add(item, Some(restaurant.id)).await.map_err(|e| e.to_string())?;
        cart.set_address("1 Demo Street").await.map_err(|e| e.to_string())?;
        info!(items = cart.item_count(), "Cart staged");

        let order = engine
            .orders
            .place_order(cart.cart(), None, PaymentMethod::CashOnDelivery)
            .await
            .map_err(|e| e.to_string())?;
        // The order owns the snapshot now; the staging area resets.
        cart.clear().await.map_err(|e| e.to_string())?;
        Ok::<_, String>((order, restaurant))
    }
    .instrument(span)
    .await?;

    info!(order_id = order.id, total = order.total, "Order placed, tracking");

    if let Some(identity) = engine.session.current() {
        let outcome = engine
            .customers
            .add_favorite(
                identity.user_id,
                &FavoriteRequest {
                    kind: "restaurant".into(),
                    name: restaurant.name.clone(),
                    restaurant: restaurant.name.clone(),
                    restaurant_id: restaurant.id,
                    menu_item_id: None,
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        info!(?outcome, "Favorite recorded");
    }

    let feed = engine.order_feed();
    let tracker = engine.track_order(order.id);
    let mut gate = engine.review_gate();
    match engine.reviews.list_mine().await {
        Ok(reviews) => gate.reconcile(&reviews),
        Err(e) => warn!(error = %e, "Could not reconcile review flags"),
    }

    let chat = engine.open_chat(&order).map_err(|e| e.to_string())?;
    chat.send("Please ring the doorbell").await.map_err(|e| e.to_string())?;

    // Watch the order for a short demo window.
    for _ in 0..6 {
        tokio::time::sleep(Duration::from_secs(5)).await;
        if let Some(latest) = tracker.latest().await {
            info!(order_id = latest.id, status = %latest.status, "Order state");
        }
        if let Some(due) = feed.due_review(&gate).await {
            info!(order_id = due.id, "Delivered, submitting review");
            let review = Review {
                order_id: due.id,
                restaurant_id: due.restaurant_id.unwrap_or(restaurant.id),
                menu_item_id: None,
                rating: 5,
                text: "Great food, quick delivery".into(),
            };
            if let Err(e) = engine.reviews.submit(&review).await {
                warn!(error = %e, "Review submission failed");
            }
            gate.mark_prompted(due.id);
        }
        if let Some(err) = feed.last_error().await {
            error!(error = %err, "Order feed degraded");
        }
    }

    info!(messages = chat.messages().await.len(), "Closing chat");
    chat.stop().await;
    tracker.stop().await;
    feed.stop().await;
    engine.logout();

    info!("Demo session completed");
    Ok(())
}
