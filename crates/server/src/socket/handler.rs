//! Dispatch for decoded client socket events.

use chrono::Utc;
use rand::Rng;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info};

use vitrine_core::{
    AnalyticsEvent, ClientEvent, InteractionAction, ServerEvent, SessionId,
};

use crate::registry::{ConnId, SUPPORT_ROOM};
use crate::state::AppState;

/// Stock level at or below which everyone gets notified.
const LOW_STOCK_THRESHOLD: u32 = 5;

/// Handle one client event.
///
/// `direct` is the sender's own outbound queue, used for replies that target
/// only the requesting connection.
pub async fn handle_event(
    state: &AppState,
    conn_id: ConnId,
    direct: &mpsc::UnboundedSender<ServerEvent>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinSession {
            session_id,
            user_id,
        } => {
            state
                .registry()
                .join(conn_id, session_id.clone(), user_id.clone(), direct.clone());
            info!(
                user_id = user_id.as_ref().map_or("anonymous", vitrine_core::UserId::as_str),
                session_id = %session_id,
                "user joined session"
            );

            state.registry().emit_to_session(
                &session_id,
                Some(conn_id),
                &ServerEvent::UserJoined {
                    session_id: session_id.clone(),
                    user_id: user_id.clone(),
                    timestamp: Utc::now(),
                },
            );

            if let Some(user_id) = user_id {
                let products = state.recommender().recommendations(&user_id).await;
                let _ = direct.send(ServerEvent::PersonalizedRecommendations { products });
            }
        }

        ClientEvent::UserInteraction {
            session_id,
            user_id,
            action,
            product_id,
            position,
            duration_ms,
        } => {
            // Interactions from unjoined connections are dropped.
            let Some(client) = state.registry().get(conn_id) else {
                return;
            };
            state.registry().touch(conn_id);

            let analytics_event = AnalyticsEvent::new(action.as_event_type(), session_id)
                .with_user(user_id.clone())
                .with_property(
                    "productId",
                    product_id
                        .as_ref()
                        .map_or(serde_json::Value::Null, |p| json!(p.as_str())),
                )
                .with_property(
                    "position",
                    position.map_or(serde_json::Value::Null, |p| json!(p)),
                )
                .with_property(
                    "duration",
                    duration_ms.map_or(serde_json::Value::Null, |d| json!(d)),
                );
            state.analytics().track(analytics_event);

            state.registry().emit_to_session(
                &client.session_id,
                Some(conn_id),
                &ServerEvent::ProductInteraction {
                    user_id: user_id.clone(),
                    action,
                    product_id: product_id.clone(),
                    timestamp: Utc::now(),
                },
            );

            if action == InteractionAction::ViewProduct
                && let (Some(user_id), Some(product_id)) = (&user_id, &product_id)
            {
                state.recommender().record_interaction(user_id, product_id);
            }
        }

        ClientEvent::CartUpdate {
            session_id,
            user_id,
            cart,
        } => {
            if state.registry().get(conn_id).is_none() {
                return;
            }
            state.registry().touch(conn_id);
            debug!(session_id = %session_id, items = cart.items.len(), "cart updated");

            // Sync other devices/tabs of the same user.
            if user_id.is_some() {
                state
                    .registry()
                    .broadcast(Some(conn_id), &ServerEvent::CartSync { cart: cart.clone() });
            }

            let analytics_event = AnalyticsEvent::new("cart_update", session_id)
                .with_user(user_id)
                .with_property("items", json!(cart.items))
                .with_property("total", json!(cart.total))
                .with_property("itemCount", json!(cart.item_count));
            state.analytics().track(analytics_event);
        }

        ClientEvent::InventoryCheck { product_id } => {
            // Mock stock level; a real implementation would consult inventory.
            let inventory: u32 = rand::rng().random_range(1..=50);

            let update = ServerEvent::InventoryUpdate {
                product_id,
                inventory,
            };
            let _ = direct.send(update.clone());

            if inventory <= LOW_STOCK_THRESHOLD {
                state.registry().broadcast(None, &update);
            }
        }

        ClientEvent::ChatMessage {
            session_id,
            message,
        } => {
            let Some(client) = state.registry().get(conn_id) else {
                return;
            };
            state.registry().touch(conn_id);

            state.registry().emit_to_session(
                &SessionId::new(SUPPORT_ROOM),
                None,
                &ServerEvent::CustomerMessage {
                    user_id: client.user_id,
                    session_id,
                    message,
                    timestamp: Utc::now(),
                },
            );
        }

        ClientEvent::SupportResponse {
            session_id,
            message,
        } => {
            state.registry().emit_to_session(
                &session_id,
                Some(conn_id),
                &ServerEvent::SupportMessage {
                    message,
                    timestamp: Utc::now(),
                },
            );
        }

        ClientEvent::FlashSaleTrigger {
            product_id,
            discount_percent,
            duration_secs,
        } => {
            let duration = i64::try_from(duration_secs).unwrap_or(i64::MAX);
            let ends_at = Utc::now() + chrono::Duration::seconds(duration);

            state.registry().broadcast(
                None,
                &ServerEvent::FlashSale {
                    product_id: product_id.clone(),
                    discount_percent,
                    ends_at,
                },
            );

            // Fire-once expiry; once scheduled it cannot be withdrawn.
            let state = state.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_secs(duration_secs)).await;
                state
                    .registry()
                    .broadcast(None, &ServerEvent::FlashSaleEnded { product_id });
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
    use vitrine_core::{CartSnapshot, ProductId, UserId};

    use crate::config::ServerConfig;

    fn state() -> AppState {
        AppState::new(ServerConfig::default())
    }

    async fn join(
        state: &AppState,
        session: &str,
        user: Option<&str>,
    ) -> (ConnId, UnboundedReceiver<ServerEvent>) {
        let conn_id = ConnId::generate();
        let (tx, rx) = unbounded_channel();
        handle_event(
            state,
            conn_id,
            &tx,
            ClientEvent::JoinSession {
                session_id: SessionId::new(session),
                user_id: user.map(UserId::new),
            },
        )
        .await;
        (conn_id, rx)
    }

    #[tokio::test]
    async fn test_join_notifies_room_and_recommends() {
        let state = state();
        let (_first, mut first_rx) = join(&state, "s1", None).await;

        // Second tab joins with a user attached.
        let (_second, mut second_rx) = join(&state, "s1", Some("u1")).await;

        // The first tab hears about the newcomer.
        let event = first_rx.try_recv().unwrap();
        assert!(matches!(event, ServerEvent::UserJoined { .. }));

        // The joiner gets recommendations but not its own join notice.
        let event = second_rx.try_recv().unwrap();
        assert!(matches!(
            event,
            ServerEvent::PersonalizedRecommendations { .. }
        ));
        assert!(second_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_anonymous_join_gets_no_recommendations() {
        let state = state();
        let (_conn, mut rx) = join(&state, "s1", None).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_interaction_from_unjoined_is_ignored() {
        let state = state();
        let (tx, _rx) = unbounded_channel();
        handle_event(
            &state,
            ConnId::generate(),
            &tx,
            ClientEvent::UserInteraction {
                session_id: SessionId::new("s1"),
                user_id: None,
                action: InteractionAction::ViewProduct,
                product_id: Some(ProductId::new("1")),
                position: None,
                duration_ms: None,
            },
        )
        .await;
        assert_eq!(state.analytics().event_count(), 0);
    }

    #[tokio::test]
    async fn test_interaction_is_tracked_and_relayed() {
        let state = state();
        let (viewer, _viewer_rx) = join(&state, "s1", Some("u1")).await;
        let (_other, mut other_rx) = join(&state, "s1", None).await;
        // Drain the join notice.
        let _ = other_rx.try_recv();

        let (tx, _rx) = unbounded_channel();
        handle_event(
            &state,
            viewer,
            &tx,
            ClientEvent::UserInteraction {
                session_id: SessionId::new("s1"),
                user_id: Some(UserId::new("u1")),
                action: InteractionAction::ViewProduct,
                product_id: Some(ProductId::new("1")),
                position: None,
                duration_ms: Some(1500),
            },
        )
        .await;

        assert_eq!(state.analytics().event_count(), 1);
        let relayed = other_rx.try_recv().unwrap();
        assert!(matches!(
            relayed,
            ServerEvent::ProductInteraction {
                action: InteractionAction::ViewProduct,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cart_update_broadcasts_sync_for_known_user() {
        let state = state();
        let (updater, _updater_rx) = join(&state, "s1", Some("u1")).await;
        let (_other, mut other_rx) = join(&state, "s2", None).await;

        let (tx, _rx) = unbounded_channel();
        handle_event(
            &state,
            updater,
            &tx,
            ClientEvent::CartUpdate {
                session_id: SessionId::new("s1"),
                user_id: Some(UserId::new("u1")),
                cart: CartSnapshot {
                    items: Vec::new(),
                    total: rust_decimal::Decimal::ZERO,
                    item_count: 0,
                },
            },
        )
        .await;

        let event = other_rx.try_recv().unwrap();
        assert!(matches!(event, ServerEvent::CartSync { .. }));
        assert_eq!(state.analytics().event_count(), 1);
    }

    #[tokio::test]
    async fn test_inventory_check_replies_directly() {
        let state = state();
        let (tx, mut rx) = unbounded_channel();
        handle_event(
            &state,
            ConnId::generate(),
            &tx,
            ClientEvent::InventoryCheck {
                product_id: ProductId::new("2"),
            },
        )
        .await;

        let event = rx.try_recv().unwrap();
        match event {
            ServerEvent::InventoryUpdate {
                product_id,
                inventory,
            } => {
                assert_eq!(product_id, ProductId::new("2"));
                assert!((1..=50).contains(&inventory));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_message_routes_to_support_room() {
        let state = state();
        let (customer, _customer_rx) = join(&state, "s1", Some("u1")).await;
        let (_agent, mut agent_rx) = join(&state, SUPPORT_ROOM, None).await;

        let (tx, _rx) = unbounded_channel();
        handle_event(
            &state,
            customer,
            &tx,
            ClientEvent::ChatMessage {
                session_id: SessionId::new("s1"),
                message: "where is my order?".to_owned(),
            },
        )
        .await;

        let event = agent_rx.try_recv().unwrap();
        assert!(matches!(event, ServerEvent::CustomerMessage { .. }));
    }

    #[tokio::test]
    async fn test_support_response_reaches_customer_session() {
        let state = state();
        let (_customer, mut customer_rx) = join(&state, "s1", None).await;
        let (agent, _agent_rx) = join(&state, SUPPORT_ROOM, None).await;

        let (tx, _rx) = unbounded_channel();
        handle_event(
            &state,
            agent,
            &tx,
            ClientEvent::SupportResponse {
                session_id: SessionId::new("s1"),
                message: "on its way".to_owned(),
            },
        )
        .await;

        let event = customer_rx.try_recv().unwrap();
        assert!(matches!(event, ServerEvent::SupportMessage { .. }));
    }

    #[tokio::test]
    async fn test_flash_sale_broadcasts_to_everyone() {
        let state = state();
        let (trigger, mut trigger_rx) = join(&state, "s1", None).await;
        let (_other, mut other_rx) = join(&state, "s2", None).await;

        let (tx, _rx) = unbounded_channel();
        handle_event(
            &state,
            trigger,
            &tx,
            ClientEvent::FlashSaleTrigger {
                product_id: ProductId::new("1"),
                discount_percent: 20,
                duration_secs: 3600,
            },
        )
        .await;

        // Flash sales reach every joined connection, including the trigger.
        assert!(matches!(
            trigger_rx.try_recv().unwrap(),
            ServerEvent::FlashSale { .. }
        ));
        assert!(matches!(
            other_rx.try_recv().unwrap(),
            ServerEvent::FlashSale { .. }
        ));
    }
}
