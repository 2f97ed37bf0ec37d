use std::time::Duration;

use futures::future::BoxFuture;
use gbp_engine::{
    chat::{respond, FALLBACK_RESPONSE},
    db_types::MessageSender,
    events::{EventHandlers, EventHooks, EventProducers, MessageReceivedEvent},
    ChatFlowApi,
    SqliteDatabase,
};
use log::*;

pub const SUPPORT_EVENT_BUFFER_SIZE: usize = 25;

/// Assigns the support desk's event handlers.
///
/// 1. MessageReceivedEvent - After a short pause, the chat responder's answer is stored as a `support` reply in the
///    visitor's conversation. If the reply cannot be stored, a fallback apology is stored in its place.
/// 2. OrderCreatedEvent and OrderStatusChangedEvent - These are logged, so that new orders are visible in the server
///    logs while they wait for review.
pub fn create_support_event_handlers(db: SqliteDatabase, reply_delay: Duration) -> EventHandlers {
    let mut hooks = EventHooks::default();
    // Replies are stored directly and publish no events of their own
    let api = ChatFlowApi::new(db, EventProducers::default());
    // --- On MessageReceived Handler ---
    hooks.on_message_received(move |ev| {
        let MessageReceivedEvent { message } = ev;
        if message.sender != MessageSender::User {
            return no_op();
        }
        let api = api.clone();
        Box::pin(async move {
            tokio::time::sleep(reply_delay).await;
            let reply = respond(&message.content);
            match api.post_reply(&message.browser_id, reply, MessageSender::Support).await {
                Ok(m) => debug!("💬️ Support reply #{} sent to {}", m.id, m.browser_id),
                Err(e) => {
                    error!("💬️ Could not store the support reply for {}. {e}", message.browser_id);
                    if let Err(e) = api.post_reply(&message.browser_id, FALLBACK_RESPONSE, MessageSender::Support).await
                    {
                        error!("💬️ Could not store the fallback reply either. {e}");
                    }
                },
            }
        })
    });
    // --- On OrderCreated Handler ---
    hooks.on_order_created(|ev| {
        let order = ev.order;
        info!(
            "📦️ New order #{} for card #{}: {} {} from {}. Awaiting receipt review.",
            order.id, order.card_id, order.crypto_amount, order.crypto_symbol, order.email
        );
        no_op()
    });
    // --- On OrderStatusChanged Handler ---
    hooks.on_order_status_changed(|ev| {
        info!("📦️ Order #{} has moved from {} to {}", ev.order.id, ev.old_status, ev.order.status);
        no_op()
    });
    EventHandlers::new(SUPPORT_EVENT_BUFFER_SIZE, hooks)
}

fn no_op() -> BoxFuture<'static, ()> {
    Box::pin(async {})
}
