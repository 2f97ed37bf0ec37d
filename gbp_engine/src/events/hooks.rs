use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{
    EventHandler,
    EventProducer,
    Handler,
    MessageReceivedEvent,
    OrderCreatedEvent,
    OrderStatusChangedEvent,
};

type HookFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// The publishing side of every registered hook. Cheap to clone; hand one to each API that emits events.
#[derive(Default, Clone)]
pub struct EventProducers {
    pub message_received_producer: Vec<EventProducer<MessageReceivedEvent>>,
    pub order_created_producer: Vec<EventProducer<OrderCreatedEvent>>,
    pub order_status_changed_producer: Vec<EventProducer<OrderStatusChangedEvent>>,
}

pub struct EventHandlers {
    pub on_message_received: Option<EventHandler<MessageReceivedEvent>>,
    pub on_order_created: Option<EventHandler<OrderCreatedEvent>>,
    pub on_order_status_changed: Option<EventHandler<OrderStatusChangedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_message_received = hooks.on_message_received.map(|f| EventHandler::new(buffer_size, f));
        let on_order_created = hooks.on_order_created.map(|f| EventHandler::new(buffer_size, f));
        let on_order_status_changed = hooks.on_order_status_changed.map(|f| EventHandler::new(buffer_size, f));
        Self { on_message_received, on_order_created, on_order_status_changed }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_message_received {
            result.message_received_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_order_created {
            result.order_created_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_order_status_changed {
            result.order_status_changed_producer.push(handler.subscribe());
        }
        result
    }

    /// Spawns a task for every registered handler. Each one runs until all of its producers have been dropped.
    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_message_received {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_order_created {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_order_status_changed {
            tokio::spawn(handler.start_handler());
        }
    }
}

/// The set of async callbacks to run when events are published.
#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_message_received: Option<Handler<MessageReceivedEvent>>,
    pub on_order_created: Option<Handler<OrderCreatedEvent>>,
    pub on_order_status_changed: Option<Handler<OrderStatusChangedEvent>>,
}

impl EventHooks {
    pub fn on_message_received<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(MessageReceivedEvent) -> HookFuture) + Send + Sync + 'static {
        self.on_message_received = Some(Arc::new(f));
        self
    }

    pub fn on_order_created<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderCreatedEvent) -> HookFuture) + Send + Sync + 'static {
        self.on_order_created = Some(Arc::new(f));
        self
    }

    pub fn on_order_status_changed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderStatusChangedEvent) -> HookFuture) + Send + Sync + 'static {
        self.on_order_status_changed = Some(Arc::new(f));
        self
    }
}
