//! Event hooks
//!
//! The engine APIs publish events (a chat message arrived, an order was created or changed status) to any hooks that
//! were registered through [`EventHooks`]. Each hook runs on its own task, so a slow hook never holds up a request.
mod channel;
mod event_types;
mod hooks;

pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::*;
pub use hooks::{EventHandlers, EventHooks, EventProducers};
