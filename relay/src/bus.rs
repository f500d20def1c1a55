use companion::AgentEvent;
use once_cell::sync::OnceCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::debug;

/// Opaque handle identifying one live subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// In-process fan-out hub between the ingestion endpoint and the
/// stream transports.
///
/// Every subscriber gets its own unbounded channel, so one stalled or
/// vanished consumer can never hold up the others. Delivery order per
/// subscriber matches publish order; there is no global clock order.
pub struct EventBus {
    subscribers: Mutex<Vec<(SubscriberId, mpsc::UnboundedSender<AgentEvent>)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a new subscriber and hand back its receiving end.
    pub fn subscribe(&self) -> (SubscriberId, mpsc::UnboundedReceiver<AgentEvent>) {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push((id, tx));
        (id, rx)
    }

    /// Drop a subscriber. Unknown or already removed handles are a
    /// no-op, not an error.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.lock().unwrap().retain(|(sid, _)| *sid != id);
    }

    /// Deliver `event` to every live subscriber, in registration order.
    ///
    /// A subscriber whose receiving half is gone is pruned on the spot;
    /// its failure never reaches the publisher or the other
    /// subscribers.
    pub fn publish(&self, event: AgentEvent) {
        self.subscribers.lock().unwrap().retain(|(id, tx)| {
            match tx.send(event.clone()) {
                Ok(()) => true,
                Err(_) => {
                    debug!(subscriber = id.0, "pruning dead subscriber");
                    false
                }
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

static BUS: OnceCell<EventBus> = OnceCell::new();

/// Process-wide bus instance.
///
/// Deliberate global mutable state: the bus must outlive component
/// reloads that do not tear down the process, or live stream
/// subscribers would be orphaned. The first caller constructs it and
/// every later caller gets the same instance.
pub fn global_bus() -> &'static EventBus {
    BUS.get_or_init(EventBus::new)
}
