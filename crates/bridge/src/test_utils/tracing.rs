//! A `tracing-subscriber` layer that records the message and target of every event, so tests can
//! assert on what a bridge logged.

use alloc::{
    format,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use core::fmt::Debug;
use spin::Mutex;
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{layer::Context, Layer};

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// The level the event was emitted at.
    pub level: Level,
    /// The `target:` of the event.
    pub target: String,
    /// The formatted message.
    pub message: String,
}

/// The storage for the recorded events. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct TraceStorage(Arc<Mutex<Vec<CapturedEvent>>>);

impl TraceStorage {
    /// Returns the messages recorded at `level`.
    pub fn get_by_level(&self, level: Level) -> Vec<String> {
        self.0.lock().iter().filter(|e| e.level == level).map(|e| e.message.clone()).collect()
    }

    /// Returns the messages recorded under `target`.
    pub fn get_by_target(&self, target: &str) -> Vec<String> {
        self.0.lock().iter().filter(|e| e.target == target).map(|e| e.message.clone()).collect()
    }

    /// Returns `true` if no event was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// A subscriber layer that pushes every event into a [TraceStorage].
#[derive(Debug, Default)]
pub struct CollectingLayer {
    /// The storage for the recorded events.
    pub storage: TraceStorage,
}

impl CollectingLayer {
    /// Creates a new collecting layer writing into `storage`.
    pub const fn new(storage: TraceStorage) -> Self {
        Self { storage }
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

impl<S: Subscriber> Layer<S> for CollectingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.storage.0.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.0,
        });
    }
}
