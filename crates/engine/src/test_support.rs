//! Test helpers: a `tracing` layer that records emitted events

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone)]
pub(crate) struct CapturedEvent {
    pub target: String,
    pub level: Level,
    pub counter: Option<u64>,
}

/// Collects every event it sees, in emission order
#[derive(Clone, Default)]
pub(crate) struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub(crate) fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    pub(crate) fn count(&self, target: &str, level: Level) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.target == target && e.level == level)
            .count()
    }

    /// Dispatcher to install with `tracing::dispatcher::with_default`
    pub(crate) fn dispatch(&self) -> Dispatch {
        Dispatch::new(tracing_subscriber::registry().with(self.clone()))
    }
}

struct CounterField(Option<u64>);

impl Visit for CounterField {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "counter" {
            self.0 = Some(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut counter = CounterField(None);
        event.record(&mut counter);
        self.events.lock().push(CapturedEvent {
            target: event.metadata().target().to_string(),
            level: *event.metadata().level(),
            counter: counter.0,
        });
    }
}
