//! Collects `tracing` events emitted on the current thread.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    subscriber::DefaultGuard,
};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry::Registry,
};

#[derive(Clone, Default)]
pub struct CapturedLogs {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CapturedLogs {
    /// Installs the collector as the default subscriber of this thread.
    /// Works with `#[tokio::test]`, which polls everything on one thread.
    pub fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let subscriber = Registry::default().with(logs.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn contains(&self, level: Level, message: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|(l, m)| *l == level && m.contains(message))
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}
