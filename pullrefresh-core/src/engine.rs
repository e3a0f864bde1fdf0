//! Gesture engine contract and the bundled resistance-based engine

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use serde::Serialize;
use tracing::trace;

/// Snapshot of the tracked gesture
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GestureState {
    /// Distance after resistance, in px
    pub distance: f64,
    pub pull: bool,
    /// Threshold crossed
    pub refresh: bool,
}

/// Notifications published by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Moved(GestureState),
    End(GestureState),
}

/// Converts a vertical drag into `distance`/`pull`/`refresh` state.
///
/// Events are published on every channel handed out by `subscribe`; the
/// core drains them after each call, so an engine never re-enters the core.
pub trait GestureEngine {
    /// Drop any in-progress gesture without publishing anything.
    /// The last snapshot stays readable until the next `begin`.
    fn reset(&mut self);

    fn begin(&mut self, y: f64);

    /// Returns true while a pull is being tracked
    fn move_to(&mut self, y: f64) -> bool;

    /// Returns true when the gesture was a tracked pull
    fn end(&mut self) -> bool;

    fn state(&self) -> GestureState;

    fn subscribe(&mut self) -> UnboundedReceiver<GestureEvent>;
}

/// Engine applying a constant resistance to the raw drag distance
pub struct ResistanceEngine {
    threshold: f64,
    resistance: f64,
    scroll_top: Option<Box<dyn Fn() -> f64>>,
    origin: Option<f64>,
    pulled: bool,
    state: GestureState,
    subscribers: Vec<UnboundedSender<GestureEvent>>,
}

impl ResistanceEngine {
    pub fn new(threshold: f64, resistance: f64) -> Self {
        Self {
            threshold,
            resistance,
            scroll_top: None,
            origin: None,
            pulled: false,
            state: GestureState::default(),
            subscribers: Vec::new(),
        }
    }

    /// Only track gestures that begin while the root is scrolled to the top
    pub fn with_scroll_top(mut self, scroll_top: impl Fn() -> f64 + 'static) -> Self {
        self.scroll_top = Some(Box::new(scroll_top));
        self
    }

    fn publish(&mut self, event: GestureEvent) {
        self.subscribers
            .retain(|tx| tx.unbounded_send(event).is_ok());
    }
}

impl GestureEngine for ResistanceEngine {
    fn reset(&mut self) {
        self.origin = None;
        self.pulled = false;
    }

    fn begin(&mut self, y: f64) {
        let scrolled = self
            .scroll_top
            .as_ref()
            .map(|scroll_top| scroll_top() > 0.0)
            .unwrap_or(false);

        if scrolled {
            trace!("gesture ignored, root is scrolled");
            return;
        }

        self.origin = Some(y);
        self.pulled = false;
        self.state = GestureState::default();
    }

    fn move_to(&mut self, y: f64) -> bool {
        let Some(origin) = self.origin else {
            return false;
        };

        let raw = (y - origin).max(0.0);
        if raw == 0.0 && !self.pulled {
            return false;
        }

        self.pulled = true;
        self.state = GestureState {
            distance: raw / self.resistance,
            pull: raw > 0.0,
            refresh: raw >= self.threshold,
        };
        self.publish(GestureEvent::Moved(self.state));

        self.state.pull
    }

    fn end(&mut self) -> bool {
        if self.origin.take().is_none() || !self.pulled {
            return false;
        }

        self.pulled = false;
        self.publish(GestureEvent::End(self.state));
        true
    }

    fn state(&self) -> GestureState {
        self.state
    }

    fn subscribe(&mut self) -> UnboundedReceiver<GestureEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }
}
