//! Input normalization across touch, pointer and legacy MS pointer events

use serde::Serialize;

use crate::host::CapabilityProbe;

const TOUCH_START: &[&str] = &["touchstart", "MSPointerDown", "pointerdown"];
const TOUCH_MOVE: &[&str] = &["touchmove", "MSPointerMove", "MSPointerHover", "pointermove"];
const TOUCH_END: &[&str] = &[
    "touchend",
    "touchcancel",
    "MSPointerUp",
    "MSPointerCancel",
    "pointerup",
    "pointercancel",
];

/// Logical input event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Start,
    Move,
    End,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [Self::Start, Self::Move, Self::End];

    /// Native event names in order of preference
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Start => TOUCH_START,
            Self::Move => TOUCH_MOVE,
            Self::End => TOUCH_END,
        }
    }

    /// The native event name to listen for in this environment
    pub fn event_name(self, probe: &dyn CapabilityProbe) -> &'static str {
        select_event_name(self.candidates(), probe)
    }
}

/// First candidate the probe supports, else the last candidate.
pub fn select_event_name(candidates: &[&'static str], probe: &dyn CapabilityProbe) -> &'static str {
    candidates
        .iter()
        .copied()
        .find(|name| probe.supports(name))
        .or_else(|| candidates.last().copied())
        .unwrap_or_default()
}

/// A native input event as seen by the adapter
pub trait InputEvent {
    /// `clientY` of the first touch point, for touch events
    fn first_touch_y(&self) -> Option<f64>;

    /// `clientY` of the event itself, for pointer events
    fn client_y(&self) -> f64;

    fn cancelable(&self) -> bool;

    fn prevent_default(&self);

    fn stop_propagation(&self);
}

/// Vertical client coordinate of an event, whatever family it belongs to
pub fn vertical_coordinate(event: &dyn InputEvent) -> f64 {
    event.first_touch_y().unwrap_or_else(|| event.client_y())
}
