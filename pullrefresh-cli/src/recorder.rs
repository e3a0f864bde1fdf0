//! In-memory root element and host that record a timeline

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use pullrefresh_core::{CapabilityProbe, Error, InputEvent, RenderHost, RenderState, RootElement, Runtime};
use serde::Serialize;
use tabled::Tabled;
use tokio::time::Instant;

use crate::output::format_ms;

/// One thing that happened during a replay
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct Entry {
    #[tabled(rename = "at", display_with = "display_ms")]
    pub at_ms: u64,
    pub kind: String,
    pub detail: String,
}

fn display_ms(ms: &u64) -> String {
    format_ms(*ms)
}

/// Shared, time-stamped log
#[derive(Clone)]
pub struct Timeline {
    started: Instant,
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn record(&self, kind: &str, detail: impl Into<String>) {
        let at_ms = self.started.elapsed().as_millis() as u64;
        self.entries.borrow_mut().push(Entry {
            at_ms,
            kind: kind.to_string(),
            detail: detail.into(),
        });
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }
}

/// Root element recording class changes
pub struct RecordingRoot {
    timeline: Timeline,
    classes: RefCell<BTreeSet<&'static str>>,
    listeners: RefCell<Vec<(&'static str, Box<dyn FnMut(&dyn InputEvent)>)>>,
    once: RefCell<Vec<(&'static str, Box<dyn FnOnce()>)>>,
}

impl RecordingRoot {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            classes: RefCell::new(BTreeSet::new()),
            listeners: RefCell::new(Vec::new()),
            once: RefCell::new(Vec::new()),
        }
    }

    pub fn classes(&self) -> Vec<&'static str> {
        self.classes.borrow().iter().copied().collect()
    }

    /// Deliver a native event to the listeners bound under `name`.
    /// Returns false when nothing listens for it.
    pub fn dispatch(&self, name: &str, event: &dyn InputEvent) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let mut delivered = false;

        for (_, handler) in listeners.iter_mut().filter(|(n, _)| *n == name) {
            handler(event);
            delivered = true;
        }

        delivered
    }

    /// Deliver a one-shot event; its handlers are consumed
    pub fn dispatch_once(&self, name: &str) -> usize {
        let handlers: Vec<_> = {
            let mut once = self.once.borrow_mut();
            let (fired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut *once)
                .into_iter()
                .partition(|(n, _)| *n == name);
            *once = kept;
            fired
        };

        let count = handlers.len();
        for (_, handler) in handlers {
            handler();
        }
        count
    }
}

impl RootElement for RecordingRoot {
    fn set_class(&self, name: &'static str, present: bool) {
        let changed = {
            let mut classes = self.classes.borrow_mut();
            if present {
                classes.insert(name)
            } else {
                classes.remove(name)
            }
        };

        if changed {
            let sign = if present { "+" } else { "-" };
            self.timeline.record("class", format!("{}{}", sign, name));
        }
    }

    fn add_listener(&self, name: &'static str, handler: Box<dyn FnMut(&dyn InputEvent)>) {
        self.timeline.record("listen", name);
        self.listeners.borrow_mut().push((name, handler));
    }

    fn once(&self, name: &'static str, handler: Box<dyn FnOnce()>) {
        self.once.borrow_mut().push((name, handler));
    }
}

/// Host recording published render states
pub struct RecordingHost {
    timeline: Timeline,
}

impl RecordingHost {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl RenderHost for RecordingHost {
    fn apply(&self, state: &RenderState) {
        let detail = match (state.content, state.loader) {
            (Some(content), Some(loader)) => format!("content {} / loader {}", content, loader),
            _ => "rest".to_string(),
        };
        self.timeline.record("render", detail);
    }

    fn request_render(&self) {}

    fn report_error(&self, error: &Error) {
        tracing::error!("pull-refresh error: {}", error);
        self.timeline.record("error", error.to_string());
    }
}

/// Probe answering from the script's list of supported names
pub struct ListProbe(pub Vec<String>);

impl CapabilityProbe for ListProbe {
    fn supports(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Synthetic input carrying one coordinate for both touch and pointer reads
pub struct ScriptEvent {
    pub y: f64,
}

impl InputEvent for ScriptEvent {
    fn first_touch_y(&self) -> Option<f64> {
        Some(self.y)
    }

    fn client_y(&self) -> f64 {
        self.y
    }

    fn cancelable(&self) -> bool {
        true
    }

    fn prevent_default(&self) {}

    fn stop_propagation(&self) {}
}

/// Tokio timers; tasks run on the surrounding `LocalSet`
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_changes_are_recorded_once() {
        let timeline = Timeline::new();
        let root = RecordingRoot::new(timeline.clone());

        root.set_class("ptr-pull", true);
        root.set_class("ptr-pull", true);
        root.set_class("ptr-refresh", false);
        root.set_class("ptr-pull", false);

        let details: Vec<_> = timeline.entries().into_iter().map(|e| e.detail).collect();
        assert_eq!(details, ["+ptr-pull", "-ptr-pull"]);
        assert!(root.classes().is_empty());
    }

    #[test]
    fn test_once_handlers_are_consumed() {
        let root = RecordingRoot::new(Timeline::new());
        root.once("transitionend", Box::new(|| {}));

        assert_eq!(root.dispatch_once("transitionend"), 1);
        assert_eq!(root.dispatch_once("transitionend"), 0);
        assert!(!root.dispatch("touchstart", &ScriptEvent { y: 0.0 }));
    }
}
