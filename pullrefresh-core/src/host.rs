//! Seams to the environment: DOM root, host framework, timers.
//!
//! The browser binding implements these with `web-sys`; the replay tool and
//! the tests implement them natively.

use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::event::InputEvent;
use crate::render::RenderState;
use crate::Error;

/// Answers whether the environment knows a native event name
pub trait CapabilityProbe {
    /// `name` is the candidate as written (e.g. `MSPointerDown`).
    /// Browsers answer by looking up `on<name lowercased>` on `window`.
    fn supports(&self, name: &str) -> bool;
}

/// The element receiving the `ptr-*` classes and the input listeners
pub trait RootElement {
    /// Add or remove one class. Must be idempotent.
    fn set_class(&self, name: &'static str, present: bool);

    /// Attach a listener for a native event name
    fn add_listener(&self, name: &'static str, handler: Box<dyn FnMut(&dyn InputEvent)>);

    /// Attach a listener that runs at most once and then detaches itself
    fn once(&self, name: &'static str, handler: Box<dyn FnOnce()>);
}

/// Receives render state from the core
pub trait RenderHost {
    /// Bind the content/loader styles into the rendered template
    fn apply(&self, state: &RenderState);

    /// State changed outside the host's own change detection
    fn request_render(&self);

    /// Error channel for failures the core propagates
    fn report_error(&self, error: &Error) {
        tracing::error!("pull-refresh error: {}", error);
    }
}

/// Measures the loader element when no content offset is configured
pub trait LoaderMetrics {
    fn loader_height(&self) -> f64;
}

impl<F: Fn() -> f64> LoaderMetrics for F {
    fn loader_height(&self) -> f64 {
        self()
    }
}

/// Single-threaded timers and task spawning
pub trait Runtime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
