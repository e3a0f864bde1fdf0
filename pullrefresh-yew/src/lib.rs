//! Pull-to-refresh for Yew
//!
//! Binds the `pullrefresh-core` gesture handling to the browser: touch and
//! pointer listeners on the pull-refresh root, `ptr-*` classes through the
//! element's class list, timers through `gloo-timers`, and the content/loader
//! transforms through a function component.

mod components;
mod dom;

pub use components::{PullRefresh, PullRefreshProps};
pub use dom::{DomRoot, WebRuntime, WindowProbe};
pub use pullrefresh_core::{Config, Error, Options, RefreshResult, RenderState};
