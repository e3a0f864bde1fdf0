//! Pull-to-refresh gesture handling shared between the browser binding and
//! the replay tool.
//!
//! The crate turns raw touch/pointer input into the "pull, release, refresh,
//! reset" interaction. Everything that touches the DOM or a host framework
//! goes through the traits in [`host`], so the state machine itself runs the
//! same in a browser, in a native replay, or against test fakes.

pub mod classes;
pub mod config;
pub mod controller;
pub mod engine;
pub mod event;
pub mod host;
pub mod loading;
pub mod render;
pub mod reset;
pub mod session;

pub use classes::{ClassFlags, Phase, Stage};
pub use config::{Config, Options, DEFAULT_TEMPLATE};
pub use controller::{Collaborators, PullRefresh};
pub use engine::{GestureEngine, GestureEvent, GestureState, ResistanceEngine};
pub use event::{EventCategory, InputEvent};
pub use host::{CapabilityProbe, LoaderMetrics, RenderHost, RootElement, Runtime};
pub use loading::{RefreshCallback, RefreshFuture, RefreshResult};
pub use render::{RenderState, Translate};

/// Pull-refresh errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid attribute {name}: {value:?}")]
    InvalidAttribute { name: String, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Refresh failed: {0}")]
    Refresh(String),
}

pub type Result<T> = std::result::Result<T, Error>;
