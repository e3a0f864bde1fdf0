//! Gesture state to CSS transforms

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

use crate::classes::{Phase, Stage};
use crate::config::Config;
use crate::engine::GestureState;
use crate::host::{LoaderMetrics, RenderHost};

/// Vertical `translate3d` offset in px
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Translate(pub f64);

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d(0, {}px, 0)", self.0)
    }
}

/// Transforms bound into the content and loader elements.
/// `None` is the rest state: no transform override.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RenderState {
    pub content: Option<Translate>,
    pub loader: Option<Translate>,
}

impl RenderState {
    pub fn is_rest(&self) -> bool {
        self.content.is_none() && self.loader.is_none()
    }

    /// Inline style for the content element
    pub fn content_style(&self) -> String {
        style(self.content)
    }

    /// Inline style for the loader element
    pub fn loader_style(&self) -> String {
        style(self.loader)
    }
}

fn style(transform: Option<Translate>) -> String {
    match transform {
        Some(t) => format!("transform: {t}; -webkit-transform: {t};"),
        None => String::new(),
    }
}

/// Loader position for a pull of `distance` with the loader `offset` px tall.
/// A hidden loader moves against the content so it stays above the fold.
pub fn loader_offset(distance: f64, offset: f64, hide_loader: bool) -> f64 {
    if hide_loader {
        -distance - offset
    } else {
        distance - offset
    }
}

pub struct RenderSynchronizer {
    config: Config,
    hide_loader: bool,
    loader: Rc<dyn LoaderMetrics>,
    host: Rc<dyn RenderHost>,
    stage: Rc<Stage>,
}

impl RenderSynchronizer {
    pub fn new(
        config: Config,
        hide_loader: bool,
        loader: Rc<dyn LoaderMetrics>,
        host: Rc<dyn RenderHost>,
        stage: Rc<Stage>,
    ) -> Self {
        Self {
            config,
            hide_loader,
            loader,
            host,
            stage,
        }
    }

    pub fn host(&self) -> &Rc<dyn RenderHost> {
        &self.host
    }

    fn offset(&self) -> f64 {
        self.config
            .content_offset
            .unwrap_or_else(|| self.loader.loader_height())
    }

    /// Render state for a gesture snapshot
    pub fn compute(&self, state: &GestureState) -> RenderState {
        let offset = self.offset();
        RenderState {
            content: Some(Translate(state.distance)),
            loader: Some(Translate(loader_offset(
                state.distance,
                offset,
                self.hide_loader,
            ))),
        }
    }

    /// Handle a "moved" notification
    pub fn moved(&self, state: &GestureState) {
        let phase = match self.stage.phase() {
            Phase::Idle | Phase::Resetting => Phase::Panning,
            other => other,
        };
        self.stage.transition(phase, |flags| {
            flags.refresh = state.refresh;
            flags.pull = state.pull;
        });

        let render = self.compute(state);
        debug!(distance = state.distance, pull = state.pull, refresh = state.refresh, "moved");
        self.publish(&render);
    }

    /// Handle gesture end: back to the rest transforms
    pub fn clear(&self) {
        self.publish(&RenderState::default());
    }

    fn publish(&self, render: &RenderState) {
        self.host.apply(render);
        self.host.request_render();
    }
}
