//! Transition back to rest state

use std::rc::{Rc, Weak};

use tracing::debug;

use crate::classes::{Phase, Stage};

pub const TRANSITION_END: &str = "transitionend";

#[derive(Clone)]
pub struct ResetAnimator {
    stage: Rc<Stage>,
}

impl ResetAnimator {
    pub fn new(stage: Rc<Stage>) -> Self {
        Self { stage }
    }

    /// Start the reset transition.
    ///
    /// `ptr-loading` and `ptr-refresh` go away and `ptr-reset` is added right
    /// now; loading is over as soon as this returns. `ptr-reset` and
    /// `ptr-pull` are removed when the root's transition ends.
    pub fn reset(&self) {
        self.stage.transition(Phase::Resetting, |flags| {
            flags.refresh = false;
            flags.reset = true;
        });
        debug!("reset started");

        let stage: Weak<Stage> = Rc::downgrade(&self.stage);
        self.stage.root().once(
            TRANSITION_END,
            Box::new(move || {
                if let Some(stage) = stage.upgrade() {
                    finish(&stage);
                }
            }),
        );
    }
}

fn finish(stage: &Stage) {
    let phase = match stage.phase() {
        Phase::Resetting => Phase::Idle,
        other => other,
    };
    stage.transition(phase, |flags| {
        flags.reset = false;
        flags.pull = false;
    });
    debug!("reset finished");
}
