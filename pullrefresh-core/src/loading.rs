//! Loading phase around the caller's refresh action

use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, FutureExt, LocalBoxFuture};
use tracing::{debug, info, warn};

use crate::classes::{Phase, Stage};
use crate::engine::GestureState;
use crate::host::Runtime;
use crate::reset::ResetAnimator;
use crate::Result;

/// Loading stays visible at least this long after release
pub const MIN_LOADING: Duration = Duration::from_millis(1000);

/// Pending refresh work
pub type RefreshFuture = LocalBoxFuture<'static, Result<()>>;

/// What the refresh callback hands back
pub enum RefreshResult {
    /// Asynchronous refresh; reset waits for it to settle
    Pending(RefreshFuture),
    /// Nothing to wait for
    Done,
}

impl RefreshResult {
    pub fn pending(fut: impl std::future::Future<Output = Result<()>> + 'static) -> Self {
        Self::Pending(fut.boxed_local())
    }
}

/// The caller's refresh action. An `Err` is a synchronous failure.
pub type RefreshCallback = Rc<dyn Fn() -> Result<RefreshResult>>;

pub struct LoadingController {
    stage: Rc<Stage>,
    reset: ResetAnimator,
    runtime: Rc<dyn Runtime>,
    refresh: Option<RefreshCallback>,
}

impl LoadingController {
    pub fn new(
        stage: Rc<Stage>,
        reset: ResetAnimator,
        runtime: Rc<dyn Runtime>,
        refresh: Option<RefreshCallback>,
    ) -> Self {
        Self {
            stage,
            reset,
            runtime,
            refresh,
        }
    }

    /// Handle gesture end.
    ///
    /// With refresh armed, the reset runs once both [`MIN_LOADING`] has
    /// elapsed since this call and the refresh result has settled. If the
    /// callback fails synchronously the reset runs immediately and the error
    /// is returned, so the loading guard is always released.
    pub fn release(&self, state: &GestureState) -> Result<()> {
        if !state.refresh {
            self.reset.reset();
            return Ok(());
        }

        self.stage.transition(Phase::Loading, |_| {});
        info!("refresh started");

        let Some(refresh) = self.refresh.as_ref() else {
            debug!("no refresh callback configured");
            self.reset.reset();
            return Ok(());
        };

        let pending = match refresh() {
            Ok(result) => result,
            Err(e) => {
                self.reset.reset();
                return Err(e);
            }
        };

        let floor = self.runtime.sleep(MIN_LOADING);
        let reset = self.reset.clone();

        self.runtime.spawn_local(
            async move {
                let work = async move {
                    match pending {
                        RefreshResult::Pending(fut) => fut.await,
                        RefreshResult::Done => Ok(()),
                    }
                };

                let ((), outcome) = future::join(floor, work).await;
                if let Err(e) = outcome {
                    warn!("refresh failed: {}", e);
                }

                info!("refresh finished");
                reset.reset();
            }
            .boxed_local(),
        );

        Ok(())
    }
}
