//! One pull-refresh instance: adapters, session, render and loading wired together

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::classes::{Phase, Stage};
use crate::config::Options;
use crate::engine::{GestureEngine, GestureEvent, GestureState};
use crate::event::{vertical_coordinate, EventCategory, InputEvent};
use crate::host::{CapabilityProbe, LoaderMetrics, RenderHost, RootElement, Runtime};
use crate::loading::{LoadingController, RefreshCallback};
use crate::render::RenderSynchronizer;
use crate::reset::ResetAnimator;
use crate::session::GestureSession;
use crate::Result;

/// Environment an instance runs against
pub struct Collaborators {
    pub engine: Box<dyn GestureEngine>,
    pub root: Rc<dyn RootElement>,
    pub host: Rc<dyn RenderHost>,
    pub loader: Rc<dyn LoaderMetrics>,
    pub runtime: Rc<dyn Runtime>,
    pub refresh: Option<RefreshCallback>,
}

pub struct PullRefresh {
    options: Options,
    stage: Rc<Stage>,
    session: RefCell<GestureSession>,
    render: RenderSynchronizer,
    loading: LoadingController,
}

impl PullRefresh {
    /// Activate an instance. A disabled instance is inert: `None`, and
    /// nothing is attached or published.
    pub fn activate(options: Options, parts: Collaborators) -> Option<Rc<Self>> {
        if options.disabled {
            debug!("pull-refresh disabled");
            return None;
        }

        let Collaborators {
            engine,
            root,
            host,
            loader,
            runtime,
            refresh,
        } = parts;

        let stage = Rc::new(Stage::new(root));
        let session = GestureSession::new(engine, stage.clone());
        let render = RenderSynchronizer::new(
            options.config,
            options.hide_loader,
            loader,
            host,
            stage.clone(),
        );
        let reset = ResetAnimator::new(stage.clone());
        let loading = LoadingController::new(stage.clone(), reset, runtime, refresh);

        Some(Rc::new(Self {
            options,
            stage,
            session: RefCell::new(session),
            render,
            loading,
        }))
    }

    /// Attach the start/move/end adapters to the root, one native event each.
    /// Returns the chosen event names.
    pub fn listen(self: &Rc<Self>, probe: &dyn CapabilityProbe) -> [&'static str; 3] {
        EventCategory::ALL.map(|category| {
            let name = category.event_name(probe);
            let this: Weak<Self> = Rc::downgrade(self);

            self.stage.root().add_listener(
                name,
                Box::new(move |event: &dyn InputEvent| {
                    if let Some(this) = this.upgrade() {
                        this.dispatch(category, event);
                    }
                }),
            );

            debug!(category = ?category, name, "listening");
            name
        })
    }

    fn dispatch(&self, category: EventCategory, event: &dyn InputEvent) {
        let result = match category {
            EventCategory::Start => {
                self.touch_start(event);
                Ok(())
            }
            EventCategory::Move => self.touch_move(event),
            EventCategory::End => self.touch_end(event),
        };

        if let Err(e) = result {
            debug!(category = ?category, "handler failed");
            self.render.host().report_error(&e);
        }
    }

    pub fn touch_start(&self, event: &dyn InputEvent) {
        let mut session = self.session.borrow_mut();
        session.reset();

        if self.stage.is_loading() {
            return;
        }

        session.begin(vertical_coordinate(event));
    }

    pub fn touch_move(&self, event: &dyn InputEvent) -> Result<()> {
        if self.stage.is_loading() {
            return Ok(());
        }

        let consumed = self.session.borrow_mut().move_to(vertical_coordinate(event));
        if consumed {
            event.stop_propagation();
        }

        self.process()
    }

    pub fn touch_end(&self, event: &dyn InputEvent) -> Result<()> {
        if self.stage.is_loading() {
            return Ok(());
        }

        let handled = self.session.borrow_mut().end();
        if handled && event.cancelable() {
            event.prevent_default();
            event.stop_propagation();
        }

        self.process()
    }

    /// Dispatch everything the engine published
    fn process(&self) -> Result<()> {
        let events = self.session.borrow_mut().take_events();

        for event in events {
            match event {
                GestureEvent::Moved(state) => self.render.moved(&state),
                GestureEvent::End(state) => {
                    self.render.clear();
                    self.loading.release(&state)?;
                }
            }
        }

        Ok(())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn state(&self) -> GestureState {
        self.session.borrow().state()
    }

    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.stage.is_loading()
    }
}
