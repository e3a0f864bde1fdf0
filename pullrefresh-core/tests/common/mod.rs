//! Common test fakes and helpers

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use pullrefresh_core::{
    CapabilityProbe, Collaborators, Error, InputEvent, Options, PullRefresh, RefreshCallback,
    RenderHost, RenderState, ResistanceEngine, RootElement, Runtime,
};

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Root element keeping classes and listeners in memory
#[derive(Default)]
pub struct FakeRoot {
    classes: RefCell<BTreeSet<&'static str>>,
    history: RefCell<Vec<(&'static str, bool)>>,
    listeners: RefCell<Vec<(&'static str, Box<dyn FnMut(&dyn InputEvent)>)>>,
    once: RefCell<Vec<(&'static str, Box<dyn FnOnce()>)>>,
}

impl FakeRoot {
    pub fn has(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn classes(&self) -> Vec<&'static str> {
        self.classes.borrow().iter().copied().collect()
    }

    /// Every time `class` was switched on, in order
    pub fn times_added(&self, class: &str) -> usize {
        self.history
            .borrow()
            .iter()
            .filter(|(name, on)| *name == class && *on)
            .count()
    }

    pub fn listener_names(&self) -> Vec<&'static str> {
        self.listeners.borrow().iter().map(|(name, _)| *name).collect()
    }

    pub fn pending_once(&self) -> usize {
        self.once.borrow().len()
    }

    /// Dispatch a native event to every listener registered under `name`
    pub fn fire(&self, name: &str, event: &dyn InputEvent) {
        let mut listeners = self.listeners.borrow_mut();
        for (_, handler) in listeners.iter_mut().filter(|(n, _)| *n == name) {
            handler(event);
        }
    }

    pub fn fire_transition_end(&self) {
        let handlers: Vec<_> = {
            let mut once = self.once.borrow_mut();
            let (fired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut *once)
                .into_iter()
                .partition(|(name, _)| *name == "transitionend");
            *once = kept;
            fired
        };

        for (_, handler) in handlers {
            handler();
        }
    }
}

impl RootElement for FakeRoot {
    fn set_class(&self, name: &'static str, present: bool) {
        let mut classes = self.classes.borrow_mut();
        let changed = if present {
            classes.insert(name)
        } else {
            classes.remove(name)
        };

        if changed {
            self.history.borrow_mut().push((name, present));
        }
    }

    fn add_listener(&self, name: &'static str, handler: Box<dyn FnMut(&dyn InputEvent)>) {
        self.listeners.borrow_mut().push((name, handler));
    }

    fn once(&self, name: &'static str, handler: Box<dyn FnOnce()>) {
        self.once.borrow_mut().push((name, handler));
    }
}

/// Host recording every published render state
#[derive(Default)]
pub struct FakeHost {
    pub applied: RefCell<Vec<RenderState>>,
    pub renders: Cell<usize>,
    pub errors: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn last(&self) -> Option<RenderState> {
        self.applied.borrow().last().copied()
    }
}

impl RenderHost for FakeHost {
    fn apply(&self, state: &RenderState) {
        self.applied.borrow_mut().push(*state);
    }

    fn request_render(&self) {
        self.renders.set(self.renders.get() + 1);
    }

    fn report_error(&self, error: &Error) {
        self.errors.borrow_mut().push(error.to_string());
    }
}

/// Runtime on top of a tokio `LocalSet`
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

/// Probe answering from a fixed list of lowercase event names
pub struct Supports(pub &'static [&'static str]);

impl CapabilityProbe for Supports {
    fn supports(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

pub const TOUCH: Supports = Supports(&["touchstart", "touchmove", "touchend"]);
pub const POINTER: Supports = Supports(&["pointerdown", "pointermove", "pointerup"]);

/// Native event stand-in
pub struct TestEvent {
    touch: Option<f64>,
    client: f64,
    cancelable: bool,
    pub prevented: Cell<bool>,
    pub stopped: Cell<bool>,
}

impl TestEvent {
    pub fn touch(y: f64) -> Self {
        Self {
            touch: Some(y),
            client: 0.0,
            cancelable: true,
            prevented: Cell::new(false),
            stopped: Cell::new(false),
        }
    }

    pub fn pointer(y: f64) -> Self {
        Self {
            touch: None,
            client: y,
            ..Self::touch(0.0)
        }
    }

    pub fn released() -> Self {
        Self::touch(0.0)
    }
}

impl InputEvent for TestEvent {
    fn first_touch_y(&self) -> Option<f64> {
        self.touch
    }

    fn client_y(&self) -> f64 {
        self.client
    }

    fn cancelable(&self) -> bool {
        self.cancelable
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.stopped.set(true);
    }
}

/// One activated instance plus its fakes
pub struct Harness {
    pub ptr: Rc<PullRefresh>,
    pub root: Rc<FakeRoot>,
    pub host: Rc<FakeHost>,
}

impl Harness {
    pub fn new(options: Options, refresh: Option<RefreshCallback>) -> Self {
        Self::with_loader_height(options, refresh, 40.0)
    }

    pub fn with_loader_height(
        options: Options,
        refresh: Option<RefreshCallback>,
        loader_height: f64,
    ) -> Self {
        Self::try_new(options, refresh, loader_height, &TOUCH).expect("instance should be enabled")
    }

    pub fn try_new(
        options: Options,
        refresh: Option<RefreshCallback>,
        loader_height: f64,
        probe: &dyn CapabilityProbe,
    ) -> Option<Self> {
        let root = Rc::new(FakeRoot::default());
        let host = Rc::new(FakeHost::default());
        let engine = ResistanceEngine::new(options.config.threshold, options.config.resistance);

        let ptr = PullRefresh::activate(
            options,
            Collaborators {
                engine: Box::new(engine),
                root: root.clone(),
                host: host.clone(),
                loader: Rc::new(move || loader_height),
                runtime: Rc::new(TokioRuntime),
                refresh,
            },
        )?;
        ptr.listen(probe);

        Some(Self { ptr, root, host })
    }

    pub fn start(&self, y: f64) -> TestEvent {
        let event = TestEvent::touch(y);
        self.root.fire("touchstart", &event);
        event
    }

    pub fn move_to(&self, y: f64) -> TestEvent {
        let event = TestEvent::touch(y);
        self.root.fire("touchmove", &event);
        event
    }

    pub fn end(&self) -> TestEvent {
        let event = TestEvent::released();
        self.root.fire("touchend", &event);
        event
    }

    pub fn drag(&self, from: f64, to: f64) {
        self.start(from);
        self.move_to(to);
    }

    /// `ptr-loading` must mirror the loading flag at every observation
    pub fn assert_loading_consistent(&self) {
        assert_eq!(
            self.root.has("ptr-loading"),
            self.ptr.is_loading(),
            "ptr-loading class out of sync with loading flag"
        );
    }
}

/// Options with the gesture numbers used across the tests
pub fn options(content_offset: Option<f64>, hide_loader: bool) -> Options {
    let mut options = Options::default();
    options.config.content_offset = content_offset;
    options.hide_loader = hide_loader;
    options
}
