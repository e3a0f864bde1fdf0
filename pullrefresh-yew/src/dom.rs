//! `web-sys` implementations of the core seams

use std::cell::RefCell;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use pullrefresh_core::config::resolve_root;
use pullrefresh_core::{CapabilityProbe, InputEvent, RootElement, Runtime};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Element, Event, MouseEvent, TouchEvent, Window};

/// Feature-detects event names through `on<name>` properties of `window`
pub struct WindowProbe {
    window: Window,
}

impl WindowProbe {
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl CapabilityProbe for WindowProbe {
    fn supports(&self, name: &str) -> bool {
        let key = JsValue::from_str(&format!("on{}", name.to_lowercase()));
        js_sys::Reflect::has(&self.window, &key).unwrap_or(false)
    }
}

/// The pull-refresh root element and the listeners attached to it
pub struct DomRoot {
    element: Element,
    listeners: RefCell<Vec<(&'static str, Closure<dyn FnMut(Event)>)>>,
}

impl DomRoot {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// First element matching `selector`, else the document body
    pub fn resolve(selector: Option<&str>) -> Option<Self> {
        let document = web_sys::window()?.document()?;

        let element = resolve_root(
            selector,
            |selector| document.query_selector(selector).ok().flatten().map(Some),
            || document.body().map(Element::from),
        )?;

        Some(Self::new(element))
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Element whose `scrollTop` decides whether a pull may start
    pub fn scroller(&self) -> Element {
        if self.element.tag_name() == "BODY" {
            let scrolling = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.scrolling_element());
            if let Some(scrolling) = scrolling {
                return scrolling;
            }
        }
        self.element.clone()
    }

    /// Remove every input listener attached through [`RootElement::add_listener`]
    pub fn detach(&self) {
        for (name, closure) in self.listeners.borrow_mut().drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for DomRoot {
    fn drop(&mut self) {
        self.detach();
    }
}

impl RootElement for DomRoot {
    fn set_class(&self, name: &'static str, present: bool) {
        if let Err(e) = self.element.class_list().toggle_with_force(name, present) {
            warn!("failed to toggle class {}: {:?}", name, e);
        }
    }

    fn add_listener(&self, name: &'static str, mut handler: Box<dyn FnMut(&dyn InputEvent)>) {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handler(&WebEvent(event));
        });

        match self
            .element
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        {
            Ok(()) => self.listeners.borrow_mut().push((name, closure)),
            Err(e) => warn!("failed to attach {} listener: {:?}", name, e),
        }
    }

    fn once(&self, name: &'static str, handler: Box<dyn FnOnce()>) {
        let options = AddEventListenerOptions::new();
        options.set_once(true);

        let callback = Closure::once_into_js(move || handler());
        if let Err(e) = self
            .element
            .add_event_listener_with_callback_and_add_event_listener_options(
                name,
                callback.unchecked_ref(),
                &options,
            )
        {
            warn!("failed to attach {} listener: {:?}", name, e);
        }
    }
}

/// Touch, pointer and legacy MS pointer events
struct WebEvent(Event);

impl InputEvent for WebEvent {
    fn first_touch_y(&self) -> Option<f64> {
        self.0
            .dyn_ref::<TouchEvent>()
            .and_then(|e| e.touches().get(0))
            .map(|touch| touch.client_y() as f64)
    }

    fn client_y(&self) -> f64 {
        self.0
            .dyn_ref::<MouseEvent>()
            .map(|e| e.client_y() as f64)
            .unwrap_or_default()
    }

    fn cancelable(&self) -> bool {
        self.0.cancelable()
    }

    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

/// Browser timers and the microtask-driven executor
pub struct WebRuntime;

impl Runtime for WebRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_local()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
