//! Pull-to-refresh component

use std::cell::RefCell;
use std::rc::Rc;

use pullrefresh_core::{
    Collaborators, Config, Error, LoaderMetrics, Options, PullRefresh as Controller,
    RefreshCallback, RefreshResult, RenderHost, RenderState, ResistanceEngine,
};
use tracing::{error, warn};
use web_sys::HtmlElement;
use yew::prelude::*;

use super::Loader;
use crate::dom::{DomRoot, WebRuntime, WindowProbe};

#[derive(Properties, PartialEq)]
pub struct PullRefreshProps {
    #[prop_or_default]
    pub children: Children,
    /// Invoked on release past the threshold
    #[prop_or_default]
    pub on_refresh: Option<Callback<(), RefreshResult>>,
    #[prop_or_default]
    pub config: Config,
    #[prop_or_default]
    pub hide_loader: bool,
    /// Selector of the element receiving the `ptr-*` classes (body if unset)
    #[prop_or_default]
    pub element: Option<AttrValue>,
    /// Replaces the default loader markup
    #[prop_or_default]
    pub loader: Option<Html>,
    /// Read once on mount
    #[prop_or_default]
    pub disabled: bool,
    /// Receives the loader's inline style on every change
    #[prop_or_default]
    pub on_loader_style: Option<Callback<String>>,
    #[prop_or_default]
    pub on_error: Option<Callback<String>>,
}

/// Publishes render state into the component and schedules re-renders
struct ComponentHost {
    render: Rc<RefCell<RenderState>>,
    force_update: UseForceUpdateHandle,
    on_loader_style: Option<Callback<String>>,
    on_error: Option<Callback<String>>,
}

impl RenderHost for ComponentHost {
    fn apply(&self, state: &RenderState) {
        *self.render.borrow_mut() = *state;

        if let Some(ref callback) = self.on_loader_style {
            callback.emit(state.loader_style());
        }
    }

    fn request_render(&self) {
        self.force_update.force_update();
    }

    fn report_error(&self, error: &Error) {
        error!("pull-refresh error: {}", error);

        if let Some(ref callback) = self.on_error {
            callback.emit(error.to_string());
        }
    }
}

/// An activated instance; detaches its listeners when dropped
struct Binding {
    _controller: Rc<Controller>,
    root: Rc<DomRoot>,
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.root.detach();
    }
}

fn bind(
    options: Options,
    host: ComponentHost,
    loader_ref: NodeRef,
    on_refresh: Option<Callback<(), RefreshResult>>,
) -> Option<Binding> {
    if options.disabled {
        return None;
    }

    if let Err(e) = options.config.validate() {
        host.report_error(&e);
        return None;
    }

    let Some(root) = DomRoot::resolve(options.root_selector.as_deref()) else {
        warn!("pull-refresh root not found, no document available");
        return None;
    };
    let probe = WindowProbe::new()?;
    let root = Rc::new(root);

    let scroller = root.scroller();
    let engine = ResistanceEngine::new(options.config.threshold, options.config.resistance)
        .with_scroll_top(move || scroller.scroll_top() as f64);

    let loader: Rc<dyn LoaderMetrics> = Rc::new(move || {
        loader_ref
            .cast::<HtmlElement>()
            .map(|el| el.offset_height() as f64)
            .unwrap_or_default()
    });

    let refresh = on_refresh.map(|callback| -> RefreshCallback {
        Rc::new(move || Ok(callback.emit(())))
    });

    let controller = Controller::activate(
        options,
        Collaborators {
            engine: Box::new(engine),
            root: root.clone(),
            host: Rc::new(host),
            loader,
            runtime: Rc::new(WebRuntime),
            refresh,
        },
    )?;
    controller.listen(&probe);

    Some(Binding {
        _controller: controller,
        root,
    })
}

#[function_component(PullRefresh)]
pub fn pull_refresh(props: &PullRefreshProps) -> Html {
    let render = use_mut_ref(RenderState::default);
    let force_update = use_force_update();
    let loader_ref = use_node_ref();

    {
        let options = Options {
            config: props.config,
            hide_loader: props.hide_loader,
            root_selector: props.element.as_ref().map(|s| s.to_string()),
            template: None,
            disabled: props.disabled,
        };
        let host = ComponentHost {
            render: render.clone(),
            force_update,
            on_loader_style: props.on_loader_style.clone(),
            on_error: props.on_error.clone(),
        };
        let loader_ref = loader_ref.clone();
        let on_refresh = props.on_refresh.clone();

        use_effect_with((), move |_| {
            let binding = bind(options, host, loader_ref, on_refresh);
            move || drop(binding)
        });
    }

    let state = *render.borrow();

    html! {
        <div class="pullrefresh">
            <div class="ptr" ref={loader_ref} style={state.loader_style()}>
                {props.loader.clone().unwrap_or_else(|| html! { <Loader /> })}
            </div>
            <div class="ptr-content" style={state.content_style()}>
                {props.children.clone()}
            </div>
        </div>
    }
}
