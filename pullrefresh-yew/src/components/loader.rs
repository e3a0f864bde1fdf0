//! Default loader markup

use yew::prelude::*;

#[function_component(Loader)]
pub fn loader() -> Html {
    html! {
        <div class="ptr-box">
            <div class="ptr-arrow"></div>
            <div class="ptr-spinner">
                <span class="ptr-dot"></span>
                <span class="ptr-dot"></span>
                <span class="ptr-dot"></span>
            </div>
        </div>
    }
}
