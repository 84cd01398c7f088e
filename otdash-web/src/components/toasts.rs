use crate::models::toast::{ToastKind, ToastState};
use yew::{Callback, Html, MouseEvent, function_component, html};
use yewdux::prelude::use_store;

#[function_component(Toasts)]
pub fn toasts() -> Html {
    let (state, dispatch) = use_store::<ToastState>();
    html! {
        <div class="toast toast-end toast-bottom z-50">
            { for state.items.iter().map(|toast| {
                let id = toast.id;
                let dispatch = dispatch.clone();
                let onclick = Callback::from(move |_: MouseEvent| dispatch.reduce_mut(|state| state.dismiss(id)));
                let class = match toast.kind {
                    ToastKind::Success => "alert alert-success",
                    ToastKind::Error => "alert alert-error",
                };
                html! {
                    <div key={id} {class} {onclick}>
                        <span>{ &toast.message }</span>
                    </div>
                }
            }) }
        </div>
    }
}
