use crate::{api, models::app_state::AppState, routes::Route};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_selector;

#[function_component(UserDropdown)]
pub fn user_dropdown() -> Html {
    let navigator = use_navigator();
    let user = use_selector(|state: &AppState| state.session.user().cloned());
    let Some(user) = (*user).clone() else {
        return html! {};
    };

    let onclick = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        let navigator = navigator.clone();
        spawn_local(async move {
            if let Ok(client) = api::shared() {
                client.session().logout().await;
            }
            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
        });
    });

    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                <span class="text-sm">{ &user.username }</span>
            </div>
            <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-56">
                <li class="px-2 py-1 text-left">
                    <div class="text-sm font-semibold">{ &user.username }</div>
                    <div class="text-xs text-base-content/70">{ &user.email }</div>
                    <div class="badge badge-outline badge-sm mt-1">{ &user.role.name }</div>
                </li>
                <div class="divider my-0"></div>
                <li><a {onclick}>{"Logout"}</a></li>
            </ul>
        </div>
    }
}
