use crate::{api, forms::bind_input, routes::Route};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let email_value = (*email).trim().to_string();
            let password_value = (*password).clone();
            loading.set(true);
            error.set(None);
            let loading = loading.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = match api::shared() {
                    Ok(client) => client.session().login(&email_value, &password_value).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => {
                        if let Some(nav) = navigator {
                            nav.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => error.set(Some(err.user_message())),
                }
                loading.set(false);
            });
        })
    };

    let is_busy = *loading;
    let disable_submit = email.is_empty() || password.is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit}>
                    <div class="text-center mb-2">
                        <div class="text-3xl font-black">{"OT Dashboard"}</div>
                        <div class="text-sm opacity-70">{"Overtime Management System"}</div>
                    </div>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{ message.clone() }</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            placeholder="admin@company.com"
                            required=true
                            value={(*email).clone()}
                            oninput={bind_input(&email)}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={bind_input(&password)}
                        />
                    </div>
                    <div class="form-control mt-4">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            if is_busy {
                                <span class="loading loading-spinner"></span>
                                {"Signing in..."}
                            } else {
                                {"Login"}
                            }
                        </button>
                    </div>
                    <p class="text-xs opacity-70 mt-2">
                        {"For account assistance or creation, please contact your Administrator."}
                    </p>
                </form>
            </div>
        </div>
    }
}
