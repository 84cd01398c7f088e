use crate::api;
use crate::models::app_state::AppState;
use crate::routes::{Route, switch};
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_effect_with};
use yew_router::prelude::*;
use yewdux::YewduxRoot;
use yewdux::prelude::use_dispatch;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <YewduxRoot>
            <SessionBridge />
        </YewduxRoot>
    }
}

/// Mirrors the session manager into the store and runs bootstrap once.
#[function_component(SessionBridge)]
fn session_bridge() -> Html {
    let dispatch = use_dispatch::<AppState>();

    use_effect_with((), move |_| {
        let subscription = match api::shared() {
            Ok(client) => {
                let session = client.session().clone();
                let id = session.subscribe({
                    let dispatch = dispatch.clone();
                    move |snapshot| {
                        dispatch.set(AppState {
                            session: snapshot.clone(),
                        });
                    }
                });
                dispatch.set(AppState {
                    session: session.snapshot(),
                });
                let bootstrapper = session.clone();
                spawn_local(async move { bootstrapper.bootstrap().await });
                Some((session, id))
            }
            Err(err) => {
                tracing::error!(error = %err, "API client unavailable");
                None
            }
        };

        move || {
            if let Some((session, id)) = subscription {
                session.unsubscribe(id);
            }
        }
    });

    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn initial_state_is_loading() {
        let state = AppState::default();
        assert!(state.session.is_loading());
        assert!(!state.session.is_authenticated());
    }
}
