use crate::components::access_denied::AccessDenied;
use crate::components::loading::Loading;
use crate::containers::layout::Layout;
use crate::models::app_state::AppState;
use crate::pages::*;
use client::navigation::{RouteDecision, Screen, guard};
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// Browser routes. Paths mirror [`Screen::path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/users")]
    Users,
    #[at("/employees")]
    Employees,
    #[at("/admin/config")]
    AdminConfig,
    #[at("/ot/entry")]
    OtEntry,
    #[at("/ot/logs")]
    OtLogs,
    #[at("/triple-ot")]
    TripleOt,
    #[at("/audit")]
    Audit,
    #[at("/ot-reason")]
    OtReason,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Screen> for Route {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Login => Self::Login,
            Screen::Dashboard => Self::Dashboard,
            Screen::Users => Self::Users,
            Screen::Employees => Self::Employees,
            Screen::AdminConfig => Self::AdminConfig,
            Screen::OtEntry => Self::OtEntry,
            Screen::OtLogs => Self::OtLogs,
            Screen::TripleOt => Self::TripleOt,
            Screen::Audit => Self::Audit,
            Screen::OtReason => Self::OtReason,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: Route,
}

/// Applies the route guard to the current session, then renders the screen.
#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let session = use_selector(|state: &AppState| state.session.clone());
    let path = props.route.to_path();

    match guard(&path, &session) {
        RouteDecision::Loading => html! { <Loading progress={session.progress()} /> },
        RouteDecision::Redirect(target) => {
            let to = Route::recognize(target).unwrap_or(Route::Home);
            html! { <Redirect<Route> {to} /> }
        }
        RouteDecision::Render(Screen::Login) => html! { <LoginPage /> },
        RouteDecision::Render(screen) => {
            let content = if screen.is_readable(&session) {
                screen_content(screen)
            } else {
                html! { <AccessDenied {screen} /> }
            };
            html! {
                <Layout current={screen}>
                    { content }
                </Layout>
            }
        }
    }
}

fn screen_content(screen: Screen) -> Html {
    match screen {
        Screen::Login => html! { <LoginPage /> },
        Screen::Dashboard => html! { <DashboardPage /> },
        Screen::Users => html! { <UsersPage /> },
        Screen::Employees => html! { <EmployeesPage /> },
        Screen::AdminConfig => html! { <AdminConfigPage /> },
        Screen::OtEntry => html! { <OtEntryPage /> },
        Screen::OtLogs => html! { <OtLogsPage /> },
        Screen::TripleOt => html! { <TripleOtPage /> },
        Screen::Audit => html! { <AuditPage /> },
        Screen::OtReason => html! { <DecisionReasonsPage /> },
    }
}

/// Switch function for the router.
pub fn switch(route: Route) -> Html {
    html! { <RouteView {route} /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn every_screen_has_a_route_with_the_same_path() {
        for screen in Screen::iter() {
            assert_eq!(Route::from(screen).to_path(), screen.path());
        }
    }

    #[wasm_bindgen_test]
    fn guard_targets_are_routable() {
        for target in ["/", "/login", "/dashboard"] {
            assert!(Route::recognize(target).is_some());
        }
        assert_eq!(Route::recognize("/ot/logs"), Some(Route::OtLogs));
    }
}
