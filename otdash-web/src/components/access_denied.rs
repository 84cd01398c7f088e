use client::navigation::Screen;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct AccessDeniedProps {
    pub screen: Screen,
}

#[function_component(AccessDenied)]
pub fn access_denied(props: &AccessDeniedProps) -> Html {
    let needed = props
        .screen
        .read_permission()
        .map(|permission| permission.as_str().to_string())
        .unwrap_or_default();
    html! {
        <div class="alert alert-warning">
            <span>{ format!("You do not have access to {}.", props.screen.title()) }</span>
            if !needed.is_empty() {
                <span class="text-xs opacity-70">{ format!("Requires {needed}") }</span>
            }
        </div>
    }
}
