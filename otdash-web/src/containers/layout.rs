use crate::components::toasts::Toasts;
use crate::containers::{header::Header, sidebar::Sidebar};
use client::navigation::Screen;
use web_sys::window;
use yew::{Children, Html, Properties, classes, function_component, html, use_effect_with};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub current: Screen,
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    use_effect_with((), |_| {
        if let Some(root) = window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            root.set_attribute("data-theme", "corporate").unwrap_or_default();
        }
        || {}
    });

    html! {
        <div class="min-h-screen bg-base-100 drawer lg:drawer-open">
            <input id="sidebar-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <Header current={props.current} />
                <main class={classes!("flex-grow", "p-4", "lg:p-6")}>
                    { props.children.clone() }
                </main>
            </div>
            <Sidebar current={props.current} />
            <Toasts />
        </div>
    }
}
