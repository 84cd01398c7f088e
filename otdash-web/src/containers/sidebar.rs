use crate::components::nav_item::NavItem;
use crate::models::app_state::AppState;
use client::gate::navigation;
use client::navigation::Screen;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub current: Screen,
}

/// Permission-filtered navigation drawer.
#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let groups = use_selector(|state: &AppState| navigation(&state.session));
    let current = props.current;

    html! {
        <div class="drawer-side z-40">
            <label for="sidebar-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
            <aside class="w-64 min-h-full bg-base-200">
                <div class="px-4 py-5 text-xl font-bold">{"OT Dashboard"}</div>
                <ul class="menu px-2">
                    { for groups.iter().map(|group| html! {
                        <>
                            <li class="menu-title">{ group.label }</li>
                            { for group.items.iter().map(|item| html! {
                                <NavItem item={*item} {current} />
                            }) }
                        </>
                    }) }
                </ul>
            </aside>
        </div>
    }
}
