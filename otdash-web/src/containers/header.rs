use crate::components::{notification_bell::NotificationBell, user_dropdown::UserDropdown};
use crate::models::app_state::AppState;
use client::gate::shows_notification_bell;
use client::navigation::Screen;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current: Screen,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let show_bell = use_selector(|state: &AppState| shows_notification_bell(&state.session));

    html! {
        <nav class="navbar justify-between bg-base-300 px-4">
            <div class="flex items-center gap-2">
                <label for="sidebar-drawer" class="btn btn-ghost btn-square lg:hidden">
                    <Icon icon_id={IconId::HeroiconsOutlineBars3} class="w-6 h-6" />
                </label>
                <h1 class="text-lg font-semibold">{ props.current.title() }</h1>
            </div>
            <div class="flex items-center gap-2">
                if *show_bell {
                    <NotificationBell />
                }
                <UserDropdown />
            </div>
        </nav>
    }
}
