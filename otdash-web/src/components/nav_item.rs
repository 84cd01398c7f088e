use crate::routes::Route;
use client::gate::NavItem as Item;
use client::navigation::Screen;
use yew::{Html, Properties, classes, function_component, html};
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub struct NavItemProps {
    pub item: Item,
    pub current: Screen,
}

fn icon_for(screen: Screen) -> IconId {
    match screen {
        Screen::Login | Screen::Dashboard => IconId::HeroiconsOutlineHome,
        Screen::Users => IconId::HeroiconsOutlineUser,
        Screen::Employees => IconId::HeroiconsOutlineUserGroup,
        Screen::AdminConfig => IconId::HeroiconsOutlineShieldCheck,
        Screen::OtEntry => IconId::HeroiconsOutlineClock,
        Screen::OtLogs => IconId::HeroiconsOutlineDocumentText,
        Screen::TripleOt => IconId::HeroiconsOutlineCalendar,
        Screen::Audit => IconId::HeroiconsOutlineClipboardDocumentList,
        Screen::OtReason => IconId::HeroiconsOutlineChatBubbleLeftRight,
    }
}

#[function_component(NavItem)]
pub fn nav_item(props: &NavItemProps) -> Html {
    let active = (props.item.screen == props.current).then_some("active");
    html! {
        <li>
            <Link<Route> to={Route::from(props.item.screen)} classes={classes!("gap-2", active)}>
                <Icon icon_id={icon_for(props.item.screen)} class="w-5 h-5" />
                { props.item.label }
            </Link<Route>>
        </li>
    }
}
