use crate::api;
use crate::routes::Route;
use client::api::NotificationFeed;
use shared::models::PendingNotification;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

fn badge(count: u32) -> String {
    if count > 99 {
        "99+".to_string()
    } else {
        count.to_string()
    }
}

/// Pending-approval bell. Loads the count on mount and the items when opened.
#[function_component(NotificationBell)]
pub fn notification_bell() -> Html {
    let count = use_state(|| 0_u32);
    let items = use_state(Vec::<PendingNotification>::new);
    let open = use_state(|| false);
    let loading = use_state(|| false);
    let feed = use_memo((), |()| api::shared().ok().map(NotificationFeed::new));

    {
        let count = count.clone();
        use_effect_with((), move |_| {
            api::spawn_call(
                |client| async move { client.notification_count().await },
                move |result| match result {
                    Ok(pending) => count.set(pending),
                    Err(err) => tracing::warn!(error = %err, "failed to load notification count"),
                },
            );
            || ()
        });
    }

    let refresh = {
        let feed = feed.clone();
        let count = count.clone();
        let items = items.clone();
        let loading = loading.clone();
        Callback::from(move |()| {
            let Some(feed) = (*feed).clone() else {
                return;
            };
            let count = count.clone();
            let items = items.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                match feed.refresh().await {
                    Ok(Some(body)) => {
                        count.set(body.pending_count);
                        items.set(body.items);
                    }
                    Ok(None) => {}
                    Err(err) => tracing::warn!(error = %err, "failed to load pending notifications"),
                }
                loading.set(false);
            });
        })
    };

    let toggle = {
        let open = open.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let opening = !*open;
            open.set(opening);
            if opening {
                refresh.emit(());
            }
        })
    };

    html! {
        <div class="relative">
            <button class="btn btn-ghost btn-circle" onclick={toggle}>
                <Icon icon_id={IconId::HeroiconsOutlineBell} class="w-6 h-6" />
                if *count > 0 {
                    <span class="badge badge-primary badge-xs absolute -top-1 -right-1">{ badge(*count) }</span>
                }
            </button>
            if *open {
                <div class="absolute right-0 mt-2 w-96 max-w-[90vw] card bg-base-100 shadow-lg z-50">
                    <div class="flex items-center justify-between px-4 py-3 border-b border-base-300">
                        <div>
                            <div class="font-bold text-sm">{"Pending approvals"}</div>
                            <div class="text-xs opacity-70">
                                if *loading { {"Loading…"} } else { { format!("{} pending", *count) } }
                            </div>
                        </div>
                        <button class="btn btn-xs" onclick={refresh.reform(|_: MouseEvent| ())}>{"Refresh"}</button>
                    </div>
                    <div class="max-h-96 overflow-auto divide-y divide-base-200">
                        if items.is_empty() && !*loading {
                            <div class="px-4 py-8 text-center text-sm opacity-70">{"No pending approvals. All caught up!"}</div>
                        }
                        { for items.iter().map(|item| {
                            let (emp_id, name) = item
                                .employee
                                .as_ref()
                                .map_or(("Unknown", ""), |employee| (employee.emp_id.as_str(), employee.name.as_str()));
                            html! {
                                <div key={item.id.clone()} class="px-4 py-3">
                                    <div class="text-sm font-semibold">{ emp_id }</div>
                                    <div class="text-xs opacity-70">{ name }</div>
                                    <div class="text-xs mt-1">
                                        { format!("{} · {} · {}-{}", item.work_date, item.shift, item.in_time, item.out_time) }
                                    </div>
                                </div>
                            }
                        }) }
                    </div>
                    <div class="px-4 py-2 border-t border-base-300 text-right">
                        <Link<Route> to={Route::OtEntry} classes="link link-primary text-sm">{"Open OT Entry"}</Link<Route>>
                    </div>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn badge_caps_at_99() {
        assert_eq!(badge(7), "7");
        assert_eq!(badge(150), "99+");
    }
}
