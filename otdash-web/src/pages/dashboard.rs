use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::components::loading::Spinner;
use crate::models::{app_state::AppState, toast::{ToastState, failure}};
use crate::{api, routes::Route};
use client::{ApiClient, ClientResult};
use client::api::{AuditQuery, EmployeeQuery, UserQuery};
use client::calendar::{format_day, sum_week, today, week_dates, week_start_monday};
use client::gate::DashboardCapabilities;
use shared::models::{AuditEntry, DayStats, HoursBreakdown};
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;
use yewdux::Dispatch;
use yewdux::prelude::{use_dispatch, use_selector};

const RECENT_AUDIT: u32 = 6;

fn hours(value: f64) -> String {
    format!("{value:.1}h")
}

fn breakdown(hours_by_rate: &HoursBreakdown) -> String {
    format!(
        "N {} · D {} · T {}",
        hours(hours_by_rate.normal),
        hours(hours_by_rate.double),
        hours(hours_by_rate.triple)
    )
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: &'static str,
    icon: IconId,
    visible: bool,
    value: Option<String>,
    #[prop_or_default]
    sub: Option<String>,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    let body = if !props.visible {
        html! { <div class="text-sm opacity-60">{"No permission"}</div> }
    } else if let Some(value) = &props.value {
        html! {
            <>
                <div class="stat-value text-2xl">{ value }</div>
                if let Some(sub) = &props.sub {
                    <div class="stat-desc">{ sub }</div>
                }
            </>
        }
    } else {
        html! { <div class="stat-value text-2xl">{"-"}</div> }
    };

    html! {
        <div class="stat bg-base-200 rounded-box">
            <div class="stat-figure"><Icon icon_id={props.icon} class="w-6 h-6" /></div>
            <div class="stat-title">{ props.title }</div>
            { body }
        </div>
    }
}

/// Counts outstanding card loads and clears `loading` when the last one settles.
#[derive(Clone)]
struct Inflight {
    count: Rc<Cell<u32>>,
    loading: UseStateHandle<bool>,
}

impl Inflight {
    fn start(&self) {
        self.count.set(self.count.get() + 1);
        self.loading.set(true);
    }

    fn settle(&self) {
        let left = self.count.get().saturating_sub(1);
        self.count.set(left);
        if left == 0 {
            self.loading.set(false);
        }
    }
}

/// Load one card. A failure blanks the card and raises a toast.
fn load<T, Fut>(
    inflight: &Inflight,
    toasts: &Dispatch<ToastState>,
    call: impl FnOnce(ApiClient) -> Fut + 'static,
    apply: impl FnOnce(Option<T>) + 'static,
) where
    T: 'static,
    Fut: Future<Output = ClientResult<T>> + 'static,
{
    inflight.start();
    let inflight = inflight.clone();
    let toasts = toasts.clone();
    api::spawn_call(call, move |result| {
        match result {
            Ok(value) => apply(Some(value)),
            Err(err) => {
                apply(None);
                failure(&toasts, &err);
            }
        }
        inflight.settle();
    });
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let caps = *use_selector(|state: &AppState| DashboardCapabilities::of(&state.session));
    let toasts = use_dispatch::<ToastState>();
    let reload = use_state(|| 0_u32);
    let loading = use_state(|| false);

    let employees_total = use_state(|| None::<u64>);
    let users_total = use_state(|| None::<u64>);
    let today_stats = use_state(|| None::<DayStats>);
    let week_stats = use_state(Vec::<DayStats>::new);
    let audit_rows = use_state(Vec::<AuditEntry>::new);

    let day = today();
    let week_start = week_start_monday(day);
    let week = week_dates(week_start);

    {
        let employees_total = employees_total.clone();
        let users_total = users_total.clone();
        let today_stats = today_stats.clone();
        let week_stats = week_stats.clone();
        let audit_rows = audit_rows.clone();
        let inflight = Inflight {
            count: Rc::new(Cell::new(0)),
            loading: loading.clone(),
        };
        use_effect_with((caps, *reload), move |(caps, _)| {
            if caps.employees {
                let query = EmployeeQuery {
                    limit: 1,
                    ..EmployeeQuery::default()
                };
                load(
                    &inflight,
                    &toasts,
                    move |client| async move { client.list_employees(&query).await },
                    move |page| employees_total.set(page.map(|page| page.total)),
                );
            }
            if caps.users {
                let query = UserQuery {
                    limit: 1,
                    ..UserQuery::default()
                };
                load(
                    &inflight,
                    &toasts,
                    move |client| async move { client.list_users(&query).await },
                    move |page| users_total.set(page.map(|page| page.total)),
                );
            }
            if caps.stats {
                let date = format_day(day);
                load(
                    &inflight,
                    &toasts,
                    move |client| async move { client.day_stats(&date).await },
                    move |stats| today_stats.set(stats),
                );
                let (from, to) = (format_day(week[0]), format_day(week[6]));
                load(
                    &inflight,
                    &toasts,
                    move |client| async move { client.week_stats(&from, &to).await },
                    move |days| week_stats.set(days.unwrap_or_default()),
                );
            }
            if caps.audit {
                let query = AuditQuery {
                    limit: RECENT_AUDIT,
                    ..AuditQuery::default()
                };
                load(
                    &inflight,
                    &toasts,
                    move |client| async move { client.list_audit(&query).await },
                    move |page| audit_rows.set(page.map(|page| page.items).unwrap_or_default()),
                );
            }
            || ()
        });
    }

    let refresh = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.set(*reload + 1))
    };

    let week_sum = sum_week(&week_stats);
    let week_by_day = week.map(|date| {
        let key = format_day(date);
        let stats = week_stats.iter().find(|stats| stats.date.starts_with(&key)).cloned();
        (key, stats.unwrap_or_default())
    });

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-2xl font-bold">{"Overview"}</h2>
                    <div class="text-sm opacity-70">{ format!("Today {} · Week from {}", format_day(day), format_day(week_start)) }</div>
                </div>
                <button class="btn btn-sm" onclick={refresh} disabled={*loading}>
                    if *loading { <Spinner /> } else { <Icon icon_id={IconId::HeroiconsOutlineArrowPath} class="w-4 h-4" /> }
                    {"Refresh"}
                </button>
            </div>

            <div class="stats stats-vertical lg:stats-horizontal shadow w-full">
                <StatCard
                    title="Employees"
                    icon={IconId::HeroiconsOutlineUserGroup}
                    visible={caps.employees}
                    value={employees_total.map(|total| total.to_string())}
                />
                <StatCard
                    title="Users"
                    icon={IconId::HeroiconsOutlineUser}
                    visible={caps.users}
                    value={users_total.map(|total| total.to_string())}
                />
                <StatCard
                    title="Today"
                    icon={IconId::HeroiconsOutlineClock}
                    visible={caps.stats}
                    value={(*today_stats).as_ref().map(|stats| format!("{} entries", stats.total))}
                    sub={(*today_stats).as_ref().map(|stats| format!(
                        "{} pending · {} approved · {} rejected",
                        stats.pending, stats.approved, stats.rejected
                    ))}
                />
                <StatCard
                    title="This week"
                    icon={IconId::HeroiconsOutlineCalendar}
                    visible={caps.stats}
                    value={Some(hours(week_sum.hours.total()))}
                    sub={Some(breakdown(&week_sum.hours))}
                />
            </div>

            if caps.stats {
                <div class="card bg-base-200">
                    <div class="card-body">
                        <h3 class="card-title text-base">{"Week by day"}</h3>
                        <div class="overflow-x-auto">
                            <table class="table table-sm">
                                <thead>
                                    <tr>
                                        <th>{"Date"}</th><th>{"Total"}</th><th>{"Pending"}</th>
                                        <th>{"Approved"}</th><th>{"Rejected"}</th><th>{"Hours"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for week_by_day.iter().map(|(date, stats)| html! {
                                        <tr key={date.clone()}>
                                            <td>{ date }</td>
                                            <td>{ stats.total }</td>
                                            <td>{ stats.pending }</td>
                                            <td>{ stats.approved }</td>
                                            <td>{ stats.rejected }</td>
                                            <td>{ hours(stats.hours.total()) }</td>
                                        </tr>
                                    }) }
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            }

            <div class="card bg-base-200">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title text-base">{"Recent activity"}</h3>
                        if caps.audit {
                            <Link<Route> to={Route::Audit} classes="link link-primary text-sm">{"View all"}</Link<Route>>
                        }
                    </div>
                    if !caps.audit {
                        <div class="text-sm opacity-60">{"No permission"}</div>
                    } else if audit_rows.is_empty() {
                        <div class="text-sm opacity-60">{"No recent activity"}</div>
                    } else {
                        <ul class="divide-y divide-base-300">
                            { for audit_rows.iter().map(|row| html! {
                                <li key={row.id.clone()} class="py-2 flex justify-between text-sm">
                                    <span>
                                        <span class="font-semibold">{ &row.action }</span>
                                        { format!(" · {}", row.entity_type) }
                                    </span>
                                    <span class="opacity-70">{ format!("{} · {}", row.actor_label(), row.created_at) }</span>
                                </li>
                            }) }
                        </ul>
                    }
                </div>
            </div>
        </div>
    }
}
