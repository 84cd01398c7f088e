use crate::api::{self, use_generation};
use crate::components::{fingerprint_panel::FingerprintPanel, loading::Spinner};
use crate::forms::on_value;
use crate::models::toast::{ToastState, error, failure, success};
use client::api::OtLogQuery;
use client::calendar::{
    anchor_input_value, format_day, minutes_to_hours, normalize_anchor, shift_anchor, today,
    week_label,
};
use shared::models::{Employee, LogView, OtEntry, OtStatus, OtSummaryRow, ReportScope};
use strum::IntoEnumIterator;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_dispatch;

/// Minutes worked and minutes approved across `rows`.
fn record_totals(rows: &[OtEntry]) -> (u32, u32) {
    rows.iter().fold((0, 0), |(worked, approved), row| {
        (
            worked + row.total_minutes(),
            approved + row.approved_total_minutes.unwrap_or(0),
        )
    })
}

fn summary_totals(rows: &[OtSummaryRow]) -> (u32, u32) {
    rows.iter().fold((0, 0), |(worked, approved), row| {
        (worked + row.total_minutes(), approved + row.approved_total_minutes)
    })
}

fn status_badge(status: OtStatus) -> &'static str {
    match status {
        OtStatus::Pending => "badge-warning",
        OtStatus::Approved => "badge-success",
        OtStatus::Rejected => "badge-error",
    }
}

fn scope_label(scope: ReportScope) -> &'static str {
    match scope {
        ReportScope::Daily => "Daily",
        ReportScope::Weekly => "Weekly",
        ReportScope::Monthly => "Monthly",
        ReportScope::Yearly => "Yearly",
    }
}

fn input_type(scope: ReportScope) -> &'static str {
    match scope {
        ReportScope::Daily | ReportScope::Weekly => "date",
        ReportScope::Monthly => "month",
        ReportScope::Yearly => "number",
    }
}

#[function_component(OtLogsPage)]
pub fn ot_logs_page() -> Html {
    let toasts = use_dispatch::<ToastState>();
    let generation = use_generation();

    let employees = use_state(Vec::<Employee>::new);
    let scope = use_state(ReportScope::default);
    let view = use_state(LogView::default);
    let anchor = use_state(today);
    let employee_id = use_state(String::new);
    let status = use_state(|| None::<OtStatus>);
    let reload = use_state(|| 0_u32);

    let records = use_state(Vec::<OtEntry>::new);
    let summary = use_state(Vec::<OtSummaryRow>::new);
    let loading = use_state(|| false);
    let exporting = use_state(|| false);

    let query = OtLogQuery {
        scope: *scope,
        anchor: *anchor,
        employee_id: (!employee_id.is_empty()).then(|| (*employee_id).clone()),
        status: *status,
    };

    {
        let employees = employees.clone();
        let toasts = toasts.clone();
        use_effect_with((), move |_| {
            api::spawn_call(
                |client| async move { client.employee_lookup().await },
                move |result| match result {
                    Ok(items) => employees.set(items),
                    Err(err) => failure(&toasts, &err),
                },
            );
            || ()
        });
    }

    {
        let records = records.clone();
        let summary = summary.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        use_effect_with((query.clone(), *view, *reload), move |(query, view, _)| {
            let (query, view) = (query.clone(), *view);
            let ticket = generation.begin();
            loading.set(true);
            let done = move |result: Result<(), client::ClientError>| {
                if generation.is_current(ticket) {
                    if let Err(err) = result {
                        failure(&toasts, &err);
                    }
                    loading.set(false);
                }
            };
            match view {
                LogView::Records => api::spawn_call(
                    move |client| async move { client.ot_log_records(&query).await },
                    move |result| done(result.map(|rows| records.set(rows))),
                ),
                LogView::Summary => api::spawn_call(
                    move |client| async move { client.ot_log_summary(&query).await },
                    move |result| done(result.map(|rows| summary.set(rows))),
                ),
            }
            || ()
        });
    }

    let on_scope = {
        let scope = scope.clone();
        let anchor = anchor.clone();
        on_value(move |value| {
            if let Ok(next) = value.parse::<ReportScope>() {
                let now = today();
                scope.set(next);
                anchor.set(normalize_anchor(next, &format_day(now), now));
            }
        })
    };

    let on_anchor = {
        let scope = *scope;
        let anchor = anchor.clone();
        on_value(move |value| anchor.set(normalize_anchor(scope, &value, today())))
    };

    let step = |steps: i32| {
        let scope = *scope;
        let anchor = anchor.clone();
        Callback::from(move |_: MouseEvent| anchor.set(shift_anchor(scope, *anchor, steps)))
    };

    let on_employee = {
        let employee_id = employee_id.clone();
        on_value(move |value| employee_id.set(value))
    };

    let on_status = {
        let status = status.clone();
        on_value(move |value| status.set(value.parse::<OtStatus>().ok()))
    };

    let set_view = |next: LogView| {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.set(next))
    };

    let refresh = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.set(*reload + 1))
    };

    let on_export = {
        let query = query.clone();
        let view = *view;
        let exporting = exporting.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            let query = query.clone();
            let exporting = exporting.clone();
            let toasts = toasts.clone();
            exporting.set(true);
            api::spawn_call(
                move |client| async move { client.export_ot_logs(&query, view).await },
                move |result| {
                    match result {
                        Ok(download) => match api::save(&download) {
                            Ok(()) => success(&toasts, format!("Downloaded {}", download.file_name)),
                            Err(message) => error(&toasts, message),
                        },
                        Err(err) => failure(&toasts, &err),
                    }
                    exporting.set(false);
                },
            );
        })
    };

    let (worked, approved) = match *view {
        LogView::Records => record_totals(&records),
        LogView::Summary => summary_totals(&summary),
    };
    let row_count = match *view {
        LogView::Records => records.len(),
        LogView::Summary => summary.len(),
    };

    html! {
        <div class="space-y-4">
            <div class="card bg-base-200">
                <div class="card-body gap-3">
                    <div class="flex flex-wrap items-end gap-3">
                        <select class="select select-bordered select-sm" onchange={on_scope}>
                            { for ReportScope::iter().map(|option| html! {
                                <option value={option.to_string()} selected={option == *scope}>{ scope_label(option) }</option>
                            }) }
                        </select>
                        <div class="join">
                            <button class="btn btn-sm join-item" title="Previous" onclick={step(-1)}>
                                <Icon icon_id={IconId::HeroiconsOutlineChevronLeft} class="w-4 h-4" />
                            </button>
                            <input class="input input-bordered input-sm join-item"
                                type={input_type(*scope)}
                                value={anchor_input_value(*scope, *anchor)}
                                onchange={on_anchor} />
                            <button class="btn btn-sm join-item" title="Next" onclick={step(1)}>
                                <Icon icon_id={IconId::HeroiconsOutlineChevronRight} class="w-4 h-4" />
                            </button>
                        </div>
                        if *scope == ReportScope::Weekly {
                            <span class="text-sm opacity-70">{ format!("Week: {}", week_label(*anchor)) }</span>
                        }
                        <select class="select select-bordered select-sm" onchange={on_employee}>
                            <option value="" selected={employee_id.is_empty()}>{"All employees"}</option>
                            { for employees.iter().map(|employee| html! {
                                <option key={employee.id.clone()} value={employee.id.clone()}
                                    selected={*employee_id == employee.id}>
                                    { format!("{} - {}", employee.emp_id, employee.name) }
                                </option>
                            }) }
                        </select>
                        <select class="select select-bordered select-sm" onchange={on_status}>
                            <option value="" selected={status.is_none()}>{"All status"}</option>
                            { for OtStatus::iter().map(|option| html! {
                                <option value={option.to_string()} selected={*status == Some(option)}>{ option.to_string() }</option>
                            }) }
                        </select>
                    </div>
                    <div class="flex flex-wrap items-center gap-3">
                        <div class="join">
                            <button class={classes!("btn", "btn-sm", "join-item", (*view == LogView::Records).then_some("btn-active"))}
                                onclick={set_view(LogView::Records)}>{"Records"}</button>
                            <button class={classes!("btn", "btn-sm", "join-item", (*view == LogView::Summary).then_some("btn-active"))}
                                onclick={set_view(LogView::Summary)}>{"Summary"}</button>
                        </div>
                        <button class="btn btn-sm" onclick={refresh}>{"Refresh"}</button>
                        <button class="btn btn-sm" disabled={*exporting} onclick={on_export}>
                            if *exporting { <Spinner /> }
                            {"Export Excel"}
                        </button>
                        if *loading { <Spinner /> }
                        <div class="flex-grow"></div>
                        <div class="text-sm">
                            { format!("{row_count} rows · OT {}h · approved {}h", minutes_to_hours(worked), minutes_to_hours(approved)) }
                        </div>
                    </div>
                </div>
            </div>

            <div class="overflow-x-auto">
                if *view == LogView::Records {
                    <table class="table table-zebra table-sm">
                        <thead>
                            <tr>
                                <th>{"Date"}</th><th>{"Employee"}</th><th>{"Shift"}</th><th>{"In"}</th><th>{"Out"}</th>
                                <th>{"Normal"}</th><th>{"Double"}</th><th>{"Triple"}</th><th>{"Approved"}</th><th>{"Status"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            if records.is_empty() && !*loading {
                                <tr><td colspan="10" class="text-center opacity-60">{"No records for this period"}</td></tr>
                            }
                            { for records.iter().map(|row| html! {
                                <tr key={row.id.clone()}>
                                    <td>{ row.work_date.get(..10).unwrap_or(row.work_date.as_str()) }</td>
                                    <td>{ row.employee.label() }</td>
                                    <td>{ row.shift.label() }</td>
                                    <td>{ &row.in_time }</td>
                                    <td>{ &row.out_time }</td>
                                    <td>{ minutes_to_hours(row.normal_minutes) }</td>
                                    <td>{ minutes_to_hours(row.double_minutes) }</td>
                                    <td>{ minutes_to_hours(row.triple_minutes) }</td>
                                    <td>{ row.approved_total_minutes.map_or_else(|| "-".to_string(), minutes_to_hours) }</td>
                                    <td><span class={classes!("badge", "badge-sm", status_badge(row.status))}>{ row.status.to_string() }</span></td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                } else {
                    <table class="table table-zebra table-sm">
                        <thead>
                            <tr>
                                <th>{"Group"}</th><th>{"Entries"}</th><th>{"Normal"}</th><th>{"Double"}</th>
                                <th>{"Triple"}</th><th>{"Total"}</th><th>{"Approved"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            if summary.is_empty() && !*loading {
                                <tr><td colspan="7" class="text-center opacity-60">{"No records for this period"}</td></tr>
                            }
                            { for summary.iter().map(|row| html! {
                                <tr>
                                    <td>{ row.key_label() }</td>
                                    <td>{ row.count }</td>
                                    <td>{ minutes_to_hours(row.normal_minutes) }</td>
                                    <td>{ minutes_to_hours(row.double_minutes) }</td>
                                    <td>{ minutes_to_hours(row.triple_minutes) }</td>
                                    <td>{ minutes_to_hours(row.total_minutes()) }</td>
                                    <td>{ minutes_to_hours(row.approved_total_minutes) }</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                }
            </div>

            <FingerprintPanel />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn summary_totals_add_every_rate() {
        let rows: Vec<OtSummaryRow> = serde_json::from_str(
            r#"[{"_id":"E1","count":1,"normalMinutes":60,"doubleMinutes":30,"approvedTotalMinutes":90},
                {"_id":"E2","count":2,"tripleMinutes":45}]"#,
        )
        .unwrap();
        assert_eq!(summary_totals(&rows), (135, 90));
    }

    #[wasm_bindgen_test]
    fn pickers_follow_scope() {
        assert_eq!(input_type(ReportScope::Weekly), "date");
        assert_eq!(input_type(ReportScope::Monthly), "month");
        assert_eq!(input_type(ReportScope::Yearly), "number");
    }
}
