use std::rc::Rc;

use crate::api::{self, spawn_mutation, use_generation};
use crate::components::{Modal, loading::Spinner};
use crate::forms::{bind_input, on_value, optional, target_value};
use crate::models::app_state::AppState;
use crate::models::toast::{ToastState, failure, success};
use chrono::{NaiveDate, TimeDelta};
use client::api::{AuditQuery, OtQuery};
use client::calendar::{
    format_day, minutes_to_human, parse_day, today, week_dates, week_label, week_start_monday,
};
use client::gate::OtCapabilities;
use shared::models::{
    ApproveOtRequest, AuditEntry, BulkOtRow, DayStats, DecisionReason, Employee, OtEntry,
    OtStatus, ReasonType, Shift, UpdateOtRequest,
};
use strum::IntoEnumIterator;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::{use_dispatch, use_selector};

/// Free text wins over the picked preset; both may be blank.
fn final_reason(text: &str, picked: &str, presets: &[DecisionReason]) -> String {
    let typed = text.trim();
    if !typed.is_empty() {
        return typed.to_string();
    }
    presets
        .iter()
        .find(|preset| preset.id == picked)
        .map(|preset| preset.label.trim().to_string())
        .unwrap_or_default()
}

fn stats_for<'a>(week: &'a [DayStats], date: &str) -> Option<&'a DayStats> {
    week.iter().find(|day| day.date.get(..10) == Some(date))
}

fn status_badge(status: OtStatus) -> &'static str {
    match status {
        OtStatus::Pending => "badge-warning",
        OtStatus::Approved => "badge-success",
        OtStatus::Rejected => "badge-error",
    }
}

fn parse_minutes(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

#[derive(Clone, PartialEq)]
enum Dialog {
    Create,
    Edit(OtEntry),
    Approve(OtEntry),
    Reject(OtEntry),
    Stats(String),
    Audit(OtEntry),
}

#[function_component(OtEntryPage)]
pub fn ot_entry_page() -> Html {
    let caps = *use_selector(|state: &AppState| OtCapabilities::of(&state.session));
    let toasts = use_dispatch::<ToastState>();
    let generation = use_generation();

    let selected = use_state(today);
    let employees = use_state(|| Rc::new(Vec::<Employee>::new()));
    let entries = use_state(Vec::<OtEntry>::new);
    let week = use_state(Vec::<DayStats>::new);
    let loading = use_state(|| false);
    let dialog = use_state(|| None::<Dialog>);
    let reload = use_state(|| 0_u32);

    let week_start = week_start_monday(*selected);

    {
        let employees = employees.clone();
        let toasts = toasts.clone();
        use_effect_with(caps.create, move |can_create| {
            if *can_create {
                api::spawn_call(
                    |client| async move { client.employee_lookup().await },
                    move |result| match result {
                        Ok(items) => employees.set(Rc::new(items)),
                        Err(err) => failure(&toasts, &err),
                    },
                );
            }
            || ()
        });
    }

    {
        let entries = entries.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        use_effect_with((*selected, *reload), move |(date, _)| {
            let query = OtQuery::day(&format_day(*date));
            let ticket = generation.begin();
            loading.set(true);
            api::spawn_call(
                move |client| async move { client.list_ot(&query).await },
                move |result| {
                    if !generation.is_current(ticket) {
                        return;
                    }
                    match result {
                        Ok(page) => entries.set(page.items),
                        Err(err) => failure(&toasts, &err),
                    }
                    loading.set(false);
                },
            );
            || ()
        });
    }

    {
        let week = week.clone();
        let toasts = toasts.clone();
        use_effect_with((week_start, caps.stats, *reload), move |(start, can_read, _)| {
            if *can_read {
                let days = week_dates(*start);
                let (from, to) = (format_day(days[0]), format_day(days[6]));
                api::spawn_call(
                    move |client| async move { client.week_stats(&from, &to).await },
                    move |result| match result {
                        Ok(items) => week.set(items),
                        Err(err) => failure(&toasts, &err),
                    },
                );
            }
            || ()
        });
    }

    let close = {
        let dialog = dialog.clone();
        Callback::from(move |()| dialog.set(None))
    };
    let finish = {
        let dialog = dialog.clone();
        let reload = reload.clone();
        Callback::from(move |()| {
            dialog.set(None);
            reload.set(*reload + 1);
        })
    };
    let open = |next: Dialog| {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Some(next.clone())))
    };

    let move_week = |days: i64| {
        let selected = selected.clone();
        Callback::from(move |_: MouseEvent| selected.set(*selected + TimeDelta::days(days)))
    };
    let pick = |date: NaiveDate| {
        let selected = selected.clone();
        Callback::from(move |_: MouseEvent| selected.set(date))
    };
    let on_date = {
        let selected = selected.clone();
        on_value(move |value| {
            if let Some(date) = parse_day(&value) {
                selected.set(date);
            }
        })
    };

    let day_cards = week_dates(week_start).into_iter().map(|date| {
        let key = format_day(date);
        let stat = stats_for(&week, &key).cloned().unwrap_or_default();
        let is_selected = date == *selected;
        html! {
            <div key={key.clone()} class={classes!("card", "card-compact", "border",
                if is_selected { "border-primary bg-primary/10" } else { "border-base-300" })}>
                <div class="card-body">
                    <button class="text-left" onclick={pick(date)}>
                        <div class="text-xs uppercase opacity-70">{ date.format("%a").to_string() }</div>
                        <div class="text-2xl font-bold">{ date.format("%-d").to_string() }</div>
                    </button>
                    if caps.stats {
                        <div class="text-xs">{ format!("Total {}", stat.total) }</div>
                        <div class="flex gap-1 text-xs">
                            <span class="badge badge-xs badge-info">{ format!("P {}", stat.pending) }</span>
                            <span class="badge badge-xs badge-success">{ format!("A {}", stat.approved) }</span>
                            <span class="badge badge-xs badge-error">{ format!("R {}", stat.rejected) }</span>
                        </div>
                        <button class="btn btn-xs btn-ghost" onclick={open(Dialog::Stats(key.clone()))}>
                            <Icon icon_id={IconId::HeroiconsOutlineChartBar} class="w-3 h-3" />
                            {"Stats"}
                        </button>
                    } else {
                        <div class="text-xs opacity-60">{"Stats (No permission)"}</div>
                    }
                </div>
            </div>
        }
    });

    let rows = entries.iter().map(|entry| {
        let pending = entry.is_pending();
        html! {
            <tr key={entry.id.clone()}>
                <td>{ entry.employee.label() }</td>
                <td>
                    { entry.shift.label() }
                    if entry.is_night { <span class="badge badge-xs badge-neutral ml-1">{"Night"}</span> }
                </td>
                <td>{ if entry.shift.requires_times() { format!("{} - {}", entry.in_time, entry.out_time) } else { "-".to_string() } }</td>
                <td>{ minutes_to_human(entry.normal_minutes) }</td>
                <td>{ minutes_to_human(entry.double_minutes) }</td>
                <td>{ minutes_to_human(entry.triple_minutes) }</td>
                <td>{ minutes_to_human(entry.approved_total_minutes.unwrap_or(0)) }</td>
                <td><span class={classes!("badge", "badge-sm", status_badge(entry.status))}>{ entry.status.to_string() }</span></td>
                <td class="text-right space-x-1">
                    if pending && caps.update {
                        <button class="btn btn-xs" onclick={open(Dialog::Edit(entry.clone()))}>{"Edit"}</button>
                    }
                    if pending && caps.approve {
                        <button class="btn btn-xs btn-success" onclick={open(Dialog::Approve(entry.clone()))}>{"Approve"}</button>
                    }
                    if pending && caps.reject {
                        <button class="btn btn-xs btn-error" onclick={open(Dialog::Reject(entry.clone()))}>{"Reject"}</button>
                    }
                    if caps.audit {
                        <button class="btn btn-xs btn-ghost" onclick={open(Dialog::Audit(entry.clone()))}>{"Audit"}</button>
                    }
                </td>
            </tr>
        }
    });

    let modal = match (*dialog).clone() {
        None => html! {},
        Some(Dialog::Create) => html! {
            <CreateDialog date={format_day(*selected)} employees={(*employees).clone()}
                on_close={close.clone()} on_done={finish.clone()} />
        },
        Some(Dialog::Edit(entry)) => html! {
            <EditDialog {entry} on_close={close.clone()} on_done={finish.clone()} />
        },
        Some(Dialog::Approve(entry)) => html! {
            <ApproveDialog {entry} on_close={close.clone()} on_done={finish.clone()} />
        },
        Some(Dialog::Reject(entry)) => html! {
            <RejectDialog {entry} on_close={close.clone()} on_done={finish.clone()} />
        },
        Some(Dialog::Stats(date)) => html! {
            <StatsDialog {date} on_close={close.clone()} />
        },
        Some(Dialog::Audit(entry)) => html! {
            <AuditDialog {entry} on_close={close.clone()} />
        },
    };

    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center gap-2">
                <div>
                    <h2 class="text-xl font-bold">{"OT Entry"}</h2>
                    <div class="text-sm opacity-70">{ week_label(*selected) }</div>
                </div>
                <div class="flex-grow"></div>
                <input class="input input-bordered input-sm" type="date"
                    value={format_day(*selected)} onchange={on_date} />
                <button class="btn btn-sm" onclick={move_week(-7)}>
                    <Icon icon_id={IconId::HeroiconsOutlineChevronLeft} class="w-4 h-4" />
                    {"Prev Week"}
                </button>
                <button class="btn btn-sm" onclick={move_week(7)}>
                    {"Next Week"}
                    <Icon icon_id={IconId::HeroiconsOutlineChevronRight} class="w-4 h-4" />
                </button>
                if caps.create {
                    <button class="btn btn-sm btn-primary" onclick={open(Dialog::Create)}>
                        <Icon icon_id={IconId::HeroiconsOutlinePlus} class="w-4 h-4" />
                        {"Add OT"}
                    </button>
                }
            </div>

            <div class="grid grid-cols-2 md:grid-cols-7 gap-2">
                { for day_cards }
            </div>

            <div class="card bg-base-100 border border-base-300">
                <div class="card-body">
                    <div class="flex items-center gap-2">
                        <h3 class="card-title text-base">{ format!("Entries for {}", format_day(*selected)) }</h3>
                        if *loading { <Spinner /> }
                    </div>
                    <div class="overflow-x-auto">
                        <table class="table table-zebra table-sm">
                            <thead>
                                <tr>
                                    <th>{"Employee"}</th><th>{"Shift"}</th><th>{"Time"}</th><th>{"Normal"}</th>
                                    <th>{"Double"}</th><th>{"Triple"}</th><th>{"Approved"}</th><th>{"Status"}</th>
                                    <th class="text-right">{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                if entries.is_empty() && !*loading {
                                    <tr><td colspan="9" class="text-center opacity-60">{"No OT entries for this day"}</td></tr>
                                }
                                { for rows }
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            { modal }
        </div>
    }
}

fn shift_options(current: Shift) -> Html {
    html! {
        { for Shift::iter().map(|shift| html! {
            <option value={shift.to_string()} selected={shift == current}>{ shift.label() }</option>
        }) }
    }
}

#[derive(Properties, PartialEq)]
struct CreateDialogProps {
    date: String,
    employees: Rc<Vec<Employee>>,
    on_close: Callback<()>,
    on_done: Callback<()>,
}

#[function_component(CreateDialog)]
fn create_dialog(props: &CreateDialogProps) -> Html {
    let toasts = use_dispatch::<ToastState>();
    let rows = use_state(|| vec![BulkOtRow::default()]);
    let saving = use_state(|| false);

    let edit = |index: usize, apply: fn(&mut BulkOtRow, String)| {
        let rows = rows.clone();
        on_value(move |value| {
            let mut next = (*rows).clone();
            if let Some(row) = next.get_mut(index) {
                apply(row, value);
            }
            rows.set(next);
        })
    };
    let edit_text = |index: usize, apply: fn(&mut BulkOtRow, String)| {
        let rows = rows.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = target_value(event.target()) {
                let mut next = (*rows).clone();
                if let Some(row) = next.get_mut(index) {
                    apply(row, value);
                }
                rows.set(next);
            }
        })
    };

    let add_row = {
        let rows = rows.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*rows).clone();
            next.push(BulkOtRow::default());
            rows.set(next);
        })
    };
    let remove_row = |index: usize| {
        let rows = rows.clone();
        Callback::from(move |_: MouseEvent| {
            if rows.len() > 1 {
                let mut next = (*rows).clone();
                next.remove(index);
                rows.set(next);
            }
        })
    };

    let on_submit = {
        let rows = rows.clone();
        let saving = saving.clone();
        let date = props.date.clone();
        let on_done = props.on_done.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (rows, date) = ((*rows).clone(), date.clone());
            let saving = saving.clone();
            let on_done = on_done.clone();
            let toasts = toasts.clone();
            saving.set(true);
            api::spawn_call(
                move |client| async move { client.create_ot_bulk(&date, &rows).await },
                move |result| {
                    saving.set(false);
                    match result {
                        Ok(outcome) => {
                            success(&toasts, outcome.summary());
                            on_done.emit(());
                        }
                        Err(err) => failure(&toasts, &err),
                    }
                },
            );
        })
    };

    html! {
        <Modal title={format!("Add OT for {}", props.date)} on_close={props.on_close.clone()}>
            <form class="space-y-3" onsubmit={on_submit}>
                { for rows.iter().enumerate().map(|(index, row)| html! {
                    <div class="grid grid-cols-12 gap-2 items-center">
                        <select class="select select-bordered select-sm col-span-4"
                            onchange={edit(index, |row, value| row.employee_id = value)}>
                            <option value="" selected={row.employee_id.is_empty()}>{"Select employee"}</option>
                            { for props.employees.iter().map(|employee| html! {
                                <option value={employee.id.clone()} selected={employee.id == row.employee_id}>
                                    { format!("{} - {}", employee.emp_id, employee.name) }
                                </option>
                            }) }
                        </select>
                        <select class="select select-bordered select-sm col-span-2"
                            onchange={edit(index, |row, value| {
                                if let Ok(shift) = value.parse::<Shift>() {
                                    row.shift = shift;
                                }
                            })}>
                            { shift_options(row.shift) }
                        </select>
                        if row.shift.requires_times() {
                            <input class="input input-bordered input-sm col-span-2" type="time"
                                value={row.in_time.clone()} onchange={edit(index, |row, value| row.in_time = value)} />
                            <input class="input input-bordered input-sm col-span-2" type="time"
                                value={row.out_time.clone()} onchange={edit(index, |row, value| row.out_time = value)} />
                        } else {
                            <div class="col-span-4 text-xs opacity-60">{"No in/out times"}</div>
                        }
                        <input class="input input-bordered input-sm col-span-1" placeholder="Reason"
                            value={row.reason.clone().unwrap_or_default()}
                            oninput={edit_text(index, |row, value| row.reason = Some(value))} />
                        <button type="button" class="btn btn-xs btn-ghost col-span-1" title="Remove row"
                            disabled={rows.len() == 1} onclick={remove_row(index)}>
                            <Icon icon_id={IconId::HeroiconsOutlineTrash} class="w-4 h-4" />
                        </button>
                    </div>
                }) }
                <button type="button" class="btn btn-sm btn-ghost" onclick={add_row}>{"+ Add row"}</button>
                <div class="modal-action">
                    <button type="button" class="btn" onclick={props.on_close.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                    <button type="submit" class="btn btn-primary" disabled={*saving}>
                        if *saving { <Spinner /> }
                        {"Save"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
struct EntryDialogProps {
    entry: OtEntry,
    on_close: Callback<()>,
    #[prop_or_default]
    on_done: Callback<()>,
}

#[function_component(EditDialog)]
fn edit_dialog(props: &EntryDialogProps) -> Html {
    let toasts = use_dispatch::<ToastState>();
    let shift = use_state(|| props.entry.shift);
    let in_time = use_state(|| props.entry.in_time.clone());
    let out_time = use_state(|| props.entry.out_time.clone());
    let reason = use_state(|| props.entry.reason.clone().unwrap_or_default());

    let on_shift = {
        let shift = shift.clone();
        on_value(move |value| {
            if let Ok(next) = value.parse::<Shift>() {
                shift.set(next);
            }
        })
    };
    let on_in = {
        let in_time = in_time.clone();
        on_value(move |value| in_time.set(value))
    };
    let on_out = {
        let out_time = out_time.clone();
        on_value(move |value| out_time.set(value))
    };

    let on_submit = {
        let id = props.entry.id.clone();
        let request = UpdateOtRequest {
            shift: *shift,
            in_time: (*in_time).clone(),
            out_time: (*out_time).clone(),
            reason: optional(&reason),
        };
        let on_done = props.on_done.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (id, request) = (id.clone(), request.clone());
            let on_done = on_done.clone();
            spawn_mutation(
                &toasts,
                move |client| async move { client.update_ot(&id, &request).await },
                "Updated",
                move || on_done.emit(()),
            );
        })
    };

    html! {
        <Modal title={format!("Edit OT · {}", props.entry.employee.label())} on_close={props.on_close.clone()}>
            <form class="space-y-3" onsubmit={on_submit}>
                <select class="select select-bordered w-full" onchange={on_shift}>{ shift_options(*shift) }</select>
                if shift.requires_times() {
                    <div class="grid grid-cols-2 gap-2">
                        <input class="input input-bordered" type="time" value={(*in_time).clone()} onchange={on_in} />
                        <input class="input input-bordered" type="time" value={(*out_time).clone()} onchange={on_out} />
                    </div>
                }
                <input class="input input-bordered w-full" placeholder="Reason (optional)"
                    value={(*reason).clone()} oninput={bind_input(&reason)} />
                <div class="modal-action">
                    <button type="button" class="btn" onclick={props.on_close.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                    <button type="submit" class="btn btn-primary">{"Update"}</button>
                </div>
            </form>
        </Modal>
    }
}

/// Active presets of `reason_type`. A failed load leaves only free text.
#[hook]
fn use_presets(reason_type: ReasonType) -> UseStateHandle<Vec<DecisionReason>> {
    let presets = use_state(Vec::<DecisionReason>::new);
    {
        let presets = presets.clone();
        use_effect_with(reason_type, move |reason_type| {
            let reason_type = *reason_type;
            api::spawn_call(
                move |client| async move { client.list_reasons(reason_type, true).await },
                move |result| match result {
                    Ok(items) => presets.set(items),
                    Err(err) => tracing::warn!(error = %err, "failed to load reason presets"),
                },
            );
            || ()
        });
    }
    presets
}

fn preset_select(presets: &[DecisionReason], picked: &UseStateHandle<String>) -> Html {
    let on_pick = {
        let picked = picked.clone();
        on_value(move |value| picked.set(value))
    };
    html! {
        <select class="select select-bordered w-full" onchange={on_pick}>
            <option value="" selected={picked.is_empty()}>{"Select a reason"}</option>
            { for presets.iter().map(|preset| html! {
                <option value={preset.id.clone()} selected={**picked == preset.id}>{ &preset.label }</option>
            }) }
        </select>
    }
}

#[function_component(ApproveDialog)]
fn approve_dialog(props: &EntryDialogProps) -> Html {
    let toasts = use_dispatch::<ToastState>();
    let presets = use_presets(ReasonType::Approve);
    let picked = use_state(String::new);
    let text = use_state(String::new);
    let normal = use_state(|| props.entry.normal_minutes.to_string());
    let double = use_state(|| props.entry.double_minutes.to_string());
    let triple = use_state(|| props.entry.triple_minutes.to_string());

    let on_submit = {
        let id = props.entry.id.clone();
        let request = ApproveOtRequest {
            reason: optional(&final_reason(&text, &picked, &presets)),
            approved_normal_minutes: parse_minutes(&normal),
            approved_double_minutes: parse_minutes(&double),
            approved_triple_minutes: parse_minutes(&triple),
        };
        let on_done = props.on_done.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (id, request) = (id.clone(), request.clone());
            let on_done = on_done.clone();
            spawn_mutation(
                &toasts,
                move |client| async move { client.approve_ot(&id, &request).await },
                "Approved",
                move || on_done.emit(()),
            );
        })
    };

    let minutes_field = |label: &'static str, handle: &UseStateHandle<String>| {
        html! {
            <label class="form-control">
                <span class="label-text">{ label }</span>
                <input class="input input-bordered" type="number" min="0"
                    value={(**handle).clone()} oninput={bind_input(handle)} />
            </label>
        }
    };

    html! {
        <Modal title={format!("Approve OT · {}", props.entry.employee.label())} on_close={props.on_close.clone()}>
            <form class="space-y-3" onsubmit={on_submit}>
                <div class="grid grid-cols-3 gap-2">
                    { minutes_field("Normal minutes", &normal) }
                    { minutes_field("Double minutes", &double) }
                    { minutes_field("Triple minutes", &triple) }
                </div>
                { preset_select(&presets, &picked) }
                <input class="input input-bordered w-full" placeholder="Or type a reason"
                    value={(*text).clone()} oninput={bind_input(&text)} />
                <div class="modal-action">
                    <button type="button" class="btn" onclick={props.on_close.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                    <button type="submit" class="btn btn-success">{"Approve"}</button>
                </div>
            </form>
        </Modal>
    }
}

#[function_component(RejectDialog)]
fn reject_dialog(props: &EntryDialogProps) -> Html {
    let toasts = use_dispatch::<ToastState>();
    let presets = use_presets(ReasonType::Reject);
    let picked = use_state(String::new);
    let text = use_state(String::new);

    let on_submit = {
        let id = props.entry.id.clone();
        let reason = final_reason(&text, &picked, &presets);
        let on_done = props.on_done.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (id, reason) = (id.clone(), reason.clone());
            let on_done = on_done.clone();
            spawn_mutation(
                &toasts,
                move |client| async move { client.reject_ot(&id, &reason).await },
                "Rejected",
                move || on_done.emit(()),
            );
        })
    };

    html! {
        <Modal title={format!("Reject OT · {}", props.entry.employee.label())} on_close={props.on_close.clone()}>
            <form class="space-y-3" onsubmit={on_submit}>
                { preset_select(&presets, &picked) }
                <input class="input input-bordered w-full" placeholder="Or type a reason (optional)"
                    value={(*text).clone()} oninput={bind_input(&text)} />
                <div class="modal-action">
                    <button type="button" class="btn" onclick={props.on_close.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                    <button type="submit" class="btn btn-error">{"Reject"}</button>
                </div>
            </form>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
struct StatsDialogProps {
    date: String,
    on_close: Callback<()>,
}

#[function_component(StatsDialog)]
fn stats_dialog(props: &StatsDialogProps) -> Html {
    let toasts = use_dispatch::<ToastState>();
    let stats = use_state(|| None::<DayStats>);
    {
        let stats = stats.clone();
        use_effect_with(props.date.clone(), move |date| {
            let date = date.clone();
            api::spawn_call(
                move |client| async move { client.day_stats(&date).await },
                move |result| match result {
                    Ok(body) => stats.set(Some(body)),
                    Err(err) => failure(&toasts, &err),
                },
            );
            || ()
        });
    }

    html! {
        <Modal title={format!("Stats · {}", props.date)} on_close={props.on_close.clone()}>
            if let Some(stats) = (*stats).as_ref() {
                <div class="stats stats-vertical md:stats-horizontal w-full">
                    <div class="stat"><div class="stat-title">{"Total"}</div><div class="stat-value">{ stats.total }</div></div>
                    <div class="stat"><div class="stat-title">{"Pending"}</div><div class="stat-value">{ stats.pending }</div></div>
                    <div class="stat"><div class="stat-title">{"Approved"}</div><div class="stat-value">{ stats.approved }</div></div>
                    <div class="stat"><div class="stat-title">{"Rejected"}</div><div class="stat-value">{ stats.rejected }</div></div>
                </div>
                <div class="mt-3 text-sm">
                    { format!(
                        "Hours: normal {:.1} · double {:.1} · triple {:.1} · total {:.1}",
                        stats.hours.normal, stats.hours.double, stats.hours.triple, stats.hours.total()
                    ) }
                </div>
            } else {
                <Spinner />
            }
        </Modal>
    }
}

#[function_component(AuditDialog)]
fn audit_dialog(props: &EntryDialogProps) -> Html {
    let toasts = use_dispatch::<ToastState>();
    let rows = use_state(|| None::<Vec<AuditEntry>>);
    {
        let rows = rows.clone();
        use_effect_with(props.entry.id.clone(), move |id| {
            let query = AuditQuery::for_entity(id);
            api::spawn_call(
                move |client| async move { client.list_audit(&query).await },
                move |result| match result {
                    Ok(page) => rows.set(Some(page.items)),
                    Err(err) => {
                        failure(&toasts, &err);
                        rows.set(Some(Vec::new()));
                    }
                },
            );
            || ()
        });
    }

    let body = match (*rows).as_ref() {
        None => html! { <Spinner /> },
        Some(rows) if rows.is_empty() => html! { <div class="opacity-60">{"No audit entries"}</div> },
        Some(rows) => html! {
            <ul class="space-y-2 max-h-96 overflow-y-auto">
                { for rows.iter().map(|row| html! {
                    <li key={row.id.clone()} class="border-b border-base-300 pb-2">
                        <div class="flex justify-between text-sm">
                            <span class="font-semibold">{ &row.action }</span>
                            <span class="opacity-60">{ &row.created_at }</span>
                        </div>
                        <div class="text-xs opacity-70">{ row.actor_label() }</div>
                    </li>
                }) }
            </ul>
        },
    };

    html! {
        <Modal title={format!("Audit · {}", props.entry.employee.label())} on_close={props.on_close.clone()}>
            { body }
        </Modal>
    }
}
