use crate::api::{self, spawn_mutation};
use crate::components::{Modal, loading::Spinner};
use crate::forms::{bind_checkbox, bind_input, confirm};
use crate::models::app_state::AppState;
use crate::models::toast::{ToastState, failure};
use client::gate::ReasonCapabilities;
use shared::models::{CreateReasonRequest, DecisionReason, ReasonType, UpdateReasonRequest};
use strum::IntoEnumIterator;
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

/// Sort order typed into the form; anything unparsable counts as 0.
fn parse_sort(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

fn ordered(mut reasons: Vec<DecisionReason>) -> Vec<DecisionReason> {
    reasons.sort_by(|a, b| a.sort.cmp(&b.sort).then_with(|| a.label.cmp(&b.label)));
    reasons
}

#[derive(Clone, PartialEq)]
struct Editor {
    target: Option<DecisionReason>,
    reason_type: ReasonType,
}

#[function_component(DecisionReasonsPage)]
pub fn decision_reasons_page() -> Html {
    let caps = *use_selector(|state: &AppState| ReasonCapabilities::of(&state.session));
    let toasts = use_dispatch::<ToastState>();
    let tab = use_state(|| ReasonType::Approve);
    let active_only = use_state(|| false);
    let reload = use_state(|| 0_u32);
    let reasons = use_state(Vec::<DecisionReason>::new);
    let loading = use_state(|| false);

    let editor = use_state(|| None::<Editor>);
    let label = use_state(String::new);
    let sort = use_state(String::new);
    let active = use_state(|| true);

    {
        let reasons = reasons.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        use_effect_with((*tab, *active_only, *reload), move |(tab, active_only, _)| {
            let (reason_type, active_only) = (*tab, *active_only);
            loading.set(true);
            api::spawn_call(
                move |client| async move { client.list_reasons(reason_type, active_only).await },
                move |result| {
                    match result {
                        Ok(items) => reasons.set(ordered(items)),
                        Err(err) => failure(&toasts, &err),
                    }
                    loading.set(false);
                },
            );
            || ()
        });
    }

    let bump = {
        let reload = reload.clone();
        move || reload.set(*reload + 1)
    };

    let open = {
        let editor = editor.clone();
        let label = label.clone();
        let sort = sort.clone();
        let active = active.clone();
        let tab = tab.clone();
        Callback::from(move |target: Option<DecisionReason>| {
            label.set(target.as_ref().map(|r| r.label.clone()).unwrap_or_default());
            sort.set(target.as_ref().map_or(0, |r| r.sort).to_string());
            active.set(target.as_ref().is_none_or(|r| r.active));
            let reason_type = target.as_ref().map_or(*tab, |r| r.reason_type);
            editor.set(Some(Editor { target, reason_type }));
        })
    };
    let close = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(None))
    };

    let on_type = {
        let editor = editor.clone();
        Callback::from(move |event: Event| {
            let value = crate::forms::target_value(event.target()).unwrap_or_default();
            if let (Some(mut current), Ok(reason_type)) = ((*editor).clone(), value.parse::<ReasonType>()) {
                current.reason_type = reason_type;
                editor.set(Some(current));
            }
        })
    };

    let on_save = {
        let editor = editor.clone();
        let label = label.clone();
        let sort = sort.clone();
        let active = active.clone();
        let toasts = toasts.clone();
        let bump = bump.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(current) = (*editor).clone() else {
                return;
            };
            let done = {
                let editor = editor.clone();
                let bump = bump.clone();
                move || {
                    editor.set(None);
                    bump();
                }
            };
            match current.target {
                Some(reason) => {
                    let request = UpdateReasonRequest {
                        label: Some((*label).trim().to_string()),
                        active: Some(*active),
                        sort: Some(parse_sort(&sort)),
                    };
                    spawn_mutation(
                        &toasts,
                        move |client| async move { client.update_reason(&reason.id, &request).await },
                        "Updated",
                        done,
                    );
                }
                None => {
                    let request = CreateReasonRequest {
                        reason_type: current.reason_type,
                        label: (*label).trim().to_string(),
                        active: *active,
                        sort: parse_sort(&sort),
                    };
                    spawn_mutation(
                        &toasts,
                        move |client| async move { client.create_reason(&request).await },
                        "Created",
                        done,
                    );
                }
            }
        })
    };

    let on_toggle = {
        let toasts = toasts.clone();
        let bump = bump.clone();
        Callback::from(move |reason: DecisionReason| {
            spawn_mutation(
                &toasts,
                move |client| async move { client.toggle_reason(&reason).await },
                "Updated",
                bump.clone(),
            );
        })
    };

    let on_delete = {
        let toasts = toasts.clone();
        Callback::from(move |reason: DecisionReason| {
            if !confirm(&format!("Delete reason: \"{}\" ?", reason.label)) {
                return;
            }
            spawn_mutation(
                &toasts,
                move |client| async move { client.delete_reason(&reason.id).await },
                "Deleted",
                bump.clone(),
            );
        })
    };

    let current = (*editor).clone();

    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center gap-3">
                <div role="tablist" class="tabs tabs-boxed">
                    { for ReasonType::iter().map(|reason_type| {
                        let tab_handle = tab.clone();
                        html! {
                            <a role="tab"
                                class={classes!("tab", (*tab == reason_type).then_some("tab-active"))}
                                onclick={Callback::from(move |_: MouseEvent| tab_handle.set(reason_type))}>
                                { reason_type.label() }
                            </a>
                        }
                    }) }
                </div>
                <label class="label cursor-pointer gap-2">
                    <input type="checkbox" class="checkbox checkbox-sm"
                        checked={*active_only} onchange={bind_checkbox(&active_only)} />
                    <span class="label-text">{"Active only"}</span>
                </label>
                if *loading { <Spinner /> }
                <div class="flex-grow"></div>
                if caps.create {
                    <button class="btn btn-primary btn-sm" onclick={open.reform(|_: MouseEvent| None)}>{"Add Reason"}</button>
                }
            </div>

            <div class="overflow-x-auto">
                <table class="table table-zebra table-sm">
                    <thead>
                        <tr><th>{"Label"}</th><th>{"Sort"}</th><th>{"Status"}</th><th class="text-right">{"Actions"}</th></tr>
                    </thead>
                    <tbody>
                        if reasons.is_empty() && !*loading {
                            <tr><td colspan="4" class="text-center opacity-60">{"No reasons yet"}</td></tr>
                        }
                        { for reasons.iter().map(|reason| {
                            let edit = {
                                let reason = reason.clone();
                                open.reform(move |_: MouseEvent| Some(reason.clone()))
                            };
                            let toggle = {
                                let reason = reason.clone();
                                on_toggle.reform(move |_: MouseEvent| reason.clone())
                            };
                            let delete = {
                                let reason = reason.clone();
                                on_delete.reform(move |_: MouseEvent| reason.clone())
                            };
                            html! {
                                <tr key={reason.id.clone()}>
                                    <td>{ &reason.label }</td>
                                    <td>{ reason.sort }</td>
                                    <td>
                                        if reason.active {
                                            <span class="badge badge-success badge-sm">{"Active"}</span>
                                        } else {
                                            <span class="badge badge-ghost badge-sm">{"Inactive"}</span>
                                        }
                                    </td>
                                    <td class="text-right space-x-1">
                                        if caps.update {
                                            <button class="btn btn-xs" onclick={edit}>{"Edit"}</button>
                                            <button class="btn btn-xs" title="Enable/Disable" onclick={toggle}>
                                                { if reason.active { "Disable" } else { "Enable" } }
                                            </button>
                                        }
                                        if caps.delete {
                                            <button class="btn btn-xs btn-error" onclick={delete}>{"Delete"}</button>
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </div>

            if let Some(current) = current {
                <Modal
                    title={if current.target.is_some() { "Edit Reason" } else { "Add Reason" }}
                    on_close={close.clone()}
                >
                    <form class="space-y-3" onsubmit={on_save}>
                        <select class="select select-bordered w-full" disabled={current.target.is_some()} onchange={on_type}>
                            { for ReasonType::iter().map(|reason_type| html! {
                                <option value={reason_type.to_string()} selected={reason_type == current.reason_type}>
                                    { if reason_type == ReasonType::Approve { "Approve" } else { "Reject" } }
                                </option>
                            }) }
                        </select>
                        <input class="input input-bordered w-full" placeholder="e.g. Approved by supervisor"
                            value={(*label).clone()} oninput={bind_input(&label)} />
                        <input class="input input-bordered w-full" type="number" placeholder="Sort (lower first)"
                            value={(*sort).clone()} oninput={bind_input(&sort)} />
                        <label class="label cursor-pointer justify-start gap-2">
                            <input type="checkbox" class="toggle toggle-sm"
                                checked={*active} onchange={bind_checkbox(&active)} />
                            <span class="label-text">{"Active"}</span>
                        </label>
                        <div class="modal-action">
                            <button type="button" class="btn" onclick={close.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                            <button type="submit" class="btn btn-primary">{"Save"}</button>
                        </div>
                    </form>
                </Modal>
            }
        </div>
    }
}
