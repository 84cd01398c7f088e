use crate::api::{self, spawn_mutation, use_generation};
use crate::components::{Modal, Pagination, loading::Spinner};
use crate::forms::{bind_checkbox, bind_input, confirm, optional};
use crate::models::app_state::AppState;
use crate::models::toast::{ToastState, error, failure};
use client::api::EmployeeQuery;
use client::gate::EmployeeCapabilities;
use shared::models::{CreateEmployeeRequest, Employee, Page, UpdateEmployeeRequest};
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

const PAGE_SIZE: u32 = 20;

/// Create (`None`) or edit (`Some`) dialog state.
#[derive(Clone, PartialEq)]
struct Editor {
    target: Option<Employee>,
}

#[function_component(EmployeesPage)]
pub fn employees_page() -> Html {
    let caps = *use_selector(|state: &AppState| EmployeeCapabilities::of(&state.session));
    let toasts = use_dispatch::<ToastState>();
    let generation = use_generation();

    let search = use_state(String::new);
    let include_deleted = use_state(|| false);
    let page = use_state(|| 1_u32);
    let reload = use_state(|| 0_u32);
    let data = use_state(Page::<Employee>::default);
    let loading = use_state(|| false);

    let editor = use_state(|| None::<Editor>);
    let emp_id = use_state(String::new);
    let name = use_state(String::new);
    let email = use_state(String::new);

    {
        let data = data.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        let generation = generation.clone();
        let deps = ((*search).clone(), *include_deleted, *page, *reload);
        use_effect_with(deps, move |(search, include_deleted, page, _)| {
            let query = EmployeeQuery {
                page: *page,
                limit: PAGE_SIZE,
                search: optional(search),
                include_deleted: *include_deleted,
            };
            let ticket = generation.begin();
            loading.set(true);
            api::spawn_call(
                move |client| async move { client.list_employees(&query).await },
                move |result| {
                    if !generation.is_current(ticket) {
                        return;
                    }
                    match result {
                        Ok(body) => data.set(body),
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

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = crate::forms::target_value(event.target()) {
                search.set(value);
                page.set(1);
            }
        })
    };

    let open_editor = {
        let editor = editor.clone();
        let emp_id = emp_id.clone();
        let name = name.clone();
        let email = email.clone();
        let toasts = toasts.clone();
        Callback::from(move |target: Option<Employee>| {
            if target.as_ref().is_some_and(|employee| employee.is_deleted) {
                error(&toasts, "This employee is deleted. Restore first.");
                return;
            }
            emp_id.set(target.as_ref().map(|e| e.emp_id.clone()).unwrap_or_default());
            name.set(target.as_ref().map(|e| e.name.clone()).unwrap_or_default());
            email.set(target.as_ref().and_then(|e| e.email.clone()).unwrap_or_default());
            editor.set(Some(Editor { target }));
        })
    };

    let close_editor = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(None))
    };

    let on_save = {
        let editor = editor.clone();
        let emp_id = emp_id.clone();
        let name = name.clone();
        let email = email.clone();
        let toasts = toasts.clone();
        let bump = bump.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(current) = (*editor).clone() else {
                return;
            };
            let editor = editor.clone();
            let bump = bump.clone();
            let done = move || {
                editor.set(None);
                bump();
            };
            match current.target {
                Some(employee) => {
                    let request = UpdateEmployeeRequest {
                        name: (*name).trim().to_string(),
                        email: optional(&email),
                    };
                    spawn_mutation(
                        &toasts,
                        move |client| async move { client.update_employee(&employee.id, &request).await },
                        "Saved",
                        done,
                    );
                }
                None => {
                    let request = CreateEmployeeRequest {
                        emp_id: (*emp_id).trim().to_string(),
                        name: (*name).trim().to_string(),
                        email: optional(&email),
                    };
                    spawn_mutation(
                        &toasts,
                        move |client| async move { client.create_employee(&request).await },
                        "Saved",
                        done,
                    );
                }
            }
        })
    };

    let on_delete = {
        let toasts = toasts.clone();
        let bump = bump.clone();
        Callback::from(move |employee: Employee| {
            if !confirm(&format!("Delete employee {}? (safe delete)", employee.emp_id)) {
                return;
            }
            spawn_mutation(
                &toasts,
                move |client| async move { client.delete_employee(&employee.id).await },
                "Deleted",
                bump.clone(),
            );
        })
    };

    let on_restore = {
        let toasts = toasts.clone();
        Callback::from(move |employee: Employee| {
            spawn_mutation(
                &toasts,
                move |client| async move { client.restore_employee(&employee.id).await },
                "Restored",
                bump.clone(),
            );
        })
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let editing = (*editor).clone();
    let can_save = match &editing {
        Some(Editor { target: Some(_) }) => caps.update,
        Some(Editor { target: None }) => caps.create,
        None => false,
    };

    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-end gap-3">
                <input
                    class="input input-bordered input-sm w-64"
                    placeholder="empId or name"
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <label class="label cursor-pointer gap-2">
                    <input type="checkbox" class="checkbox checkbox-sm"
                        checked={*include_deleted}
                        onchange={bind_checkbox(&include_deleted)} />
                    <span class="label-text">{"Include deleted"}</span>
                </label>
                if *loading { <Spinner /> }
                <div class="flex-grow"></div>
                if caps.create {
                    <button class="btn btn-primary btn-sm" onclick={open_editor.reform(|_: MouseEvent| None)}>{"Add employee"}</button>
                }
            </div>

            <div class="overflow-x-auto">
                <table class="table table-zebra table-sm">
                    <thead>
                        <tr>
                            <th>{"Emp ID"}</th><th>{"Name"}</th><th>{"Email"}</th>
                            <th>{"Status"}</th><th class="text-right">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if data.items.is_empty() && !*loading {
                            <tr><td colspan="5" class="text-center opacity-60">{"No employees found"}</td></tr>
                        }
                        { for data.items.iter().map(|employee| {
                            let edit = {
                                let employee = employee.clone();
                                open_editor.reform(move |_: MouseEvent| Some(employee.clone()))
                            };
                            let delete = {
                                let employee = employee.clone();
                                on_delete.reform(move |_: MouseEvent| employee.clone())
                            };
                            let restore = {
                                let employee = employee.clone();
                                on_restore.reform(move |_: MouseEvent| employee.clone())
                            };
                            html! {
                                <tr key={employee.id.clone()} class={classes!(employee.is_deleted.then_some("opacity-60"))}>
                                    <td class="font-mono">{ &employee.emp_id }</td>
                                    <td>{ &employee.name }</td>
                                    <td>{ employee.email.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                    <td>
                                        if employee.is_deleted {
                                            <span class="badge badge-error badge-sm">{"Deleted"}</span>
                                        } else {
                                            <span class="badge badge-success badge-sm">{"Active"}</span>
                                        }
                                    </td>
                                    <td class="text-right space-x-1">
                                        if caps.update {
                                            <button class="btn btn-xs" disabled={employee.is_deleted} onclick={edit}>{"Edit"}</button>
                                        }
                                        if employee.is_deleted {
                                            if caps.restore {
                                                <button class="btn btn-xs btn-success" onclick={restore}>{"Restore"}</button>
                                            }
                                        } else if caps.delete {
                                            <button class="btn btn-xs btn-error" onclick={delete}>{"Delete"}</button>
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </div>
            <Pagination page={*page} total={data.total} limit={PAGE_SIZE} on_change={on_page} />

            if let Some(editing) = editing {
                <Modal
                    title={if editing.target.is_some() { "Edit Employee" } else { "Create Employee" }}
                    on_close={close_editor.clone()}
                >
                    <form class="space-y-3" onsubmit={on_save}>
                        <input class="input input-bordered w-full" placeholder="Emp ID"
                            disabled={editing.target.is_some()}
                            value={(*emp_id).clone()} oninput={bind_input(&emp_id)} />
                        <input class="input input-bordered w-full" placeholder="Name"
                            value={(*name).clone()} oninput={bind_input(&name)} />
                        <input class="input input-bordered w-full" type="email" placeholder="Email (optional)"
                            value={(*email).clone()} oninput={bind_input(&email)} />
                        <div class="modal-action">
                            <button type="button" class="btn" onclick={close_editor.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                            <button type="submit" class="btn btn-primary" disabled={!can_save}>{"Save"}</button>
                        </div>
                    </form>
                </Modal>
            }
        </div>
    }
}
