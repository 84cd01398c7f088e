use crate::api::{self, spawn_mutation, use_generation};
use crate::components::{Modal, Pagination, loading::Spinner};
use crate::forms::{bind_change, bind_checkbox, bind_input, optional, target_value};
use crate::models::app_state::AppState;
use crate::models::toast::{ToastState, failure};
use client::api::{MIN_PASSWORD_LEN, UserQuery};
use client::gate::UserCapabilities;
use shared::models::{Account, CreateAccountRequest, Page, RoleRecord, UpdateAccountRequest};
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

const PAGE_SIZE: u32 = 20;

/// `""`, `"true"` or `"false"` from the status select.
fn active_filter(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[derive(Clone, PartialEq)]
enum Dialog {
    Create,
    Edit(Account),
    ResetPassword(Account),
}

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let caps = *use_selector(|state: &AppState| UserCapabilities::of(&state.session));
    let toasts = use_dispatch::<ToastState>();
    let generation = use_generation();

    let search = use_state(String::new);
    let role_filter = use_state(String::new);
    let status_filter = use_state(String::new);
    let page = use_state(|| 1_u32);
    let reload = use_state(|| 0_u32);
    let data = use_state(Page::<Account>::default);
    let roles = use_state(Vec::<RoleRecord>::new);
    let loading = use_state(|| false);

    let dialog = use_state(|| None::<Dialog>);
    let email = use_state(String::new);
    let username = use_state(String::new);
    let password = use_state(String::new);
    let role_id = use_state(String::new);
    let can_approve = use_state(|| false);

    {
        let roles = roles.clone();
        use_effect_with((), move |_| {
            api::spawn_call(
                |client| async move { client.list_roles().await },
                move |result| match result {
                    Ok(items) => roles.set(items),
                    Err(err) => tracing::warn!(error = %err, "failed to load roles"),
                },
            );
            || ()
        });
    }

    {
        let data = data.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        let generation = generation.clone();
        let deps = (
            (*search).clone(),
            (*role_filter).clone(),
            (*status_filter).clone(),
            *page,
            *reload,
        );
        use_effect_with(deps, move |(search, role, status, page, _)| {
            let query = UserQuery {
                page: *page,
                limit: PAGE_SIZE,
                search: optional(search),
                role_id: optional(role),
                is_active: active_filter(status),
            };
            let ticket = generation.begin();
            loading.set(true);
            api::spawn_call(
                move |client| async move { client.list_users(&query).await },
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

    let filter = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        let page = page.clone();
        Callback::from(move |event: Event| {
            if let Some(value) = target_value(event.target()) {
                handle.set(value);
                page.set(1);
            }
        })
    };
    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = target_value(event.target()) {
                search.set(value);
                page.set(1);
            }
        })
    };

    let open = {
        let dialog = dialog.clone();
        let email = email.clone();
        let username = username.clone();
        let password = password.clone();
        let role_id = role_id.clone();
        let can_approve = can_approve.clone();
        Callback::from(move |next: Dialog| {
            let account = match &next {
                Dialog::Edit(account) => Some(account),
                Dialog::Create | Dialog::ResetPassword(_) => None,
            };
            email.set(account.map(|a| a.email.clone()).unwrap_or_default());
            username.set(account.map(|a| a.username.clone()).unwrap_or_default());
            role_id.set(account.map(|a| a.role.id.clone()).unwrap_or_default());
            can_approve.set(account.is_some_and(|a| a.can_approve));
            password.set(String::new());
            dialog.set(Some(next));
        })
    };

    let close = {
        let dialog = dialog.clone();
        Callback::from(move |()| dialog.set(None))
    };

    let on_save = {
        let dialog = dialog.clone();
        let email = email.clone();
        let username = username.clone();
        let password = password.clone();
        let role_id = role_id.clone();
        let can_approve = can_approve.clone();
        let toasts = toasts.clone();
        let bump = bump.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(current) = (*dialog).clone() else {
                return;
            };
            let done = {
                let dialog = dialog.clone();
                let bump = bump.clone();
                move || {
                    dialog.set(None);
                    bump();
                }
            };
            match current {
                Dialog::Create => {
                    let request = CreateAccountRequest {
                        email: (*email).trim().to_string(),
                        username: (*username).trim().to_string(),
                        password: (*password).clone(),
                        role_id: (*role_id).clone(),
                        can_approve: *can_approve,
                    };
                    spawn_mutation(
                        &toasts,
                        move |client| async move { client.create_user(&request).await },
                        "Saved",
                        done,
                    );
                }
                Dialog::Edit(account) => {
                    let request = UpdateAccountRequest {
                        email: (*email).trim().to_string(),
                        username: (*username).trim().to_string(),
                        role_id: (*role_id).clone(),
                        can_approve: *can_approve,
                    };
                    spawn_mutation(
                        &toasts,
                        move |client| async move { client.update_user(&account.id, &request).await },
                        "Saved",
                        done,
                    );
                }
                Dialog::ResetPassword(account) => {
                    let new_password = (*password).clone();
                    spawn_mutation(
                        &toasts,
                        move |client| async move {
                            client.reset_user_password(&account.id, &new_password).await
                        },
                        "Password reset",
                        done,
                    );
                }
            }
        })
    };

    let on_toggle = {
        let toasts = toasts.clone();
        Callback::from(move |account: Account| {
            let enable = !account.is_active;
            spawn_mutation(
                &toasts,
                move |client| async move { client.set_user_active(&account.id, enable).await },
                "Updated",
                bump.clone(),
            );
        })
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let role_options = |selected: &str| -> Html {
        html! {
            { for roles.iter().map(|role| html! {
                <option key={role.id.clone()} value={role.id.clone()} selected={role.id == selected}>
                    { &role.name }
                </option>
            }) }
        }
    };

    let current = (*dialog).clone();
    let title = match &current {
        Some(Dialog::Create) => "Create User".to_string(),
        Some(Dialog::Edit(_)) => "Edit User".to_string(),
        Some(Dialog::ResetPassword(account)) => format!("Reset password for {}", account.username),
        None => String::new(),
    };

    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-end gap-3">
                <input class="input input-bordered input-sm w-64" placeholder="email or username"
                    value={(*search).clone()} oninput={on_search} />
                <select class="select select-bordered select-sm" onchange={filter(&role_filter)}>
                    <option value="" selected={role_filter.is_empty()}>{"All Roles"}</option>
                    { role_options(role_filter.as_str()) }
                </select>
                <select class="select select-bordered select-sm" onchange={filter(&status_filter)}>
                    <option value="" selected={status_filter.is_empty()}>{"All Status"}</option>
                    <option value="true" selected={*status_filter == "true"}>{"Active"}</option>
                    <option value="false" selected={*status_filter == "false"}>{"Disabled"}</option>
                </select>
                if *loading { <Spinner /> }
                <div class="flex-grow"></div>
                if caps.create {
                    <button class="btn btn-primary btn-sm"
                        onclick={open.reform(|_: MouseEvent| Dialog::Create)}>{"Create User"}</button>
                }
            </div>

            <div class="overflow-x-auto">
                <table class="table table-zebra table-sm">
                    <thead>
                        <tr>
                            <th>{"Email"}</th><th>{"Username"}</th><th>{"Role"}</th>
                            <th>{"Approve"}</th><th>{"Status"}</th><th class="text-right">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if data.items.is_empty() && !*loading {
                            <tr><td colspan="6" class="text-center opacity-60">{"No users found"}</td></tr>
                        }
                        { for data.items.iter().map(|account| {
                            let edit = {
                                let account = account.clone();
                                open.reform(move |_: MouseEvent| Dialog::Edit(account.clone()))
                            };
                            let reset = {
                                let account = account.clone();
                                open.reform(move |_: MouseEvent| Dialog::ResetPassword(account.clone()))
                            };
                            let toggle = {
                                let account = account.clone();
                                on_toggle.reform(move |_: MouseEvent| account.clone())
                            };
                            html! {
                                <tr key={account.id.clone()}>
                                    <td>{ &account.email }</td>
                                    <td>{ &account.username }</td>
                                    <td><span class="badge badge-outline badge-sm">{ &account.role.name }</span></td>
                                    <td>{ if account.can_approve { "Yes" } else { "No" } }</td>
                                    <td>
                                        if account.is_active {
                                            <span class="badge badge-success badge-sm">{"Active"}</span>
                                        } else {
                                            <span class="badge badge-ghost badge-sm">{"Disabled"}</span>
                                        }
                                    </td>
                                    <td class="text-right space-x-1">
                                        if caps.update {
                                            <button class="btn btn-xs" onclick={edit}>{"Edit"}</button>
                                        }
                                        if caps.disable {
                                            <button class="btn btn-xs" onclick={toggle}>
                                                { if account.is_active { "Disable" } else { "Enable" } }
                                            </button>
                                        }
                                        if caps.reset_password {
                                            <button class="btn btn-xs" onclick={reset}>{"Reset PW"}</button>
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </div>
            <Pagination page={*page} total={data.total} limit={PAGE_SIZE} on_change={on_page} />

            if let Some(current) = current {
                <Modal {title} on_close={close.clone()}>
                    <form class="space-y-3" onsubmit={on_save}>
                        if matches!(current, Dialog::ResetPassword(_)) {
                            <input class="input input-bordered w-full" type="password"
                                placeholder={format!("New password (min {MIN_PASSWORD_LEN} characters)")}
                                value={(*password).clone()} oninput={bind_input(&password)} />
                        } else {
                            <input class="input input-bordered w-full" type="email" placeholder="Email"
                                value={(*email).clone()} oninput={bind_input(&email)} />
                            <input class="input input-bordered w-full" placeholder="Username"
                                value={(*username).clone()} oninput={bind_input(&username)} />
                            if matches!(current, Dialog::Create) {
                                <input class="input input-bordered w-full" type="password"
                                    placeholder={format!("Password (min {MIN_PASSWORD_LEN} characters)")}
                                    value={(*password).clone()} oninput={bind_input(&password)} />
                            }
                            <select class="select select-bordered w-full" onchange={bind_change(&role_id)}>
                                <option value="" selected={role_id.is_empty()}>{"Select role"}</option>
                                { role_options(role_id.as_str()) }
                            </select>
                            <label class="label cursor-pointer justify-start gap-2">
                                <input type="checkbox" class="checkbox checkbox-sm"
                                    checked={*can_approve} onchange={bind_checkbox(&can_approve)} />
                                <span class="label-text">{"Can approve OT"}</span>
                            </label>
                        }
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
