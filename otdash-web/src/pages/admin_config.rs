use std::collections::BTreeMap;

use crate::api::{self, spawn_mutation};
use crate::components::{Modal, loading::Spinner};
use crate::forms::bind_input;
use crate::models::toast::{ToastState, failure};
use shared::models::{Permission, RoleRecord};
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

/// Permissions grouped by namespace (`ot`, `users`, ...), both levels sorted.
fn group_by_namespace(permissions: &[Permission]) -> Vec<(String, Vec<Permission>)> {
    let mut groups: BTreeMap<String, Vec<Permission>> = BTreeMap::new();
    for permission in permissions {
        groups
            .entry(permission.namespace().to_string())
            .or_default()
            .push(permission.clone());
    }
    groups
        .into_iter()
        .map(|(namespace, mut items)| {
            items.sort();
            items.dedup();
            (namespace, items)
        })
        .collect()
}

#[function_component(AdminConfigPage)]
pub fn admin_config_page() -> Html {
    let toasts = use_dispatch::<ToastState>();
    let reload = use_state(|| 0_u32);
    let roles = use_state(Vec::<RoleRecord>::new);
    let permissions = use_state(Vec::<Permission>::new);
    let selected = use_state(|| None::<RoleRecord>);
    let loading = use_state(|| false);
    let creating = use_state(|| false);
    let new_name = use_state(String::new);

    {
        let roles = roles.clone();
        let selected = selected.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        use_effect_with(*reload, move |_| {
            loading.set(true);
            api::spawn_call(
                |client| async move { client.list_roles().await },
                move |result| {
                    match result {
                        Ok(items) => {
                            let keep = (*selected)
                                .as_ref()
                                .and_then(|current| items.iter().find(|role| role.id == current.id))
                                .or_else(|| items.first())
                                .cloned();
                            selected.set(keep);
                            roles.set(items);
                        }
                        Err(err) => failure(&toasts, &err),
                    }
                    loading.set(false);
                },
            );
            || ()
        });
    }

    {
        let permissions = permissions.clone();
        let toasts = toasts.clone();
        use_effect_with((), move |_| {
            api::spawn_call(
                |client| async move { client.list_permissions().await },
                move |result| match result {
                    Ok(items) => permissions.set(items),
                    Err(err) => failure(&toasts, &err),
                },
            );
            || ()
        });
    }

    let bump = {
        let reload = reload.clone();
        move || reload.set(*reload + 1)
    };

    let on_select = {
        let roles = roles.clone();
        let selected = selected.clone();
        Callback::from(move |id: String| {
            selected.set(roles.iter().find(|role| role.id == id).cloned());
        })
    };

    let on_toggle = {
        let selected = selected.clone();
        Callback::from(move |permission: Permission| {
            if let Some(mut role) = (*selected).clone() {
                role.toggle(&permission);
                selected.set(Some(role));
            }
        })
    };

    let on_save = {
        let selected = selected.clone();
        let toasts = toasts.clone();
        let bump = bump.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(role) = (*selected).clone() else {
                return;
            };
            spawn_mutation(
                &toasts,
                move |client| async move { client.update_role(&role).await },
                "Saved",
                bump.clone(),
            );
        })
    };

    let on_create = {
        let creating = creating.clone();
        let new_name = new_name.clone();
        let toasts = toasts.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let name = (*new_name).clone();
            let creating = creating.clone();
            let new_name = new_name.clone();
            let bump = bump.clone();
            spawn_mutation(
                &toasts,
                move |client| async move { client.create_role(&name).await },
                "Created",
                move || {
                    creating.set(false);
                    new_name.set(String::new());
                    bump();
                },
            );
        })
    };

    let open_create = {
        let creating = creating.clone();
        Callback::from(move |_: MouseEvent| creating.set(true))
    };
    let close_create = {
        let creating = creating.clone();
        Callback::from(move |()| creating.set(false))
    };

    let dirty = (*selected).as_ref().is_some_and(|current| {
        roles
            .iter()
            .find(|role| role.id == current.id)
            .is_none_or(|saved| saved != current)
    });
    let groups = group_by_namespace(&permissions);

    html! {
        <div class="grid gap-4 lg:grid-cols-[16rem_1fr]">
            <div class="card bg-base-200">
                <div class="card-body p-4">
                    <div class="flex items-center justify-between">
                        <h3 class="font-bold">{"Roles"}</h3>
                        if *loading { <Spinner /> }
                    </div>
                    <ul class="menu p-0">
                        { for roles.iter().map(|role| {
                            let id = role.id.clone();
                            let active = (*selected).as_ref().is_some_and(|current| current.id == role.id);
                            html! {
                                <li key={role.id.clone()}>
                                    <a class={classes!(active.then_some("active"))}
                                        onclick={on_select.reform(move |_: MouseEvent| id.clone())}>
                                        { &role.name }
                                        <span class="badge badge-sm">{ role.permissions.len() }</span>
                                    </a>
                                </li>
                            }
                        }) }
                    </ul>
                    <button class="btn btn-sm btn-outline mt-2" onclick={open_create}>{"New role"}</button>
                </div>
            </div>

            <div class="card bg-base-200">
                <div class="card-body p-4">
                    if let Some(role) = (*selected).clone() {
                        <div class="flex items-center justify-between">
                            <h3 class="font-bold">{ format!("Permissions for {}", role.name) }</h3>
                            <button class="btn btn-primary btn-sm" disabled={!dirty} onclick={on_save}>{"Save"}</button>
                        </div>
                        <div class="grid gap-4 md:grid-cols-2 xl:grid-cols-3">
                            { for groups.iter().map(|(namespace, items)| html! {
                                <div key={namespace.clone()}>
                                    <div class="text-xs font-semibold uppercase opacity-70 mb-1">{ namespace }</div>
                                    { for items.iter().map(|permission| {
                                        let checked = role.permissions.contains(permission.as_str());
                                        let token = permission.clone();
                                        html! {
                                            <label class="label cursor-pointer justify-start gap-2 py-1">
                                                <input type="checkbox" class="checkbox checkbox-sm" {checked}
                                                    onchange={on_toggle.reform(move |_: Event| token.clone())} />
                                                <span class="label-text font-mono text-xs">{ permission.as_str() }</span>
                                            </label>
                                        }
                                    }) }
                                </div>
                            }) }
                        </div>
                    } else {
                        <div class="text-sm opacity-60">{"Select a role"}</div>
                    }
                </div>
            </div>

            if *creating {
                <Modal title="Create New Role" on_close={close_create.clone()}>
                    <form class="space-y-3" onsubmit={on_create}>
                        <input class="input input-bordered w-full" placeholder="e.g., Manager, Supervisor, Auditor"
                            value={(*new_name).clone()} oninput={bind_input(&new_name)} />
                        <div class="modal-action">
                            <button type="button" class="btn" onclick={close_create.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                            <button type="submit" class="btn btn-primary">{"Create"}</button>
                        </div>
                    </form>
                </Modal>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn permissions_group_by_prefix() {
        let groups = group_by_namespace(&[
            Permission::OT_APPROVE,
            Permission::USERS_READ,
            Permission::OT_READ,
            Permission::OT_READ,
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "ot");
        assert_eq!(groups[0].1, vec![Permission::OT_APPROVE, Permission::OT_READ]);
        assert_eq!(groups[1].0, "users");
    }
}
