use crate::api::{self, spawn_mutation};
use crate::components::{Modal, loading::Spinner};
use crate::forms::{bind_change, bind_input, confirm};
use crate::models::app_state::AppState;
use crate::models::toast::{ToastState, error, failure};
use client::calendar::parse_day;
use client::gate::TripleOtCapabilities;
use shared::models::TripleOtDate;
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

/// `Monday, March 3, 2025`, or the raw text when it is not a date.
fn long_date(raw: &str) -> String {
    parse_day(raw).map_or_else(
        || raw.to_string(),
        |date| date.format("%A, %B %-d, %Y").to_string(),
    )
}

fn sorted(mut rows: Vec<TripleOtDate>) -> Vec<TripleOtDate> {
    rows.sort_by(|a, b| a.date.cmp(&b.date));
    rows
}

#[function_component(TripleOtPage)]
pub fn triple_ot_page() -> Html {
    let caps = *use_selector(|state: &AppState| TripleOtCapabilities::of(&state.session));
    let toasts = use_dispatch::<ToastState>();
    let reload = use_state(|| 0_u32);
    let rows = use_state(Vec::<TripleOtDate>::new);
    let loading = use_state(|| false);
    let adding = use_state(|| false);
    let date = use_state(String::new);
    let note = use_state(String::new);

    {
        let rows = rows.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        use_effect_with(*reload, move |_| {
            loading.set(true);
            api::spawn_call(
                |client| async move { client.list_triple_ot().await },
                move |result| {
                    match result {
                        Ok(items) => rows.set(sorted(items)),
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

    let open_add = {
        let adding = adding.clone();
        let date = date.clone();
        let note = note.clone();
        Callback::from(move |_: MouseEvent| {
            date.set(String::new());
            note.set(String::new());
            adding.set(true);
        })
    };
    let close_add = {
        let adding = adding.clone();
        Callback::from(move |()| adding.set(false))
    };

    let on_add = {
        let adding = adding.clone();
        let date = date.clone();
        let note = note.clone();
        let toasts = toasts.clone();
        let bump = bump.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if date.is_empty() {
                error(&toasts, "Pick a date");
                return;
            }
            let (day, text) = ((*date).clone(), (*note).clone());
            let adding = adding.clone();
            let bump = bump.clone();
            spawn_mutation(
                &toasts,
                move |client| async move { client.create_triple_ot(&day, &text).await },
                "Added",
                move || {
                    adding.set(false);
                    bump();
                },
            );
        })
    };

    let on_delete = {
        let toasts = toasts.clone();
        Callback::from(move |row: TripleOtDate| {
            if !confirm(&format!("Remove triple OT date {}?", row.date)) {
                return;
            }
            spawn_mutation(
                &toasts,
                move |client| async move { client.delete_triple_ot(&row.id).await },
                "Removed",
                bump.clone(),
            );
        })
    };

    html! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-xl font-bold">{"Triple OT Dates"}</h2>
                    <div class="text-sm opacity-70">
                        {"Dates listed here are paid at the triple rate. They override normal and double OT calculations."}
                    </div>
                </div>
                if caps.create {
                    <button class="btn btn-primary btn-sm" onclick={open_add}>{"Add Date"}</button>
                }
            </div>
            <div class="text-sm opacity-70">
                if *loading { <Spinner /> } else { { format!("{} date(s)", rows.len()) } }
            </div>
            <div class="overflow-x-auto">
                <table class="table table-zebra table-sm">
                    <thead>
                        <tr><th>{"Date"}</th><th>{"Note"}</th><th>{"Created"}</th><th class="text-right">{"Actions"}</th></tr>
                    </thead>
                    <tbody>
                        { for rows.iter().map(|row| {
                            let remove = {
                                let row = row.clone();
                                on_delete.reform(move |_: MouseEvent| row.clone())
                            };
                            html! {
                                <tr key={row.id.clone()}>
                                    <td>
                                        <div class="font-mono">{ &row.date }</div>
                                        <div class="text-xs opacity-70">{ long_date(&row.date) }</div>
                                    </td>
                                    <td>{ row.note.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                    <td>{ row.created_at.get(..10).unwrap_or(row.created_at.as_str()) }</td>
                                    <td class="text-right">
                                        if caps.delete {
                                            <button class="btn btn-xs btn-error" onclick={remove}>{"Remove"}</button>
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </div>

            if *adding {
                <Modal title="Add Triple OT Date" on_close={close_add.clone()}>
                    <form class="space-y-3" onsubmit={on_add}>
                        <input class="input input-bordered w-full" type="date"
                            value={(*date).clone()} onchange={bind_change(&date)} />
                        <input class="input input-bordered w-full" placeholder="Note (optional)"
                            value={(*note).clone()} oninput={bind_input(&note)} />
                        <div class="modal-action">
                            <button type="button" class="btn" onclick={close_add.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                            <button type="submit" class="btn btn-primary">{"Add"}</button>
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
    fn long_date_spells_out_the_day() {
        assert_eq!(long_date("2025-03-03"), "Monday, March 3, 2025");
        assert_eq!(long_date("soon"), "soon");
    }
}
