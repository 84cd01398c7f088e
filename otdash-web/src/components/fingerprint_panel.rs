use crate::api;
use crate::components::loading::Spinner;
use crate::models::toast::{ToastState, error, failure, success};
use client::api::fingerprint_download;
use shared::models::{FingerprintResult, PunchType};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

async fn read_file(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Cannot read file".to_string())?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn punch_label(punch: Option<PunchType>) -> &'static str {
    match punch {
        Some(PunchType::In) => "IN",
        Some(PunchType::Out) => "OUT",
        None => "-",
    }
}

/// Converts a raw fingerprint terminal export into a clean CSV.
#[function_component(FingerprintPanel)]
pub fn fingerprint_panel() -> Html {
    let toasts = use_dispatch::<ToastState>();
    let result = use_state(|| None::<FingerprintResult>);
    let show_type = use_state(|| true);
    let loading = use_state(|| false);

    let on_file = {
        let result = result.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let result = result.clone();
            let loading = loading.clone();
            let toasts = toasts.clone();
            loading.set(true);
            spawn_local(async move {
                let processed = match read_file(&file).await {
                    Ok(bytes) => match api::shared() {
                        Ok(client) => client.process_fingerprint(&file.name(), bytes).await,
                        Err(err) => Err(err),
                    },
                    Err(message) => {
                        error(&toasts, message);
                        loading.set(false);
                        input.set_value("");
                        return;
                    }
                };
                match processed {
                    Ok(body) => {
                        result.set(Some(body));
                        success(&toasts, "Logs processed successfully.");
                    }
                    Err(err) => failure(&toasts, &err),
                }
                loading.set(false);
                input.set_value("");
            });
        })
    };

    let on_download = {
        let result = result.clone();
        let toasts = toasts.clone();
        let show_type = show_type.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(body) = (*result).as_ref() else {
                return;
            };
            match fingerprint_download(body, *show_type) {
                Ok(download) => match api::save(&download) {
                    Ok(()) => success(&toasts, "CSV downloaded."),
                    Err(message) => error(&toasts, message),
                },
                Err(err) => failure(&toasts, &err),
            }
        })
    };

    let toggle_type = {
        let show_type = show_type.clone();
        Callback::from(move |_: MouseEvent| show_type.set(!*show_type))
    };

    let has_csv = (*result).as_ref().is_some_and(|body| !body.csv.is_empty());

    html! {
        <div class="card bg-base-200">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <div>
                        <h3 class="card-title text-base">{"Fingerprint Logs"}</h3>
                        <div class="text-sm opacity-70">{"Upload raw TXT logs from fingerprint machines and export clean CSV."}</div>
                    </div>
                    <button class="btn btn-sm btn-ghost" onclick={toggle_type}>
                        { if *show_type { "Hide Type" } else { "Show Type" } }
                    </button>
                </div>
                <div class="flex flex-wrap items-center gap-3">
                    <input type="file" accept=".txt,.dat" class="file-input file-input-bordered file-input-sm"
                        disabled={*loading} onchange={on_file} />
                    <button class="btn btn-sm btn-primary" disabled={!has_csv || *loading} onclick={on_download}>
                        {"Download CSV"}
                    </button>
                    if *loading {
                        <Spinner />
                        <span class="text-sm">{"Processing logs..."}</span>
                    }
                </div>
                if let Some(body) = (*result).as_ref() {
                    <div class="overflow-x-auto max-h-80">
                        <table class="table table-xs">
                            <thead>
                                <tr>
                                    <th>{"Emp ID"}</th><th>{"Date"}</th><th>{"Time"}</th>
                                    if *show_type { <th>{"Type"}</th> }
                                </tr>
                            </thead>
                            <tbody>
                                { for body.logs.iter().map(|log| html! {
                                    <tr>
                                        <td class="font-mono">{ &log.emp_id }</td>
                                        <td>{ &log.date }</td>
                                        <td>{ &log.time }</td>
                                        if *show_type {
                                            <td>
                                                <span class={classes!("badge", "badge-sm",
                                                    if log.punch == Some(PunchType::Out) { "badge-error" } else { "badge-success" })}>
                                                    { punch_label(log.punch) }
                                                </span>
                                            </td>
                                        }
                                    </tr>
                                }) }
                            </tbody>
                        </table>
                    </div>
                }
            </div>
        </div>
    }
}
