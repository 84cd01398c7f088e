use crate::api::{self, use_generation};
use crate::components::{Pagination, loading::Spinner};
use crate::forms::{optional, target_value};
use crate::models::toast::{ToastState, error, failure, success};
use client::api::AuditQuery;
use shared::models::{AUDIT_ENTITY_TYPES, AuditEntry, Page};
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

const PAGE_SIZE: u32 = 20;

#[derive(Clone, PartialEq, Default)]
struct Filters {
    entity_type: String,
    entity_id: String,
    from: String,
    to: String,
}

impl Filters {
    fn query(&self, page: u32) -> AuditQuery {
        AuditQuery {
            page,
            limit: PAGE_SIZE,
            entity_type: optional(&self.entity_type),
            entity_id: optional(&self.entity_id),
            from: optional(&self.from),
            to: optional(&self.to),
        }
    }
}

#[function_component(AuditPage)]
pub fn audit_page() -> Html {
    let toasts = use_dispatch::<ToastState>();
    let generation = use_generation();
    let filters = use_state(Filters::default);
    let page = use_state(|| 1_u32);
    let data = use_state(Page::<AuditEntry>::default);
    let loading = use_state(|| false);
    let exporting = use_state(|| false);

    {
        let data = data.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        use_effect_with(((*filters).clone(), *page), move |(filters, page)| {
            let query = filters.query(*page);
            let ticket = generation.begin();
            loading.set(true);
            api::spawn_call(
                move |client| async move { client.list_audit(&query).await },
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

    let update = |apply: fn(&mut Filters, String)| {
        let filters = filters.clone();
        let page = page.clone();
        Callback::from(move |event: Event| {
            if let Some(value) = target_value(event.target()) {
                let mut next = (*filters).clone();
                apply(&mut next, value);
                filters.set(next);
                page.set(1);
            }
        })
    };

    let on_export = {
        let filters = filters.clone();
        let exporting = exporting.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            let query = filters.query(1);
            let exporting = exporting.clone();
            let toasts = toasts.clone();
            exporting.set(true);
            api::spawn_call(
                move |client| async move { client.export_audit(&query).await },
                move |result| {
                    match result {
                        Ok(download) => match api::save(&download) {
                            Ok(()) => success(&toasts, "Exported"),
                            Err(message) => error(&toasts, message),
                        },
                        Err(err) => failure(&toasts, &err),
                    }
                    exporting.set(false);
                },
            );
        })
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-end gap-3">
                <select class="select select-bordered select-sm"
                    onchange={update(|filters, value| filters.entity_type = value)}>
                    { for AUDIT_ENTITY_TYPES.iter().map(|(label, value)| html! {
                        <option value={*value} selected={filters.entity_type == *value}>{ *label }</option>
                    }) }
                </select>
                <input class="input input-bordered input-sm w-56" placeholder="Search by ID..."
                    value={filters.entity_id.clone()}
                    onchange={update(|filters, value| filters.entity_id = value)} />
                <label class="flex items-center gap-1 text-sm">{"From"}
                    <input class="input input-bordered input-sm" type="date" value={filters.from.clone()}
                        onchange={update(|filters, value| filters.from = value)} />
                </label>
                <label class="flex items-center gap-1 text-sm">{"To"}
                    <input class="input input-bordered input-sm" type="date" value={filters.to.clone()}
                        onchange={update(|filters, value| filters.to = value)} />
                </label>
                if *loading { <Spinner /> }
                <div class="flex-grow"></div>
                <button class="btn btn-sm" disabled={*exporting} onclick={on_export}>
                    if *exporting { <Spinner /> }
                    {"Export Excel"}
                </button>
            </div>

            <div class="overflow-x-auto">
                <table class="table table-zebra table-sm">
                    <thead>
                        <tr>
                            <th>{"Time"}</th><th>{"Actor"}</th><th>{"Action"}</th>
                            <th>{"Entity"}</th><th>{"Entity ID"}</th><th>{"Details"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if data.items.is_empty() && !*loading {
                            <tr><td colspan="6" class="text-center opacity-60">{"No audit logs found"}</td></tr>
                        }
                        { for data.items.iter().map(|entry| html! {
                            <tr key={entry.id.clone()}>
                                <td class="whitespace-nowrap">{ &entry.created_at }</td>
                                <td>{ entry.actor_label() }</td>
                                <td><span class="badge badge-outline badge-sm">{ &entry.action }</span></td>
                                <td>{ &entry.entity_type }</td>
                                <td class="font-mono text-xs">{ &entry.entity_id }</td>
                                <td>
                                    if let Some(meta) = &entry.meta {
                                        <details>
                                            <summary class="cursor-pointer text-xs">{"meta"}</summary>
                                            <pre class="text-xs max-w-md overflow-auto">
                                                { serde_json::to_string_pretty(meta).unwrap_or_default() }
                                            </pre>
                                        </details>
                                    }
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
            <Pagination page={*page} total={data.total} limit={PAGE_SIZE} on_change={on_page} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn blank_filters_are_left_out() {
        let filters = Filters {
            entity_type: "OT_ENTRY".to_string(),
            entity_id: "  ".to_string(),
            ..Filters::default()
        };
        let query = filters.query(3);
        assert_eq!(query.page, 3);
        assert_eq!(query.entity_type.as_deref(), Some("OT_ENTRY"));
        assert_eq!(query.entity_id, None);
        assert_eq!(query.from, None);
    }
}
