use yew::{Callback, Html, MouseEvent, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub page: u32,
    pub total: u64,
    pub limit: u32,
    pub on_change: Callback<u32>,
}

/// Number of pages for `total` items, never zero.
pub fn page_count(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    u32::try_from(total.div_ceil(u64::from(limit)).max(1)).unwrap_or(u32::MAX)
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let pages = page_count(props.total, props.limit);
    let page = props.page.clamp(1, pages);
    let previous = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit(page.saturating_sub(1).max(1)))
    };
    let next = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit((page + 1).min(pages)))
    };

    html! {
        <div class="flex items-center justify-between mt-4 text-sm">
            <span>{ format!("{} total", props.total) }</span>
            <div class="join">
                <button class="join-item btn btn-sm" disabled={page <= 1} onclick={previous}>{"«"}</button>
                <button class="join-item btn btn-sm btn-disabled">{ format!("Page {page} of {pages}") }</button>
                <button class="join-item btn btn-sm" disabled={page >= pages} onclick={next}>{"»"}</button>
            </div>
        </div>
    }
}
