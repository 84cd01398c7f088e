//! Small helpers for wiring form controls to state handles.

use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::{Callback, Event, InputEvent, UseStateHandle};

/// Current value of the input, select or textarea behind `target`.
pub fn target_value(target: Option<EventTarget>) -> Option<String> {
    let target = target?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target
        .dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value)
}

pub fn target_checked(target: Option<EventTarget>) -> bool {
    target
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .is_some_and(|input| input.checked())
}

/// `oninput` callback that stores the field's text in `handle`.
pub fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(value) = target_value(event.target()) {
            handle.set(value);
        }
    })
}

/// `onchange` callback for selects and date pickers.
pub fn bind_change(handle: &UseStateHandle<String>) -> Callback<Event> {
    let handle = handle.clone();
    Callback::from(move |event: Event| {
        if let Some(value) = target_value(event.target()) {
            handle.set(value);
        }
    })
}

pub fn bind_checkbox(handle: &UseStateHandle<bool>) -> Callback<Event> {
    let handle = handle.clone();
    Callback::from(move |event: Event| handle.set(target_checked(event.target())))
}

/// `Callback<Event>` that hands the new control value to `apply`.
pub fn on_value(apply: impl Fn(String) + 'static) -> Callback<Event> {
    Callback::from(move |event: Event| {
        if let Some(value) = target_value(event.target()) {
            apply(value);
        }
    })
}

/// Browser confirmation dialog. Answers `false` when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `None` for blank text, the trimmed text otherwise.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
