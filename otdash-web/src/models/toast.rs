use client::ClientError;
use gloo_timers::callback::Timeout;
use yewdux::{Dispatch, Store};

const TOAST_MILLIS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient messages shown in the corner of the screen.
#[derive(Debug, Default, Clone, PartialEq, Eq, Store)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, kind, message });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }
}

fn show(dispatch: &Dispatch<ToastState>, kind: ToastKind, message: String) {
    let mut id = 0;
    dispatch.reduce_mut(|state| id = state.push(kind, message));
    let dispatch = dispatch.clone();
    Timeout::new(TOAST_MILLIS, move || {
        dispatch.reduce_mut(|state| state.dismiss(id));
    })
    .forget();
}

pub fn success(dispatch: &Dispatch<ToastState>, message: impl Into<String>) {
    show(dispatch, ToastKind::Success, message.into());
}

pub fn error(dispatch: &Dispatch<ToastState>, message: impl Into<String>) {
    show(dispatch, ToastKind::Error, message.into());
}

/// Toast a failed call with its user-facing message.
pub fn failure(dispatch: &Dispatch<ToastState>, err: &ClientError) {
    tracing::warn!(error = %err, kind = ?err.kind(), "request failed");
    error(dispatch, err.user_message());
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn dismiss_removes_only_the_given_toast() {
        let mut state = ToastState::default();
        let first = state.push(ToastKind::Success, "Saved".to_string());
        let second = state.push(ToastKind::Error, "Failed".to_string());
        state.dismiss(first);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, second);
    }
}
