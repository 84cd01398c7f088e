use std::future::Future;
use std::rc::Rc;

use crate::models::toast::{ToastState, failure, success};
use client::{ApiClient, ClientConfig, ClientResult, Download, RequestGeneration};
use once_cell::unsync::OnceCell;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use yew::{hook, use_effect_with, use_memo};
use yewdux::Dispatch;

thread_local! {
    static SHARED_CLIENT: OnceCell<ApiClient> = const { OnceCell::new() };
}

/// The one API client of the page. Every component shares its session.
pub fn shared() -> ClientResult<ApiClient> {
    SHARED_CLIENT.with(|cell| {
        cell.get_or_try_init(|| {
            let config = ClientConfig::new();
            let base_url = resolve_base_url(config.api_base_url(), &window_origin());
            ApiClient::new(config.with_base_url(base_url))
        })
        .cloned()
    })
}

/// Run `call` against the shared client and hand its result to `done`.
pub fn spawn_call<T, Fut>(
    call: impl FnOnce(ApiClient) -> Fut + 'static,
    done: impl FnOnce(ClientResult<T>) + 'static,
) where
    Fut: Future<Output = ClientResult<T>> + 'static,
{
    spawn_local(async move {
        let result = match shared() {
            Ok(client) => call(client).await,
            Err(err) => Err(err),
        };
        done(result);
    });
}

/// Run a write call. Success toasts `message` and runs `then`; failure toasts the error.
pub fn spawn_mutation<T, Fut>(
    toasts: &Dispatch<ToastState>,
    call: impl FnOnce(ApiClient) -> Fut + 'static,
    message: impl Into<String>,
    then: impl FnOnce() + 'static,
) where
    T: 'static,
    Fut: Future<Output = ClientResult<T>> + 'static,
{
    let toasts = toasts.clone();
    let message = message.into();
    spawn_call(call, move |result| match result {
        Ok(_) => {
            success(&toasts, message);
            then();
        }
        Err(err) => failure(&toasts, &err),
    });
}

/// Request generation of the calling page. Outstanding tickets die with the page.
#[hook]
pub fn use_generation() -> Rc<RequestGeneration> {
    let generation = use_memo((), |()| RequestGeneration::new());
    {
        let generation = Rc::clone(&generation);
        use_effect_with((), move |_| move || generation.invalidate());
    }
    generation
}

fn window_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Absolute base URL for `configured`, which may be relative to the page origin.
pub fn resolve_base_url(configured: &str, origin: &str) -> String {
    if configured.starts_with("http://") || configured.starts_with("https://") {
        return configured.trim_end_matches('/').to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        configured.trim_start_matches('/').trim_end_matches('/')
    )
}

/// Hand `download` to the browser as a file save.
pub fn save(download: &Download) -> Result<(), String> {
    let bytes = js_sys::Uint8Array::from(download.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&download.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "Cannot build file".to_string())?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|_| "Cannot build file".to_string())?;

    let anchor = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.create_element("a").ok())
        .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok())
        .ok_or_else(|| "Cannot start download".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&download.file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(|_| "Cannot release file".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn relative_base_is_joined_to_origin() {
        assert_eq!(
            resolve_base_url("/api", "http://localhost:8080"),
            "http://localhost:8080/api"
        );
        assert_eq!(
            resolve_base_url("api/", "http://localhost:8080/"),
            "http://localhost:8080/api"
        );
    }

    #[wasm_bindgen_test]
    fn absolute_base_is_kept() {
        assert_eq!(
            resolve_base_url("https://ot.example.com/api/", "http://localhost:8080"),
            "https://ot.example.com/api"
        );
    }
}
