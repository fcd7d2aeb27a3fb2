//! Backend Event Bindings
//!
//! Subscriptions to events emitted by the backend. Listeners live for the
//! whole app session, so their closures are intentionally leaked.

use leptos::task::spawn_local;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &js_sys::Function) -> JsValue;
}

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

fn subscribe<T, F>(event: &'static str, callback: F)
where
    T: for<'de> Deserialize<'de> + 'static,
    F: Fn(T) + 'static,
{
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<T>>(raw) {
            Ok(envelope) => callback(envelope.payload),
            Err(e) => {
                web_sys::console::error_1(&format!("Bad {} payload: {}", event, e).into());
            }
        }
    });
    let function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    closure.forget();
    spawn_local(async move {
        let _ = listen(event, &function).await;
    });
}

/// Fired once the background database initialization completes.
pub fn listen_db_initialized(callback: impl Fn() + 'static) {
    subscribe::<(), _>("db-initialized", move |_| callback());
}

/// Fired after any task mutation, with the buckets that changed.
pub fn listen_tasks_changed(callback: impl Fn(Vec<String>) + 'static) {
    subscribe::<Vec<String>, _>("tasks-changed", callback);
}
