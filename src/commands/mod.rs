//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod task;
mod event;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Backend rejections carry the command's error string as the JS value.
fn reject_to_string(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

// Re-export all public items
pub use task::*;
pub use event::*;
