//! Quick-Add Form
//!
//! Inline input at the bottom of a column. Enter submits; the input is
//! drag-exempt by element type, so typing never lifts a card.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::AppContext;

#[component]
pub fn AddTaskForm(bucket: String) -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");
    let (title, set_title) = signal(String::new());

    let submit = move |target_bucket: String| {
        let text = title.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        set_title.set(String::new());
        spawn_local(async move {
            if let Err(e) = commands::create_task(&text, Some(&target_bucket)).await {
                web_sys::console::warn_1(&e.into());
            }
            app.reload();
        });
    };

    let enter_bucket = bucket.clone();
    view! {
        <input
            class="add-task-input"
            type="text"
            placeholder="Add a task…"
            prop:value=title
            on:input=move |ev| {
                if let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                {
                    set_title.set(input.value());
                }
            }
            on:keydown=move |ev| {
                if ev.key() == "Enter" {
                    submit(enter_bucket.clone());
                }
            }
        />
    }
}
