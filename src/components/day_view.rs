//! Day View Component
//!
//! A single day column with its own drag space: reordering within the
//! day still works, there is just nowhere else to drop.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sortable::create_sortable_context;

use crate::board::{create_board_state, wire_board};
use crate::commands;
use crate::components::DayColumn;
use crate::context::AppContext;

#[component]
pub fn DayView() -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");

    let dnd = create_sortable_context();
    let state = create_board_state();
    provide_context(dnd);
    provide_context(state);
    wire_board(dnd, state, app);

    on_cleanup(move || dnd.cancel());

    let day_key = Memo::new(move |_| app.anchor_date.get().format("%Y-%m-%d").to_string());

    Effect::new(move |_| {
        let _ = app.reload_trigger.get();
        if !app.db_ready.get() {
            return;
        }
        let key = day_key.get();
        spawn_local(async move {
            match commands::list_tasks_for_date(&key).await {
                Ok(tasks) => state.load(dnd, vec![key], tasks),
                Err(e) => web_sys::console::error_1(&format!("Day load failed: {}", e).into()),
            }
        });
    });

    view! {
        <div class="day-view">
            {move || {
                let date: NaiveDate = app.anchor_date.get();
                view! {
                    <DayColumn
                        bucket=day_key.get()
                        label=date.format("%A, %B %e").to_string()
                    />
                }
            }}
        </div>
    }
}
