//! Day Column Component
//!
//! One bucket's lane: incomplete cards in board order, completed cards
//! below them, and a quick-add form at the bottom. The column element is
//! registered as a container so its empty space accepts drops.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_sortable::{is_hovered_container, register_container, SortableContext};

use crate::board::BoardState;
use crate::components::{AddTaskForm, TaskCard};

#[component]
pub fn DayColumn(bucket: String, label: String) -> impl IntoView {
    let dnd = use_context::<SortableContext>().expect("SortableContext should be provided");
    let state = use_context::<BoardState>().expect("BoardState should be provided");

    let node_ref = NodeRef::<Div>::new();
    register_container(dnd, &bucket, node_ref);

    let lane_key = bucket.clone();
    let done_key = bucket.clone();
    let hover_key = bucket.clone();

    view! {
        <div
            node_ref=node_ref
            class=move || {
                if is_hovered_container(dnd, &hover_key) {
                    "day-column drop-target"
                } else {
                    "day-column"
                }
            }
        >
            <h2 class="day-label">{label}</h2>

            <div class="card-list">
                {move || {
                    state
                        .lane_tasks(&lane_key)
                        .into_iter()
                        .map(|task| view! { <TaskCard task=task /> })
                        .collect_view()
                }}
            </div>

            {move || {
                let done = state.completed_tasks(&done_key);
                (!done.is_empty())
                    .then(|| {
                        view! {
                            <div class="completed-list">
                                {done
                                    .into_iter()
                                    .map(|task| view! { <TaskCard task=task /> })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}

            <AddTaskForm bucket=bucket />
        </div>
    }
}
