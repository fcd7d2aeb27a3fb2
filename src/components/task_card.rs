//! Task Card Component
//!
//! One draggable card. The whole card arms a drag on pointer-down; the
//! checkbox and the action buttons are exempt, so clicking them never
//! lifts the card.

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sortable::{item_transform, make_on_pointerdown, register_item, SortableContext};

use crate::commands;
use crate::context::AppContext;
use crate::models::{Task, BACKLOG_BUCKET};

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");
    let dnd = use_context::<SortableContext>().expect("SortableContext should be provided");

    let id = task.id;
    let completed = task.completed;
    let title = task.title.clone();
    let progress = task.checkpoint_progress();
    let postpone_count = task.postpone_count;
    let scheduled = task.bucket != BACKLOG_BUCKET;

    // Completed cards are inert: never a drag source, never a target
    let node_ref = NodeRef::<Div>::new();
    if !completed {
        register_item(dnd, id, node_ref);
    }
    let arm = make_on_pointerdown(dnd, id);
    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !completed {
            arm(ev);
        }
    };
    let transform = item_transform(dnd, id);

    view! {
        <div
            node_ref=node_ref
            class=move || {
                if dnd.active.get() == Some(id) {
                    "task-card lifted"
                } else if completed {
                    "task-card completed"
                } else {
                    "task-card"
                }
            }
            style:transform=move || transform.get().unwrap_or_default()
            on:pointerdown=on_pointerdown
        >
            <input
                type="checkbox"
                checked=completed
                on:change=move |_| {
                    spawn_local(async move {
                        if let Err(e) = commands::toggle_task(id).await {
                            web_sys::console::warn_1(&e.into());
                        }
                        app.reload();
                    });
                }
            />

            <span class="task-title">{title}</span>

            {progress.map(|p| view! { <span class="checkpoint-progress">{p}</span> })}

            {(postpone_count > 0)
                .then(|| view! { <span class="postpone-badge">{format!("+{}", postpone_count)}</span> })}

            {scheduled
                .then(|| {
                    view! {
                        <button
                            class="shift-btn"
                            title="Move to yesterday"
                            on:click=move |_| {
                                spawn_local(async move {
                                    let _ = commands::move_task_to_yesterday(id).await;
                                    app.reload();
                                });
                            }
                        >
                            "←"
                        </button>
                        <button
                            class="shift-btn"
                            title="Move to tomorrow"
                            on:click=move |_| {
                                spawn_local(async move {
                                    let _ = commands::move_task_to_tomorrow(id).await;
                                    app.reload();
                                });
                            }
                        >
                            "→"
                        </button>
                    }
                })}

            <button
                class="delete-btn"
                on:click=move |_| {
                    spawn_local(async move {
                        let _ = commands::delete_task(id).await;
                        app.reload();
                    });
                }
            >
                "×"
            </button>
        </div>
    }
}
