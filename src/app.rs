//! PlanWeek Frontend App
//!
//! Top bar (view switch + date navigation) over the active board.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{DayView, WeekBoard};
use crate::context::{AppContext, ViewMode};

#[component]
pub fn App() -> impl IntoView {
    let today = chrono::Local::now().date_naive();

    let reload_trigger = signal(0u32);
    let db_ready = signal(false);
    let view_mode = signal(ViewMode::Week);
    let anchor_date = signal(today);

    let ctx = AppContext::new(reload_trigger, db_ready, view_mode, anchor_date);
    provide_context(ctx);

    // Backend push: reload on task changes, unblock loading once the
    // database is up
    commands::listen_db_initialized(move || {
        ctx.mark_db_ready();
        ctx.reload();
    });

    // A committed drag fans out one write per touched task and each emits
    // tasks-changed; coalesce the burst into a single reload
    let reload_pending = StoredValue::new(false);
    commands::listen_tasks_changed(move |_buckets| {
        if reload_pending.get_value() {
            return;
        }
        reload_pending.set_value(true);
        spawn_local(async move {
            TimeoutFuture::new(50).await;
            reload_pending.set_value(false);
            ctx.reload();
        });
    });

    let nav_step = move || match ctx.view_mode.get() {
        ViewMode::Day => 1,
        ViewMode::Week => 7,
    };

    view! {
        <div class="app-layout">
            <header class="top-bar">
                <h1>"PlanWeek"</h1>

                <div class="view-switch">
                    <button
                        class=move || {
                            if ctx.view_mode.get() == ViewMode::Day { "active" } else { "" }
                        }
                        on:click=move |_| ctx.set_view(ViewMode::Day)
                    >
                        "Day"
                    </button>
                    <button
                        class=move || {
                            if ctx.view_mode.get() == ViewMode::Week { "active" } else { "" }
                        }
                        on:click=move |_| ctx.set_view(ViewMode::Week)
                    >
                        "Week"
                    </button>
                </div>

                <div class="date-nav">
                    <button on:click=move |_| ctx.shift_anchor(-nav_step())>"‹"</button>
                    <button on:click=move |_| ctx.set_anchor(today)>"Today"</button>
                    <button on:click=move |_| ctx.shift_anchor(nav_step())>"›"</button>
                    <span class="anchor-label">
                        {move || ctx.anchor_date.get().format("%Y-%m-%d").to_string()}
                    </span>
                </div>
            </header>

            <main class="main-content">
                {move || {
                    if !ctx.db_ready.get() {
                        view! { <p class="loading">"Opening your planner…"</p> }.into_any()
                    } else {
                        match ctx.view_mode.get() {
                            ViewMode::Week => view! { <WeekBoard /> }.into_any(),
                            ViewMode::Day => view! { <DayView /> }.into_any(),
                        }
                    }
                }}
            </main>
        </div>
    }
}
