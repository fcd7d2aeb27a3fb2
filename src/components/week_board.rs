//! Week Board Component
//!
//! A backlog lane plus seven day columns, Monday first, all sharing one
//! drag space. A card can be dragged within a column, across days, or
//! between the backlog and a day (scheduling / unscheduling it); the day
//! columns follow the anchor date's week.

use chrono::{Datelike, Duration, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sortable::create_sortable_context;

use crate::board::{create_board_state, wire_board};
use crate::commands;
use crate::components::DayColumn;
use crate::context::AppContext;
use crate::models::BACKLOG_BUCKET;

/// The Monday..Sunday of the week containing `anchor`, as bucket keys.
fn week_days(anchor: NaiveDate) -> Vec<NaiveDate> {
    let monday = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

fn bucket_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[component]
pub fn WeekBoard() -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");

    let dnd = create_sortable_context();
    let state = create_board_state();
    provide_context(dnd);
    provide_context(state);
    wire_board(dnd, state, app);

    // A drag must not outlive its columns
    on_cleanup(move || dnd.cancel());

    let days = Memo::new(move |_| week_days(app.anchor_date.get()));

    // Load the visible week whenever the anchor or the trigger changes
    Effect::new(move |_| {
        let _ = app.reload_trigger.get();
        if !app.db_ready.get() {
            return;
        }
        let days = days.get();
        let mut buckets: Vec<String> = days.iter().copied().map(bucket_key).collect();
        let (start, end) = (buckets[0].clone(), buckets[6].clone());
        buckets.push(BACKLOG_BUCKET.to_string());
        spawn_local(async move {
            let (week, backlog) = futures::join!(
                commands::list_tasks_for_range(&start, &end),
                commands::list_backlog_tasks(),
            );
            match (week, backlog) {
                (Ok(mut tasks), Ok(mut unscheduled)) => {
                    tasks.append(&mut unscheduled);
                    state.load(dnd, buckets, tasks);
                }
                (Err(e), _) | (_, Err(e)) => {
                    web_sys::console::error_1(&format!("Week load failed: {}", e).into());
                }
            }
        });
    });

    view! {
        <div class="week-board">
            <DayColumn bucket=BACKLOG_BUCKET.to_string() label="Backlog".to_string() />
            {move || {
                days.get()
                    .into_iter()
                    .map(|date| {
                        view! {
                            <DayColumn
                                bucket=bucket_key(date)
                                label=date.format("%a %e").to_string()
                            />
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
