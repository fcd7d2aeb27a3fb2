//! Board State + Drag Commit Glue
//!
//! Holds the optimistic task arrangement the columns render from, and
//! wires a `SortableContext` to it: snapshot on lift, live resolve on
//! hover change, commit plan written to the backend on drop, snapshot
//! restore on cancel. Loads that arrive while a drag is live are stashed
//! and applied when the session ends, so the board never changes under
//! the pointer.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sortable::{plan_commit, resolve, Board, HoverTarget, SortableContext};

use crate::commands::{self, UpdateTaskArgs};
use crate::context::AppContext;
use crate::models::Task;

type Stash = Rc<dyn Fn()>;

/// Reactive board shared by all columns of one view.
#[derive(Clone, Copy)]
pub struct BoardState {
    /// Task details by id, for card rendering.
    pub tasks: RwSignal<HashMap<u32, Task>>,
    /// Incomplete task ids per bucket, in visual order. Mutated
    /// optimistically while dragging.
    pub board: RwSignal<Board>,
    /// Completed task ids per bucket, rendered below the board lanes.
    pub completed: RwSignal<BTreeMap<String, Vec<u32>>>,
    /// Pre-drag arrangement, the diff base for the commit plan.
    snapshot: StoredValue<Option<Board>>,
    /// A load deferred until the current drag session ends.
    stashed: StoredValue<Option<Stash>, LocalStorage>,
}

pub fn create_board_state() -> BoardState {
    BoardState {
        tasks: RwSignal::new(HashMap::new()),
        board: RwSignal::new(Board::new()),
        completed: RwSignal::new(BTreeMap::new()),
        snapshot: StoredValue::new(None),
        stashed: StoredValue::new_local(None),
    }
}

impl BoardState {
    /// Replace the board from a backend load. `buckets` lists every lane
    /// the view shows; lanes with no tasks must still exist to accept
    /// drops. Deferred while a drag is live.
    pub fn load(&self, ctx: SortableContext, buckets: Vec<String>, tasks: Vec<Task>) {
        if ctx.dragging.get_untracked() {
            let state = *self;
            self.stashed.set_value(Some(Rc::new(move || {
                state.apply(buckets.clone(), tasks.clone());
            })));
            return;
        }
        self.apply(buckets, tasks);
    }

    fn apply(&self, buckets: Vec<String>, tasks: Vec<Task>) {
        let mut board = Board::new();
        let mut completed: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for key in &buckets {
            board.set_lane(key, Vec::new());
            completed.insert(key.clone(), Vec::new());
        }

        let mut lanes: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for task in &tasks {
            if !buckets.contains(&task.bucket) {
                continue;
            }
            if task.completed {
                completed.entry(task.bucket.clone()).or_default().push(task.id);
            } else {
                lanes.entry(task.bucket.clone()).or_default().push(task.id);
            }
        }
        for (key, ids) in lanes {
            board.set_lane(&key, ids);
        }

        self.tasks.set(tasks.into_iter().map(|t| (t.id, t)).collect());
        self.board.set(board);
        self.completed.set(completed);
    }

    fn flush_stashed(&self) {
        if let Some(apply) = self.stashed.try_update_value(|s| s.take()).flatten() {
            apply();
        }
    }

    /// Incomplete tasks of one lane, in board order.
    pub fn lane_tasks(&self, key: &str) -> Vec<Task> {
        let ids: Vec<u32> = self
            .board
            .with(|b| b.lane(key).map(|ids| ids.to_vec()).unwrap_or_default());
        self.tasks
            .with(|tasks| ids.iter().filter_map(|id| tasks.get(id).cloned()).collect())
    }

    /// Completed tasks of one lane.
    pub fn completed_tasks(&self, key: &str) -> Vec<Task> {
        let ids: Vec<u32> = self
            .completed
            .with(|c| c.get(key).cloned().unwrap_or_default());
        self.tasks
            .with(|tasks| ids.iter().filter_map(|id| tasks.get(id).cloned()).collect())
    }
}

/// Connect a drag context to the board: optimistic preview + persistence.
///
/// The resolver is a positional move, not idempotent, so each hover
/// target must be applied exactly once. Effects flush asynchronously;
/// `applied` remembers the last target folded into the board so the drop
/// path can settle any target the preview effect has not reached yet
/// without re-applying one it has.
pub fn wire_board(ctx: SortableContext, state: BoardState, app: AppContext) {
    let applied: StoredValue<HoverTarget> = StoredValue::new(HoverTarget::None);

    // Snapshot the arrangement the moment a drag lifts
    Effect::new(move |prev: Option<bool>| {
        let dragging = ctx.dragging.get();
        if dragging && prev != Some(true) {
            state
                .snapshot
                .set_value(Some(state.board.get_untracked()));
            applied.set_value(HoverTarget::None);
        }
        dragging
    });

    // Live preview: re-resolve whenever the hover target changes
    Effect::new(move |_| {
        let hover = ctx.hover.get();
        if !ctx.dragging.get_untracked() {
            return;
        }
        let Some(active) = ctx.active.get_untracked() else {
            return;
        };
        if applied.get_value() == hover {
            return;
        }
        applied.set_value(hover.clone());
        state.board.update(|board| {
            resolve(board, active, &hover);
        });
    });

    ctx.on_drop(move |item, target: HoverTarget| {
        if applied.get_value() != target {
            state.board.update(|board| {
                resolve(board, item, &target);
            });
        }
        applied.set_value(HoverTarget::None);

        let before = state
            .snapshot
            .try_update_value(|s| s.take())
            .flatten()
            .unwrap_or_else(|| state.board.get_untracked());
        let after = state.board.get_untracked();
        let writes = plan_commit(&before, &after, &state.completed.get_untracked());

        state.flush_stashed();
        if writes.is_empty() {
            return;
        }

        spawn_local(async move {
            let calls = writes.iter().map(|w| {
                let args = UpdateTaskArgs {
                    id: w.id,
                    sort_order: Some(w.order),
                    bucket: w.bucket.clone(),
                    ..Default::default()
                };
                async move { commands::update_task(&args).await }
            });
            for (write, result) in writes.iter().zip(futures::future::join_all(calls).await) {
                if let Err(e) = result {
                    web_sys::console::error_1(
                        &format!("Failed to persist order for task {}: {}", write.id, e).into(),
                    );
                }
            }
            app.reload();
        });
    });

    ctx.on_cancel(move || {
        applied.set_value(HoverTarget::None);
        if let Some(before) = state.snapshot.try_update_value(|s| s.take()).flatten() {
            state.board.set(before);
        }
        state.flush_stashed();
    });
}
