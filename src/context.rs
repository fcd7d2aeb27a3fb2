//! Application Context
//!
//! Shared state provided via Leptos Context API.

use chrono::{Duration, NaiveDate};
use leptos::prelude::*;

/// Which board the main area shows
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewMode {
    Day,
    Week,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload tasks from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload tasks from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Whether the backend database finished initializing - read
    pub db_ready: ReadSignal<bool>,
    /// Whether the backend database finished initializing - write
    set_db_ready: WriteSignal<bool>,
    /// Current view mode - read
    pub view_mode: ReadSignal<ViewMode>,
    /// Current view mode - write
    set_view_mode: WriteSignal<ViewMode>,
    /// Date the visible day / week is anchored on - read
    pub anchor_date: ReadSignal<NaiveDate>,
    /// Date the visible day / week is anchored on - write
    set_anchor_date: WriteSignal<NaiveDate>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        db_ready: (ReadSignal<bool>, WriteSignal<bool>),
        view_mode: (ReadSignal<ViewMode>, WriteSignal<ViewMode>),
        anchor_date: (ReadSignal<NaiveDate>, WriteSignal<NaiveDate>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            db_ready: db_ready.0,
            set_db_ready: db_ready.1,
            view_mode: view_mode.0,
            set_view_mode: view_mode.1,
            anchor_date: anchor_date.0,
            set_anchor_date: anchor_date.1,
        }
    }

    /// Trigger a reload of tasks
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Mark the database as initialized
    pub fn mark_db_ready(&self) {
        self.set_db_ready.set(true);
    }

    pub fn set_view(&self, mode: ViewMode) {
        self.set_view_mode.set(mode);
    }

    pub fn set_anchor(&self, date: NaiveDate) {
        self.set_anchor_date.set(date);
    }

    /// Move the anchor forward or back by whole days
    pub fn shift_anchor(&self, days: i64) {
        self.set_anchor_date.update(|d| *d += Duration::days(days));
    }
}
