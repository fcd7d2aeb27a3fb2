//! Window-level session wiring
//!
//! While a session is armed or dragging, pointermove / pointerup /
//! pointercancel / keydown listeners live on the window. They are
//! attached when a pointer-down arms the session and detached on every
//! exit path; the closures themselves are created once per context and
//! reused, so repeated drags never accumulate listeners. Body scroll is
//! locked for the Dragging phase only and restored unconditionally.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::context::{LiveBounds, SortableContext};
use crate::geometry::HoverTarget;
use crate::session::SessionEvent;

/// Pixels from the viewport edge where auto-scroll kicks in.
const AUTO_SCROLL_EDGE_PX: f64 = 48.0;
/// Scroll step per pointer-move event near an edge.
const AUTO_SCROLL_STEP_PX: f64 = 16.0;

pub(crate) struct SessionListeners {
    pointer_move: Closure<dyn FnMut(web_sys::PointerEvent)>,
    pointer_up: Closure<dyn FnMut(web_sys::PointerEvent)>,
    pointer_cancel: Closure<dyn FnMut(web_sys::PointerEvent)>,
    keydown: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
    attached: bool,
}

impl SessionListeners {
    fn new(ctx: SortableContext) -> Self {
        let pointer_move = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(
            move |ev: web_sys::PointerEvent| on_pointer_move(ctx, ev),
        );
        let pointer_up = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(
            move |ev: web_sys::PointerEvent| on_pointer_up(ctx, ev),
        );
        let pointer_cancel = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(
            move |_ev: web_sys::PointerEvent| cancel_session(ctx),
        );
        let keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Escape" {
                    cancel_session(ctx);
                }
            },
        );
        Self {
            pointer_move,
            pointer_up,
            pointer_cancel,
            keydown,
            attached: false,
        }
    }

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        if let Some(win) = web_sys::window() {
            let _ = win.add_event_listener_with_callback(
                "pointermove",
                self.pointer_move.as_ref().unchecked_ref(),
            );
            let _ = win.add_event_listener_with_callback(
                "pointerup",
                self.pointer_up.as_ref().unchecked_ref(),
            );
            let _ = win.add_event_listener_with_callback(
                "pointercancel",
                self.pointer_cancel.as_ref().unchecked_ref(),
            );
            let _ = win
                .add_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
            self.attached = true;
        }
    }

    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        if let Some(win) = web_sys::window() {
            let _ = win.remove_event_listener_with_callback(
                "pointermove",
                self.pointer_move.as_ref().unchecked_ref(),
            );
            let _ = win.remove_event_listener_with_callback(
                "pointerup",
                self.pointer_up.as_ref().unchecked_ref(),
            );
            let _ = win.remove_event_listener_with_callback(
                "pointercancel",
                self.pointer_cancel.as_ref().unchecked_ref(),
            );
            let _ = win.remove_event_listener_with_callback(
                "keydown",
                self.keydown.as_ref().unchecked_ref(),
            );
            self.attached = false;
        }
    }
}

/// Saved body styles, restored when the drag ends.
pub(crate) struct ScrollLock {
    overflow: String,
    touch_action: String,
    overscroll: String,
}

impl ScrollLock {
    fn acquire() -> Option<Self> {
        let body = web_sys::window()?.document()?.body()?;
        let style = body.style();
        let lock = Self {
            overflow: style.get_property_value("overflow").unwrap_or_default(),
            touch_action: style.get_property_value("touch-action").unwrap_or_default(),
            overscroll: style
                .get_property_value("overscroll-behavior")
                .unwrap_or_default(),
        };
        let _ = style.set_property("overflow", "hidden");
        let _ = style.set_property("touch-action", "none");
        let _ = style.set_property("overscroll-behavior", "none");
        Some(lock)
    }

    fn release(self) {
        let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body())
        else {
            return;
        };
        let style = body.style();
        let _ = style.set_property("overflow", &self.overflow);
        let _ = style.set_property("touch-action", &self.touch_action);
        let _ = style.set_property("overscroll-behavior", &self.overscroll);
    }
}

/// Arm-time hook: make sure the window listeners exist and are attached.
pub(crate) fn attach_session_listeners(ctx: SortableContext) {
    ctx.listeners.update_value(|slot| {
        if slot.is_none() {
            *slot = Some(SessionListeners::new(ctx));
        }
        if let Some(listeners) = slot.as_mut() {
            listeners.attach();
        }
    });
}

fn on_pointer_move(ctx: SortableContext, ev: web_sys::PointerEvent) {
    let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
    let event = ctx
        .session
        .try_update(|s| s.pointer_move(ev.pointer_id(), x, y, &LiveBounds(ctx)))
        .unwrap_or(SessionEvent::None);

    match event {
        SessionEvent::Lifted { item, hover } => {
            ctx.active.set(Some(item));
            ctx.hover.set(hover);
            ctx.delta.set((0.0, 0.0));
            ctx.dragging.set(true);
            ctx.scroll_lock.update_value(|slot| {
                if slot.is_none() {
                    *slot = ScrollLock::acquire();
                }
            });
        }
        SessionEvent::Moved { hover, hover_changed, .. } => {
            ctx.delta.set(ctx.session.with_untracked(|s| s.delta()));
            if hover_changed {
                ctx.hover.set(hover);
            }
            auto_scroll(y);
        }
        _ => {}
    }
}

fn on_pointer_up(ctx: SortableContext, ev: web_sys::PointerEvent) {
    let event = ctx
        .session
        .try_update(|s| s.pointer_up(ev.pointer_id()))
        .unwrap_or(SessionEvent::None);

    match event {
        SessionEvent::Dropped { item, target } => {
            release_session(ctx);
            if let Some(handler) = ctx.drop_handler.get_value() {
                handler(item, target);
            }
        }
        SessionEvent::Cancelled => {
            release_session(ctx);
            if let Some(handler) = ctx.cancel_handler.get_value() {
                handler();
            }
        }
        // Armed release (a click): listeners still need to go away.
        SessionEvent::None if ctx.session.with_untracked(|s| s.is_idle()) => {
            release_session(ctx);
        }
        _ => {}
    }
}

/// Abort from pointercancel, escape, or view teardown.
pub(crate) fn cancel_session(ctx: SortableContext) {
    let event = ctx.session.try_update(|s| s.cancel()).unwrap_or(SessionEvent::None);
    release_session(ctx);
    if event == SessionEvent::Cancelled {
        if let Some(handler) = ctx.cancel_handler.get_value() {
            handler();
        }
    }
}

/// Clear all transient state and undo every body-level side effect.
/// Runs on every exit path, success or failure.
fn release_session(ctx: SortableContext) {
    ctx.active.set(None);
    ctx.hover.set(HoverTarget::None);
    ctx.delta.set((0.0, 0.0));
    ctx.dragging.set(false);
    ctx.listeners.update_value(|slot| {
        if let Some(listeners) = slot.as_mut() {
            listeners.detach();
        }
    });
    ctx.scroll_lock.update_value(|slot| {
        if let Some(lock) = slot.take() {
            lock.release();
        }
    });
}

/// Nudge the viewport when the pointer nears the top or bottom edge.
fn auto_scroll(client_y: f64) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let height = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    if client_y < AUTO_SCROLL_EDGE_PX {
        win.scroll_by_with_x_and_y(0.0, -AUTO_SCROLL_STEP_PX);
    } else if height > 0.0 && client_y > height - AUTO_SCROLL_EDGE_PX {
        win.scroll_by_with_x_and_y(0.0, AUTO_SCROLL_STEP_PX);
    }
}
