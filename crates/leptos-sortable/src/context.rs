//! Sortable context
//!
//! The owned, shareable drag state for one view tree. Every sortable list
//! that should participate in the same drag space (all seven day columns
//! of the week board, for instance) uses one context; independent contexts
//! never see each other's sessions. Provided via Leptos context by the
//! view that creates it, never stored globally.

use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;

use crate::geometry::{GeometryProvider, HoverTarget, Rect};
use crate::session::DragSession;

type DropHandler = Rc<dyn Fn(u32, HoverTarget)>;
type CancelHandler = Rc<dyn Fn()>;

/// Shared drag state plus the element registry used for hit-testing.
#[derive(Clone, Copy)]
pub struct SortableContext {
    pub(crate) session: RwSignal<DragSession>,
    /// Item being dragged, `None` outside the Dragging phase.
    pub active: RwSignal<Option<u32>>,
    /// Current hover target while dragging.
    pub hover: RwSignal<HoverTarget>,
    /// Pointer offset from the arming point.
    pub delta: RwSignal<(f64, f64)>,
    /// True for the Dragging phase only, for lifted/ghost styling.
    pub dragging: RwSignal<bool>,
    pub(crate) items: StoredValue<HashMap<u32, web_sys::Element>, LocalStorage>,
    pub(crate) containers: StoredValue<HashMap<String, web_sys::Element>, LocalStorage>,
    pub(crate) listeners: StoredValue<Option<crate::dom::SessionListeners>, LocalStorage>,
    pub(crate) scroll_lock: StoredValue<Option<crate::dom::ScrollLock>, LocalStorage>,
    pub(crate) drop_handler: StoredValue<Option<DropHandler>, LocalStorage>,
    pub(crate) cancel_handler: StoredValue<Option<CancelHandler>, LocalStorage>,
}

pub fn create_sortable_context() -> SortableContext {
    SortableContext {
        session: RwSignal::new(DragSession::new()),
        active: RwSignal::new(None),
        hover: RwSignal::new(HoverTarget::None),
        delta: RwSignal::new((0.0, 0.0)),
        dragging: RwSignal::new(false),
        items: StoredValue::new_local(HashMap::new()),
        containers: StoredValue::new_local(HashMap::new()),
        listeners: StoredValue::new_local(None),
        scroll_lock: StoredValue::new_local(None),
        drop_handler: StoredValue::new_local(None),
        cancel_handler: StoredValue::new_local(None),
    }
}

impl SortableContext {
    /// Called once with the committed (item, target) when a drag settles
    /// over a valid target.
    pub fn on_drop(&self, handler: impl Fn(u32, HoverTarget) + 'static) {
        self.drop_handler.set_value(Some(Rc::new(handler)));
    }

    /// Called when a drag ends anywhere else: released outside,
    /// pointer-cancelled, escape, teardown.
    pub fn on_cancel(&self, handler: impl Fn() + 'static) {
        self.cancel_handler.set_value(Some(Rc::new(handler)));
    }

    /// Abort any in-progress session and release every side effect.
    /// Safe to call from `on_cleanup`; a no-op when idle.
    pub fn cancel(&self) {
        crate::dom::cancel_session(*self);
    }

    /// Hit-test against the registered elements, bounds read live.
    /// The dragged item itself is transparent to the test: it follows the
    /// pointer, so it would otherwise shadow every other target.
    pub(crate) fn locate(&self, x: f64, y: f64) -> HoverTarget {
        let active = self.active.get_untracked();
        self.items.with_value(|items| {
            for (id, el) in items {
                if Some(*id) == active {
                    continue;
                }
                if dom_rect(el).contains(x, y) {
                    return HoverTarget::Item(*id);
                }
            }
            self.containers.with_value(|containers| {
                for (key, el) in containers {
                    if dom_rect(el).contains(x, y) {
                        return HoverTarget::Container(key.clone());
                    }
                }
                HoverTarget::None
            })
        })
    }
}

/// Adapter so the session machine sees the live DOM through the same
/// trait the tests drive with synthetic rects.
pub(crate) struct LiveBounds(pub(crate) SortableContext);

impl GeometryProvider for LiveBounds {
    fn locate(&self, x: f64, y: f64) -> HoverTarget {
        self.0.locate(x, y)
    }
}

fn dom_rect(el: &web_sys::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}
