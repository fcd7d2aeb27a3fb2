//! Sortable item / container wiring
//!
//! What a list view needs to participate in a drag space: register its
//! container and items with the context's geometry registry (deregistered
//! on unmount), arm the session from pointer-down, and read per-item
//! visual state. Pointer-downs on interactive controls inside a card
//! (buttons, inputs, links, anything marked `data-no-drag`) never arm a
//! drag; the control's own click behavior wins outright.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::SortableContext;
use crate::dom;

/// CSS selector for pointer-down targets that must not start a drag.
const DRAG_EXEMPT_SELECTOR: &str = "button, input, textarea, select, a, [data-no-drag]";

/// Track a draggable item's element for hit-testing. Registration follows
/// the node ref; the entry is removed when the owner is disposed.
pub fn register_item(ctx: SortableContext, id: u32, node_ref: NodeRef<Div>) {
    Effect::new(move |_| {
        if let Some(el) = node_ref.get() {
            let el: web_sys::Element = el.into();
            ctx.items.update_value(|items| {
                items.insert(id, el);
            });
        }
    });
    on_cleanup(move || {
        ctx.items.update_value(|items| {
            items.remove(&id);
        });
    });
}

/// Track a container's element, so empty space inside it is a drop target.
pub fn register_container(ctx: SortableContext, key: &str, node_ref: NodeRef<Div>) {
    let key = key.to_string();
    let cleanup_key = key.clone();
    Effect::new(move |_| {
        if let Some(el) = node_ref.get() {
            let el: web_sys::Element = el.into();
            let key = key.clone();
            ctx.containers.update_value(|containers| {
                containers.insert(key, el);
            });
        }
    });
    on_cleanup(move || {
        ctx.containers.update_value(|containers| {
            containers.remove(&cleanup_key);
        });
    });
}

/// Pointer-down handler that arms the drag session for `id`.
///
/// Primary button only. The pointer is captured so the session owns the
/// event stream until release, and no second gesture can start meanwhile.
pub fn make_on_pointerdown(
    ctx: SortableContext,
    id: u32,
) -> impl Fn(web_sys::PointerEvent) + Clone + 'static {
    move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
            if matches!(target.closest(DRAG_EXEMPT_SELECTOR), Ok(Some(_))) {
                return;
            }
        }
        let armed = ctx
            .session
            .try_update(|s| {
                s.pointer_down(id, ev.pointer_id(), ev.client_x() as f64, ev.client_y() as f64)
            })
            .unwrap_or(false);
        if !armed {
            return;
        }
        if let Some(el) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            let _ = el.set_pointer_capture(ev.pointer_id());
        }
        dom::attach_session_listeners(ctx);
    }
}

/// Translate transform for the lifted card; `None` for everything else.
/// Non-active items move by re-rendering from the optimistic order, which
/// is what leaves the placeholder gap at the prospective position.
pub fn item_transform(ctx: SortableContext, id: u32) -> Memo<Option<String>> {
    Memo::new(move |_| {
        if ctx.active.get() != Some(id) {
            return None;
        }
        let (dx, dy) = ctx.delta.get();
        Some(format!("translate({dx}px, {dy}px)"))
    })
}

/// Whether `key`'s empty region is the current drop target, for hover
/// highlighting on day columns.
pub fn is_hovered_container(ctx: SortableContext, key: &str) -> bool {
    matches!(ctx.hover.get(), crate::HoverTarget::Container(ref k) if k == key)
}
