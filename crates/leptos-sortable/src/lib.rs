//! Leptos Sortable
//!
//! Pointer-driven drag-and-drop reordering for Leptos lists, single- or
//! multi-container. A pointer-down on a registered item arms a session, a
//! small movement threshold distinguishes drags from clicks, and while
//! dragging the hovered item/container is re-resolved from live element
//! bounds on every move. The reorder logic itself is pure and lives in
//! [`resolver`]; commit planning (order rewrites per bucket) lives in
//! [`persist`].

mod geometry;
mod session;
mod resolver;
mod persist;

mod context;
mod dom;
mod sortable;

pub use geometry::{GeometryProvider, HoverTarget, Rect, StaticBounds};
pub use session::{DragPhase, DragSession, SessionEvent, DRAG_THRESHOLD_PX};
pub use resolver::{resolve, Board};
pub use persist::{plan_commit, OrderWrite};

pub use context::{create_sortable_context, SortableContext};
pub use sortable::{
    is_hovered_container, item_transform, make_on_pointerdown, register_container, register_item,
};
