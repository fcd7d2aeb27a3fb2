//! Drag session state machine
//!
//! Pure lifecycle of a single drag gesture:
//! `Idle -> Armed -> Dragging -> (drop | cancel) -> Idle`.
//!
//! A pointer-down over an item only arms the session; the drag proper
//! starts once the pointer has moved past [`DRAG_THRESHOLD_PX`], so plain
//! clicks never lift a card. All events from other pointer ids are ignored
//! for the session's duration.

use crate::geometry::{GeometryProvider, HoverTarget};

/// Movement threshold in pixels before an armed session starts dragging.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Armed {
        item: u32,
        pointer_id: i32,
        start_x: f64,
        start_y: f64,
    },
    Dragging {
        item: u32,
        pointer_id: i32,
        start_x: f64,
        start_y: f64,
        dx: f64,
        dy: f64,
        hover: HoverTarget,
    },
}

/// What a pointer event did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Nothing observable happened.
    None,
    /// Threshold crossed: the item is now visually lifted. Scroll locking
    /// and lifted styling hang off this.
    Lifted { item: u32, hover: HoverTarget },
    /// Pointer moved while dragging. `hover_changed` gates resolver calls.
    Moved {
        item: u32,
        hover: HoverTarget,
        hover_changed: bool,
    },
    /// Released over a valid target.
    Dropped { item: u32, target: HoverTarget },
    /// Released nowhere, pointer-cancelled, or explicitly cancelled.
    Cancelled,
}

/// One in-progress drag gesture. Owned by whoever wires the views together;
/// independent sessions never share state.
#[derive(Clone, Debug, Default)]
pub struct DragSession {
    phase: DragPhase,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The item being dragged (not merely armed).
    pub fn active_item(&self) -> Option<u32> {
        match &self.phase {
            DragPhase::Dragging { item, .. } => Some(*item),
            _ => None,
        }
    }

    pub fn hover(&self) -> HoverTarget {
        match &self.phase {
            DragPhase::Dragging { hover, .. } => hover.clone(),
            _ => HoverTarget::None,
        }
    }

    /// Pointer offset from the arming point, for the lifted transform.
    pub fn delta(&self) -> (f64, f64) {
        match &self.phase {
            DragPhase::Dragging { dx, dy, .. } => (*dx, *dy),
            _ => (0.0, 0.0),
        }
    }

    /// Arm the session. Only possible from `Idle`; pointer capture keeps a
    /// second gesture from arriving while one is active, but guard anyway.
    pub fn pointer_down(&mut self, item: u32, pointer_id: i32, x: f64, y: f64) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = DragPhase::Armed {
            item,
            pointer_id,
            start_x: x,
            start_y: y,
        };
        true
    }

    pub fn pointer_move(
        &mut self,
        pointer_id: i32,
        x: f64,
        y: f64,
        geometry: &dyn GeometryProvider,
    ) -> SessionEvent {
        match self.phase.clone() {
            DragPhase::Armed {
                item,
                pointer_id: pid,
                start_x,
                start_y,
            } if pid == pointer_id => {
                let distance = (x - start_x).hypot(y - start_y);
                if distance < DRAG_THRESHOLD_PX {
                    return SessionEvent::None;
                }
                let hover = geometry.locate(x, y);
                self.phase = DragPhase::Dragging {
                    item,
                    pointer_id: pid,
                    start_x,
                    start_y,
                    dx: x - start_x,
                    dy: y - start_y,
                    hover: hover.clone(),
                };
                SessionEvent::Lifted { item, hover }
            }
            DragPhase::Dragging {
                item,
                pointer_id: pid,
                start_x,
                start_y,
                hover: previous,
                ..
            } if pid == pointer_id => {
                let hover = geometry.locate(x, y);
                let hover_changed = hover != previous;
                self.phase = DragPhase::Dragging {
                    item,
                    pointer_id: pid,
                    start_x,
                    start_y,
                    dx: x - start_x,
                    dy: y - start_y,
                    hover: hover.clone(),
                };
                SessionEvent::Moved {
                    item,
                    hover,
                    hover_changed,
                }
            }
            _ => SessionEvent::None,
        }
    }

    pub fn pointer_up(&mut self, pointer_id: i32) -> SessionEvent {
        match self.phase.clone() {
            // Armed but never lifted: an ordinary click, let it through.
            DragPhase::Armed { pointer_id: pid, .. } if pid == pointer_id => {
                self.phase = DragPhase::Idle;
                SessionEvent::None
            }
            DragPhase::Dragging {
                item,
                pointer_id: pid,
                hover,
                ..
            } if pid == pointer_id => {
                self.phase = DragPhase::Idle;
                if hover.is_none() {
                    SessionEvent::Cancelled
                } else {
                    SessionEvent::Dropped { item, target: hover }
                }
            }
            _ => SessionEvent::None,
        }
    }

    /// Abort from anywhere: escape key, pointercancel, view teardown.
    pub fn cancel(&mut self) -> SessionEvent {
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Idle;
        if was_dragging {
            SessionEvent::Cancelled
        } else {
            SessionEvent::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, StaticBounds};

    fn bounds() -> StaticBounds {
        StaticBounds::new()
            .with_item(2, Rect::new(0.0, 40.0, 100.0, 40.0))
            .with_container("mon", Rect::new(0.0, 0.0, 100.0, 300.0))
    }

    #[test]
    fn small_movement_stays_armed() {
        let mut s = DragSession::new();
        assert!(s.pointer_down(1, 7, 10.0, 10.0));
        let ev = s.pointer_move(7, 13.0, 10.0, &bounds());
        assert_eq!(ev, SessionEvent::None);
        assert!(!s.is_dragging());
        // release without dragging is a click, not a cancel
        assert_eq!(s.pointer_up(7), SessionEvent::None);
        assert!(s.is_idle());
    }

    #[test]
    fn threshold_crossing_lifts_with_hover() {
        let mut s = DragSession::new();
        s.pointer_down(1, 7, 10.0, 10.0);
        let ev = s.pointer_move(7, 10.0, 60.0, &bounds());
        assert_eq!(
            ev,
            SessionEvent::Lifted {
                item: 1,
                hover: HoverTarget::Item(2)
            }
        );
        assert_eq!(s.active_item(), Some(1));
        assert_eq!(s.delta(), (0.0, 50.0));
    }

    #[test]
    fn hover_change_is_flagged_once() {
        let mut s = DragSession::new();
        s.pointer_down(1, 7, 10.0, 10.0);
        s.pointer_move(7, 10.0, 60.0, &bounds());
        let ev = s.pointer_move(7, 12.0, 62.0, &bounds());
        assert_eq!(
            ev,
            SessionEvent::Moved {
                item: 1,
                hover: HoverTarget::Item(2),
                hover_changed: false,
            }
        );
        let ev = s.pointer_move(7, 12.0, 200.0, &bounds());
        assert_eq!(
            ev,
            SessionEvent::Moved {
                item: 1,
                hover: HoverTarget::Container("mon".into()),
                hover_changed: true,
            }
        );
    }

    #[test]
    fn release_over_target_drops() {
        let mut s = DragSession::new();
        s.pointer_down(1, 7, 10.0, 10.0);
        s.pointer_move(7, 10.0, 60.0, &bounds());
        assert_eq!(
            s.pointer_up(7),
            SessionEvent::Dropped {
                item: 1,
                target: HoverTarget::Item(2)
            }
        );
        assert!(s.is_idle());
    }

    #[test]
    fn release_outside_everything_cancels() {
        let mut s = DragSession::new();
        s.pointer_down(1, 7, 10.0, 10.0);
        s.pointer_move(7, 500.0, 500.0, &bounds());
        assert_eq!(s.hover(), HoverTarget::None);
        assert_eq!(s.pointer_up(7), SessionEvent::Cancelled);
        assert!(s.is_idle());
    }

    #[test]
    fn foreign_pointer_ids_are_ignored() {
        let mut s = DragSession::new();
        s.pointer_down(1, 7, 10.0, 10.0);
        s.pointer_move(7, 10.0, 60.0, &bounds());
        assert_eq!(s.pointer_move(8, 0.0, 0.0, &bounds()), SessionEvent::None);
        assert_eq!(s.pointer_up(8), SessionEvent::None);
        assert!(s.is_dragging());
    }

    #[test]
    fn second_pointer_down_cannot_steal_the_session() {
        let mut s = DragSession::new();
        s.pointer_down(1, 7, 10.0, 10.0);
        assert!(!s.pointer_down(2, 9, 0.0, 0.0));
    }

    #[test]
    fn cancel_clears_everything() {
        let mut s = DragSession::new();
        s.pointer_down(1, 7, 10.0, 10.0);
        s.pointer_move(7, 10.0, 60.0, &bounds());
        assert_eq!(s.cancel(), SessionEvent::Cancelled);
        assert!(s.is_idle());
        assert_eq!(s.active_item(), None);
        assert_eq!(s.hover(), HoverTarget::None);
    }
}
