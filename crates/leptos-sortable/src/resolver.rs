//! Reorder / move resolution
//!
//! Pure logic: given the current multi-container arrangement, the dragged
//! item, and a hover target, compute the next arrangement. Unresolvable
//! inputs are no-ops; a live drag must never throw. No task id is ever
//! dropped or duplicated.

use std::collections::BTreeMap;

use crate::geometry::HoverTarget;

/// The draggable arrangement: for each bucket key, its incomplete task ids
/// in visual order. Completed tasks are not part of the board; they are
/// never drag sources or drop targets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    lanes: BTreeMap<String, Vec<u32>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bucket with its current ordering. Empty lanes must be
    /// registered too, or they cannot receive drops.
    pub fn set_lane(&mut self, key: &str, ids: Vec<u32>) {
        self.lanes.insert(key.to_string(), ids);
    }

    pub fn lane(&self, key: &str) -> Option<&[u32]> {
        self.lanes.get(key).map(|ids| ids.as_slice())
    }

    pub fn lanes(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.lanes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The bucket currently holding `id`.
    pub fn bucket_of(&self, id: u32) -> Option<&str> {
        self.lanes
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(key, _)| key.as_str())
    }

    fn position_of(&self, key: &str, id: u32) -> Option<usize> {
        self.lanes.get(key)?.iter().position(|&i| i == id)
    }
}

/// Apply a hover target to the board. Returns whether anything moved.
///
/// Same-container hits are a classic single-list move: remove at the
/// active index, reinsert at the hovered index. Cross-container hits
/// remove from the source lane and insert before the hovered item (the
/// deterministic boundary tie-break), or at the end when the hover is the
/// container itself.
pub fn resolve(board: &mut Board, active: u32, target: &HoverTarget) -> bool {
    let Some(source) = board.bucket_of(active).map(str::to_string) else {
        return false;
    };

    match target {
        HoverTarget::None => false,
        HoverTarget::Item(over) if *over == active => false,
        HoverTarget::Item(over) => {
            let Some(destination) = board.bucket_of(*over).map(str::to_string) else {
                return false;
            };
            if source == destination {
                let Some(from) = board.position_of(&source, active) else {
                    return false;
                };
                let Some(to) = board.position_of(&source, *over) else {
                    return false;
                };
                if from == to {
                    return false;
                }
                let Some(lane) = board.lanes.get_mut(&source) else {
                    return false;
                };
                let id = lane.remove(from);
                lane.insert(to, id);
            } else {
                let Some(from) = board.position_of(&source, active) else {
                    return false;
                };
                if let Some(lane) = board.lanes.get_mut(&source) {
                    lane.remove(from);
                }
                // index computed with the active item already gone
                let Some(lane) = board.lanes.get_mut(&destination) else {
                    return false;
                };
                let at = lane.iter().position(|&i| i == *over).unwrap_or(lane.len());
                lane.insert(at, active);
            }
            true
        }
        HoverTarget::Container(key) => {
            if !board.lanes.contains_key(key) {
                return false;
            }
            if source == *key {
                // hovering the lane's empty tail: treat as last position
                let Some(from) = board.position_of(&source, active) else {
                    return false;
                };
                let Some(lane) = board.lanes.get_mut(&source) else {
                    return false;
                };
                let to = lane.len() - 1;
                if from == to {
                    return false;
                }
                let id = lane.remove(from);
                lane.insert(to, id);
            } else {
                let Some(from) = board.position_of(&source, active) else {
                    return false;
                };
                if let Some(lane) = board.lanes.get_mut(&source) {
                    lane.remove(from);
                }
                if let Some(lane) = board.lanes.get_mut(key) {
                    lane.push(active);
                }
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(lanes: &[(&str, &[u32])]) -> Board {
        let mut b = Board::new();
        for (key, ids) in lanes {
            b.set_lane(key, ids.to_vec());
        }
        b
    }

    fn all_ids(b: &Board) -> Vec<u32> {
        let mut ids: Vec<u32> = b.lanes().flat_map(|(_, l)| l.iter().copied()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn same_lane_drop_on_later_item() {
        // Mon = [A=1, B=2, C=3], drag A over C
        let mut b = board(&[("mon", &[1, 2, 3])]);
        assert!(resolve(&mut b, 1, &HoverTarget::Item(3)));
        assert_eq!(b.lane("mon").unwrap(), &[2, 3, 1]);
    }

    #[test]
    fn same_lane_drop_on_earlier_item() {
        let mut b = board(&[("mon", &[1, 2, 3])]);
        assert!(resolve(&mut b, 3, &HoverTarget::Item(1)));
        assert_eq!(b.lane("mon").unwrap(), &[3, 1, 2]);
    }

    #[test]
    fn cross_lane_drop_on_item_inserts_before_it() {
        // Mon = [A=1, B=2], Tue = [C=3], drag B over C
        let mut b = board(&[("mon", &[1, 2]), ("tue", &[3])]);
        assert!(resolve(&mut b, 2, &HoverTarget::Item(3)));
        assert_eq!(b.lane("mon").unwrap(), &[1]);
        assert_eq!(b.lane("tue").unwrap(), &[2, 3]);
    }

    #[test]
    fn drop_into_empty_container() {
        // Mon = [A=1], drop over empty Wed
        let mut b = board(&[("mon", &[1]), ("wed", &[])]);
        assert!(resolve(&mut b, 1, &HoverTarget::Container("wed".into())));
        assert_eq!(b.lane("mon").unwrap(), &[] as &[u32]);
        assert_eq!(b.lane("wed").unwrap(), &[1]);
        assert_eq!(b.bucket_of(1), Some("wed"));
    }

    #[test]
    fn container_hit_appends_at_end() {
        let mut b = board(&[("mon", &[1]), ("tue", &[2, 3])]);
        assert!(resolve(&mut b, 1, &HoverTarget::Container("tue".into())));
        assert_eq!(b.lane("tue").unwrap(), &[2, 3, 1]);
    }

    #[test]
    fn own_container_tail_moves_to_last_position() {
        let mut b = board(&[("mon", &[1, 2, 3])]);
        assert!(resolve(&mut b, 1, &HoverTarget::Container("mon".into())));
        assert_eq!(b.lane("mon").unwrap(), &[2, 3, 1]);
    }

    #[test]
    fn only_item_over_own_empty_region_is_a_noop() {
        let mut b = board(&[("mon", &[1])]);
        assert!(!resolve(&mut b, 1, &HoverTarget::Container("mon".into())));
        assert_eq!(b.lane("mon").unwrap(), &[1]);
    }

    #[test]
    fn hover_over_self_is_a_noop() {
        let mut b = board(&[("mon", &[1, 2])]);
        assert!(!resolve(&mut b, 1, &HoverTarget::Item(1)));
        assert_eq!(b.lane("mon").unwrap(), &[1, 2]);
    }

    #[test]
    fn unknown_inputs_are_noops() {
        let mut b = board(&[("mon", &[1, 2])]);
        let before = b.clone();
        assert!(!resolve(&mut b, 99, &HoverTarget::Item(1)));
        assert!(!resolve(&mut b, 1, &HoverTarget::Item(99)));
        assert!(!resolve(&mut b, 1, &HoverTarget::Container("fri".into())));
        assert!(!resolve(&mut b, 1, &HoverTarget::None));
        assert_eq!(b, before);
    }

    #[test]
    fn container_drop_is_idempotent() {
        let mut b = board(&[("mon", &[1, 2]), ("tue", &[3])]);
        let target = HoverTarget::Container("tue".into());
        assert!(resolve(&mut b, 1, &target));
        let settled = b.clone();
        // same input against the applied result: indices already match
        assert!(!resolve(&mut b, 1, &target));
        assert_eq!(b, settled);
    }

    #[test]
    fn boundary_tie_break_is_deterministic() {
        // identical input always resolves to insert-before-hovered
        for _ in 0..3 {
            let mut b = board(&[("mon", &[1]), ("tue", &[2, 3])]);
            assert!(resolve(&mut b, 1, &HoverTarget::Item(2)));
            assert_eq!(b.lane("tue").unwrap(), &[1, 2, 3]);
        }
    }

    #[test]
    fn round_trip_restores_both_lanes() {
        // A -> B, then back to its original index in A
        let original = board(&[("mon", &[1, 2, 3]), ("tue", &[4])]);
        let mut b = original.clone();
        assert!(resolve(&mut b, 2, &HoverTarget::Item(4)));
        assert_eq!(b.lane("mon").unwrap(), &[1, 3]);
        assert_eq!(b.lane("tue").unwrap(), &[2, 4]);
        // reverse gesture: hover the item now occupying the old slot
        assert!(resolve(&mut b, 2, &HoverTarget::Item(3)));
        assert_eq!(b, original);
    }

    #[test]
    fn no_id_is_ever_dropped_or_duplicated() {
        let mut b = board(&[("mon", &[1, 2, 3]), ("tue", &[4, 5]), ("wed", &[])]);
        let ids = all_ids(&b);
        let targets = [
            HoverTarget::Item(4),
            HoverTarget::Container("wed".into()),
            HoverTarget::Item(1),
            HoverTarget::Container("mon".into()),
            HoverTarget::None,
        ];
        for target in &targets {
            resolve(&mut b, 3, target);
            assert_eq!(all_ids(&b), ids);
        }
    }
}
