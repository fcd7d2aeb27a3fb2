//! Commit planning
//!
//! Turns a settled drag (pre-drag board vs. resolved board) into the flat
//! list of repository writes that restore the ordering invariant: every
//! touched bucket is renumbered 1..N contiguously, and an item that
//! changed buckets also gets its new bucket key. Issuing the writes is the
//! caller's job; each write is independent and keyed by task id, so the
//! bucket change and the renumber passes can land in any order.

use std::collections::BTreeMap;

use crate::resolver::Board;

/// One `update task` call to make against the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderWrite {
    pub id: u32,
    pub order: i32,
    /// Set when the task moved to a different bucket.
    pub bucket: Option<String>,
}

/// Plan the writes for a committed drag.
///
/// `completed` holds each bucket's completed task ids; they are not part
/// of the board but share its numbering, appended after the incomplete
/// run so they stay at the bottom. Untouched buckets produce no writes.
pub fn plan_commit(
    before: &Board,
    after: &Board,
    completed: &BTreeMap<String, Vec<u32>>,
) -> Vec<OrderWrite> {
    let mut writes = Vec::new();

    for (key, lane) in after.lanes() {
        if before.lane(key) == Some(lane) {
            continue;
        }

        let mut order = 0;
        for &id in lane {
            order += 1;
            let moved_in = before.bucket_of(id) != Some(key);
            writes.push(OrderWrite {
                id,
                order,
                bucket: moved_in.then(|| key.to_string()),
            });
        }
        for &id in completed.get(key).map(Vec::as_slice).unwrap_or(&[]) {
            order += 1;
            writes.push(OrderWrite {
                id,
                order,
                bucket: None,
            });
        }
    }

    writes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HoverTarget;
    use crate::resolver::resolve;

    fn board(lanes: &[(&str, &[u32])]) -> Board {
        let mut b = Board::new();
        for (key, ids) in lanes {
            b.set_lane(key, ids.to_vec());
        }
        b
    }

    #[test]
    fn same_bucket_reorder_renumbers_one_bucket() {
        let before = board(&[("mon", &[1, 2, 3]), ("tue", &[4])]);
        let mut after = before.clone();
        assert!(resolve(&mut after, 1, &HoverTarget::Item(3)));

        let writes = plan_commit(&before, &after, &BTreeMap::new());
        assert_eq!(
            writes,
            vec![
                OrderWrite { id: 2, order: 1, bucket: None },
                OrderWrite { id: 3, order: 2, bucket: None },
                OrderWrite { id: 1, order: 3, bucket: None },
            ]
        );
    }

    #[test]
    fn cross_bucket_move_rewrites_both_sides() {
        // Mon = [A=1, B=2], Tue = [C=3]; drag B over C
        let before = board(&[("mon", &[1, 2]), ("tue", &[3])]);
        let mut after = before.clone();
        assert!(resolve(&mut after, 2, &HoverTarget::Item(3)));

        let writes = plan_commit(&before, &after, &BTreeMap::new());
        assert_eq!(
            writes,
            vec![
                OrderWrite { id: 1, order: 1, bucket: None },
                OrderWrite { id: 2, order: 1, bucket: Some("tue".into()) },
                OrderWrite { id: 3, order: 2, bucket: None },
            ]
        );
    }

    #[test]
    fn move_into_empty_bucket() {
        let before = board(&[("mon", &[1]), ("wed", &[])]);
        let mut after = before.clone();
        assert!(resolve(&mut after, 1, &HoverTarget::Container("wed".into())));

        let writes = plan_commit(&before, &after, &BTreeMap::new());
        assert_eq!(
            writes,
            vec![OrderWrite { id: 1, order: 1, bucket: Some("wed".into()) }]
        );
    }

    #[test]
    fn scheduling_from_backlog_rewrites_both_lanes() {
        let before = board(&[("2026-08-24", &[5]), ("backlog", &[8, 9])]);
        let mut after = before.clone();
        assert!(resolve(&mut after, 8, &HoverTarget::Item(5)));

        let writes = plan_commit(&before, &after, &BTreeMap::new());
        assert_eq!(
            writes,
            vec![
                OrderWrite { id: 8, order: 1, bucket: Some("2026-08-24".into()) },
                OrderWrite { id: 5, order: 2, bucket: None },
                OrderWrite { id: 9, order: 1, bucket: None },
            ]
        );
    }

    #[test]
    fn completed_tail_shares_the_numbering() {
        let before = board(&[("mon", &[1, 2])]);
        let mut after = before.clone();
        assert!(resolve(&mut after, 1, &HoverTarget::Item(2)));

        let mut completed = BTreeMap::new();
        completed.insert("mon".to_string(), vec![9, 10]);

        let writes = plan_commit(&before, &after, &completed);
        assert_eq!(
            writes,
            vec![
                OrderWrite { id: 2, order: 1, bucket: None },
                OrderWrite { id: 1, order: 2, bucket: None },
                OrderWrite { id: 9, order: 3, bucket: None },
                OrderWrite { id: 10, order: 4, bucket: None },
            ]
        );
    }

    #[test]
    fn identical_boards_plan_nothing() {
        let b = board(&[("mon", &[1, 2]), ("tue", &[3])]);
        assert!(plan_commit(&b, &b.clone(), &BTreeMap::new()).is_empty());
    }

    #[test]
    fn renumbering_is_gapless_per_bucket() {
        let before = board(&[("mon", &[1, 2, 3, 4]), ("tue", &[5])]);
        let mut after = before.clone();
        resolve(&mut after, 3, &HoverTarget::Item(5));

        let writes = plan_commit(&before, &after, &BTreeMap::new());
        for (key, lane) in after.lanes() {
            let orders: Vec<i32> = lane
                .iter()
                .map(|id| {
                    writes
                        .iter()
                        .find(|w| w.id == *id)
                        .map(|w| w.order)
                        .expect("every touched id gets a write")
                })
                .collect();
            let expected: Vec<i32> = (1..=lane.len() as i32).collect();
            assert_eq!(orders, expected, "bucket {key}");
        }
    }
}
