// Gift line validation and per-item delta arithmetic

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::entities::{Event, GiftLine, InventoryItem, ItemDelta, SelectedGift, SkipReason, SkippedGift};
use crate::value_objects::InventoryId;

#[derive(Debug, Clone, Default)]
pub struct GiftSelection {
    pub lines: Vec<GiftLine>,
    pub skipped: Vec<SkippedGift>,
}

impl GiftSelection {
    /// Moves lines whose item vanished before its delta could be applied
    /// into the skip list.
    pub fn drop_missing(&mut self, selected: &[SelectedGift], missing: &BTreeSet<InventoryId>) {
        if missing.is_empty() {
            return;
        }
        let (kept, gone): (Vec<_>, Vec<_>) = self
            .lines
            .drain(..)
            .partition(|line| !missing.contains(&line.inventory_id));
        self.lines = kept;
        for line in gone {
            let index = selected
                .iter()
                .position(|gift| gift.inventory_id == line.inventory_id)
                .unwrap_or_default();
            self.skipped.push(SkippedGift {
                index,
                name: line.inventory_id.to_string(),
                reason: SkipReason::UnknownItem,
            });
        }
        self.skipped.sort_by_key(|skip| skip.index);
    }
}

/// Ids worth loading for a selection; blanks are left out.
pub fn referenced_ids(selected: &[SelectedGift]) -> Vec<InventoryId> {
    let mut ids = selected
        .iter()
        .filter(|gift| !gift.inventory_id.is_blank())
        .map(|gift| gift.inventory_id.clone())
        .collect::<Vec<_>>();
    ids.sort();
    ids.dedup();
    ids
}

/// Splits a client selection into applicable lines and skipped lines.
pub fn select_gifts(
    selected: &[SelectedGift],
    event: &Event,
    items: &HashMap<InventoryId, InventoryItem>,
) -> GiftSelection {
    select_with_held(selected, event, items, &BTreeSet::new())
}

/// Selection for replacing `held` on an existing record. Items the record
/// already holds stay eligible after being deactivated or reallocated; only
/// blank, unknown or non-positive lines are skipped for them.
pub fn select_edit_gifts(
    selected: &[SelectedGift],
    event: &Event,
    items: &HashMap<InventoryId, InventoryItem>,
    held: &[GiftLine],
) -> GiftSelection {
    let held = held
        .iter()
        .map(|line| line.inventory_id.clone())
        .collect::<BTreeSet<_>>();
    select_with_held(selected, event, items, &held)
}

fn select_with_held(
    selected: &[SelectedGift],
    event: &Event,
    items: &HashMap<InventoryId, InventoryItem>,
    held: &BTreeSet<InventoryId>,
) -> GiftSelection {
    let pool_id = event.pool_id();
    let mut selection = GiftSelection::default();
    for (index, gift) in selected.iter().enumerate() {
        if gift.inventory_id.is_blank() {
            selection.skipped.push(SkippedGift {
                index,
                name: String::new(),
                reason: SkipReason::BlankReference,
            });
            continue;
        }
        let Some(item) = items.get(&gift.inventory_id) else {
            selection.skipped.push(SkippedGift {
                index,
                name: gift.inventory_id.to_string(),
                reason: SkipReason::UnknownItem,
            });
            continue;
        };
        let reason = if gift.quantity <= 0 {
            Some(SkipReason::NonPositiveQuantity)
        } else if held.contains(&item.id) {
            None
        } else if !item.is_active {
            Some(SkipReason::Inactive)
        } else if &item.event_id != pool_id {
            Some(SkipReason::OutsidePool)
        } else if !item.is_drawable_by(&event.id, pool_id) {
            Some(SkipReason::NotAllocated)
        } else {
            None
        };
        if let Some(reason) = reason {
            selection.skipped.push(SkippedGift {
                index,
                name: item.display_name(),
                reason,
            });
            continue;
        }
        selection.lines.push(GiftLine {
            inventory_id: gift.inventory_id.clone(),
            quantity: gift.quantity,
            notes: gift.notes.clone(),
        });
    }
    selection
}

/// Drops stored lines whose item no longer resolves.
pub fn retain_resolvable(lines: &[GiftLine], items: &HashMap<InventoryId, InventoryItem>) -> Vec<GiftLine> {
    lines
        .iter()
        .filter(|line| !line.inventory_id.is_blank() && items.contains_key(&line.inventory_id))
        .cloned()
        .collect()
}

pub fn quantities_by_item(lines: &[GiftLine]) -> BTreeMap<InventoryId, i64> {
    let mut totals = BTreeMap::new();
    accumulate(&mut totals, lines, 1);
    totals
}

/// Adds `sign * quantity` for every line into `totals`.
pub fn accumulate(totals: &mut BTreeMap<InventoryId, i64>, lines: &[GiftLine], sign: i64) {
    for line in lines {
        *totals.entry(line.inventory_id.clone()).or_insert(0) += sign * line.quantity;
    }
}

/// Counter deltas for replacing `old` with `new`: units coming back minus units
/// going out, per item. Items whose quantity is unchanged are omitted.
pub fn net_edit_deltas(old: &[GiftLine], new: &[GiftLine]) -> Vec<ItemDelta> {
    let mut totals = BTreeMap::new();
    accumulate(&mut totals, old, 1);
    accumulate(&mut totals, new, -1);
    totals
        .into_iter()
        .filter(|(_, delta)| *delta != 0)
        .map(|(inventory_id, delta)| ItemDelta { inventory_id, delta })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: i64) -> GiftLine {
        GiftLine {
            inventory_id: InventoryId::from(id),
            quantity,
            notes: None,
        }
    }

    fn pool() -> (Event, Event, HashMap<InventoryId, InventoryItem>) {
        let main = Event::main("m", "Main");
        let side = Event::secondary("s", "Side", "m");
        let mut shared = InventoryItem::new("m", "tote", "canvas", 10);
        shared.id = InventoryId::from("shared");
        shared.allocated_events.insert(side.id.clone());
        let mut main_only = InventoryItem::new("m", "hat", "cap", 10);
        main_only.id = InventoryId::from("main-only");
        let mut foreign = InventoryItem::new("other", "mug", "", 10);
        foreign.id = InventoryId::from("foreign");
        let mut retired = InventoryItem::new("m", "pin", "", 10);
        retired.id = InventoryId::from("retired");
        retired.is_active = false;
        let items = [shared, main_only, foreign, retired]
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        (main, side, items)
    }

    #[test]
    fn secondary_event_skips_everything_it_cannot_draw() {
        let (_, side, items) = pool();
        let selected = vec![
            SelectedGift::new("", 1),
            SelectedGift::new("shared", 2),
            SelectedGift::new("main-only", 1),
            SelectedGift::new("foreign", 1),
            SelectedGift::new("ghost", 1),
            SelectedGift::new("retired", 1),
            SelectedGift::new("shared", 0),
        ];
        let selection = select_gifts(&selected, &side, &items);
        assert_eq!(selection.lines, vec![line("shared", 2)]);
        let reasons = selection
            .skipped
            .iter()
            .map(|skip| (skip.index, skip.reason))
            .collect::<Vec<_>>();
        assert_eq!(
            reasons,
            vec![
                (0, SkipReason::BlankReference),
                (2, SkipReason::NotAllocated),
                (3, SkipReason::OutsidePool),
                (4, SkipReason::UnknownItem),
                (5, SkipReason::Inactive),
                (6, SkipReason::NonPositiveQuantity),
            ]
        );
    }

    #[test]
    fn edit_keeps_held_items_that_lost_eligibility() {
        let (_, side, items) = pool();
        let held = vec![line("retired", 1), line("main-only", 2)];
        let selected = vec![
            SelectedGift::new("retired", 1),
            SelectedGift::new("main-only", 2),
            SelectedGift::new("foreign", 1),
            SelectedGift::new("retired", 0),
        ];
        let selection = select_edit_gifts(&selected, &side, &items, &held);
        assert_eq!(selection.lines, vec![line("retired", 1), line("main-only", 2)]);
        let reasons = selection
            .skipped
            .iter()
            .map(|skip| (skip.index, skip.reason))
            .collect::<Vec<_>>();
        assert_eq!(
            reasons,
            vec![(2, SkipReason::OutsidePool), (3, SkipReason::NonPositiveQuantity)]
        );
        assert!(net_edit_deltas(&held, &selection.lines).is_empty());
    }

    #[test]
    fn main_event_draws_without_allocation() {
        let (main, _, items) = pool();
        let selection = select_gifts(&[SelectedGift::new("main-only", 1)], &main, &items);
        assert_eq!(selection.lines.len(), 1);
        assert!(selection.skipped.is_empty());
    }

    #[test]
    fn referenced_ids_dedups_and_drops_blanks() {
        let ids = referenced_ids(&[
            SelectedGift::new("b", 1),
            SelectedGift::new(" ", 1),
            SelectedGift::new("a", 1),
            SelectedGift::new("b", 2),
        ]);
        assert_eq!(ids, vec![InventoryId::from("a"), InventoryId::from("b")]);
    }

    #[test]
    fn net_edit_deltas_return_old_minus_new() {
        let old = vec![line("a", 2), line("b", 1)];
        let new = vec![line("a", 3), line("c", 1), line("b", 1)];
        let deltas = net_edit_deltas(&old, &new);
        assert_eq!(
            deltas,
            vec![
                ItemDelta { inventory_id: InventoryId::from("a"), delta: -1 },
                ItemDelta { inventory_id: InventoryId::from("c"), delta: -1 },
            ]
        );
    }

    #[test]
    fn drop_missing_moves_vanished_lines_to_skipped() {
        let selected = vec![SelectedGift::new("a", 1), SelectedGift::new("b", 2)];
        let mut selection = GiftSelection {
            lines: vec![line("a", 1), line("b", 2)],
            skipped: Vec::new(),
        };
        let missing = BTreeSet::from([InventoryId::from("a")]);
        selection.drop_missing(&selected, &missing);
        assert_eq!(selection.lines, vec![line("b", 2)]);
        assert_eq!(selection.skipped.len(), 1);
        assert_eq!(selection.skipped[0].index, 0);
        assert_eq!(selection.skipped[0].reason, SkipReason::UnknownItem);
    }

    #[test]
    fn quantities_sum_repeated_lines() {
        let totals = quantities_by_item(&[line("a", 1), line("a", 2), line("b", 4)]);
        assert_eq!(totals.get(&InventoryId::from("a")), Some(&3));
        assert_eq!(totals.get(&InventoryId::from("b")), Some(&4));
    }
}
