use std::collections::{BTreeSet, HashSet};
use std::ops::RangeInclusive;

use strum::Display;
use time::Date;

use crate::timeline::boundaries::{items_on_day, week_boundaries, week_items, WeekBounds};
use crate::timeline::{ItemId, TimelineItem, TimelineStore};

pub mod navigation;

pub use navigation::{
    extend_to, move_selection, select_item, zoom_selection, Direction, ZoomDirection,
};

/// Anchor/focus pair of item ids. The selected range is every item between
/// the two ranks, inclusive, in either order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Option<ItemId>,
    pub focus: Option<ItemId>,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn point(id: ItemId) -> Self {
        Self {
            anchor: Some(id),
            focus: Some(id),
        }
    }

    pub fn span(anchor: ItemId, focus: ItemId) -> Self {
        Self {
            anchor: Some(anchor),
            focus: Some(focus),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() || self.focus.is_none()
    }

    /// Rank range covered by the selection, `None` when empty.
    pub fn range(&self, store: &TimelineStore) -> Option<RangeInclusive<usize>> {
        let (anchor, focus) = (self.anchor?, self.focus?);
        let (Some(a), Some(f)) = (store.rank_of(anchor), store.rank_of(focus)) else {
            tracing::error!(anchor, focus, "selection references an item missing from the store");
            return None;
        };
        Some(a.min(f)..=a.max(f))
    }

    pub fn selected_items<'s>(&self, store: &'s TimelineStore) -> &'s [TimelineItem] {
        match self.range(store) {
            Some(range) => &store.items()[range],
            None => &[],
        }
    }

    pub fn selected_ids(&self, store: &TimelineStore) -> Vec<ItemId> {
        self.selected_items(store).iter().map(|item| item.id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Granularity {
    Single,
    Day,
    Week,
    All,
    Custom,
}

pub fn classify(selection: &Selection, store: &TimelineStore) -> Granularity {
    classify_items(selection.selected_items(store), store)
}

/// Classifies an arbitrary identifier set, taking items in store order.
pub fn classify_ids(ids: &[ItemId], store: &TimelineStore) -> Granularity {
    let wanted: HashSet<ItemId> = ids.iter().copied().collect();
    let selected: Vec<TimelineItem> = store
        .items()
        .iter()
        .filter(|item| wanted.contains(&item.id))
        .cloned()
        .collect();
    if selected.len() != wanted.len() {
        tracing::error!(
            requested = wanted.len(),
            found = selected.len(),
            "classifying ids that are not all present in the store"
        );
    }
    classify_items(&selected, store)
}

fn classify_items(selected: &[TimelineItem], store: &TimelineStore) -> Granularity {
    let Some(first) = selected.first() else {
        return Granularity::Custom;
    };
    if selected.len() == 1 {
        return Granularity::Single;
    }
    if selected.len() == store.len() {
        return Granularity::All;
    }
    if same_ids(week_items(first.date(), store.items()), selected) {
        return Granularity::Week;
    }
    if same_ids(items_on_day(first.date(), store.items()), selected) {
        return Granularity::Day;
    }
    Granularity::Custom
}

fn same_ids(block: &[TimelineItem], selected: &[TimelineItem]) -> bool {
    if block.len() != selected.len() {
        return false;
    }
    let block_ids: HashSet<ItemId> = block.iter().map(|item| item.id).collect();
    selected.iter().all(|item| block_ids.contains(&item.id))
}

/// What the main panel shows for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Greeting,
    SingleItem(ItemId),
    Day(Date),
    TwoDay(Date, Date),
    Week(WeekBounds),
}

pub fn resolve_view(selection: &Selection, store: &TimelineStore) -> (Granularity, ViewKind) {
    let selected = selection.selected_items(store);
    let granularity = classify_items(selected, store);
    let kind = match (granularity, selected.first()) {
        (Granularity::Single, Some(item)) => ViewKind::SingleItem(item.id),
        (Granularity::Day, Some(item)) => ViewKind::Day(item.date()),
        (Granularity::Week, Some(item)) => ViewKind::Week(week_boundaries(item.date())),
        (Granularity::Custom, Some(_)) => match adjacent_day_pair(selected) {
            Some((earlier, later)) => ViewKind::TwoDay(earlier, later),
            None => ViewKind::Greeting,
        },
        _ => ViewKind::Greeting,
    };
    (granularity, kind)
}

/// The two calendar dates covered by `items` when there are exactly two and
/// they are consecutive, earlier first.
pub fn adjacent_day_pair(items: &[TimelineItem]) -> Option<(Date, Date)> {
    let days: BTreeSet<Date> = items.iter().map(TimelineItem::date).collect();
    let mut iter = days.into_iter();
    let (earlier, later) = (iter.next()?, iter.next()?);
    if iter.next().is_some() || earlier.next_day() != Some(later) {
        return None;
    }
    Some((earlier, later))
}
