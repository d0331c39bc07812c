use strum::Display;
use time::{Date, Duration, PrimitiveDateTime};

use super::{classify, Granularity, Selection};
use crate::timeline::boundaries::{day_boundaries, week_boundaries, week_items};
use crate::timeline::{ItemId, TimelineStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }

    fn shift_day(self, date: Date) -> Option<Date> {
        match self {
            Direction::Backward => date.previous_day(),
            Direction::Forward => date.next_day(),
        }
    }

    fn shift_week(self, date: Date) -> Option<Date> {
        match self {
            Direction::Backward => date.checked_sub(Duration::weeks(1)),
            Direction::Forward => date.checked_add(Duration::weeks(1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Plain click: the item becomes both anchor and focus.
pub fn select_item(id: ItemId) -> Selection {
    Selection::point(id)
}

/// Range-extending click: keeps the anchor and moves the focus. Without an
/// anchor this behaves like a plain click.
pub fn extend_to(selection: Selection, id: ItemId) -> Selection {
    match selection.anchor {
        Some(anchor) => Selection::span(anchor, id),
        None => select_item(id),
    }
}

pub fn move_selection(
    selection: Selection,
    store: &TimelineStore,
    reference: PrimitiveDateTime,
    direction: Direction,
) -> Selection {
    if selection.is_empty() {
        return match day_boundaries(reference.date(), store.items()).first {
            Some(first) => Selection::point(first),
            None => selection,
        };
    }
    let Some(range) = selection.range(store) else {
        return selection;
    };
    let Some(focus) = selection.focus.and_then(|id| store.item(id)) else {
        return selection;
    };

    let granularity = classify(&selection, store);
    let next = match granularity {
        Granularity::Single => store
            .rank_of(focus.id)
            .and_then(|rank| step_rank(rank, direction, store.len()))
            .and_then(|rank| store.get(rank))
            .map(|item| Selection::point(item.id)),
        Granularity::Day => next_populated_day(store, focus.date(), direction),
        Granularity::Week => next_populated_week(store, focus.date(), direction),
        Granularity::All | Granularity::Custom => {
            grow_edge(store, *range.start(), *range.end(), direction)
        }
    };

    match next {
        Some(next) => {
            tracing::debug!(
                %granularity,
                %direction,
                anchor = ?next.anchor,
                focus = ?next.focus,
                "moved selection"
            );
            next
        }
        None => {
            tracing::debug!(%granularity, %direction, "move reached the edge of the timeline");
            selection
        }
    }
}

pub fn zoom_selection(
    selection: Selection,
    store: &TimelineStore,
    direction: ZoomDirection,
) -> Selection {
    let Some(focus) = selection.focus.and_then(|id| store.item(id)) else {
        return selection;
    };
    let granularity = classify(&selection, store);
    let date = focus.date();
    let next = match (direction, granularity) {
        (ZoomDirection::In, Granularity::Day) => day_boundaries(date, store.items())
            .first
            .map(Selection::point),
        (ZoomDirection::In, Granularity::Week) => {
            day_span(store, week_boundaries(date).monday())
        }
        (ZoomDirection::In, Granularity::All) => store
            .first()
            .and_then(|first| week_span(store, first.date())),
        (ZoomDirection::In, Granularity::Single | Granularity::Custom) => None,
        (ZoomDirection::Out, Granularity::Single | Granularity::Custom) => {
            day_span(store, date)
        }
        (ZoomDirection::Out, Granularity::Day) => week_span(store, date),
        (ZoomDirection::Out, Granularity::Week) => match (store.first(), store.last()) {
            (Some(first), Some(last)) => Some(Selection::span(first.id, last.id)),
            _ => None,
        },
        (ZoomDirection::Out, Granularity::All) => None,
    };

    match next {
        Some(next) => {
            tracing::debug!(
                %granularity,
                zoom = %direction,
                anchor = ?next.anchor,
                focus = ?next.focus,
                "zoomed selection"
            );
            next
        }
        None => selection,
    }
}

fn step_rank(rank: usize, direction: Direction, len: usize) -> Option<usize> {
    rank.checked_add_signed(direction.step())
        .filter(|next| *next < len)
}

fn day_span(store: &TimelineStore, date: Date) -> Option<Selection> {
    day_boundaries(date, store.items())
        .pair()
        .map(|(first, last)| Selection::span(first, last))
}

fn week_span(store: &TimelineStore, date: Date) -> Option<Selection> {
    let items = week_items(date, store.items());
    Some(Selection::span(items.first()?.id, items.last()?.id))
}

fn next_populated_day(store: &TimelineStore, from: Date, direction: Direction) -> Option<Selection> {
    let (earliest, latest) = store.date_span()?;
    let mut date = direction.shift_day(from)?;
    while date >= earliest && date <= latest {
        if let Some(span) = day_span(store, date) {
            return Some(span);
        }
        date = direction.shift_day(date)?;
    }
    None
}

fn next_populated_week(
    store: &TimelineStore,
    from: Date,
    direction: Direction,
) -> Option<Selection> {
    let (earliest, latest) = store.date_span()?;
    let mut monday = direction.shift_week(week_boundaries(from).monday())?;
    loop {
        let week = week_boundaries(monday);
        if week.sunday() < earliest || week.monday() > latest {
            return None;
        }
        let items = week_items(monday, store.items());
        if let (Some(first), Some(last)) = (items.first(), items.last()) {
            return Some(Selection::span(first.id, last.id));
        }
        monday = direction.shift_week(monday)?;
    }
}

/// Pushes the range edge facing `direction` one rank outward. The opposite
/// edge becomes the anchor and the moved edge the focus.
fn grow_edge(
    store: &TimelineStore,
    lo: usize,
    hi: usize,
    direction: Direction,
) -> Option<Selection> {
    let (fixed, moving) = match direction {
        Direction::Forward => (lo, hi),
        Direction::Backward => (hi, lo),
    };
    let next = step_rank(moving, direction, store.len())?;
    Some(Selection::span(store.get(fixed)?.id, store.get(next)?.id))
}
