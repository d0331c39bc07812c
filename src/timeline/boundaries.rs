use time::macros::time;
use time::{Date, Duration, PrimitiveDateTime, Time};

use super::{ItemId, TimelineItem};

// Label value only; day membership compares calendar dates.
const END_OF_DAY: Time = time!(23:59:59.999);

pub fn start_of_day(date: Date) -> PrimitiveDateTime {
    date.with_time(Time::MIDNIGHT)
}

pub fn end_of_day(date: Date) -> PrimitiveDateTime {
    date.with_time(END_OF_DAY)
}

/// First and last item on one calendar day. Both are unset for an empty day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayBounds {
    pub first: Option<ItemId>,
    pub last: Option<ItemId>,
}

impl DayBounds {
    pub fn pair(&self) -> Option<(ItemId, ItemId)> {
        Some((self.first?, self.last?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

impl WeekBounds {
    pub fn monday(&self) -> Date {
        self.start.date()
    }

    pub fn sunday(&self) -> Date {
        self.end.date()
    }

    pub fn contains(&self, at: PrimitiveDateTime) -> bool {
        (self.monday()..=self.sunday()).contains(&at.date())
    }
}

/// Items with `start <= timestamp <= end`.
pub fn items_between(
    items: &[TimelineItem],
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> &[TimelineItem] {
    let lo = items.partition_point(|item| item.timestamp < start);
    let hi = items.partition_point(|item| item.timestamp <= end);
    if lo >= hi {
        return &[];
    }
    &items[lo..hi]
}

/// Items dated `first` through `last`, whatever their sub-second precision.
/// `items` must be sorted by timestamp.
pub fn items_on_dates(items: &[TimelineItem], first: Date, last: Date) -> &[TimelineItem] {
    let lo = items.partition_point(|item| item.date() < first);
    let hi = items.partition_point(|item| item.date() <= last);
    if lo >= hi {
        return &[];
    }
    &items[lo..hi]
}

pub fn items_on_day(date: Date, items: &[TimelineItem]) -> &[TimelineItem] {
    items_on_dates(items, date, date)
}

pub fn day_boundaries(date: Date, items: &[TimelineItem]) -> DayBounds {
    let on_day = items_on_day(date, items);
    DayBounds {
        first: on_day.first().map(|item| item.id),
        last: on_day.last().map(|item| item.id),
    }
}

pub fn week_boundaries(date: Date) -> WeekBounds {
    let weekday = i64::from(date.weekday().number_days_from_sunday());
    let back_to_monday = (weekday + 6) % 7;
    let monday = date.saturating_sub(Duration::days(back_to_monday));
    let sunday = monday.saturating_add(Duration::days(6));
    WeekBounds {
        start: start_of_day(monday),
        end: end_of_day(sunday),
    }
}

pub fn week_items(date: Date, items: &[TimelineItem]) -> &[TimelineItem] {
    let bounds = week_boundaries(date);
    items_on_dates(items, bounds.monday(), bounds.sunday())
}
