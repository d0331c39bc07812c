use time::Date;

use super::labels::{date_range, weekday_long};
use super::MeetingEntry;
use crate::selection::adjacent_day_pair;
use crate::timeline::{ItemKind, TimelineItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: Date,
    pub meetings: Vec<MeetingEntry>,
    pub tasks: usize,
    pub emails: usize,
    pub notes: usize,
}

impl DaySummary {
    fn collect(date: Date, items: &[TimelineItem]) -> Self {
        let mut summary = Self {
            date,
            meetings: Vec::new(),
            tasks: 0,
            emails: 0,
            notes: 0,
        };
        for item in items.iter().filter(|item| item.date() == date) {
            match &item.kind {
                ItemKind::Meeting(meeting) => summary.meetings.push(MeetingEntry::new(item, meeting)),
                ItemKind::Task(_) => summary.tasks += 1,
                ItemKind::Email(_) => summary.emails += 1,
                ItemKind::Note(_) => summary.notes += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoDayView {
    pub header: String,
    pub sub_header: String,
    /// "Look Back" column.
    pub earlier: DaySummary,
    /// "Look Ahead" column.
    pub later: DaySummary,
}

/// Side-by-side summary of two consecutive days, earlier day first. `None`
/// unless `items` cover exactly two adjacent calendar dates.
pub fn generate_two_day_view(items: &[TimelineItem]) -> Option<TwoDayView> {
    let (first, second) = adjacent_day_pair(items)?;
    Some(TwoDayView {
        header: format!("{} & {}", weekday_long(first), weekday_long(second)),
        sub_header: date_range(first, second),
        earlier: DaySummary::collect(first, items),
        later: DaySummary::collect(second, items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::fixtures::{email, meeting, note, task};
    use time::macros::{date, datetime};

    #[test]
    fn summarises_each_day_in_calendar_order() {
        let items = vec![
            meeting(1, datetime!(2025-07-03 09:00), "Design Sync", 2),
            email(2, datetime!(2025-07-03 10:00), "Hello", "a@example.com"),
            note(3, datetime!(2025-07-03 18:00), "Idea"),
            task(4, datetime!(2025-07-04 08:30), "Ship", datetime!(2025-07-05 09:00), false),
            email(5, datetime!(2025-07-04 09:00), "Re: Hello", "a@example.com"),
            email(6, datetime!(2025-07-04 11:00), "Invoice", "b@example.com"),
        ];
        let view = generate_two_day_view(&items).expect("adjacent days");
        assert_eq!(view.header, "Thursday & Friday");
        assert_eq!(view.sub_header, "Jul 3 - Jul 4, 2025");
        assert_eq!(view.earlier.date, date!(2025-07-03));
        assert_eq!(view.earlier.meetings.len(), 1);
        assert_eq!((view.earlier.tasks, view.earlier.emails, view.earlier.notes), (0, 1, 1));
        assert_eq!(view.later.date, date!(2025-07-04));
        assert!(view.later.meetings.is_empty());
        assert_eq!((view.later.tasks, view.later.emails, view.later.notes), (1, 2, 0));
    }

    #[test]
    fn month_boundary_pairs_are_adjacent() {
        let items = vec![
            note(1, datetime!(2025-06-30 09:00), "Mon"),
            note(2, datetime!(2025-07-01 09:00), "Tue"),
        ];
        let view = generate_two_day_view(&items).expect("adjacent days");
        assert_eq!(view.sub_header, "Jun 30 - Jul 1, 2025");
    }

    #[test]
    fn rejects_gaps_and_single_days() {
        let gap = vec![
            note(1, datetime!(2025-07-02 09:00), "Wed"),
            note(2, datetime!(2025-07-04 09:00), "Fri"),
        ];
        assert!(generate_two_day_view(&gap).is_none());
        let single = vec![note(1, datetime!(2025-07-02 09:00), "Wed")];
        assert!(generate_two_day_view(&single).is_none());
    }
}
