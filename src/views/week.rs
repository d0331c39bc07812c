use time::PrimitiveDateTime;

use super::labels::{date_range, long_month_day, weekday_short};
use super::{important_email_line, push_capped, MeetingEntry, StandoutRules, TaskEntry};
use crate::timeline::boundaries::WeekBounds;
use crate::timeline::{ItemKind, TimelineItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekStats {
    pub total_emails: usize,
    pub total_notes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView {
    pub bounds: WeekBounds,
    pub header: String,
    pub sub_header: String,
    pub standouts: Vec<String>,
    pub key_meetings: Vec<MeetingEntry>,
    pub pending_tasks: Vec<TaskEntry>,
    pub completed_tasks: Vec<TaskEntry>,
    pub stats: WeekStats,
}

pub fn generate_week_view(
    items: &[TimelineItem],
    bounds: WeekBounds,
    reference: PrimitiveDateTime,
    rules: &StandoutRules,
) -> WeekView {
    let mut standouts = Vec::new();
    let mut key_meetings = Vec::new();
    let mut pending_tasks = Vec::new();
    let mut completed_tasks = Vec::new();
    let mut stats = WeekStats::default();

    for item in items {
        match &item.kind {
            ItemKind::Meeting(meeting) => {
                if rules.is_key_meeting(meeting) {
                    key_meetings.push(MeetingEntry::new(item, meeting));
                    push_capped(
                        &mut standouts,
                        rules.week_limit,
                        format!(
                            "Key meeting: {} on {}",
                            meeting.title,
                            weekday_short(item.date())
                        ),
                    );
                }
            }
            ItemKind::Task(task) if task.completed => {
                completed_tasks.push(TaskEntry::new(item, task));
            }
            ItemKind::Task(task) => {
                pending_tasks.push(TaskEntry::new(item, task));
                if rules.is_priority_task(task) {
                    push_capped(
                        &mut standouts,
                        rules.week_limit,
                        format!("High-priority task: {}", task.title),
                    );
                }
            }
            ItemKind::Email(email) => {
                stats.total_emails += 1;
                if rules.is_important_email(email) {
                    push_capped(&mut standouts, rules.week_limit, important_email_line(email));
                }
            }
            ItemKind::Note(_) => stats.total_notes += 1,
        }
    }
    key_meetings.sort_by_key(|entry| entry.at);

    let header = if bounds.contains(reference) {
        "This Week".to_string()
    } else {
        format!("Week of {}", long_month_day(bounds.monday()))
    };

    WeekView {
        bounds,
        header,
        sub_header: date_range(bounds.monday(), bounds.sunday()),
        standouts,
        key_meetings,
        pending_tasks,
        completed_tasks,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::boundaries::week_boundaries;
    use crate::timeline::fixtures::{email, meeting, note, task};
    use time::macros::{date, datetime};

    fn generate(items: &[TimelineItem], reference: PrimitiveDateTime) -> WeekView {
        let bounds = week_boundaries(date!(2025-07-02));
        generate_week_view(items, bounds, reference, &StandoutRules::default())
    }

    #[test]
    fn header_depends_on_whether_reference_is_inside_the_week() {
        let current = generate(&[], datetime!(2025-07-06 23:00));
        assert_eq!(current.header, "This Week");
        assert_eq!(current.sub_header, "Jun 30 - Jul 6, 2025");
        let past = generate(&[], datetime!(2025-07-07 00:00));
        assert_eq!(past.header, "Week of June 30");
    }

    #[test]
    fn categorises_meetings_tasks_and_mail() {
        let items = vec![
            meeting(1, datetime!(2025-07-03 10:00), "Client Call: Acme", 2),
            meeting(2, datetime!(2025-06-30 09:00), "Offsite", 5),
            meeting(3, datetime!(2025-07-01 09:00), "Standup", 3),
            task(4, datetime!(2025-07-01 11:00), "Prepare slides", datetime!(2025-07-02 09:00), false),
            task(5, datetime!(2025-07-01 12:00), "Book flights", datetime!(2025-07-02 09:00), false),
            task(6, datetime!(2025-07-02 12:00), "Finalize budget", datetime!(2025-07-03 09:00), true),
            email(7, datetime!(2025-07-02 13:00), "Digest", "news@example.com"),
            note(8, datetime!(2025-07-02 14:00), "Grocery list"),
        ];
        let view = generate(&items, datetime!(2025-07-04 12:00));
        let key: Vec<_> = view.key_meetings.iter().map(|entry| entry.id).collect();
        assert_eq!(key, vec![2, 1]);
        assert_eq!(
            view.standouts,
            vec![
                "Key meeting: Client Call: Acme on Thu",
                "Key meeting: Offsite on Mon",
                "High-priority task: Prepare slides",
            ]
        );
        let pending: Vec<_> = view.pending_tasks.iter().map(|entry| entry.id).collect();
        assert_eq!(pending, vec![4, 5]);
        assert_eq!(view.completed_tasks.len(), 1);
        assert_eq!(
            view.stats,
            WeekStats {
                total_emails: 1,
                total_notes: 1,
            }
        );
    }

    #[test]
    fn standouts_cap_at_four() {
        let items: Vec<_> = (1..=6)
            .map(|id| email(id, datetime!(2025-07-01 09:00), "urgent", "a@example.com"))
            .collect();
        let view = generate(&items, datetime!(2025-07-04 12:00));
        assert_eq!(view.standouts.len(), 4);
        assert_eq!(view.stats.total_emails, 6);
    }
}
