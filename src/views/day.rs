use time::{Date, PrimitiveDateTime};

use super::labels::{short_date, weekday_long};
use super::{important_email_line, push_capped, MeetingEntry, StandoutRules};
use crate::timeline::{ItemKind, TimelineItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStats {
    pub emails_received: usize,
    pub notes_created: usize,
    pub tasks_completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: Date,
    pub header: String,
    pub sub_header: String,
    pub standouts: Vec<String>,
    /// Meetings in time order.
    pub calendar_events: Vec<MeetingEntry>,
    pub stats: DayStats,
}

pub fn generate_day_view(
    date: Date,
    items: &[TimelineItem],
    reference: PrimitiveDateTime,
    rules: &StandoutRules,
) -> DayView {
    let mut standouts = Vec::new();
    let mut calendar_events = Vec::new();
    let mut stats = DayStats::default();

    for item in items {
        match &item.kind {
            ItemKind::Meeting(meeting) => {
                calendar_events.push(MeetingEntry::new(item, meeting));
                if rules.is_group_meeting(meeting) {
                    push_capped(
                        &mut standouts,
                        rules.day_limit,
                        format!("Group meeting: {}", meeting.title),
                    );
                }
            }
            ItemKind::Task(task) => {
                if task.completed {
                    stats.tasks_completed += 1;
                } else if task.due.date() == date {
                    push_capped(
                        &mut standouts,
                        rules.day_limit,
                        format!("Due today: {}", task.title),
                    );
                }
            }
            ItemKind::Email(email) => {
                stats.emails_received += 1;
                if rules.is_important_email(email) {
                    push_capped(&mut standouts, rules.day_limit, important_email_line(email));
                }
            }
            ItemKind::Note(_) => stats.notes_created += 1,
        }
    }
    calendar_events.sort_by_key(|entry| entry.at);

    let header = if date == reference.date() {
        "Today".to_string()
    } else {
        weekday_long(date)
    };

    DayView {
        date,
        header,
        sub_header: short_date(date),
        standouts,
        calendar_events,
        stats,
    }
}
