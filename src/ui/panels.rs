use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::config::Palette;
use crate::timeline::{ItemKind, Person, TimelineItem};
use crate::views::labels::{clock_time, date_time, short_date, weekday_short};
use crate::views::{DaySummary, DayView, GreetingView, MeetingEntry, WeekView};

const PENDING_TASKS_SHOWN: usize = 5;

fn heading(text: impl Into<String>, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: impl Into<String>, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(palette.muted)))
}

fn section(title: &str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(palette.marker)
            .add_modifier(Modifier::BOLD),
    ))
}

fn standout_lines(standouts: &[String], palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![section("What stands out", palette)];
    if standouts.is_empty() {
        lines.push(muted("  Nothing unusual.", palette));
    }
    for standout in standouts {
        lines.push(Line::from(vec![
            Span::styled("  ★ ", Style::default().fg(palette.standout)),
            Span::raw(standout.clone()),
        ]));
    }
    lines
}

fn meeting_line(entry: &MeetingEntry, with_day: bool) -> Line<'static> {
    let when = if with_day {
        format!("{} {}", weekday_short(entry.at.date()), clock_time(entry.at))
    } else {
        clock_time(entry.at)
    };
    let mut text = format!("  {when:>12}  {}", entry.title);
    if !entry.location.is_empty() {
        text.push_str(&format!(" ({})", entry.location));
    }
    Line::from(text)
}

pub fn greeting_text(view: &GreetingView, palette: &Palette) -> Text<'static> {
    let mut lines = vec![
        heading(view.greeting.clone(), palette),
        muted(date_time(view.now), palette),
        Line::from(""),
        section("Shortcuts", palette),
    ];
    for (label, keys) in view.shortcuts {
        lines.push(Line::from(vec![
            Span::raw(format!("  {label:<16}")),
            Span::styled(
                keys.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    Text::from(lines)
}

fn people(list: &[Person]) -> String {
    list.iter()
        .map(|person| person.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn single_item_text(item: &TimelineItem, palette: &Palette) -> Text<'static> {
    let mut lines = Vec::new();
    match &item.kind {
        ItemKind::Email(email) => {
            lines.push(heading(email.subject.clone(), palette));
            lines.push(Line::from(format!(
                "From: {} <{}>",
                email.from.name, email.from.email
            )));
            if !email.to.is_empty() {
                lines.push(Line::from(format!("To: {}", people(&email.to))));
            }
            lines.push(muted(date_time(item.timestamp), palette));
            lines.push(Line::from(""));
            lines.extend(email.body.lines().map(|line| Line::from(line.to_string())));
        }
        ItemKind::Meeting(meeting) => {
            lines.push(heading(meeting.title.clone(), palette));
            lines.push(muted(date_time(item.timestamp), palette));
            if !meeting.location.is_empty() {
                lines.push(Line::from(format!("Location: {}", meeting.location)));
            }
            lines.push(Line::from(""));
            lines.push(section("Attendees", palette));
            for person in &meeting.attendees {
                lines.push(Line::from(format!("  {} <{}>", person.name, person.email)));
            }
            if !meeting.description.is_empty() {
                lines.push(Line::from(""));
                lines.push(section("Notes", palette));
                lines.push(Line::from(format!("  {}", meeting.description)));
            }
        }
        ItemKind::Note(note) => {
            lines.push(heading(note.title.clone(), palette));
            lines.push(muted(date_time(item.timestamp), palette));
            if !note.tags.is_empty() {
                let tags = note
                    .tags
                    .iter()
                    .map(|tag| format!("#{tag}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(Line::from(Span::styled(
                    tags,
                    Style::default().fg(palette.marker),
                )));
            }
            lines.push(Line::from(""));
            lines.extend(note.content.lines().map(|line| Line::from(line.to_string())));
        }
        ItemKind::Task(task) => {
            let check = if task.completed { "[x]" } else { "[ ]" };
            lines.push(heading(format!("{check} {}", task.title), palette));
            lines.push(Line::from(format!("Due: {}", date_time(task.due))));
            lines.push(muted(format!("Created {}", date_time(item.timestamp)), palette));
            if !task.description.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(task.description.clone()));
            }
        }
    }
    Text::from(lines)
}

pub fn day_text(view: &DayView, palette: &Palette) -> Text<'static> {
    let mut lines = vec![
        heading(view.header.clone(), palette),
        muted(view.sub_header.clone(), palette),
        Line::from(""),
    ];
    lines.extend(standout_lines(&view.standouts, palette));
    lines.push(Line::from(""));
    lines.push(section("Calendar", palette));
    if view.calendar_events.is_empty() {
        lines.push(muted("  No meetings.", palette));
    }
    lines.extend(view.calendar_events.iter().map(|entry| meeting_line(entry, false)));
    lines.push(Line::from(""));
    lines.push(section("Activity", palette));
    lines.push(Line::from(format!(
        "  {} emails received · {} notes created · {} tasks completed",
        view.stats.emails_received, view.stats.notes_created, view.stats.tasks_completed
    )));
    Text::from(lines)
}

pub fn week_text(view: &WeekView, palette: &Palette) -> Text<'static> {
    let mut lines = vec![
        heading(view.header.clone(), palette),
        muted(view.sub_header.clone(), palette),
        Line::from(""),
    ];
    lines.extend(standout_lines(&view.standouts, palette));
    lines.push(Line::from(""));
    lines.push(section("Key meetings", palette));
    if view.key_meetings.is_empty() {
        lines.push(muted("  No key meetings.", palette));
    }
    lines.extend(view.key_meetings.iter().map(|entry| meeting_line(entry, true)));
    lines.push(Line::from(""));
    lines.push(section(
        &format!(
            "Tasks ({} pending, {} completed)",
            view.pending_tasks.len(),
            view.completed_tasks.len()
        ),
        palette,
    ));
    for task in view.pending_tasks.iter().take(PENDING_TASKS_SHOWN) {
        lines.push(Line::from(format!(
            "  [ ] {} (due {})",
            task.title,
            short_date(task.due.date())
        )));
    }
    if view.pending_tasks.len() > PENDING_TASKS_SHOWN {
        lines.push(muted(
            format!("  And {} more...", view.pending_tasks.len() - PENDING_TASKS_SHOWN),
            palette,
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "  {} emails · {} notes",
        view.stats.total_emails, view.stats.total_notes
    )));
    Text::from(lines)
}

pub fn day_summary_text(title: &str, summary: &DaySummary, palette: &Palette) -> Text<'static> {
    let mut lines = vec![
        section(title, palette),
        muted(short_date(summary.date), palette),
        Line::from(""),
    ];
    if summary.meetings.is_empty() {
        lines.push(muted("  No meetings.", palette));
    }
    lines.extend(summary.meetings.iter().map(|entry| meeting_line(entry, false)));
    lines.push(Line::from(""));
    lines.push(Line::from(format!("  {} tasks", summary.tasks)));
    lines.push(Line::from(format!("  {} emails", summary.emails)));
    lines.push(Line::from(format!("  {} notes", summary.notes)));
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::boundaries::week_boundaries;
    use crate::views::TaskEntry;
    use time::macros::{date, datetime};

    fn plain(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn week_text_folds_long_pending_lists() {
        let bounds = week_boundaries(date!(2025-07-02));
        let pending = (1..=7)
            .map(|id| TaskEntry {
                id,
                title: format!("Task {id}"),
                due: datetime!(2025-07-05 12:00),
                completed: false,
            })
            .collect();
        let view = WeekView {
            bounds,
            header: "This Week".to_string(),
            sub_header: "Jun 30 - Jul 6, 2025".to_string(),
            standouts: Vec::new(),
            key_meetings: Vec::new(),
            pending_tasks: pending,
            completed_tasks: Vec::new(),
            stats: Default::default(),
        };
        let lines = plain(&week_text(&view, &Palette::default()));
        assert!(lines.iter().any(|line| line == "  And 2 more..."));
        assert!(lines.iter().any(|line| line == "  [ ] Task 5 (due Jul 5, 2025)"));
        assert!(!lines.iter().any(|line| line.contains("Task 6")));
    }

    #[test]
    fn greeting_lists_every_shortcut() {
        let view = GreetingView::new("Ada", datetime!(2025-07-04 12:00));
        let lines = plain(&greeting_text(&view, &Palette::default()));
        assert_eq!(lines[0], "Hello, Ada!");
        assert!(lines.iter().any(|line| line.contains("Ctrl+B")));
        assert!(lines.iter().any(|line| line.contains("- / =")));
    }
}
