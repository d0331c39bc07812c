use regex::Regex;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::selection::ViewKind;
use crate::timeline::{Email, ItemId, Meeting, Task, TimelineItem, TimelineStore};

pub mod day;
pub mod keywords;
pub mod labels;
pub mod two_day;
pub mod week;

pub use day::{generate_day_view, DayStats, DayView};
pub use two_day::{generate_two_day_view, DaySummary, TwoDayView};
pub use week::{generate_week_view, WeekStats, WeekView};

use keywords::build_keyword_regex;

/// Tunable standout heuristics as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandoutConfig {
    pub urgent_markers: Vec<String>,
    pub client_domains: Vec<String>,
    pub priority_keywords: Vec<String>,
    pub key_meeting_keywords: Vec<String>,
    /// A day meeting stands out above this many attendees.
    pub day_group_attendees: usize,
    /// A week meeting is key above this many attendees.
    pub week_key_attendees: usize,
    pub day_limit: usize,
    pub week_limit: usize,
}

impl Default for StandoutConfig {
    fn default() -> Self {
        Self {
            urgent_markers: vec!["urgent".to_string()],
            client_domains: vec!["client.com".to_string()],
            priority_keywords: vec!["finalize".to_string(), "prepare".to_string()],
            key_meeting_keywords: vec!["client".to_string()],
            day_group_attendees: 2,
            week_key_attendees: 3,
            day_limit: 3,
            week_limit: 4,
        }
    }
}

/// Compiled form of [`StandoutConfig`].
#[derive(Debug, Clone)]
pub struct StandoutRules {
    urgent: Option<Regex>,
    client_domains: Vec<String>,
    priority: Option<Regex>,
    key_meeting: Option<Regex>,
    pub day_group_attendees: usize,
    pub week_key_attendees: usize,
    pub day_limit: usize,
    pub week_limit: usize,
}

impl Default for StandoutRules {
    fn default() -> Self {
        Self::from_config(&StandoutConfig::default())
    }
}

impl StandoutRules {
    pub fn from_config(config: &StandoutConfig) -> Self {
        Self {
            urgent: build_keyword_regex(&config.urgent_markers),
            client_domains: config
                .client_domains
                .iter()
                .map(|domain| domain.trim().trim_start_matches('@').to_ascii_lowercase())
                .filter(|domain| !domain.is_empty())
                .collect(),
            priority: build_keyword_regex(&config.priority_keywords),
            key_meeting: build_keyword_regex(&config.key_meeting_keywords),
            day_group_attendees: config.day_group_attendees,
            week_key_attendees: config.week_key_attendees,
            day_limit: config.day_limit,
            week_limit: config.week_limit,
        }
    }

    /// Urgent subject, or a sender at a client domain (subdomains included).
    pub fn is_important_email(&self, email: &Email) -> bool {
        let urgent = self
            .urgent
            .as_ref()
            .is_some_and(|regex| regex.is_match(&email.subject));
        urgent || self.is_client_sender(email)
    }

    fn is_client_sender(&self, email: &Email) -> bool {
        let Some(domain) = email.from.domain() else {
            return false;
        };
        let domain = domain.to_ascii_lowercase();
        self.client_domains.iter().any(|client| {
            domain == *client
                || domain
                    .strip_suffix(client.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }

    pub fn is_priority_task(&self, task: &Task) -> bool {
        self.priority
            .as_ref()
            .is_some_and(|regex| regex.is_match(&task.title))
    }

    pub fn is_key_meeting(&self, meeting: &Meeting) -> bool {
        meeting.attendees.len() > self.week_key_attendees
            || self
                .key_meeting
                .as_ref()
                .is_some_and(|regex| regex.is_match(&meeting.title))
    }

    pub fn is_group_meeting(&self, meeting: &Meeting) -> bool {
        meeting.attendees.len() > self.day_group_attendees
    }
}

pub(crate) fn important_email_line(email: &Email) -> String {
    format!(
        "Important email from {}: \"{}\"",
        email.from.name, email.subject
    )
}

/// Appends `line` unless `list` already holds `limit` entries.
pub(crate) fn push_capped(list: &mut Vec<String>, limit: usize, line: String) {
    if list.len() < limit {
        list.push(line);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingEntry {
    pub id: ItemId,
    pub at: PrimitiveDateTime,
    pub title: String,
    pub location: String,
    pub attendees: usize,
}

impl MeetingEntry {
    pub(crate) fn new(item: &TimelineItem, meeting: &Meeting) -> Self {
        Self {
            id: item.id,
            at: item.timestamp,
            title: meeting.title.clone(),
            location: meeting.location.clone(),
            attendees: meeting.attendees.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub id: ItemId,
    pub title: String,
    pub due: PrimitiveDateTime,
    pub completed: bool,
}

impl TaskEntry {
    pub(crate) fn new(item: &TimelineItem, task: &Task) -> Self {
        Self {
            id: item.id,
            title: task.title.clone(),
            due: task.due,
            completed: task.completed,
        }
    }
}

pub const SHORTCUTS: [(&str, &str); 3] = [
    ("Move", "↑ / ↓"),
    ("Zoom", "- / ="),
    ("Open timeline", "Ctrl+B"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingView {
    pub greeting: String,
    pub now: PrimitiveDateTime,
    pub shortcuts: &'static [(&'static str, &'static str)],
}

impl GreetingView {
    pub fn new(user_name: &str, now: PrimitiveDateTime) -> Self {
        Self {
            greeting: format!("Hello, {user_name}!"),
            now,
            shortcuts: &SHORTCUTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    Greeting(GreetingView),
    SingleItem(TimelineItem),
    Day(DayView),
    TwoDay(TwoDayView),
    Week(WeekView),
}

/// Renderer-facing model for a resolved view. `selected` must be the
/// selection's item slice.
pub fn build_view_model(
    kind: ViewKind,
    selected: &[TimelineItem],
    store: &TimelineStore,
    reference: PrimitiveDateTime,
    rules: &StandoutRules,
    user_name: &str,
) -> ViewModel {
    let greeting = || ViewModel::Greeting(GreetingView::new(user_name, reference));
    match kind {
        ViewKind::Greeting => greeting(),
        ViewKind::SingleItem(id) => match store.item(id) {
            Some(item) => ViewModel::SingleItem(item.clone()),
            None => {
                tracing::error!(id, "single-item view for an id missing from the store");
                greeting()
            }
        },
        ViewKind::Day(date) => {
            ViewModel::Day(generate_day_view(date, selected, reference, rules))
        }
        ViewKind::TwoDay(..) => match generate_two_day_view(selected) {
            Some(view) => ViewModel::TwoDay(view),
            None => greeting(),
        },
        ViewKind::Week(bounds) => {
            ViewModel::Week(generate_week_view(selected, bounds, reference, rules))
        }
    }
}
