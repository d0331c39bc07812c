use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use time::macros::time;
use time::{Date, Duration, PrimitiveDateTime, Time, Weekday};

use super::{Email, ItemId, ItemKind, Meeting, Note, Person, Task, TimelineItem};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    pub seed: u64,
    /// Days generated before the reference date.
    pub days_before: u32,
    /// Total number of days generated.
    pub days: u32,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            seed: 0x7157_11fe,
            days_before: 7,
            days: 14,
        }
    }
}

const DAY_START: Time = time!(08:00);

const PEOPLE: [(&str, &str); 4] = [
    ("Sarah Lee", "sarah.lee@example.com"),
    ("John Doe", "john.doe@company.com"),
    ("Alex Chen", "alex.chen@example.com"),
    ("Maria Garcia", "maria.garcia@client.com"),
];

const EMAILS: [(&str, &str, Option<(&str, &str)>); 7] = [
    (
        "Re: Project Update",
        "Thanks for the update. The dashboard progress looks great; let's sync tomorrow on the final design tweaks.",
        None,
    ),
    (
        "Project Phoenix - Staging Build Ready",
        "The latest build is on staging. Please test and send feedback by end of day.",
        None,
    ),
    (
        "URGENT: Contract renewal",
        "We need a signature on the renewal before Friday.",
        None,
    ),
    (
        "[acme-corp/website] PR #231 ready for review",
        "Pull request 'feat: Add dark mode toggle' is ready for your review.",
        Some(("GitHub", "notifications@github.com")),
    ),
    (
        "Your deployment is ready",
        "The preview deployment for acme-website-preview is complete.",
        Some(("Deploy Bot", "notifications@deploys.dev")),
    ),
    (
        "Weekly Tech Digest",
        "Top stories: serverless GPUs, a deep dive into WebAssembly, and why to learn Rust.",
        Some(("Tech Weekly", "newsletter@techweekly.com")),
    ),
    (
        "Q3 proposal questions",
        "A few questions on the proposal before we take it to our board.",
        Some(("Maria Garcia", "maria.garcia@client.com")),
    ),
];

// (title, location, description, attendee indexes into PEOPLE)
const MEETINGS: [(&str, &str, &str, &[usize]); 5] = [
    (
        "Daily Standup",
        "Zoom (recurring)",
        "Quick daily check-in on progress and blockers.",
        &[0, 1],
    ),
    (
        "Design Sync",
        "Conf Room B",
        "Review new mockups for the mobile app.",
        &[2],
    ),
    ("1-on-1", "Virtual", "Weekly catch-up.", &[0]),
    (
        "Client Call: Acme Corp",
        "Google Meet",
        "Present Q3 progress and discuss next steps.",
        &[3],
    ),
    (
        "Planning Offsite",
        "Main Hall",
        "Quarterly planning with the whole team.",
        &[0, 1, 2, 3],
    ),
];

const TASKS: [(&str, &str); 5] = [
    (
        "Prepare slides for Q3 planning",
        "Cover the main goals and proposed roadmap for next quarter.",
    ),
    (
        "Review PR #231",
        "Review the dark mode implementation on the company website.",
    ),
    (
        "Book flights for conference",
        "Flights and hotel for the conference in Austin.",
    ),
    (
        "Finalize Q3 budget",
        "Review department spending and lock the budget.",
    ),
    ("Call your mom", "Reminder to call Mom for the holiday."),
];

const NOTES: [(&str, &str, &[&str]); 3] = [
    (
        "Brainstorming: New API structure",
        "GraphQL instead of REST, JWT auth, standard error responses.",
        &["api", "engineering"],
    ),
    (
        "Meeting Notes: Client Call",
        "Client is happy with progress and wants a prototype by next Friday.",
        &["meeting", "client"],
    ),
    (
        "Grocery List",
        "Milk, bread, eggs, avocado, coffee.",
        &["personal"],
    ),
];

/// Generates a deterministic timeline around `reference`.
///
/// Weekdays receive 15-24 items, weekends 3-7, all placed between 08:00 and
/// 20:00. Identical options always produce identical items.
pub fn generate(reference: PrimitiveDateTime, options: &SampleOptions) -> Vec<TimelineItem> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let start = reference
        .date()
        .saturating_sub(Duration::days(i64::from(options.days_before)));
    let mut items = Vec::new();
    for offset in 0..options.days {
        let day = start.saturating_add(Duration::days(i64::from(offset)));
        let count = if is_weekend(day) {
            rng.gen_range(3..=7)
        } else {
            rng.gen_range(15..=24)
        };
        for slot in 0..count {
            items.push(generate_item(&mut rng, day, slot));
        }
    }
    items.sort_by_key(|item| item.timestamp);
    tracing::debug!(items = items.len(), seed = options.seed, "generated sample timeline");
    items
}

fn is_weekend(day: Date) -> bool {
    matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday)
}

fn item_id(day: Date, slot: u32) -> ItemId {
    i64::from(day.to_julian_day()) * 100 + i64::from(slot)
}

fn generate_item(rng: &mut StdRng, day: Date, slot: u32) -> TimelineItem {
    let seconds = rng.gen_range(0..12 * 3_600);
    let timestamp = day.with_time(DAY_START) + Duration::seconds(seconds);
    let kind = match rng.gen_range(0..4) {
        0 => sample_email(rng),
        1 => sample_meeting(rng),
        2 => sample_task(rng, timestamp),
        _ => sample_note(rng),
    };
    TimelineItem::new(item_id(day, slot), timestamp, kind)
}

fn me() -> Person {
    Person::new("Me", "me@example.com")
}

fn person(index: usize) -> Person {
    let (name, email) = PEOPLE[index % PEOPLE.len()];
    Person::new(name, email)
}

fn sample_email(rng: &mut StdRng) -> ItemKind {
    let (subject, body, sender) = EMAILS[rng.gen_range(0..EMAILS.len())];
    let from = match sender {
        Some((name, email)) => Person::new(name, email),
        None => person(rng.gen_range(0..PEOPLE.len())),
    };
    ItemKind::Email(Email {
        from,
        to: vec![me()],
        subject: subject.to_string(),
        body: body.to_string(),
    })
}

fn sample_meeting(rng: &mut StdRng) -> ItemKind {
    let (title, location, description, attendees) = MEETINGS[rng.gen_range(0..MEETINGS.len())];
    let mut people = vec![me()];
    people.extend(attendees.iter().map(|idx| person(*idx)));
    ItemKind::Meeting(Meeting {
        title: title.to_string(),
        attendees: people,
        location: location.to_string(),
        description: description.to_string(),
    })
}

fn sample_task(rng: &mut StdRng, timestamp: PrimitiveDateTime) -> ItemKind {
    let (title, description) = TASKS[rng.gen_range(0..TASKS.len())];
    let due = timestamp + Duration::days(rng.gen_range(1..=5));
    ItemKind::Task(Task {
        title: title.to_string(),
        description: description.to_string(),
        due,
        completed: rng.gen_bool(0.3),
    })
}

fn sample_note(rng: &mut StdRng) -> ItemKind {
    let (title, content, tags) = NOTES.choose(rng).copied().unwrap_or(NOTES[0]);
    ItemKind::Note(Note {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::boundaries::items_on_day;
    use crate::timeline::TimelineStore;
    use time::macros::{date, datetime};

    #[test]
    fn sample_is_deterministic_for_a_seed() {
        let options = SampleOptions::default();
        let reference = datetime!(2025-07-04 12:00);
        assert_eq!(generate(reference, &options), generate(reference, &options));
    }

    #[test]
    fn sample_builds_a_valid_store_around_the_reference() -> anyhow::Result<()> {
        let reference = datetime!(2025-07-04 12:00);
        let store = TimelineStore::new(generate(reference, &SampleOptions::default()))?;
        let (first, last) = store.date_span().expect("non-empty sample");
        assert_eq!(first, date!(2025-06-27));
        assert_eq!(last, date!(2025-07-10));
        let today = items_on_day(date!(2025-07-04), store.items());
        assert!(today.len() >= 15, "weekday should be busy, got {}", today.len());
        let saturday = items_on_day(date!(2025-07-05), store.items());
        assert!((3..=7).contains(&saturday.len()));
        Ok(())
    }

    #[test]
    fn sample_items_fall_inside_working_hours() {
        let items = generate(datetime!(2025-07-04 12:00), &SampleOptions::default());
        for item in items {
            let hour = item.timestamp.hour();
            assert!((8..20).contains(&hour), "item {} at {}", item.id, item.timestamp);
        }
    }
}
