use time::PrimitiveDateTime;

use super::{Email, ItemId, ItemKind, Meeting, Note, Person, Task, TimelineItem};

pub fn email(id: ItemId, at: PrimitiveDateTime, subject: &str, from: &str) -> TimelineItem {
    let name = from.split('@').next().unwrap_or(from).to_string();
    TimelineItem::new(
        id,
        at,
        ItemKind::Email(Email {
            from: Person::new(name, from),
            to: vec![Person::new("Me", "me@example.com")],
            subject: subject.to_string(),
            body: String::new(),
        }),
    )
}

pub fn meeting(id: ItemId, at: PrimitiveDateTime, title: &str, attendees: usize) -> TimelineItem {
    let attendees = (0..attendees)
        .map(|idx| Person::new(format!("Person {idx}"), format!("p{idx}@example.com")))
        .collect();
    TimelineItem::new(
        id,
        at,
        ItemKind::Meeting(Meeting {
            title: title.to_string(),
            attendees,
            location: "Room 1".to_string(),
            description: String::new(),
        }),
    )
}

pub fn note(id: ItemId, at: PrimitiveDateTime, title: &str) -> TimelineItem {
    TimelineItem::new(
        id,
        at,
        ItemKind::Note(Note {
            title: title.to_string(),
            content: String::new(),
            tags: Vec::new(),
        }),
    )
}

pub fn task(
    id: ItemId,
    at: PrimitiveDateTime,
    title: &str,
    due: PrimitiveDateTime,
    completed: bool,
) -> TimelineItem {
    TimelineItem::new(
        id,
        at,
        ItemKind::Task(Task {
            title: title.to_string(),
            description: String::new(),
            due,
            completed,
        }),
    )
}
