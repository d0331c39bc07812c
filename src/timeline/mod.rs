use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use thiserror::Error;
use time::{Date, PrimitiveDateTime};

pub mod boundaries;
pub mod sample;

#[cfg(test)]
pub(crate) mod fixtures;

pub type ItemId = i64;

time::serde::format_description!(
    local_datetime,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("duplicate timeline item id {0}")]
    DuplicateId(ItemId),
    #[error("reading timeline file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing timeline json")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub email: String,
}

impl Person {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Domain part of the address, if it has one.
    pub fn domain(&self) -> Option<&str> {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .filter(|domain| !domain.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub from: Person,
    #[serde(default)]
    pub to: Vec<Person>,
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub title: String,
    #[serde(default)]
    pub attendees: Vec<Person>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "local_datetime")]
    pub due: PrimitiveDateTime,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemKind {
    Email(Email),
    Meeting(Meeting),
    Note(Note),
    Task(Task),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum ItemType {
    Email,
    Meeting,
    Note,
    Task,
}

impl ItemType {
    pub fn icon(self) -> &'static str {
        match self {
            ItemType::Email => "✉",
            ItemType::Meeting => "◷",
            ItemType::Note => "✎",
            ItemType::Task => "☐",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    #[serde(with = "local_datetime")]
    pub timestamp: PrimitiveDateTime,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl TimelineItem {
    pub fn new(id: ItemId, timestamp: PrimitiveDateTime, kind: ItemKind) -> Self {
        Self {
            id,
            timestamp,
            kind,
        }
    }

    pub fn date(&self) -> Date {
        self.timestamp.date()
    }

    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Email(_) => ItemType::Email,
            ItemKind::Meeting(_) => ItemType::Meeting,
            ItemKind::Note(_) => ItemType::Note,
            ItemKind::Task(_) => ItemType::Task,
        }
    }

    /// Headline shown in lists; emails use their subject.
    pub fn title(&self) -> &str {
        match &self.kind {
            ItemKind::Email(email) => &email.subject,
            ItemKind::Meeting(meeting) => &meeting.title,
            ItemKind::Note(note) => &note.title,
            ItemKind::Task(task) => &task.title,
        }
    }

    pub fn detail(&self) -> &str {
        match &self.kind {
            ItemKind::Email(email) => &email.from.name,
            ItemKind::Meeting(meeting) => &meeting.location,
            ItemKind::Note(note) => &note.title,
            ItemKind::Task(task) => &task.title,
        }
    }
}

/// Immutable, timestamp-ordered item sequence.
///
/// Ordering is stable: items sharing a timestamp keep the order they were
/// supplied in. Ranks are the zero-based positions in that order.
#[derive(Debug, Clone, Default)]
pub struct TimelineStore {
    items: Vec<TimelineItem>,
    ranks: HashMap<ItemId, usize>,
}

impl TimelineStore {
    pub fn new(mut items: Vec<TimelineItem>) -> Result<Self, TimelineError> {
        items.sort_by_key(|item| item.timestamp);
        let mut ranks = HashMap::with_capacity(items.len());
        for (rank, item) in items.iter().enumerate() {
            if ranks.insert(item.id, rank).is_some() {
                return Err(TimelineError::DuplicateId(item.id));
            }
        }
        Ok(Self { items, ranks })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TimelineError> {
        let items: Vec<TimelineItem> = serde_json::from_str(raw)?;
        Self::new(items)
    }

    pub fn load_json(path: &Path) -> Result<Self, TimelineError> {
        let raw = fs::read_to_string(path).map_err(|source| TimelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), items = store.len(), "loaded timeline");
        Ok(store)
    }

    pub fn to_json_pretty(&self) -> Result<String, TimelineError> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&TimelineItem> {
        self.items.get(rank)
    }

    pub fn rank_of(&self, id: ItemId) -> Option<usize> {
        self.ranks.get(&id).copied()
    }

    pub fn item(&self, id: ItemId) -> Option<&TimelineItem> {
        self.rank_of(id).and_then(|rank| self.items.get(rank))
    }

    pub fn first(&self) -> Option<&TimelineItem> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&TimelineItem> {
        self.items.last()
    }

    /// Calendar dates of the earliest and latest items.
    pub fn date_span(&self) -> Option<(Date, Date)> {
        Some((self.first()?.date(), self.last()?.date()))
    }
}
