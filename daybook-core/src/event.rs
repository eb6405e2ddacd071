//! Calendar event types.
//!
//! `Event` is the stored shape. `InsertEvent` is what a client may supply
//! at creation (no `id`, no `createdAt`), and `EventPatch` is a partial
//! update. Building either from untrusted JSON goes through
//! [`crate::validate`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::parse_event_date;
use crate::color::EventColor;

/// A stored calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, 24-hour
    pub start_time: Option<String>,
    /// HH:MM, 24-hour
    pub end_time: Option<String>,
    pub color: EventColor,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn from_insert(id: String, insert: InsertEvent, created_at: DateTime<Utc>) -> Self {
        Event {
            id,
            title: insert.title,
            description: insert.description,
            date: insert.date,
            start_time: insert.start_time,
            end_time: insert.end_time,
            color: insert.color,
            created_at,
        }
    }

    /// The event date, or None if the stored string is not a valid date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date)
    }

    /// Shallow merge: only fields present in the patch change.
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        patch.description.apply_to(&mut self.description);
        patch.start_time.apply_to(&mut self.start_time);
        patch.end_time.apply_to(&mut self.end_time);
    }
}

/// Fields a client supplies to create an event.
///
/// Built from untrusted input only through `InsertEvent::from_json`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub color: EventColor,
}

impl InsertEvent {
    /// An insert with only the required fields set.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        InsertEvent {
            title: title.into(),
            description: None,
            date: date.into(),
            start_time: None,
            end_time: None,
            color: EventColor::default(),
        }
    }
}

/// One field of a partial update.
///
/// `Missing` leaves the stored value alone, `Null` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Collapse to an Option, treating `Missing` and `Null` alike.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Missing | Patch::Null => None,
        }
    }

    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *slot = None,
            Patch::Value(v) => *slot = Some(v),
        }
    }
}

/// Partial update for an event.
///
/// Required fields can be replaced but never cleared, so they are plain
/// `Option`s; optional fields use the tri-state [`Patch`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Patch<String>,
    pub date: Option<String>,
    pub start_time: Patch<String>,
    pub end_time: Patch<String>,
    pub color: Option<EventColor>,
}
