//! Validation of untrusted JSON payloads into insert and update shapes.
//!
//! Every check runs even after one fails, so a `ValidationError` lists all
//! offending fields. Nothing is coerced except:
//! - a missing `color` on insert becomes the default palette entry
//! - an empty (or whitespace-only) optional text field counts as absent
//! - `title` is trimmed

use serde_json::{Map, Value};

use crate::calendar::{parse_event_date, parse_event_time};
use crate::color::EventColor;
use crate::error::{FieldError, ValidationError, ValidationResult};
use crate::event::{EventPatch, InsertEvent, Patch};
use crate::user::InsertUser;

const EVENT_FIELDS: &[&str] = &[
    "title",
    "description",
    "date",
    "startTime",
    "endTime",
    "color",
];
const EVENT_READ_ONLY: &[&str] = &["id", "createdAt"];

const USER_FIELDS: &[&str] = &["username", "password"];
const USER_READ_ONLY: &[&str] = &["id"];

/// Whether absent required fields are an error (insert) or mean "unchanged" (update).
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Insert,
    Update,
}

/// A JSON object being checked, plus the failures found so far.
struct Payload<'a> {
    map: &'a Map<String, Value>,
    mode: Mode,
    errors: Vec<FieldError>,
}

impl<'a> Payload<'a> {
    fn new(
        value: &'a Value,
        mode: Mode,
        allowed: &[&str],
        read_only: &[&str],
    ) -> ValidationResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ValidationError::single("$", "must be a JSON object"))?;

        let mut errors = Vec::new();
        for key in map.keys() {
            if read_only.contains(&key.as_str()) {
                errors.push(FieldError::new(key, "is read-only"));
            } else if !allowed.contains(&key.as_str()) {
                errors.push(FieldError::new(key, "is not a known field"));
            }
        }

        Ok(Payload { map, mode, errors })
    }

    fn fail(&mut self, key: &str, message: &str) {
        self.errors.push(FieldError::new(key, message));
    }

    /// Raw string lookup. A non-string value is recorded as a failure and
    /// reported as `Missing` so callers don't double-report.
    fn string(&mut self, key: &str) -> Patch<&'a str> {
        match self.map.get(key) {
            None => Patch::Missing,
            Some(Value::Null) => Patch::Null,
            Some(Value::String(s)) => Patch::Value(s.as_str()),
            Some(_) => {
                self.fail(key, "must be a string");
                Patch::Missing
            }
        }
    }

    /// A field that must hold a value once the entity exists.
    fn required(&mut self, key: &str) -> Option<&'a str> {
        match self.string(key) {
            Patch::Value(s) => Some(s),
            Patch::Null if self.mode == Mode::Update => {
                self.fail(key, "cannot be cleared");
                None
            }
            Patch::Null => {
                self.fail(key, "is required");
                None
            }
            Patch::Missing => {
                if self.mode == Mode::Insert && !self.map.contains_key(key) {
                    self.fail(key, "is required");
                }
                None
            }
        }
    }

    fn non_empty(&mut self, key: &str) -> Option<String> {
        let s = self.required(key)?.trim();
        if s.is_empty() {
            self.fail(key, "must not be empty");
            return None;
        }
        Some(s.to_string())
    }

    fn date(&mut self, key: &str) -> Option<String> {
        let s = self.required(key)?;
        if parse_event_date(s).is_none() {
            self.fail(key, "must be a valid date in YYYY-MM-DD format");
            return None;
        }
        Some(s.to_string())
    }

    fn color(&mut self, key: &str) -> Option<EventColor> {
        let s = self.required(key)?;
        match s.parse() {
            Ok(color) => Some(color),
            Err(message) => {
                self.fail(key, &message);
                None
            }
        }
    }

    fn optional_text(&mut self, key: &str) -> Patch<String> {
        match self.string(key) {
            Patch::Value(s) if s.trim().is_empty() => Patch::Null,
            Patch::Value(s) => Patch::Value(s.to_string()),
            Patch::Null => Patch::Null,
            Patch::Missing => Patch::Missing,
        }
    }

    fn optional_time(&mut self, key: &str) -> Patch<String> {
        match self.optional_text(key) {
            Patch::Value(s) if parse_event_time(&s).is_none() => {
                self.fail(key, "must be a time in HH:MM (24-hour) format");
                Patch::Missing
            }
            other => other,
        }
    }

    fn into_error(self) -> ValidationError {
        ValidationError {
            fields: self.errors,
        }
    }
}

impl InsertEvent {
    /// Validate a create payload.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let mut payload = Payload::new(value, Mode::Insert, EVENT_FIELDS, EVENT_READ_ONLY)?;

        let title = payload.non_empty("title");
        let description = payload.optional_text("description").into_option();
        let date = payload.date("date");
        let start_time = payload.optional_time("startTime").into_option();
        let end_time = payload.optional_time("endTime").into_option();
        let color = if payload.map.contains_key("color") {
            payload.color("color")
        } else {
            Some(EventColor::default())
        };

        match (title, date, color) {
            (Some(title), Some(date), Some(color)) if payload.errors.is_empty() => {
                Ok(InsertEvent {
                    title,
                    description,
                    date,
                    start_time,
                    end_time,
                    color,
                })
            }
            _ => Err(payload.into_error()),
        }
    }
}

impl EventPatch {
    /// Validate an update payload. Omitted fields stay `Missing`/`None`;
    /// `null` clears an optional field and is rejected for required ones.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let mut payload = Payload::new(value, Mode::Update, EVENT_FIELDS, EVENT_READ_ONLY)?;

        let patch = EventPatch {
            title: payload.non_empty("title"),
            description: payload.optional_text("description"),
            date: payload.date("date"),
            start_time: payload.optional_time("startTime"),
            end_time: payload.optional_time("endTime"),
            color: payload.color("color"),
        };

        if payload.errors.is_empty() {
            Ok(patch)
        } else {
            Err(payload.into_error())
        }
    }
}

impl InsertUser {
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let mut payload = Payload::new(value, Mode::Insert, USER_FIELDS, USER_READ_ONLY)?;

        let username = payload.non_empty("username");
        let password = payload.required("password");
        if password == Some("") {
            payload.fail("password", "must not be empty");
        }

        match (username, password) {
            (Some(username), Some(password)) if payload.errors.is_empty() => Ok(InsertUser {
                username,
                password: password.to_string(),
            }),
            _ => Err(payload.into_error()),
        }
    }
}
