//! In-memory event and user storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::calendar::MonthRange;
use crate::event::{Event, EventPatch, InsertEvent};
use crate::seed::sample_events;
use crate::user::{InsertUser, User};

/// The authoritative store for events and users.
///
/// Absence is reported as `None`/`false`, never as an error. Inputs are
/// assumed to have passed [`crate::validate`] already.
pub trait Storage: Send + Sync {
    fn get_user(&self, id: &str) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&self, user: InsertUser) -> User;

    /// All events, in no particular order.
    fn get_all_events(&self) -> Vec<Event>;
    fn get_event(&self, id: &str) -> Option<Event>;
    /// Events whose `date` equals `date` exactly.
    fn get_events_by_date(&self, date: &str) -> Vec<Event>;
    /// Events whose date falls in the given month (1-12).
    fn get_events_by_month(&self, year: i32, month: u32) -> Vec<Event>;
    fn create_event(&self, event: InsertEvent) -> Event;
    /// Merge `patch` into the stored event. None if `id` is unknown.
    fn update_event(&self, id: &str, patch: EventPatch) -> Option<Event>;
    /// True if an event was removed.
    fn delete_event(&self, id: &str) -> bool;
    fn event_count(&self) -> usize;
}

/// `Storage` backed by process memory. Nothing survives a restart.
///
/// Each operation takes its lock once, so operations are atomic with
/// respect to each other and concurrent updates resolve as last-write-wins.
#[derive(Default)]
pub struct MemStorage {
    users: RwLock<HashMap<String, User>>,
    events: RwLock<HashMap<String, Event>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with a few events around `today`.
    pub fn with_sample_events(today: NaiveDate) -> Self {
        let storage = Self::new();
        for event in sample_events(today) {
            storage.create_event(event);
        }
        storage
    }

    fn filter_events(&self, pred: impl Fn(&Event) -> bool) -> Vec<Event> {
        read(&self.events)
            .values()
            .filter(|e| pred(*e))
            .cloned()
            .collect()
    }
}

// A panic while holding one of these locks can't leave a map half-written,
// so a poisoned lock is still safe to use.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Storage for MemStorage {
    fn get_user(&self, id: &str) -> Option<User> {
        read(&self.users).get(id).cloned()
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        read(&self.users)
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    fn create_user(&self, user: InsertUser) -> User {
        let user = User::from_insert(new_id(), user);
        write(&self.users).insert(user.id.clone(), user.clone());
        tracing::debug!(user_id = %user.id, "Created user");
        user
    }

    fn get_all_events(&self) -> Vec<Event> {
        read(&self.events).values().cloned().collect()
    }

    fn get_event(&self, id: &str) -> Option<Event> {
        read(&self.events).get(id).cloned()
    }

    fn get_events_by_date(&self, date: &str) -> Vec<Event> {
        self.filter_events(|e| e.date == date)
    }

    fn get_events_by_month(&self, year: i32, month: u32) -> Vec<Event> {
        let Some(range) = MonthRange::new(year, month) else {
            return Vec::new();
        };
        self.filter_events(|e| e.parsed_date().is_some_and(|d| range.contains(d)))
    }

    fn create_event(&self, event: InsertEvent) -> Event {
        let event = Event::from_insert(new_id(), event, Utc::now());
        write(&self.events).insert(event.id.clone(), event.clone());
        tracing::debug!(event_id = %event.id, date = %event.date, "Created event");
        event
    }

    fn update_event(&self, id: &str, patch: EventPatch) -> Option<Event> {
        let mut events = write(&self.events);
        let event = events.get_mut(id)?;
        event.apply(patch);
        tracing::debug!(event_id = %id, "Updated event");
        Some(event.clone())
    }

    fn delete_event(&self, id: &str) -> bool {
        let removed = write(&self.events).remove(id).is_some();
        if removed {
            tracing::debug!(event_id = %id, "Deleted event");
        }
        removed
    }

    fn event_count(&self) -> usize {
        read(&self.events).len()
    }
}
