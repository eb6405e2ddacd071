//! Core types for daybook.
//!
//! - `event` / `user`: stored entities and their insert/update shapes
//! - `validate`: turns untrusted JSON into those shapes
//! - `storage`: the in-memory store
//! - `calendar`: month ranges and grid helpers

pub mod calendar;
pub mod color;
pub mod error;
pub mod event;
pub mod seed;
pub mod storage;
pub mod user;
pub mod validate;

pub use color::EventColor;
pub use error::{FieldError, ValidationError, ValidationResult};
pub use event::{Event, EventPatch, InsertEvent, Patch};
pub use storage::{MemStorage, Storage};
pub use user::{InsertUser, User};
