//! User types. Stored alongside events but not exposed over HTTP.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Stored as given; no hashing.
    pub password: String,
}

/// Built from untrusted input only through `InsertUser::from_json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertUser {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn from_insert(id: String, insert: InsertUser) -> Self {
        User {
            id,
            username: insert.username,
            password: insert.password,
        }
    }
}
