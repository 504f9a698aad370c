//! # Storage Layer
//!
//! The [`StudentStore`] trait is the Record Store: the single owner of the
//! student table. Everything above it (commands, API, controller) talks to the
//! trait, never to SQLite directly.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: production storage, one `students` table in a
//!   single SQLite file (`campus.db` by default).
//! - [`memory::InMemoryStore`]: in-memory storage for tests. It enforces the
//!   same id and email uniqueness rules as the SQLite table.
//!
//! ## Uninitialized stores
//!
//! A store starts uninitialized. Until [`StudentStore::initialize`] succeeds,
//! reads return empty results and writes fail with
//! [`CampusError::NotInitialized`](crate::error::CampusError::NotInitialized).

use crate::error::Result;
use crate::model::{NewStudent, Student, StudentPatch, DEFAULT_ROLE};

pub mod memory;
pub mod sqlite;

/// Seed data inserted once, when the table is first created.
pub const PLACEHOLDER_STUDENTS: [(&str, &str); 4] = [
    ("Alice Martin", "alice@campus.com"),
    ("Bob Dupont", "bob@campus.com"),
    ("Charlie Lambert", "charlie@campus.com"),
    ("Diana Prince", "diana@campus.com"),
];

pub fn placeholder_students() -> Vec<NewStudent> {
    PLACEHOLDER_STUDENTS
        .iter()
        .map(|(name, email)| NewStudent::new(*name, *email).with_role(DEFAULT_ROLE))
        .collect()
}

pub trait StudentStore {
    /// Create the table if needed, seeding it on creation. Idempotent.
    fn initialize(&mut self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    /// All students, ordered by name.
    fn list_all(&self) -> Result<Vec<Student>>;

    fn get(&self, id: i64) -> Result<Option<Student>>;

    fn count(&self) -> Result<usize>;

    /// Insert a student and return it with its assigned id.
    fn create(&mut self, student: &NewStudent) -> Result<Student>;

    /// Merge `patch` onto the stored record. `Ok(false)` when `id` is unknown.
    fn update(&mut self, id: i64, patch: &StudentPatch) -> Result<bool>;

    /// Remove a student. Removing an unknown id is not an error.
    fn delete(&mut self, id: i64) -> Result<bool>;

    /// Case-insensitive substring match on name or email, ordered by name.
    fn search(&self, term: &str) -> Result<Vec<Student>>;
}

pub(crate) fn sort_by_name(students: &mut [Student]) {
    students.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}
