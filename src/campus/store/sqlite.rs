use super::{placeholder_students, StudentStore};
use crate::error::{CampusError, Result};
use crate::model::{Avatar, NewStudent, Student, StudentPatch};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "campus.db";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS students (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        name   TEXT NOT NULL,
        email  TEXT NOT NULL UNIQUE,
        role   TEXT NOT NULL,
        avatar TEXT
    );
";

const SELECT_COLUMNS: &str = "SELECT id, name, email, role, avatar FROM students";

/// Single-connection SQLite store.
///
/// The connection is opened lazily by [`StudentStore::initialize`], so a
/// freshly constructed store behaves as uninitialized.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Option<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            conn: None,
        }
    }

    /// A store backed by a private in-memory database.
    pub fn open_in_memory() -> Self {
        Self {
            path: None,
            conn: None,
        }
    }

    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            tracing::debug!("closed student database");
        }
    }

    fn connect(&self) -> Result<Connection> {
        let conn = match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Connection::open(path)?
            }
            None => Connection::open_in_memory()?,
        };
        Ok(conn)
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(CampusError::NotInitialized)
    }

    fn table_exists(conn: &Connection) -> Result<bool> {
        let found = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'students'",
                [],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Create the table, seeding it when it did not exist before.
    fn prepare(conn: &Connection) -> Result<()> {
        let existed = Self::table_exists(conn)?;
        conn.execute_batch(SCHEMA)?;

        if !existed {
            let tx = conn.unchecked_transaction()?;
            for student in placeholder_students() {
                Self::insert(&tx, &student)?;
            }
            tx.commit()?;
            tracing::info!("seeded students table with placeholder records");
        }
        Ok(())
    }

    fn insert(conn: &Connection, student: &NewStudent) -> Result<Student> {
        let avatar = student.avatar.as_ref().map(Avatar::to_column);
        conn.execute(
            "INSERT INTO students (name, email, role, avatar) VALUES (?1, ?2, ?3, ?4)",
            params![student.name, student.email, student.role_or_default(), avatar],
        )
        .map_err(|e| map_unique(e, &student.email))?;

        let id = conn.last_insert_rowid();
        fetch(conn, id)?.ok_or(CampusError::StudentNotFound(id))
    }
}

fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    let avatar: Option<String> = row.get(4)?;
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: row.get(3)?,
        avatar: avatar.as_deref().and_then(Avatar::from_column),
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Student>> {
    let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
    let student = conn.query_row(&sql, params![id], row_to_student).optional()?;
    Ok(student)
}

/// Turn a UNIQUE violation on `email` into [`CampusError::DuplicateEmail`].
fn map_unique(err: rusqlite::Error, email: &str) -> CampusError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.code == ErrorCode::ConstraintViolation
            && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        {
            return CampusError::DuplicateEmail(email.to_string());
        }
    }
    CampusError::Sqlite(err)
}

impl StudentStore for SqliteStore {
    fn initialize(&mut self) -> Result<()> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.connect().inspect_err(|e| {
                tracing::error!("database initialization error: {}", e);
            })?,
        };

        Self::prepare(&conn).inspect_err(|e| {
            tracing::error!("database initialization error: {}", e);
        })?;
        self.conn = Some(conn);

        tracing::info!(path = ?self.path, "student database initialized");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.conn.is_some()
    }

    fn list_all(&self) -> Result<Vec<Student>> {
        let Ok(conn) = self.conn() else {
            return Ok(Vec::new());
        };
        let sql = format!("{} ORDER BY name ASC, id ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_student)?;
        let students = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }

    fn get(&self, id: i64) -> Result<Option<Student>> {
        match self.conn() {
            Ok(conn) => fetch(conn, id),
            Err(_) => Ok(None),
        }
    }

    fn count(&self) -> Result<usize> {
        let Ok(conn) = self.conn() else {
            return Ok(0);
        };
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn create(&mut self, student: &NewStudent) -> Result<Student> {
        let conn = self.conn()?;
        let created = Self::insert(conn, student)?;
        tracing::debug!(id = created.id, "student created");
        Ok(created)
    }

    fn update(&mut self, id: i64, patch: &StudentPatch) -> Result<bool> {
        let conn = self.conn()?;
        let Some(mut student) = fetch(conn, id)? else {
            tracing::warn!(id, "update of unknown student");
            return Ok(false);
        };
        patch.apply_to(&mut student);

        let avatar = student.avatar.as_ref().map(Avatar::to_column);
        conn.execute(
            "UPDATE students SET name = ?1, email = ?2, role = ?3, avatar = ?4 WHERE id = ?5",
            params![student.name, student.email, student.role, avatar, id],
        )
        .map_err(|e| map_unique(e, &student.email))?;

        tracing::debug!(id, "student updated");
        Ok(true)
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;
        tracing::debug!(id, removed, "student deleted");
        Ok(true)
    }

    /// Filters in Rust rather than with `LIKE`, which only folds ASCII case.
    fn search(&self, term: &str) -> Result<Vec<Student>> {
        let students = self.list_all()?;
        Ok(students.into_iter().filter(|s| s.matches(term)).collect())
    }
}
