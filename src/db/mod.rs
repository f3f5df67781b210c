//! SQLite-backed note storage.

mod notes;
mod projects;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::{Deserialize, Serialize};

use crate::error::CoachError;

/// Set busy_timeout on every connection handed out by the pool.
/// Prevents SQLITE_BUSY when concurrent API writes overlap.
#[derive(Debug)]
struct BusyTimeoutCustomizer;
impl r2d2::CustomizeConnection<rusqlite::Connection, rusqlite::Error> for BusyTimeoutCustomizer {
    fn on_acquire(&self, conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(())
    }
}

type PooledConn = r2d2::PooledConnection<SqliteConnectionManager>;

const MAX_CONTENT_LEN: usize = 8192;
const MAX_TAGS: usize = 20;
const MAX_TAG_LEN: usize = 64;

/// A stored note. `tags` round-trips through a JSON text column, so order
/// is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub timestamp: i64,
    pub project: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub content: String,
    pub project_hint: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Notes for one project plus its stored description (None when the
/// project row doesn't exist).
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub description: Option<String>,
    pub notes: Vec<Note>,
}

#[derive(Debug, Default, Serialize)]
pub struct Stats {
    pub notes: usize,
    pub projects: usize,
}

fn validate_input(input: &NoteInput) -> Result<(), CoachError> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(CoachError::EmptyContent);
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(CoachError::ContentTooLong);
    }
    if let Some(ref tags) = input.tags {
        if tags.len() > MAX_TAGS {
            return Err(CoachError::Validation(format!("too many tags (max {MAX_TAGS})")));
        }
        if let Some(t) = tags.iter().find(|t| t.chars().count() > MAX_TAG_LEN) {
            return Err(CoachError::Validation(format!("tag '{t}' too long (max {MAX_TAG_LEN})")));
        }
    }
    Ok(())
}

pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_millis() as i64
}

// note_projects and connections are written by no current code path; they
// stay in the schema for AI-asserted links to land in later.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    project TEXT,
    tags TEXT NOT NULL DEFAULT '[]',
    device TEXT
);
CREATE INDEX IF NOT EXISTS idx_notes_project ON notes(project);
CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(created_at);

CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    created_at INTEGER NOT NULL,
    last_activity INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS note_projects (
    note_id INTEGER NOT NULL REFERENCES notes(id),
    project_id INTEGER NOT NULL REFERENCES projects(id),
    confidence REAL NOT NULL DEFAULT 0.8
);

CREATE TABLE IF NOT EXISTS connections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    note_a INTEGER NOT NULL REFERENCES notes(id),
    note_b INTEGER NOT NULL REFERENCES notes(id),
    relationship TEXT,
    strength REAL NOT NULL DEFAULT 0.5,
    created_by TEXT NOT NULL DEFAULT 'ai',
    created_at INTEGER NOT NULL
);
"#;

/// SQLite-backed note store. Shared as `Arc<NoteStore>`; all access goes
/// through the pool.
pub struct NoteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl NoteStore {
    fn conn(&self) -> Result<PooledConn, CoachError> {
        self.pool.get().map_err(|e| CoachError::Internal(format!("pool: {e}")))
    }

    /// Open (or create) a database at the given path.
    ///
    /// Journal mode stays on the rollback default, not WAL: the Drive
    /// backup copies the database as one file, and WAL sidecars would not
    /// travel with it.
    pub fn open(path: &str) -> Result<Self, CoachError> {
        let pool_size = if path == ":memory:" { 2 } else { 8 };
        let manager = if path == ":memory:" {
            // Shared cache so all pool connections see the same in-memory DB.
            // Each test gets a unique name to avoid cross-test pollution.
            let name = uuid::Uuid::new_v4().to_string();
            SqliteConnectionManager::file(format!("file:{name}?mode=memory&cache=shared"))
        } else {
            SqliteConnectionManager::file(path)
        };
        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(BusyTimeoutCustomizer))
            .build(manager)
            .map_err(|e| CoachError::Internal(format!("pool: {e}")))?;

        // initialize schema on a fresh connection
        let conn = pool.get().map_err(|e| CoachError::Internal(e.to_string()))?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Database file size in bytes (via SQLite pragma).
    pub fn db_size_bytes(&self) -> i64 {
        self.conn()
            .and_then(|c| c.query_row(
                "SELECT page_count * page_size FROM pragma_page_count, pragma_page_size",
                [], |r| r.get(0),
            ).map_err(|e| CoachError::Internal(e.to_string())))
            .unwrap_or(0)
    }

    /// Row counts for /health. Degrades to zeros instead of erroring.
    pub fn stats(&self) -> Stats {
        let Ok(conn) = self.conn() else {
            return Stats::default();
        };
        let count = |sql: &str| {
            conn.query_row(sql, [], |r| r.get::<_, i64>(0)).unwrap_or(0) as usize
        };
        Stats {
            notes: count("SELECT COUNT(*) FROM notes"),
            projects: count("SELECT COUNT(*) FROM projects"),
        }
    }
}

fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    let tags_str: String = row.get("tags")?;
    Ok(Note {
        id: row.get("id")?,
        content: row.get("content")?,
        timestamp: row.get("created_at")?,
        project: row.get("project")?,
        tags: serde_json::from_str(&tags_str).unwrap_or_default(),
    })
}

#[cfg(test)]
mod schema_tests {
    use super::*;

    #[test]
    fn open_initializes_empty_schema() {
        let store = NoteStore::open(":memory:").unwrap();
        let s = store.stats();
        assert_eq!(s.notes, 0);
        assert_eq!(s.projects, 0);
    }

    #[test]
    fn validate_rejects_blank_content() {
        let blank = NoteInput { content: "   ".into(), ..Default::default() };
        assert!(matches!(validate_input(&blank), Err(CoachError::EmptyContent)));
        let missing = NoteInput::default();
        assert!(matches!(validate_input(&missing), Err(CoachError::EmptyContent)));
    }

    #[test]
    fn validate_caps_tag_count() {
        let input = NoteInput {
            content: "ok".into(),
            tags: Some((0..21).map(|i| format!("t{i}")).collect()),
            ..Default::default()
        };
        assert!(validate_input(&input).is_err());
    }
}
