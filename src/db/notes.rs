//! Note writes and queries.

use rusqlite::params;

use super::*;

const SEARCH_LIMIT: u32 = 50;

impl NoteStore {
    /// Insert a note under `project` and make sure the project row exists,
    /// in one transaction. A failure rolls back both writes, so a note can
    /// never reference a label with no project row.
    pub fn save_note(&self, input: NoteInput, project: &str) -> Result<i64, CoachError> {
        validate_input(&input)?;
        let now = now_ms();
        let tags = input.tags.unwrap_or_default();
        let tags_json = serde_json::to_string(&tags).unwrap_or_else(|_| "[]".into());

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO notes (content, created_at, project, tags) VALUES (?1, ?2, ?3, ?4)",
            params![input.content, now, project, tags_json],
        )?;
        let note_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT OR IGNORE INTO projects (name, description, created_at, last_activity) \
             VALUES (?1, ?2, ?3, ?3)",
            params![
                project,
                format!("Auto-detected project for {project} related notes"),
                now
            ],
        )?;
        tx.commit()?;
        Ok(note_id)
    }

    /// Up to 50 notes, newest first (`created_at DESC, id DESC` keeps
    /// same-millisecond inserts deterministic).
    ///
    /// The content filter applies only when the trimmed query is non-empty
    /// and matches the raw query case-sensitively (`instr`, not `LIKE` —
    /// SQLite LIKE folds ASCII case). An empty project filter is ignored;
    /// both filters compose with AND.
    pub fn search_notes(
        &self,
        query: Option<&str>,
        project: Option<&str>,
    ) -> Result<Vec<Note>, CoachError> {
        let query = query.filter(|q| !q.trim().is_empty());
        let project = project.filter(|p| !p.is_empty());

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, content, created_at, project, tags FROM notes \
             WHERE (?1 IS NULL OR instr(content, ?1) > 0) \
               AND (?2 IS NULL OR project = ?2) \
             ORDER BY created_at DESC, id DESC LIMIT ?3",
        )?;
        let notes = stmt
            .query_map(params![query, project, SEARCH_LIMIT], row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }
}
