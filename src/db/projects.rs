//! Project context queries.

use rusqlite::params;

use super::*;

impl NoteStore {
    /// Most-recent notes for a project, newest first, plus the project
    /// description off the join. Unknown projects come back empty rather
    /// than erroring.
    pub fn project_context(&self, name: &str, limit: u32) -> Result<ProjectContext, CoachError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT n.id, n.content, n.created_at, n.project, n.tags, p.description \
             FROM notes n \
             LEFT JOIN projects p ON n.project = p.name \
             WHERE n.project = ?1 \
             ORDER BY n.created_at DESC, n.id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![name, limit], |row| {
            Ok((row_to_note(row)?, row.get::<_, Option<String>>("description")?))
        })?;

        let mut description = None;
        let mut notes = Vec::new();
        for row in rows {
            let (note, desc) = row?;
            if description.is_none() {
                description = desc;
            }
            notes.push(note);
        }
        Ok(ProjectContext { description, notes })
    }
}
