//! Metadata store client
//!
//! The edgecore agent caches Kubernetes objects in a local SQLite database.
//! Records live in the `meta` table keyed by `"<namespace>/<kind>/<name>"`,
//! with the serialized JSON object in the `value` column. Diagnostics only
//! ever read from it.

use crate::error::{DiagError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

/// Columns of the agent's `meta` table that queries may filter on.
const META_COLUMNS: &[&str] = &["key", "type", "value"];

/// Read-only handle on the agent's metadata database.
///
/// Opened once per diagnostic run and passed to whoever needs it; the
/// connection closes on drop.
#[derive(Debug)]
pub struct MetaStore {
    conn: Connection,
}

impl MetaStore {
    /// Open the database at `path` read-only.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DiagError::StoreInit(format!(
                "{} does not exist",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| DiagError::StoreInit(e.to_string()))?;
        debug!(path = %path.display(), "opened metadata store");
        Ok(Self { conn })
    }

    /// Fetch the serialized records where `field` equals `value`, in store
    /// insertion order.
    pub fn query(&self, field: &str, value: &str) -> Result<Vec<String>> {
        // `field` is interpolated into SQL, so it must be a known column.
        if !META_COLUMNS.contains(&field) {
            return Err(DiagError::StoreQuery(rusqlite::Error::InvalidColumnName(
                field.to_string(),
            )));
        }
        let sql = format!("SELECT value FROM meta WHERE {field} = ?1 ORDER BY rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([value], |row| row.get::<_, String>(0))?;
        let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(field, value, count = records.len(), "queried metadata store");
        Ok(records)
    }
}
