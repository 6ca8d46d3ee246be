use rusqlite::{Connection, Result as SqlResult};
use std::path::Path;

/// File name of the application database inside the data directory.
pub const DATABASE_FILE: &str = "waste2worth.db";

/// Base database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open the application database inside `data_dir`.
    pub fn in_data_dir<P: AsRef<Path>>(data_dir: P) -> SqlResult<Self> {
        Self::new(data_dir.as_ref().join(DATABASE_FILE))
    }

    pub fn in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
