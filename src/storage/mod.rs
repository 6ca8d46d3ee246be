pub mod database;
pub mod local_store;
pub mod session;

pub use database::Database;
pub use local_store::LocalStore;
pub use session::{NullStore, SessionStore, UserStore};

use std::fs;
use std::path::Path;

use crate::error::StorageError;

/// Ensure data directory exists
pub fn ensure_data_dir(data_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(data_dir)?;
    Ok(())
}

/// Open the session store under `data_dir`, creating the directory if needed.
pub fn open_session_store(data_dir: &Path) -> Result<SessionStore, StorageError> {
    ensure_data_dir(data_dir)?;
    let db = Database::in_data_dir(data_dir)?;
    Ok(SessionStore::new(LocalStore::new(db)?))
}
