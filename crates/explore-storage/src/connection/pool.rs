//! Pooled read-only connections to a file-backed design database.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use explore_core::config::StorageConfig;
use explore_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use super::pragmas::apply_read_pragmas;

/// Read-only connections handed out in turn. Only file databases get a
/// pool; `DatabaseManager` routes in-memory reads through its writer.
pub struct ReadPool {
    slots: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `config.effective_read_pool_size()` readers on `path`, each
    /// with the configured busy timeout.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        let busy_timeout_ms = config.effective_busy_timeout_ms();
        let slots = (0..config.effective_read_pool_size())
            .map(|_| {
                let conn = Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
                .map_err(|e| StorageError::SqliteError {
                    message: format!("open reader on {}: {e}", path.display()),
                })?;
                apply_read_pragmas(&conn, busy_timeout_ms)?;
                Ok(Mutex::new(conn))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        Ok(Self {
            slots,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        let conn = self.slots[slot].lock().map_err(|_| StorageError::SqliteError {
            message: format!("reader {slot} lock poisoned"),
        })?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }
}
