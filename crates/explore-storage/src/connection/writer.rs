//! Write connection utilities — BEGIN IMMEDIATE transactions.

use explore_core::errors::StorageError;
use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// The write lock is taken at transaction start, so concurrent writers to
/// the same database queue up instead of interleaving. The transaction
/// rolls back if `f` fails.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        if e.sqlite_error_code() == Some(ErrorCode::DatabaseBusy) {
            StorageError::DbBusy
        } else {
            StorageError::SqliteError {
                message: format!("failed to begin immediate transaction: {e}"),
            }
        }
    })?;

    let result = f(&tx)?;

    tx.commit().map_err(|e| StorageError::SqliteError {
        message: format!("failed to commit: {e}"),
    })?;

    Ok(result)
}
