//! The applied-migrations ledger: an append/delete-only table recording
//! which units have run, in application order. The two-column shape is a
//! fixed contract shared with the rollback path and any external reader.

use crate::db::{QueryExecutor, SqlValue};
use crate::error::Result;

pub(crate) const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS migrations (
    id SERIAL PRIMARY KEY,
    filename TEXT NOT NULL UNIQUE
)";

pub(crate) const LAST_APPLIED: &str =
    "SELECT filename FROM migrations ORDER BY id DESC LIMIT 1";

pub(crate) const RECORD: &str = "INSERT INTO migrations (filename) VALUES ($1)";

pub(crate) const REMOVE: &str = "DELETE FROM migrations WHERE filename = $1";

/// Creates the ledger table when absent. Safe to run on every invocation.
pub fn create_table(exec: &mut impl QueryExecutor) -> Result<()> {
    exec.execute(CREATE_TABLE)
}

/// The most recently applied unit's filename, or `None` for a fresh schema.
pub fn last_applied(exec: &mut impl QueryExecutor) -> Result<Option<String>> {
    Ok(exec.query_column(LAST_APPLIED)?.into_iter().next())
}

/// Appends a row for a unit whose forward batch fully succeeded.
pub fn record(exec: &mut impl QueryExecutor, filename: &str) -> Result<()> {
    exec.execute_params(RECORD, &[SqlValue::Text(filename.to_string())])?;
    Ok(())
}

/// Deletes the row for a unit whose backward batch fully succeeded.
pub fn remove(exec: &mut impl QueryExecutor, filename: &str) -> Result<()> {
    exec.execute_params(REMOVE, &[SqlValue::Text(filename.to_string())])?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::testing::FakeDb;

    #[test]
    fn test_last_applied_empty() {
        let mut db = FakeDb::default();
        assert_eq!(last_applied(&mut db).unwrap(), None);
    }

    #[test]
    fn test_record_then_remove() {
        let mut db = FakeDb::default();
        record(&mut db, "2024-01-01_100_CreateA.rs").unwrap();
        record(&mut db, "2024-01-02_200_CreateB.rs").unwrap();
        assert_eq!(
            last_applied(&mut db).unwrap(),
            Some("2024-01-02_200_CreateB.rs".to_string())
        );

        remove(&mut db, "2024-01-02_200_CreateB.rs").unwrap();
        assert_eq!(
            last_applied(&mut db).unwrap(),
            Some("2024-01-01_100_CreateA.rs".to_string())
        );
    }

    #[test]
    fn test_create_table_is_guarded() {
        let mut db = FakeDb::default();
        create_table(&mut db).unwrap();
        assert!(db.statements[0].contains("CREATE TABLE IF NOT EXISTS migrations"));
    }
}
