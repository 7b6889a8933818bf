use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use postgres::types::ToSql;
use postgres::{Client, NoTls};
use tracing::debug;

/// A value bound into a parameterized statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Null,
}

static NULL_TIMESTAMP: Option<NaiveDateTime> = None;

impl SqlValue {
    fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            SqlValue::Int(value) => value,
            SqlValue::Float(value) => value,
            SqlValue::Text(value) => value,
            SqlValue::Bool(value) => value,
            SqlValue::Timestamp(value) => value,
            SqlValue::Null => &NULL_TIMESTAMP,
        }
    }
}

/// The opaque statement executor the migration and seeding engines run
/// against. The engines take it as an explicit dependency so tests can
/// substitute an in-memory fake for a live connection.
pub trait QueryExecutor {
    /// Executes a statement that takes no parameters.
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Executes a parameterized statement, returning the affected row count.
    fn execute_params(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64>;

    /// Runs a query returning a single text column.
    fn query_column(&mut self, sql: &str) -> Result<Vec<String>>;
}

pub struct Db {
    client: Client,
}

impl Db {
    pub fn connect(database_url: &str) -> Result<Db> {
        let client = Client::connect(database_url, NoTls)?;
        Ok(Db { client })
    }
}

impl QueryExecutor for Db {
    fn execute(&mut self, sql: &str) -> Result<()> {
        debug!("executing: {}", sql);
        self.client.batch_execute(sql).map_err(|e| Error::Statement {
            sql: sql.to_string(),
            message: e.to_string(),
        })
    }

    fn execute_params(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        debug!("executing: {}", sql);
        let bound = params.iter().map(SqlValue::as_sql).collect::<Vec<_>>();
        self.client.execute(sql, &bound).map_err(|e| Error::Statement {
            sql: sql.to_string(),
            message: e.to_string(),
        })
    }

    fn query_column(&mut self, sql: &str) -> Result<Vec<String>> {
        let rows = self.client.query(sql, &[])?;
        rows.iter()
            .map(|row| row.try_get(0).map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::ledger;

    /// In-memory stand-in for a live connection. Records every statement it
    /// runs and understands just enough of the ledger SQL to emulate the
    /// applied-migrations table.
    #[derive(Default)]
    pub struct FakeDb {
        pub ledger: Vec<String>,
        pub statements: Vec<String>,
        pub inserts: Vec<Vec<SqlValue>>,
        pub fail_on: Option<String>,
    }

    impl FakeDb {
        pub fn with_ledger(filenames: &[&str]) -> FakeDb {
            FakeDb {
                ledger: filenames.iter().map(|f| f.to_string()).collect(),
                ..FakeDb::default()
            }
        }
    }

    impl QueryExecutor for FakeDb {
        fn execute(&mut self, sql: &str) -> Result<()> {
            if self.fail_on.as_deref() == Some(sql) {
                return Err(Error::Statement {
                    sql: sql.to_string(),
                    message: "injected failure".to_string(),
                });
            }
            self.statements.push(sql.to_string());
            Ok(())
        }

        fn execute_params(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
            self.statements.push(sql.to_string());
            if sql == ledger::RECORD {
                if let Some(SqlValue::Text(filename)) = params.first() {
                    self.ledger.push(filename.clone());
                }
            } else if sql == ledger::REMOVE {
                if let Some(SqlValue::Text(filename)) = params.first() {
                    self.ledger.retain(|f| f != filename);
                }
            } else {
                self.inserts.push(params.to_vec());
            }
            Ok(1)
        }

        fn query_column(&mut self, sql: &str) -> Result<Vec<String>> {
            if sql == ledger::LAST_APPLIED {
                Ok(self.ledger.last().cloned().into_iter().collect())
            } else {
                Ok(Vec::new())
            }
        }
    }
}
