//! Seeding engine: validates a seeder's rows against its declared column
//! shape and inserts them through the query executor.

use crate::db::{QueryExecutor, SqlValue};
use crate::error::{Error, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    Float,
    Text,
    Bool,
    Timestamp,
}

impl DataType {
    fn name(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Text => "text",
            DataType::Bool => "bool",
            DataType::Timestamp => "timestamp",
        }
    }

    fn matches(self, value: &SqlValue) -> bool {
        matches!(
            (self, value),
            (DataType::Int, SqlValue::Int(_))
                | (DataType::Float, SqlValue::Float(_))
                | (DataType::Text, SqlValue::Text(_))
                | (DataType::Bool, SqlValue::Bool(_))
                | (DataType::Timestamp, SqlValue::Timestamp(_))
                // null stands for "never" in expiry columns
                | (DataType::Timestamp, SqlValue::Null)
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub data_type: DataType,
}

/// A named batch of rows for one table. Concrete seeders are registry
/// entries resolved by name from the `seed` command.
pub trait Seeder {
    fn table_name(&self) -> &'static str;
    fn columns(&self) -> &'static [ColumnDef];
    fn create_rows(&self) -> Vec<Vec<SqlValue>>;
}

/// Validates and inserts every row the seeder produces.
pub fn run_seeder(exec: &mut impl QueryExecutor, name: &str, seeder: &dyn Seeder) -> Result<()> {
    let columns = seeder.columns();
    if columns.is_empty() {
        return Err(Error::SeederWithoutColumns {
            name: name.to_string(),
        });
    }

    info!("running seeder: {}", name);
    let insert = insert_statement(seeder.table_name(), columns);

    for row in seeder.create_rows() {
        validate_row(name, columns, &row)?;
        debug!("seed insert: {}", insert);
        let inserted = exec.execute_params(&insert, &row)?;
        info!("inserted {} row(s) into {}", inserted, seeder.table_name());
    }

    info!("completed seeder: {}", name);
    Ok(())
}

fn validate_row(name: &str, columns: &[ColumnDef], row: &[SqlValue]) -> Result<()> {
    if row.len() != columns.len() {
        return Err(Error::RowArity {
            name: name.to_string(),
            expected: columns.len(),
            got: row.len(),
        });
    }

    for (column, value) in columns.iter().zip(row) {
        if !column.data_type.matches(value) {
            return Err(Error::RowValueType {
                name: name.to_string(),
                column: column.name.to_string(),
                expected: column.data_type.name(),
            });
        }
    }

    Ok(())
}

fn insert_statement(table: &str, columns: &[ColumnDef]) -> String {
    let names = columns
        .iter()
        .map(|column| column.name)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", table, names, placeholders)
}
