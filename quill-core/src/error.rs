use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Pg(#[from] postgres::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("required environment variable {name} not set")]
    MissingEnv { name: String },
    #[error("environment variable {name} could not be parsed")]
    BadEnvFormat { name: String },
    #[error("migrations directory not found or is not a directory: {}", .path.display())]
    MigrationsDirMissing { path: PathBuf },
    #[error("unexpected migration filename format: {filename}")]
    BadUnitFilename { filename: String },
    #[error("no migration registered under the name '{name}' (from {filename})")]
    UnknownUnit { name: String, filename: String },
    #[error("migration {name} has no {direction} statements to run")]
    EmptyBatch {
        name: String,
        direction: &'static str,
    },
    #[error("ledger references migration '{filename}' that is no longer present on disk")]
    LedgerDrift { filename: String },
    #[error("query {{{sql}}} failed: {message}")]
    Statement { sql: String, message: String },
    #[error("seeder '{name}' is not registered")]
    UnknownSeeder { name: String },
    #[error("seeder {name} declares no columns")]
    SeederWithoutColumns { name: String },
    #[error("seeder {name}: row does not match the number of declared columns (expected {expected}, got {got})")]
    RowArity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("seeder {name}: value for column {column} should be of type {expected}")]
    RowValueType {
        name: String,
        column: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
