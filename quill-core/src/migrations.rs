//! The paste service's schema history.
//!
//! Each unit file under `src/migrations/` is named
//! `{date}_{epoch}_{LogicalName}.rs`; the same directory is what the catalog
//! scans at runtime (`MIGRATIONS_DIR`), so those filenames are also the
//! ledger's identifiers. Units generated by `code-gen migration` must be
//! added to [`registry`] or applying them fails closed.

use crate::migration::{Registry, SchemaMigration};

#[path = "migrations/2024-12-21_1734753349_CreatePastesTable1.rs"]
mod create_pastes_table_1;

pub use create_pastes_table_1::CreatePastesTable1;

/// Every unit the console knows how to run, keyed by logical name.
pub fn registry() -> Registry<dyn SchemaMigration> {
    let mut registry: Registry<dyn SchemaMigration> = Registry::new();
    registry.register("CreatePastesTable1", || Box::new(CreatePastesTable1));
    registry
}
