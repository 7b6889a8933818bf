//! Applies pending migration units in order and rolls back applied units in
//! reverse, keeping the ledger consistent with what actually ran.
//!
//! The ledger rows, ordered by id, are always a prefix of the ascending
//! catalog: apply resumes one past the last recorded filename, rollback
//! walks backward from it. A unit's ledger row is written only after its
//! whole batch succeeded, and before the next unit starts, so a crash
//! between units resumes cleanly. There is no atomicity within a single
//! unit's batch; a partially applied batch leaves no ledger row and needs
//! manual repair.

use crate::catalog::{MigrationCatalog, SortOrder, UnitFile};
use crate::db::QueryExecutor;
use crate::error::{Error, Result};
use crate::ledger;
use crate::migration::{Registry, SchemaMigration};
use tracing::{debug, info, warn};

pub struct MigrationRunner<'a, E: QueryExecutor> {
    exec: &'a mut E,
    catalog: MigrationCatalog,
    registry: &'a Registry<dyn SchemaMigration>,
}

impl<'a, E: QueryExecutor> MigrationRunner<'a, E> {
    pub fn new(
        exec: &'a mut E,
        catalog: MigrationCatalog,
        registry: &'a Registry<dyn SchemaMigration>,
    ) -> MigrationRunner<'a, E> {
        MigrationRunner {
            exec,
            catalog,
            registry,
        }
    }

    /// Creates the ledger table when absent. Safe to run on every invocation.
    pub fn init(&mut self) -> Result<()> {
        info!("creating migrations table if necessary");
        ledger::create_table(self.exec)?;
        info!("done setting up migrations table");
        Ok(())
    }

    /// Applies every unit past the last ledger entry, in catalog order.
    pub fn apply(&mut self) -> Result<()> {
        let last_applied = ledger::last_applied(self.exec)?;
        let units = self.catalog.list_units(SortOrder::Ascending)?;

        let start = match &last_applied {
            None => 0,
            Some(filename) => {
                let position = units
                    .iter()
                    .position(|unit| unit.filename == *filename)
                    .ok_or_else(|| Error::LedgerDrift {
                        filename: filename.clone(),
                    })?;
                position + 1
            }
        };

        if start >= units.len() {
            info!("database is up to date");
            return Ok(());
        }

        for unit in &units[start..] {
            info!("applying {}", unit.filename);
            let migration = self.resolve(unit)?;
            run_batch(self.exec, unit, migration.forward_statements(), "forward")?;
            ledger::record(self.exec, &unit.filename)?;
        }

        Ok(())
    }

    /// Undoes up to `n` applied units, newest first, stopping at the
    /// catalog start when fewer than `n` are applied.
    pub fn rollback(&mut self, n: u32) -> Result<()> {
        let Some(last_applied) = ledger::last_applied(self.exec)? else {
            info!("no migrations to roll back");
            return Ok(());
        };

        let units = self.catalog.list_units(SortOrder::Ascending)?;
        let Some(last_index) = units.iter().position(|unit| unit.filename == last_applied)
        else {
            warn!("could not find the last migration ran: {}", last_applied);
            return Ok(());
        };

        let mut count = 0;
        for unit in units[..=last_index].iter().rev() {
            if count == n {
                break;
            }
            info!("rolling back {}", unit.filename);
            let migration = self.resolve(unit)?;
            run_batch(self.exec, unit, migration.backward_statements(), "backward")?;
            ledger::remove(self.exec, &unit.filename)?;
            count += 1;
        }

        Ok(())
    }

    fn resolve(&self, unit: &UnitFile) -> Result<Box<dyn SchemaMigration>> {
        self.registry
            .resolve(&unit.logical_name)
            .ok_or_else(|| Error::UnknownUnit {
                name: unit.logical_name.clone(),
                filename: unit.filename.clone(),
            })
    }
}

fn run_batch(
    exec: &mut impl QueryExecutor,
    unit: &UnitFile,
    statements: Vec<String>,
    direction: &'static str,
) -> Result<()> {
    if statements.is_empty() {
        return Err(Error::EmptyBatch {
            name: unit.logical_name.clone(),
            direction,
        });
    }
    for statement in &statements {
        exec.execute(statement)?;
        debug!("ran statement: {}", statement);
    }
    Ok(())
}
