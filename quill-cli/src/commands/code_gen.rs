use super::CommandSpec;
use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use quill::args::{ArgValue, ArgumentParser, ArgumentSpec};
use quill::config::Config;
use std::fs;
use std::path::Path;
use tracing::info;

const ALIAS: &str = "code-gen";

static MIGRATION_STUB: &str = r#"use crate::migration::SchemaMigration;

pub struct __NAME__;

impl SchemaMigration for __NAME__ {
    fn forward_statements(&self) -> Vec<String> {
        Vec::new()
    }

    fn backward_statements(&self) -> Vec<String> {
        Vec::new()
    }
}
"#;

static SEEDER_STUB: &str = r#"use crate::db::SqlValue;
use crate::seed::{ColumnDef, Seeder};

pub struct __NAME__;

const COLUMNS: &[ColumnDef] = &[];

impl Seeder for __NAME__ {
    fn table_name(&self) -> &'static str {
        ""
    }

    fn columns(&self) -> &'static [ColumnDef] {
        COLUMNS
    }

    fn create_rows(&self) -> Vec<Vec<SqlValue>> {
        Vec::new()
    }
}
"#;

pub fn spec() -> CommandSpec {
    CommandSpec {
        alias: ALIAS,
        description: "Generate boilerplate code files based on the specified type (see Values below).",
        value_required: true,
        command_values: &[
            ("migration", "Generate a new database migration file"),
            ("seeder", "Generate a new database seeder file"),
        ],
        arguments,
        examples: "  # Generate a migration file\n  \
                   quill code-gen migration --name CreateUsersTable\n\n  \
                   # Generate a seeder file\n  \
                   quill code-gen seeder --name UserSeeder",
        run,
    }
}

fn arguments() -> Vec<ArgumentSpec> {
    vec![ArgumentSpec::new("name")
        .describe("Name of the file that is to be generated.")
        .required(false)
        .allow_short(true)]
}

fn run(config: &Config, argv: &[String]) -> Result<i32> {
    let specs = arguments();
    let args = ArgumentParser::new(argv, ALIAS, true, &specs).parse()?;
    let kind = args.command_value().unwrap_or_default();

    let name = match args.get("name") {
        ArgValue::Value(name) => name.clone(),
        _ => bail!("code-gen requires --name to know what to generate"),
    };

    info!("generating code for {}", kind);
    match kind {
        "migration" => generate_migration(&config.migrations_dir, &name)?,
        "seeder" => generate_seeder(&config.seeds_dir, &name)?,
        other => bail!("unknown code-gen type '{}' (expected 'migration' or 'seeder')", other),
    }

    Ok(0)
}

fn generate_migration(dir: &Path, name: &str) -> Result<()> {
    // The logical name goes into the filename so the catalog's extraction
    // rule and the registry key agree.
    let logical_name = pascal_case(name);
    let filename = format!(
        "{}_{}_{}.rs",
        Local::now().format("%Y-%m-%d"),
        Utc::now().timestamp(),
        logical_name
    );
    let path = dir.join(&filename);

    fs::write(&path, MIGRATION_STUB.replace("__NAME__", &logical_name))
        .with_context(|| format!("failed writing {}", path.display()))?;

    info!("migration file {} has been generated", filename);
    info!(
        "add {} to migrations::registry() to make it runnable",
        logical_name
    );
    Ok(())
}

fn generate_seeder(dir: &Path, name: &str) -> Result<()> {
    let mut seeder_name = name.to_string();
    if !seeder_name.ends_with("Seeder") {
        seeder_name.push_str("Seeder");
    }
    let filename = format!("{}.rs", seeder_name);
    let path = dir.join(&filename);

    fs::write(&path, SEEDER_STUB.replace("__NAME__", &seeder_name))
        .with_context(|| format!("failed writing {}", path.display()))?;

    info!("seeder file {} has been generated", filename);
    info!(
        "add {} to seeds::registry() to make it runnable",
        seeder_name
    );
    Ok(())
}

fn pascal_case(input: &str) -> String {
    input
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
