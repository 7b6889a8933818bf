use super::CommandSpec;
use anyhow::{Context, Result};
use quill::args::{ArgumentParser, ArgumentSpec};
use quill::catalog::MigrationCatalog;
use quill::config::Config;
use quill::db::Db;
use quill::migrations;
use quill::runner::MigrationRunner;
use tracing::info;

const ALIAS: &str = "migrate";

pub fn spec() -> CommandSpec {
    CommandSpec {
        alias: ALIAS,
        description: "Manages database migrations, including running new migrations and rolling back existing ones.",
        value_required: false,
        command_values: &[],
        arguments,
        examples: "  # Create the migrations table if it does not exist\n  \
                   quill migrate --init\n\n  \
                   # Run pending migrations\n  \
                   quill migrate\n\n  \
                   # Roll back the last migration\n  \
                   quill migrate --rollback\n\n  \
                   # Roll back the last 3 migrations\n  \
                   quill migrate --rollback 3",
        run,
    }
}

fn arguments() -> Vec<ArgumentSpec> {
    vec![
        ArgumentSpec::new("init")
            .describe("Create the migrations table if it doesn't exist.")
            .required(false)
            .allow_short(true),
        ArgumentSpec::new("rollback")
            .describe("Roll backwards. An integer n may also be provided to rollback n times.")
            .required(false)
            .allow_short(true),
    ]
}

fn run(config: &Config, argv: &[String]) -> Result<i32> {
    let specs = arguments();
    let args = ArgumentParser::new(argv, ALIAS, false, &specs).parse()?;
    let rollback = args.count("rollback", 1)?;

    let mut db =
        Db::connect(&config.database_url()?).context("couldn't connect to database")?;
    let registry = migrations::registry();
    let catalog = MigrationCatalog::new(&config.migrations_dir);
    let mut runner = MigrationRunner::new(&mut db, catalog, &registry);

    if args.get("init").is_present() {
        runner.init()?;
    }

    match rollback {
        None => {
            info!("starting migration");
            runner.apply()?;
        }
        Some(n) => {
            info!("rolling back {} migration(s)", n);
            runner.rollback(n)?;
        }
    }

    Ok(0)
}
