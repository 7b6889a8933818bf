use super::CommandSpec;
use anyhow::{bail, Context, Result};
use quill::args::{ArgValue, ArgumentParser, ArgumentSpec};
use quill::config::Config;
use quill::db::Db;
use quill::error::Error;
use quill::migration::Registry;
use quill::seed::{self, Seeder};
use quill::seeds;

const ALIAS: &str = "seed";

pub fn spec() -> CommandSpec {
    CommandSpec {
        alias: ALIAS,
        description: "Seeds the database with test data.",
        value_required: false,
        command_values: &[],
        arguments,
        examples: "  # Run all seeders\n  \
                   quill seed\n\n  \
                   # Run a specific seeder\n  \
                   quill seed --class PublicPastesSeeder",
        run,
    }
}

fn arguments() -> Vec<ArgumentSpec> {
    vec![ArgumentSpec::new("class")
        .describe("Name of the seeder to run.")
        .required(false)
        .allow_short(true)]
}

fn run(config: &Config, argv: &[String]) -> Result<i32> {
    let specs = arguments();
    let args = ArgumentParser::new(argv, ALIAS, false, &specs).parse()?;
    let class = args.get("class").clone();
    if class == ArgValue::Present {
        bail!("argument '--class' requires a seeder name");
    }

    let registry = seeds::registry();
    let mut db =
        Db::connect(&config.database_url()?).context("couldn't connect to database")?;

    match class.as_str() {
        Some(name) => run_one(&mut db, &registry, name)?,
        None => {
            for name in registry.names().collect::<Vec<_>>() {
                run_one(&mut db, &registry, name)?;
            }
        }
    }

    Ok(0)
}

fn run_one(db: &mut Db, registry: &Registry<dyn Seeder>, name: &str) -> Result<()> {
    let seeder = registry.resolve(name).ok_or_else(|| Error::UnknownSeeder {
        name: name.to_string(),
    })?;
    seed::run_seeder(db, name, seeder.as_ref())?;
    Ok(())
}
