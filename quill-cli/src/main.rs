use anyhow::{Context, Result};
use quill::config::Config;
use std::env;
use std::process::ExitCode;
use tracing::Level;

mod commands;

fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();

    let argv = env::args().skip(1).collect::<Vec<String>>();
    let registry = commands::registry();

    // The first non-option token picks the command; everything else is the
    // command's own business.
    let alias = argv.iter().find(|token| !token.starts_with('-'));
    let command = alias.and_then(|alias| registry.iter().find(|spec| spec.alias == *alias));
    let help_requested = argv.iter().any(|token| token == "--help" || token == "-h");

    if help_requested {
        match command {
            Some(command) => print!("{}", commands::render_help(command)),
            None => print!("{}", commands::usage(&registry)),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let command = match (alias, command) {
        (Some(_), Some(command)) => command,
        (Some(alias), None) => {
            eprint!("{}", commands::command_not_found(alias, &registry));
            return Ok(ExitCode::FAILURE);
        }
        (None, _) => {
            eprint!("{}", commands::no_command(&registry));
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = Config::from_env()?;
    let level = if config.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .without_time()
        .with_target(false)
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber failed")?;

    let status = (command.run)(&config, &argv)?;
    Ok(ExitCode::from(u8::try_from(status).unwrap_or(1)))
}
