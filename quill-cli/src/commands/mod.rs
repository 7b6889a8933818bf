//! The console's command registry. Each program is described by a
//! [`CommandSpec`] and resolved by its alias from the process arguments; an
//! unregistered command cannot be reached from the console.

use anyhow::Result;
use quill::args::ArgumentSpec;
use quill::config::Config;

mod code_gen;
mod migrate;
mod seed;

pub struct CommandSpec {
    pub alias: &'static str,
    pub description: &'static str,
    pub value_required: bool,
    /// Accepted command values and their meaning, for help output.
    pub command_values: &'static [(&'static str, &'static str)],
    pub arguments: fn() -> Vec<ArgumentSpec>,
    pub examples: &'static str,
    pub run: fn(&Config, &[String]) -> Result<i32>,
}

/// Fixed-order registry of every command the console exposes.
pub fn registry() -> Vec<CommandSpec> {
    vec![code_gen::spec(), migrate::spec(), seed::spec()]
}

/// Renders one command's help text: alias, accepted command values,
/// declared arguments with short-form and required/optional annotations,
/// and example invocations.
pub fn render_help(command: &CommandSpec) -> String {
    let value = if command.value_required { " <value>" } else { "" };
    let mut help = format!("Command: {}{}\n\n", command.alias, value);
    help.push_str(&format!("Description:\n  {}\n", command.description));

    if command.value_required {
        help.push_str("\nValues:\n");
        for (value, description) in command.command_values {
            help.push_str(&format!("  {:<12} {}\n", value, description));
        }
    }

    let arguments = (command.arguments)();
    if !arguments.is_empty() {
        help.push_str("\nArguments:\n");
        for argument in &arguments {
            let short = match argument.name().chars().next() {
                Some(first) if argument.is_short_allowed() => format!(" (-{})", first),
                _ => String::new(),
            };
            let requirement = if argument.is_required() {
                " (Required)"
            } else {
                " (Optional)"
            };
            help.push_str(&format!(
                "  --{}{}: {}{}\n",
                argument.name(),
                short,
                argument.description(),
                requirement
            ));
        }
    }

    help.push_str(&format!("\nExamples:\n{}\n", command.examples));
    help
}

pub fn usage(registry: &[CommandSpec]) -> String {
    format!(
        "Usage:\n  quill {{command}} {{command_value}} {{--option1}} {{option1_value}} ... {{--optionN}} {{optionN_value}}\n\n{}",
        available_commands(registry)
    )
}

pub fn no_command(registry: &[CommandSpec]) -> String {
    format!("Command not specified\n\n{}", usage(registry))
}

pub fn command_not_found(alias: &str, registry: &[CommandSpec]) -> String {
    format!(
        "Command '{}' not found\n\n{}",
        alias,
        available_commands(registry)
    )
}

fn available_commands(registry: &[CommandSpec]) -> String {
    let mut out = String::from("Available commands:\n");
    for command in registry {
        out.push_str(&format!("  {:<10} {}\n", command.alias, command.description));
    }
    out.push_str("\nFor more information about a command, run:\n  quill {command} --help\n");
    out
}
