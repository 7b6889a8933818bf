//! Command-line argument resolution for console programs.
//!
//! Each program declares the options it accepts as [`ArgumentSpec`]s. The
//! parser locates the program's alias in the raw argument vector, takes the
//! following token as the command value when one is present, splits the rest
//! into key/value pairs, and resolves every declared option to an
//! [`ArgValue`]. Required options that stay unresolved fail parsing; optional
//! ones resolve to [`ArgValue::Absent`].

use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgsError {
    #[error("could not find command alias '{0}'")]
    AliasNotFound(String),
    #[error("command '{0}' requires a value")]
    MissingCommandValue(String),
    #[error("invalid option format '{0}': options must start with - or --")]
    MalformedOption(String),
    #[error("required argument '--{0}' not found")]
    MissingRequiredArgument(String),
    #[error("argument '--{name}' expects a non-negative integer, got '{value}'")]
    InvalidCount { name: String, value: String },
}

/// One named option a command accepts. Configured with the builder methods
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    name: &'static str,
    description: &'static str,
    required: bool,
    short_allowed: bool,
}

impl ArgumentSpec {
    pub fn new(name: &'static str) -> ArgumentSpec {
        ArgumentSpec {
            name,
            description: "",
            required: true,
            short_allowed: false,
        }
    }

    pub fn describe(mut self, description: &'static str) -> ArgumentSpec {
        self.description = description;
        self
    }

    pub fn required(mut self, required: bool) -> ArgumentSpec {
        self.required = required;
        self
    }

    pub fn allow_short(mut self, short_allowed: bool) -> ArgumentSpec {
        self.short_allowed = short_allowed;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_short_allowed(&self) -> bool {
        self.short_allowed
    }

    /// The single-character key this option answers to when short forms are
    /// allowed.
    fn short_key(&self) -> String {
        self.name.chars().take(1).collect()
    }
}

/// A resolved argument: a string value, boolean true for a flag given
/// without a value, or boolean false for an optional argument that was not
/// given at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Value(String),
    Present,
    Absent,
}

impl ArgValue {
    /// True when the argument was given, with or without a value.
    pub fn is_present(&self) -> bool {
        !matches!(self, ArgValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// The read-only result of one command invocation's argument resolution.
#[derive(Debug)]
pub struct ParsedArguments {
    command_value: Option<String>,
    values: HashMap<String, ArgValue>,
}

impl ParsedArguments {
    /// The positional token that followed the alias, if any.
    pub fn command_value(&self) -> Option<&str> {
        self.command_value.as_deref()
    }

    /// The resolved value for a declared argument. Names that were never
    /// declared resolve to [`ArgValue::Absent`].
    pub fn get(&self, name: &str) -> &ArgValue {
        self.values.get(name).unwrap_or(&ArgValue::Absent)
    }

    /// Interprets an argument as a repeat count: a bare flag means
    /// `default`, an explicit value must parse as a non-negative integer,
    /// and an absent argument means no count at all. Non-numeric input fails
    /// here, during argument resolution, before any command logic runs.
    pub fn count(&self, name: &str, default: u32) -> Result<Option<u32>, ArgsError> {
        match self.get(name) {
            ArgValue::Absent => Ok(None),
            ArgValue::Present => Ok(Some(default)),
            ArgValue::Value(value) => value.parse::<u32>().map(Some).map_err(|_| {
                ArgsError::InvalidCount {
                    name: name.to_string(),
                    value: value.clone(),
                }
            }),
        }
    }
}

pub struct ArgumentParser<'a> {
    argv: &'a [String],
    alias: &'a str,
    value_required: bool,
    specs: &'a [ArgumentSpec],
}

impl<'a> ArgumentParser<'a> {
    pub fn new(
        argv: &'a [String],
        alias: &'a str,
        value_required: bool,
        specs: &'a [ArgumentSpec],
    ) -> ArgumentParser<'a> {
        ArgumentParser {
            argv,
            alias,
            value_required,
            specs,
        }
    }

    pub fn parse(&self) -> Result<ParsedArguments, ArgsError> {
        let alias_at = self
            .argv
            .iter()
            .position(|token| token == self.alias)
            .ok_or_else(|| ArgsError::AliasNotFound(self.alias.to_string()))?;
        let mut index = alias_at + 1;

        let mut command_value = None;
        match self.argv.get(index) {
            Some(token) if !token.starts_with('-') => {
                command_value = Some(token.clone());
                index += 1;
            }
            _ => {
                if self.value_required {
                    return Err(ArgsError::MissingCommandValue(self.alias.to_string()));
                }
            }
        }

        let shell_args = self.collect_shell_args(index)?;

        let mut values = HashMap::new();
        for spec in self.specs {
            let resolved = if spec.is_short_allowed() {
                shell_args
                    .get(spec.short_key().as_str())
                    .or_else(|| shell_args.get(spec.name()))
            } else {
                shell_args.get(spec.name())
            };

            match resolved {
                Some(value) => {
                    values.insert(spec.name().to_string(), value.clone());
                }
                None if spec.is_required() => {
                    return Err(ArgsError::MissingRequiredArgument(spec.name().to_string()));
                }
                None => {
                    values.insert(spec.name().to_string(), ArgValue::Absent);
                }
            }
        }

        info!("resolved arguments for '{}': {:?}", self.alias, values);

        Ok(ParsedArguments {
            command_value,
            values,
        })
    }

    /// Walks the tokens after the command value as key/value pairs. A key
    /// takes the next token as its value unless that token is the bare `-`
    /// sentinel; a token that cannot be classified as a long or short option
    /// is a parse error.
    fn collect_shell_args(&self, mut index: usize) -> Result<HashMap<String, ArgValue>, ArgsError> {
        let mut shell_args = HashMap::new();

        while index < self.argv.len() {
            let token = &self.argv[index];
            let key = if let Some(long) = token.strip_prefix("--") {
                long
            } else if let Some(short) = token.strip_prefix('-') {
                short
            } else {
                return Err(ArgsError::MalformedOption(token.clone()));
            };
            if key.is_empty() {
                return Err(ArgsError::MalformedOption(token.clone()));
            }

            match self.argv.get(index + 1) {
                Some(next) if next != "-" => {
                    shell_args.insert(key.to_string(), ArgValue::Value(next.clone()));
                    index += 2;
                }
                _ => {
                    shell_args.insert(key.to_string(), ArgValue::Present);
                    index += 1;
                }
            }
        }

        Ok(shell_args)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    fn migrate_specs() -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::new("init")
                .describe("Create the migrations table if it doesn't exist.")
                .required(false)
                .allow_short(true),
            ArgumentSpec::new("rollback")
                .describe("Roll backwards.")
                .required(false)
                .allow_short(true),
        ]
    }

    fn parse(tokens: &[&str]) -> Result<ParsedArguments, ArgsError> {
        let argv = argv(tokens);
        let specs = migrate_specs();
        ArgumentParser::new(&argv, "migrate", false, &specs).parse()
    }

    #[test]
    fn test_short_option_with_value() {
        let args = parse(&["migrate", "-r", "3"]).unwrap();
        assert_eq!(args.get("rollback"), &ArgValue::Value("3".to_string()));
        assert_eq!(args.get("init"), &ArgValue::Absent);
    }

    #[test]
    fn test_short_option_as_flag() {
        let args = parse(&["migrate", "-r"]).unwrap();
        assert_eq!(args.get("rollback"), &ArgValue::Present);
        assert!(args.get("rollback").is_present());
    }

    #[test]
    fn test_optional_argument_absent() {
        let args = parse(&["migrate"]).unwrap();
        assert_eq!(args.get("rollback"), &ArgValue::Absent);
        assert!(!args.get("rollback").is_present());
    }

    #[test]
    fn test_long_option_resolves() {
        let args = parse(&["migrate", "--rollback", "2"]).unwrap();
        assert_eq!(args.get("rollback"), &ArgValue::Value("2".to_string()));
    }

    #[test]
    fn test_short_key_ignored_when_not_allowed() {
        let argv = argv(&["seed", "-c", "PublicPastesSeeder"]);
        let specs = vec![ArgumentSpec::new("class").required(false)];
        let args = ArgumentParser::new(&argv, "seed", false, &specs)
            .parse()
            .unwrap();
        assert_eq!(args.get("class"), &ArgValue::Absent);
    }

    #[test]
    fn test_alias_not_found() {
        let argv = argv(&["seed"]);
        let specs = migrate_specs();
        let err = ArgumentParser::new(&argv, "migrate", false, &specs)
            .parse()
            .unwrap_err();
        assert_eq!(err, ArgsError::AliasNotFound("migrate".to_string()));
    }

    #[test]
    fn test_missing_required_argument() {
        let argv = argv(&["migrate"]);
        let specs = vec![ArgumentSpec::new("rollback").required(true)];
        let err = ArgumentParser::new(&argv, "migrate", false, &specs)
            .parse()
            .unwrap_err();
        assert_eq!(
            err,
            ArgsError::MissingRequiredArgument("rollback".to_string())
        );
    }

    #[test]
    fn test_bare_dash_is_malformed() {
        let err = parse(&["migrate", "-"]).unwrap_err();
        assert_eq!(err, ArgsError::MalformedOption("-".to_string()));
    }

    #[test]
    fn test_bare_double_dash_is_malformed() {
        let err = parse(&["migrate", "--"]).unwrap_err();
        assert_eq!(err, ArgsError::MalformedOption("--".to_string()));
    }

    #[test]
    fn test_unexpected_positional_token_is_malformed() {
        // the first bare token is the command value; a second one cannot be
        // classified as an option
        let err = parse(&["migrate", "value", "oops"]).unwrap_err();
        assert_eq!(err, ArgsError::MalformedOption("oops".to_string()));
    }

    #[test]
    fn test_sentinel_blocks_value_consumption() {
        let argv = argv(&["migrate", "-r", "-", "x"]);
        let specs = migrate_specs();
        let err = ArgumentParser::new(&argv, "migrate", false, &specs)
            .parse()
            .unwrap_err();
        // "-r" stays a flag; the sentinel itself then fails classification
        assert_eq!(err, ArgsError::MalformedOption("-".to_string()));
    }

    #[test]
    fn test_command_value_captured() {
        let argv = argv(&["code-gen", "migration", "--name", "CreateUsers"]);
        let specs = vec![ArgumentSpec::new("name").required(false)];
        let args = ArgumentParser::new(&argv, "code-gen", true, &specs)
            .parse()
            .unwrap();
        assert_eq!(args.command_value(), Some("migration"));
        assert_eq!(
            args.get("name"),
            &ArgValue::Value("CreateUsers".to_string())
        );
    }

    #[test]
    fn test_command_value_required_but_missing() {
        let argv = argv(&["code-gen", "--name", "CreateUsers"]);
        let specs = vec![ArgumentSpec::new("name").required(false)];
        let err = ArgumentParser::new(&argv, "code-gen", true, &specs)
            .parse()
            .unwrap_err();
        assert_eq!(err, ArgsError::MissingCommandValue("code-gen".to_string()));
    }

    #[test]
    fn test_count_parses_value_flag_and_absent() {
        let args = parse(&["migrate", "-r", "3"]).unwrap();
        assert_eq!(args.count("rollback", 1).unwrap(), Some(3));

        let args = parse(&["migrate", "-r"]).unwrap();
        assert_eq!(args.count("rollback", 1).unwrap(), Some(1));

        let args = parse(&["migrate"]).unwrap();
        assert_eq!(args.count("rollback", 1).unwrap(), None);
    }

    #[test]
    fn test_count_rejects_non_numeric_value() {
        let args = parse(&["migrate", "--rollback", "three"]).unwrap();
        let err = args.count("rollback", 1).unwrap_err();
        assert_eq!(
            err,
            ArgsError::InvalidCount {
                name: "rollback".to_string(),
                value: "three".to_string(),
            }
        );
    }
}
