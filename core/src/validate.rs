//! Descriptor and argument validation.
//!
//! Two kinds of checks live here:
//!
//! - [`validate_command`] checks a [`CommandSpec`] when it is registered:
//!   flag names, duplicates, reserved names, default types and action names.
//! - [`validate_flags`] checks parsed arguments against a command's
//!   [`CommandFlags`] at dispatch time: first the type of every present flag,
//!   then the presence of every required flag. The first violation wins.
//!
//! # Examples
//!
//! ```
//! use catalog_cli_core::*;
//!
//! let flags = CommandFlags::new(
//!     vec![
//!         FlagSpec::new("t", "type", ValueType::String),
//!         FlagSpec::new("c", "count", ValueType::Number).with_default(10),
//!     ],
//!     &["type"],
//! )
//! .unwrap();
//!
//! let ok = parse_args(["generate", "--type", "act", "-c", "5"]);
//! assert!(validate_flags(&ok, &flags).is_ok());
//!
//! let missing = parse_args(["generate", "--count", "5"]);
//! assert_eq!(
//!     validate_flags(&missing, &flags),
//!     Err(FlagError::MissingRequiredFlag { flag: "-t, --type <type:string>".into() })
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandFlags, CommandSpec, ParsedArgs, ValueType};

/// Long and short names the dispatcher keeps for its own help switch.
pub(crate) const HELP_FLAGS: [&str; 2] = ["help", "h"];

/// Positional token that always shows help.
pub(crate) const HELP_COMMAND: &str = "help";

/// A parsed argument bag that does not satisfy a command's flags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// A required flag is absent under both its short and long key.
    #[error("missing required flag {flag}")]
    MissingRequiredFlag { flag: String },
    /// A flag is present but its value has the wrong type.
    #[error("expected a {expected} value, got a {found} value for flag {flag}")]
    InvalidFlagType {
        flag: String,
        expected: ValueType,
        found: ValueType,
    },
}

impl FlagError {
    /// Error message without the flag, for the help screen's error line.
    pub fn summary(&self) -> String {
        match self {
            FlagError::MissingRequiredFlag { .. } => "Missing required flag".to_string(),
            FlagError::InvalidFlagType {
                expected, found, ..
            } => format!("Expected a {expected} value, got a {found} value for flag"),
        }
    }

    /// Display string of the offending flag.
    pub fn flag(&self) -> &str {
        match self {
            FlagError::MissingRequiredFlag { flag } | FlagError::InvalidFlagType { flag, .. } => {
                flag
            }
        }
    }
}

/// Structural problems in a command descriptor or registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The command name yields no alias.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Two registered commands share an alias.
    #[error("duplicate command alias: {0}")]
    DuplicateAlias(String),
    /// A command alias collides with the built-in `help` pseudo-command.
    #[error("command alias is reserved: {0}")]
    ReservedCommand(String),
    /// Short name is not a single character, or long name is too short.
    #[error("invalid flag name: {0}")]
    InvalidFlagName(String),
    /// Two flags in the same command share a short or long name.
    #[error("duplicate flag in command {command}: {flag}")]
    DuplicateFlag { command: String, flag: String },
    /// A command declares a flag the dispatcher reserves.
    #[error("flag name is reserved for help: {0}")]
    ReservedFlag(String),
    /// A required flag name is not declared.
    #[error("required flag is not declared: {0}")]
    UnknownRequiredFlag(String),
    /// A default value's type differs from the flag's declared type.
    #[error("default for {flag} must be a {expected}, got a {found}")]
    DefaultTypeMismatch {
        flag: String,
        expected: ValueType,
        found: ValueType,
    },
    /// Two action options share a name.
    #[error("duplicate action in command {command}: {action}")]
    DuplicateAction { command: String, action: String },
    /// A flag display string could not be parsed.
    #[error("invalid flag display string: {0}")]
    InvalidFlagDisplay(String),
    #[error("unknown value type: {0}")]
    UnknownValueType(String),
}

/// Checks parsed arguments against a command's flags.
///
/// The type pass runs over every declared flag before the requiredness pass
/// looks at the required subset, so a bag that breaks both rules reports the
/// type violation.
///
/// # Errors
///
/// Returns the first [`FlagError`] found.
pub fn validate_flags(args: &ParsedArgs, flags: &CommandFlags) -> Result<(), FlagError> {
    for flag in flags.all() {
        for key in [&flag.short, &flag.long] {
            let Some(value) = args.get(key) else {
                continue;
            };
            let found = value.value_type();
            if found != flag.value_type {
                return Err(FlagError::InvalidFlagType {
                    flag: flag.display.clone(),
                    expected: flag.value_type,
                    found,
                });
            }
        }
    }

    for flag in flags.required() {
        if !args.contains(&flag.short) && !args.contains(&flag.long) {
            return Err(FlagError::MissingRequiredFlag {
                flag: flag.display.clone(),
            });
        }
    }

    Ok(())
}

/// Checks a command descriptor for structural problems.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::*;
///
/// let flags = CommandFlags::new(
///     vec![
///         FlagSpec::new("p", "path", ValueType::String),
///         FlagSpec::new("p", "port", ValueType::Number),
///     ],
///     &[],
/// )
/// .unwrap();
/// let cmd = CommandSpec::new("serve", "Serve", |_| Ok(())).with_flags(flags);
///
/// assert!(matches!(validate_command(&cmd), Err(SchemaError::DuplicateFlag { .. })));
/// ```
pub fn validate_command(command: &CommandSpec) -> Result<(), SchemaError> {
    if command.aliases().is_empty() {
        return Err(SchemaError::EmptyCommandName);
    }
    let name = command.canonical_name().to_string();
    if command.has_alias(HELP_COMMAND) {
        return Err(SchemaError::ReservedCommand(HELP_COMMAND.to_string()));
    }

    let mut seen = HashSet::new();
    for flag in command.flags.all() {
        if flag.short.chars().count() != 1 || flag.short.starts_with('-') {
            return Err(SchemaError::InvalidFlagName(flag.short.clone()));
        }
        if flag.long.len() < 2 || flag.long.starts_with('-') {
            return Err(SchemaError::InvalidFlagName(flag.long.clone()));
        }

        for key in [&flag.short, &flag.long] {
            if HELP_FLAGS.contains(&key.as_str()) {
                return Err(SchemaError::ReservedFlag(key.clone()));
            }
            if !seen.insert(key.as_str()) {
                return Err(SchemaError::DuplicateFlag {
                    command: name,
                    flag: key.clone(),
                });
            }
        }

        if let Some(default) = &flag.default {
            let found = default.value_type();
            if found != flag.value_type {
                return Err(SchemaError::DefaultTypeMismatch {
                    flag: flag.display.clone(),
                    expected: flag.value_type,
                    found,
                });
            }
        }
    }

    if let Some(actions) = command.actions.as_set() {
        let mut seen_actions = HashSet::new();
        for option in &actions.options {
            if !seen_actions.insert(option.name.as_str()) {
                return Err(SchemaError::DuplicateAction {
                    command: name,
                    action: option.name.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{ActionSet, FlagSpec, FlagValue, parse_args};

    use super::*;

    fn request_flags() -> CommandFlags {
        CommandFlags::new(
            vec![
                FlagSpec::new("u", "url", ValueType::String),
                FlagSpec::new("a", "action", ValueType::String),
                FlagSpec::new("i", "index", ValueType::Number).with_default(0),
                FlagSpec::new("d", "dry-run", ValueType::Boolean),
            ],
            &["url", "action"],
        )
        .unwrap()
    }

    #[test]
    fn test_validate_flags_accepts_short_spelling() {
        let args = parse_args(["request", "-u", "http://x", "-a", "getActs"]);
        assert_eq!(validate_flags(&args, &request_flags()), Ok(()));
    }

    #[test]
    fn test_zero_counts_as_present() {
        let mut args = parse_args(["request", "--url", "http://x", "--action", "getActs"]);
        args.insert("index", FlagValue::Number(0.0));
        assert_eq!(validate_flags(&args, &request_flags()), Ok(()));
    }

    #[test]
    fn test_false_counts_as_present_for_required_boolean() {
        let flags = CommandFlags::new(
            vec![FlagSpec::new("f", "force", ValueType::Boolean)],
            &["force"],
        )
        .unwrap();
        let mut args = ParsedArgs::default();
        args.insert("force", FlagValue::Boolean(false));
        assert_eq!(validate_flags(&args, &flags), Ok(()));
    }

    #[test]
    fn test_empty_string_counts_as_present() {
        let mut args = ParsedArgs::default();
        args.insert("url", FlagValue::from(""));
        args.insert("action", FlagValue::from("getActs"));
        assert_eq!(validate_flags(&args, &request_flags()), Ok(()));
    }

    #[test]
    fn test_numeric_value_for_string_flag_is_type_error() {
        let args = parse_args(["request", "--url", "0", "--action", "getActs"]);
        assert_eq!(
            validate_flags(&args, &request_flags()),
            Err(FlagError::InvalidFlagType {
                flag: "-u, --url <url:string>".to_string(),
                expected: ValueType::String,
                found: ValueType::Number,
            })
        );
    }

    #[test]
    fn test_type_violation_reported_before_missing_flag() {
        // `--index abc` is a type error; `--action` is also missing.
        let args = parse_args(["request", "--url", "http://x", "--index", "abc"]);
        assert_eq!(
            validate_flags(&args, &request_flags()),
            Err(FlagError::InvalidFlagType {
                flag: "-i, --index <index:number>".to_string(),
                expected: ValueType::Number,
                found: ValueType::String,
            })
        );
    }

    #[test]
    fn test_flag_without_value_is_boolean_type_error() {
        let args = parse_args(["request", "--url", "--action", "getActs"]);
        let err = validate_flags(&args, &request_flags()).unwrap_err();
        assert_eq!(err.flag(), "-u, --url <url:string>");
        assert!(matches!(
            err,
            FlagError::InvalidFlagType {
                found: ValueType::Boolean,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_command_rejects_reserved_help() {
        let flags = CommandFlags::new(
            vec![FlagSpec::new("h", "host", ValueType::String)],
            &[],
        )
        .unwrap();
        let cmd = CommandSpec::new("serve", "", |_| Ok(())).with_flags(flags);
        assert_eq!(
            validate_command(&cmd),
            Err(SchemaError::ReservedFlag("h".to_string()))
        );
    }

    #[test]
    fn test_validate_command_rejects_mistyped_default() {
        let flags = CommandFlags::new(
            vec![FlagSpec::new("c", "count", ValueType::Number).with_default("ten")],
            &[],
        )
        .unwrap();
        let cmd = CommandSpec::new("generate", "", |_| Ok(())).with_flags(flags);
        assert!(matches!(
            validate_command(&cmd),
            Err(SchemaError::DefaultTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_command_rejects_duplicate_action() {
        let cmd = CommandSpec::new("request", "", |_| Ok(())).with_actions(
            ActionSet::new("ACTIONS")
                .with_option("getActs", "Get all acts")
                .with_option("getActs", "Again"),
        );
        assert_eq!(
            validate_command(&cmd),
            Err(SchemaError::DuplicateAction {
                command: "request".to_string(),
                action: "getActs".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_command_rejects_empty_name() {
        let cmd = CommandSpec::new(" , ", "", |_| Ok(()));
        assert_eq!(validate_command(&cmd), Err(SchemaError::EmptyCommandName));
    }
}
