//! Command-line token parsing and the validated argument record.
//!
//! [`parse_args`] turns raw tokens into a [`ParsedArgs`] bag without looking
//! at any command descriptor. After validation the dispatcher reduces that
//! bag to a [`CommandArgs`] record keyed by declared long names.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::{FlagValue, ValueType};

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?$")
        .expect("static regex must compile")
});
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[xX][0-9a-fA-F]+$").expect("static regex must compile"));

/// Flags and positional tokens of one invocation.
///
/// Flag keys are stored the way the user typed them, without dashes, so
/// `-u` and `--url` land under `u` and `url` respectively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    flags: BTreeMap<String, FlagValue>,
    positional: Vec<String>,
}

impl ParsedArgs {
    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// True when the key was given, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    pub fn insert(&mut self, key: &str, value: FlagValue) -> Option<FlagValue> {
        self.flags.insert(key.to_string(), value)
    }

    pub fn push_positional(&mut self, token: &str) {
        self.positional.push(token.to_string());
    }

    /// Tokens not consumed as flags or flag values, in order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// First positional token: the command name or alias.
    pub fn command_token(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }

    pub fn flags(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parses whitespace-separated command-line tokens.
///
/// - `--name` is a long flag, `-n` a short flag.
/// - A flag followed by a non-flag token takes it as its value; otherwise
///   the flag is `true`.
/// - `--` ends flag parsing; a lone `-` is positional.
/// - Numeric-looking values become numbers, including negative ones, which
///   are never mistaken for flags.
/// - `--name=value` is not split.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::{FlagValue, parse_args};
///
/// let args = parse_args(["request", "-u", "http://x/acts", "--index", "2", "--verbose"]);
/// assert_eq!(args.command_token(), Some("request"));
/// assert_eq!(args.get("u"), Some(&FlagValue::from("http://x/acts")));
/// assert_eq!(args.get("index"), Some(&FlagValue::Number(2.0)));
/// assert_eq!(args.get("verbose"), Some(&FlagValue::Boolean(true)));
/// ```
pub fn parse_args<I, S>(tokens: I) -> ParsedArgs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<String> = tokens
        .into_iter()
        .map(|token| token.as_ref().to_string())
        .collect();
    let mut parsed = ParsedArgs::default();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--" {
            for rest in &tokens[i + 1..] {
                parsed.push_positional(rest);
            }
            break;
        }

        let Some(name) = flag_name(token) else {
            parsed.push_positional(token);
            i += 1;
            continue;
        };

        match tokens.get(i + 1).map(String::as_str) {
            Some(next) if next != "--" && flag_name(next).is_none() => {
                parsed.insert(name, coerce(next));
                i += 2;
            }
            _ => {
                parsed.insert(name, FlagValue::Boolean(true));
                i += 1;
            }
        }
    }

    parsed
}

fn flag_name(token: &str) -> Option<&str> {
    if let Some(long) = token.strip_prefix("--") {
        return (!long.is_empty()).then_some(long);
    }
    match token.strip_prefix('-') {
        Some(short) if !short.is_empty() && !is_numeric(token) => Some(short),
        _ => None,
    }
}

fn is_numeric(token: &str) -> bool {
    NUMBER_RE.is_match(token) || HEX_RE.is_match(token)
}

fn coerce(value: &str) -> FlagValue {
    if NUMBER_RE.is_match(value) {
        if let Ok(n) = value.parse::<f64>() {
            return FlagValue::Number(n);
        }
    }
    if HEX_RE.is_match(value) {
        if let Ok(n) = u64::from_str_radix(&value[2..], 16) {
            return FlagValue::Number(n as f64);
        }
    }
    FlagValue::String(value.to_string())
}

/// Errors from typed access to [`CommandArgs`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgError {
    #[error("argument --{0} was not provided")]
    Missing(String),
    #[error("argument --{name} must be a {expected}, got a {found}")]
    WrongType {
        name: String,
        expected: ValueType,
        found: ValueType,
    },
    #[error("argument --{name} must be a non-negative integer, got {value}")]
    NotAnIndex { name: String, value: f64 },
}

/// Validated arguments handed to a command handler.
///
/// Holds only the command's declared long names, each mapped to the parsed
/// value or the flag's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommandArgs {
    values: BTreeMap<String, FlagValue>,
}

impl CommandArgs {
    pub fn insert(&mut self, name: &str, value: FlagValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// String value of `name`.
    pub fn str(&self, name: &str) -> Result<&str, ArgError> {
        match self.require(name)? {
            FlagValue::String(s) => Ok(s),
            other => Err(wrong_type(name, ValueType::String, other)),
        }
    }

    /// Numeric value of `name`.
    pub fn number(&self, name: &str) -> Result<f64, ArgError> {
        match self.require(name)? {
            FlagValue::Number(n) => Ok(*n),
            other => Err(wrong_type(name, ValueType::Number, other)),
        }
    }

    /// Numeric value of `name` as an index or count.
    pub fn usize(&self, name: &str) -> Result<usize, ArgError> {
        let value = self.number(name)?;
        if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
            return Err(ArgError::NotAnIndex {
                name: name.to_string(),
                value,
            });
        }
        Ok(value as usize)
    }

    /// Boolean value of `name`; an absent switch reads as `false`.
    pub fn bool(&self, name: &str) -> Result<bool, ArgError> {
        match self.values.get(name) {
            None => Ok(false),
            Some(FlagValue::Boolean(b)) => Ok(*b),
            Some(other) => Err(wrong_type(name, ValueType::Boolean, other)),
        }
    }

    fn require(&self, name: &str) -> Result<&FlagValue, ArgError> {
        self.values
            .get(name)
            .ok_or_else(|| ArgError::Missing(name.to_string()))
    }
}

fn wrong_type(name: &str, expected: ValueType, found: &FlagValue) -> ArgError {
    ArgError::WrongType {
        name: name.to_string(),
        expected,
        found: found.value_type(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positionals_keep_order() {
        let args = parse_args(["generate", "acts", "--count", "3", "extra"]);
        assert_eq!(args.positional(), ["generate", "acts", "extra"]);
        assert_eq!(args.get("count"), Some(&FlagValue::Number(3.0)));
    }

    #[test]
    fn test_flag_followed_by_flag_is_boolean() {
        let args = parse_args(["r", "--dry-run", "--url", "http://x"]);
        assert_eq!(args.get("dry-run"), Some(&FlagValue::Boolean(true)));
        assert_eq!(args.get("url"), Some(&FlagValue::from("http://x")));
    }

    #[test]
    fn test_trailing_flag_is_boolean() {
        let args = parse_args(["help", "-h"]);
        assert_eq!(args.get("h"), Some(&FlagValue::Boolean(true)));
    }

    #[test]
    fn test_negative_number_is_a_value() {
        let args = parse_args(["request", "--index", "-1"]);
        assert_eq!(args.get("index"), Some(&FlagValue::Number(-1.0)));
        assert!(args.get("1").is_none());
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let args = parse_args(["request", "--", "--url", "x"]);
        assert_eq!(args.positional(), ["request", "--url", "x"]);
        assert!(!args.contains("url"));
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let args = parse_args(["generate", "-"]);
        assert_eq!(args.positional(), ["generate", "-"]);
    }

    #[test]
    fn test_numeric_coercion() {
        let args = parse_args(["x", "--a", "0", "--b", "2.5", "--c", "0x1F", "--d", "1-5", "--e", "1e3"]);
        assert_eq!(args.get("a"), Some(&FlagValue::Number(0.0)));
        assert_eq!(args.get("b"), Some(&FlagValue::Number(2.5)));
        assert_eq!(args.get("c"), Some(&FlagValue::Number(31.0)));
        assert_eq!(args.get("d"), Some(&FlagValue::from("1-5")));
        assert_eq!(args.get("e"), Some(&FlagValue::Number(1000.0)));
    }

    #[test]
    fn test_equals_syntax_is_not_split() {
        let args = parse_args(["x", "--url=http://x"]);
        assert_eq!(args.get("url=http://x"), Some(&FlagValue::Boolean(true)));
    }

    #[test]
    fn test_repeated_flag_last_wins() {
        let args = parse_args(["x", "--count", "1", "--count", "2"]);
        assert_eq!(args.get("count"), Some(&FlagValue::Number(2.0)));
    }

    #[test]
    fn test_command_args_typed_access() {
        let mut args = CommandArgs::default();
        args.insert("count", FlagValue::Number(5.0));
        args.insert("path", FlagValue::from("./data/acts.json"));

        assert_eq!(args.usize("count"), Ok(5));
        assert_eq!(args.str("path"), Ok("./data/acts.json"));
        assert_eq!(args.bool("verbose"), Ok(false));
        assert_eq!(args.str("url"), Err(ArgError::Missing("url".to_string())));
        assert!(matches!(args.str("count"), Err(ArgError::WrongType { .. })));
    }

    #[test]
    fn test_usize_rejects_fractions_and_negatives() {
        let mut args = CommandArgs::default();
        args.insert("index", FlagValue::Number(-1.0));
        args.insert("count", FlagValue::Number(2.5));
        assert!(matches!(args.usize("index"), Err(ArgError::NotAnIndex { .. })));
        assert!(matches!(args.usize("count"), Err(ArgError::NotAnIndex { .. })));
    }
}
