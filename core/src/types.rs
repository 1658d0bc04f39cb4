//! Descriptor types for commands, flags and actions.
//!
//! A [`CommandSpec`] is the unit the registry stores: a name that may carry
//! several aliases, a [`CommandFlags`] set, an optional [`ActionSpec`]
//! vocabulary, usage examples, and an opaque [`Handler`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::args::CommandArgs;
use crate::validate::SchemaError;

/// Declared type of a flag value.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::ValueType;
///
/// assert_eq!(ValueType::Number.to_string(), "number");
/// assert_eq!("boolean".parse::<ValueType>().unwrap(), ValueType::Boolean);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free-form text.
    String,
    /// Integer or floating point number.
    Number,
    /// Presence switch.
    Boolean,
}

impl ValueType {
    /// Lowercase name used in flag display strings (`<url:string>`).
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ValueType::String),
            "number" => Ok(ValueType::Number),
            "boolean" => Ok(ValueType::Boolean),
            other => Err(SchemaError::UnknownValueType(other.to_string())),
        }
    }
}

/// A scalar flag value, either parsed from the command line or declared as
/// a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl FlagValue {
    /// Runtime type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            FlagValue::String(_) => ValueType::String,
            FlagValue::Number(_) => ValueType::Number,
            FlagValue::Boolean(_) => ValueType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FlagValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::String(s) => f.write_str(s),
            // Integral numbers print without a trailing `.0`.
            FlagValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FlagValue::Number(n) => write!(f, "{n}"),
            FlagValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::String(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::String(value)
    }
}

impl From<f64> for FlagValue {
    fn from(value: f64) -> Self {
        FlagValue::Number(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Number(value as f64)
    }
}

impl From<i32> for FlagValue {
    fn from(value: i32) -> Self {
        FlagValue::Number(f64::from(value))
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Boolean(value)
    }
}

/// Descriptor for one flag accepted by a command.
///
/// `short` and `long` are stored without their leading dashes. The
/// `display` string is what the help renderer prints and what validation
/// errors name.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::{FlagSpec, FlagValue, ValueType};
///
/// let count = FlagSpec::new("c", "count", ValueType::Number)
///     .with_default(10)
///     .with_description("Specify the number of items to generate (default: 10)");
///
/// assert_eq!(count.display, "-c, --count <count:number>");
/// assert_eq!(count.default, Some(FlagValue::Number(10.0)));
/// assert!(count.matches("c"));
/// assert!(count.matches("count"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagSpec {
    /// Canonical display string, e.g. `-u, --url <url:string>`.
    pub display: String,
    /// Short spelling without the dash, e.g. `u`.
    pub short: String,
    /// Long spelling without the dashes, e.g. `url`.
    pub long: String,
    pub value_type: ValueType,
    /// Value substituted when the flag is not given.
    pub default: Option<FlagValue>,
    pub description: String,
}

static FLAG_DISPLAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-?(?P<short>[A-Za-z0-9]),\s*--(?P<long>[A-Za-z0-9][A-Za-z0-9_-]*)(?:\s+<[A-Za-z0-9_-]+:(?P<ty>[a-z]+)>)?$",
    )
    .expect("static regex must compile")
});

impl FlagSpec {
    /// Creates a flag and derives its display string.
    pub fn new(short: &str, long: &str, value_type: ValueType) -> Self {
        let display = match value_type {
            ValueType::Boolean => format!("-{short}, --{long}"),
            other => format!("-{short}, --{long} <{long}:{other}>"),
        };
        Self {
            display,
            short: short.to_string(),
            long: long.to_string(),
            value_type,
            default: None,
            description: String::new(),
        }
    }

    /// Builds a flag from its display string.
    ///
    /// Accepts `-u, --url <url:string>`; a missing `<name:type>` part means a
    /// boolean flag. The leading dash of the short form is optional.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidFlagDisplay`] when the string does not
    /// have that shape, or [`SchemaError::UnknownValueType`] for a type other
    /// than `string`, `number` or `boolean`.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_cli_core::{FlagSpec, ValueType};
    ///
    /// let url = FlagSpec::from_display("-u, --url <url:string>").unwrap();
    /// assert_eq!(url.short, "u");
    /// assert_eq!(url.long, "url");
    /// assert_eq!(url.value_type, ValueType::String);
    ///
    /// let range = FlagSpec::from_display("r, --range <range:string>").unwrap();
    /// assert_eq!(range.short, "r");
    /// ```
    pub fn from_display(display: &str) -> Result<Self, SchemaError> {
        let display = display.trim();
        let caps = FLAG_DISPLAY_RE
            .captures(display)
            .ok_or_else(|| SchemaError::InvalidFlagDisplay(display.to_string()))?;
        let value_type = match caps.name("ty") {
            Some(ty) => ty.as_str().parse()?,
            None => ValueType::Boolean,
        };
        Ok(Self {
            display: display.to_string(),
            short: caps["short"].to_string(),
            long: caps["long"].to_string(),
            value_type,
            default: None,
            description: String::new(),
        })
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_default(mut self, default: impl Into<FlagValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Checks whether a parsed key (without dashes) names this flag.
    pub fn matches(&self, key: &str) -> bool {
        self.short == key || self.long == key
    }
}

/// The flags of one command: every declared flag, plus the required subset.
///
/// The required subset is stored as positions in `all`, so
/// [`required`](CommandFlags::required) always yields references into the
/// same storage as [`all`](CommandFlags::all).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandFlags {
    all: Vec<FlagSpec>,
    required: Vec<usize>,
}

impl CommandFlags {
    /// Builds the flag set, marking the flags whose long name is listed in
    /// `required`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownRequiredFlag`] if a required name is not
    /// the long name of any flag in `all`.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_cli_core::{CommandFlags, FlagSpec, ValueType};
    ///
    /// let flags = CommandFlags::new(
    ///     vec![
    ///         FlagSpec::new("u", "url", ValueType::String),
    ///         FlagSpec::new("i", "index", ValueType::Number).with_default(0),
    ///     ],
    ///     &["url"],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(flags.all().len(), 2);
    /// assert_eq!(flags.required().map(|f| f.long.as_str()).collect::<Vec<_>>(), vec!["url"]);
    ///
    /// assert!(CommandFlags::new(vec![], &["url"]).is_err());
    /// ```
    pub fn new(all: Vec<FlagSpec>, required: &[&str]) -> Result<Self, SchemaError> {
        let mut positions = Vec::with_capacity(required.len());
        for name in required {
            let position = all
                .iter()
                .position(|flag| flag.long == *name)
                .ok_or_else(|| SchemaError::UnknownRequiredFlag(name.to_string()))?;
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
        Ok(Self {
            all,
            required: positions,
        })
    }

    /// Every declared flag, in declaration order.
    pub fn all(&self) -> &[FlagSpec] {
        &self.all
    }

    /// The required flags, in the order their names were listed.
    pub fn required(&self) -> impl Iterator<Item = &FlagSpec> + '_ {
        self.required.iter().map(|&i| &self.all[i])
    }

    pub fn is_required(&self, long: &str) -> bool {
        self.required().any(|flag| flag.long == long)
    }

    /// Finds a declared flag by short or long name.
    pub fn find(&self, key: &str) -> Option<&FlagSpec> {
        self.all.iter().find(|flag| flag.matches(key))
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// One named sub-operation in a command's action vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    pub name: String,
    pub description: String,
}

impl ActionOption {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// A titled list of [`ActionOption`]s, shown as its own help section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    /// Section heading, e.g. `ACTIONS`.
    pub title: String,
    pub options: Vec<ActionOption>,
}

impl ActionSet {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: &str, description: &str) -> Self {
        self.options.push(ActionOption::new(name, description));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.iter().any(|option| option.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.name.as_str()).collect()
    }
}

/// The set of valid values for a command's action-selecting flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionSpec {
    /// The command has no action vocabulary.
    #[default]
    None,
    Enumerated(ActionSet),
}

impl ActionSpec {
    pub fn as_set(&self) -> Option<&ActionSet> {
        match self {
            ActionSpec::None => None,
            ActionSpec::Enumerated(set) => Some(set),
        }
    }
}

/// Error type handlers may return. The core never inspects it beyond
/// printing its message.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

pub type HandlerResult = Result<(), HandlerError>;

/// Function invoked with the validated arguments of a command.
pub type Handler = Box<dyn Fn(&CommandArgs) -> HandlerResult>;

/// Descriptor for one top-level command.
///
/// `name` is the raw alias string (`"request, r"`). Aliases are split out of
/// it once at construction; a trailing `<placeholder>` on any alias is
/// dropped.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::CommandSpec;
///
/// let cmd = CommandSpec::new("request, r <action:string>", "Perform API requests", |_| Ok(()));
/// assert_eq!(cmd.aliases(), ["request", "r"]);
/// assert_eq!(cmd.canonical_name(), "request");
/// assert!(cmd.has_alias("r"));
/// assert!(!cmd.has_alias("req"));
/// ```
pub struct CommandSpec {
    /// Raw name string, possibly holding several comma-separated aliases.
    pub name: String,
    aliases: Vec<String>,
    pub description: String,
    pub flags: CommandFlags,
    pub actions: ActionSpec,
    /// Literal invocation strings, only used for display.
    pub examples: Vec<String>,
    handler: Handler,
}

impl CommandSpec {
    pub fn new<F>(name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&CommandArgs) -> HandlerResult + 'static,
    {
        Self {
            name: name.to_string(),
            aliases: split_aliases(name),
            description: description.to_string(),
            flags: CommandFlags::default(),
            actions: ActionSpec::None,
            examples: Vec::new(),
            handler: Box::new(handler),
        }
    }

    pub fn with_flags(mut self, flags: CommandFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_actions(mut self, actions: ActionSet) -> Self {
        self.actions = ActionSpec::Enumerated(actions);
        self
    }

    pub fn with_example(mut self, example: &str) -> Self {
        self.examples.push(example.to_string());
        self
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// First alias, used in logs and headers.
    pub fn canonical_name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }

    pub fn has_alias(&self, token: &str) -> bool {
        self.aliases.iter().any(|alias| alias == token)
    }

    /// Runs the handler.
    pub fn invoke(&self, args: &CommandArgs) -> HandlerResult {
        (self.handler)(args)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("flags", &self.flags)
            .field("actions", &self.actions)
            .field("examples", &self.examples)
            .finish_non_exhaustive()
    }
}

fn split_aliases(name: &str) -> Vec<String> {
    name.split(',')
        .filter_map(|part| part.split_whitespace().next())
        .filter(|alias| !alias.starts_with('<'))
        .map(String::from)
        .collect()
}
