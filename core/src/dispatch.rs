//! Invocation dispatch: parse, resolve, validate, then hand off.
//!
//! [`Dispatcher::dispatch`] is pure and returns what should happen as a
//! [`Dispatch`] or a [`DispatchError`]. [`Dispatcher::run`] is the thin shell
//! that writes help or errors, calls the handler and picks the exit code.

use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::args::{CommandArgs, ParsedArgs, parse_args};
use crate::validate::{FlagError, HELP_COMMAND, HELP_FLAGS, validate_flags};
use crate::{CommandSpec, HelpRenderer, Registry};

/// Exit status for a dispatched command or a help request.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for every dispatch error and handler failure.
pub const EXIT_FAILURE: i32 = 1;

/// Outcome of a successful dispatch.
#[derive(Debug)]
pub enum Dispatch<'r> {
    /// Show help, for one command when `command` is set.
    Help { command: Option<&'r CommandSpec> },
    /// Invoke `command`'s handler with `args`.
    Run {
        command: &'r CommandSpec,
        args: CommandArgs,
    },
}

/// Why an invocation could not be dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No positional token was given.
    #[error("no command given")]
    NoCommand,
    /// The command token matches no registered command.
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error(transparent)]
    Flag(#[from] FlagError),
}

impl DispatchError {
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }

    /// Message part of the error line.
    pub fn summary(&self) -> String {
        match self {
            DispatchError::NoCommand => "No command given".to_string(),
            DispatchError::CommandNotFound(_) => "Command not found:".to_string(),
            DispatchError::Flag(err) => err.summary(),
        }
    }

    /// Highlighted part of the error line: the token or flag at fault.
    pub fn subject(&self) -> &str {
        match self {
            DispatchError::NoCommand => "",
            DispatchError::CommandNotFound(token) => token,
            DispatchError::Flag(err) => err.flag(),
        }
    }
}

/// Routes one invocation to a registered command.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::*;
///
/// let flags = CommandFlags::new(
///     vec![
///         FlagSpec::new("t", "type", ValueType::String),
///         FlagSpec::new("c", "count", ValueType::Number).with_default(10),
///     ],
///     &["type"],
/// )
/// .unwrap();
/// let registry = Registry::builder()
///     .command(CommandSpec::new("generate, g", "Generate data", |_| Ok(())).with_flags(flags))
///     .build()
///     .unwrap();
/// let dispatcher = Dispatcher::new(&registry, HelpRenderer::new("catalog-requests", Palette::plain()));
///
/// match dispatcher.dispatch(["g", "--type", "act"]).unwrap() {
///     Dispatch::Run { command, args } => {
///         assert_eq!(command.canonical_name(), "generate");
///         assert_eq!(args.str("type").unwrap(), "act");
///         assert_eq!(args.usize("count").unwrap(), 10);
///     }
///     other => panic!("unexpected {other:?}"),
/// }
///
/// assert!(matches!(dispatcher.dispatch(["help"]), Ok(Dispatch::Help { command: None })));
/// assert_eq!(
///     dispatcher.dispatch(["nope"]).unwrap_err(),
///     DispatchError::CommandNotFound("nope".into())
/// );
/// ```
#[derive(Debug)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    renderer: HelpRenderer,
    global_examples: Vec<String>,
}

impl<'r> Dispatcher<'r> {
    /// Creates a dispatcher whose help lists `<program> help` as the global
    /// example.
    pub fn new(registry: &'r Registry, renderer: HelpRenderer) -> Self {
        let global_examples = vec![format!("{} {HELP_COMMAND}", renderer.program())];
        Self {
            registry,
            renderer,
            global_examples,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Full help text for the registry.
    pub fn help_text(&self) -> String {
        self.renderer.render(self.registry, &self.global_examples)
    }

    /// Decides what an invocation should do, without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoCommand`] or
    /// [`DispatchError::CommandNotFound`] when no command resolves, and
    /// [`DispatchError::Flag`] when the arguments fail validation.
    pub fn dispatch<I, S>(&self, tokens: I) -> Result<Dispatch<'r>, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_args(tokens);
        debug!(positional = ?parsed.positional(), "Parsed arguments");

        let positional = parsed.positional();
        if positional.first().map(String::as_str) == Some(HELP_COMMAND) {
            let command = positional
                .get(1)
                .and_then(|token| self.registry.resolve(token));
            return Ok(Dispatch::Help { command });
        }

        let token = parsed.command_token();
        if HELP_FLAGS.iter().any(|key| parsed.contains(key)) {
            let command = token.and_then(|token| self.registry.resolve(token));
            return Ok(Dispatch::Help { command });
        }

        let token = token.ok_or(DispatchError::NoCommand)?;
        let command = self
            .registry
            .resolve(token)
            .ok_or_else(|| DispatchError::CommandNotFound(token.to_string()))?;
        debug!(token, command = command.canonical_name(), "Resolved command");

        validate_flags(&parsed, &command.flags)?;
        let args = build_command_args(command, &parsed);
        debug!(command = command.canonical_name(), args = ?args, "Validated arguments");

        Ok(Dispatch::Run { command, args })
    }

    /// Dispatches, writes help or error output, and invokes the handler.
    ///
    /// Help goes to `out`, error lines and handler failures to `err`.
    /// Returns the process exit code.
    pub fn run<I, S>(&self, tokens: I, out: &mut impl Write, err: &mut impl Write) -> i32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.dispatch(tokens) {
            Ok(Dispatch::Help { command }) => {
                let text = match command {
                    Some(command) => self.renderer.render_command(command),
                    None => self.help_text(),
                };
                let _ = write!(out, "{text}");
                EXIT_SUCCESS
            }
            Ok(Dispatch::Run { command, args }) => {
                debug!(command = command.canonical_name(), "Invoking handler");
                match command.invoke(&args) {
                    Ok(()) => EXIT_SUCCESS,
                    Err(error) => {
                        let _ = writeln!(err, "error: {error}");
                        EXIT_FAILURE
                    }
                }
            }
            Err(error) => {
                debug!(%error, "Dispatch failed");
                let _ = write!(out, "{}", self.help_text());
                let _ = writeln!(
                    err,
                    "{}",
                    self.renderer.render_error(&error.summary(), error.subject())
                );
                error.exit_code()
            }
        }
    }
}

/// Reduces a validated bag to the command's declared long names.
///
/// Each flag takes its value from the long key, then the short key, then
/// its default. Flags with none of these are left out.
pub fn build_command_args(command: &CommandSpec, parsed: &ParsedArgs) -> CommandArgs {
    let mut args = CommandArgs::default();
    for flag in command.flags.all() {
        let value = parsed
            .get(&flag.long)
            .or_else(|| parsed.get(&flag.short))
            .or(flag.default.as_ref());
        if let Some(value) = value {
            args.insert(&flag.long, value.clone());
        }
    }
    args
}
