//! Colorized help text rendering.
//!
//! Rendering is a pure function of the registry, the renderer's program name
//! and its [`Palette`]; callers decide where the text goes.

use nu_ansi_term::Color;
use serde::{Deserialize, Serialize};

use crate::{CommandSpec, Registry};

/// 256-color codes for each named color the help screen uses.
///
/// Deserializes with per-field defaults, so a config file only has to list
/// the colors it changes.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::ColorConfig;
///
/// let colors: ColorConfig = serde_json::from_str(r#"{"cyan": 51}"#).unwrap();
/// assert_eq!(colors.cyan, 51);
/// assert_eq!(colors.green, ColorConfig::default().green);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub green: u8,
    pub orange: u8,
    pub yellow: u8,
    pub blue: u8,
    pub cyan: u8,
    pub white: u8,
    pub red: u8,
    pub dark_orange: u8,
    pub light_green: u8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            green: 118,
            orange: 214,
            yellow: 220,
            blue: 39,
            cyan: 45,
            white: 252,
            red: 196,
            dark_orange: 208,
            light_green: 83,
        }
    }
}

/// Color roles of the help screen, or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: ColorConfig,
    enabled: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

impl Palette {
    pub fn new(colors: ColorConfig) -> Self {
        Self {
            colors,
            enabled: true,
        }
    }

    /// A palette that emits no escape codes.
    pub fn plain() -> Self {
        Self {
            colors: ColorConfig::default(),
            enabled: false,
        }
    }

    pub fn colors(&self) -> &ColorConfig {
        &self.colors
    }

    fn paint(&self, text: &str, code: u8) -> String {
        if self.enabled {
            Color::Fixed(code).paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str, code: u8) -> String {
        if self.enabled {
            Color::Fixed(code).bold().paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Formats usage text for a [`Registry`].
///
/// # Examples
///
/// ```
/// use catalog_cli_core::*;
///
/// let flags = CommandFlags::new(
///     vec![FlagSpec::new("t", "type", ValueType::String)
///         .with_description("Specify the type of data to generate (required)")],
///     &["type"],
/// )
/// .unwrap();
/// let registry = Registry::builder()
///     .command(
///         CommandSpec::new("generate, g", "Generate data for testing", |_| Ok(()))
///             .with_flags(flags)
///             .with_example("catalog-requests generate --type act"),
///     )
///     .build()
///     .unwrap();
///
/// let help = HelpRenderer::new("catalog-requests", Palette::plain())
///     .render(&registry, &["catalog-requests help".to_string()]);
///
/// assert!(help.starts_with("Usage: catalog-requests <command> [options]"));
/// assert!(help.contains(" -t, --type <type:string> Specify the type of data to generate (required)"));
/// assert!(help.ends_with(" catalog-requests help\n catalog-requests generate --type act\n"));
/// ```
#[derive(Debug, Clone)]
pub struct HelpRenderer {
    program: String,
    palette: Palette,
}

impl HelpRenderer {
    pub fn new(program: &str, palette: Palette) -> Self {
        Self {
            program: program.to_string(),
            palette,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full help: usage line, one section per command in registration
    /// order, then the global examples followed by every command's examples.
    pub fn render(&self, registry: &Registry, global_examples: &[String]) -> String {
        let c = self.palette.colors();
        let mut out = format!(
            "{} {} <command> [options]\n\n{}\n\n",
            self.palette.bold("Usage:", c.green),
            self.program,
            self.palette.bold("COMMANDS", c.orange),
        );

        for command in registry.commands() {
            out.push_str(&self.render_section(command));
        }

        let examples = global_examples
            .iter()
            .chain(registry.commands().iter().flat_map(|cmd| cmd.examples.iter()));
        out.push_str(&self.render_examples(examples));
        out
    }

    /// Help for a single command: its section and its own examples.
    pub fn render_command(&self, command: &CommandSpec) -> String {
        let c = self.palette.colors();
        let mut out = format!(
            "{} {} {} [options]\n\n",
            self.palette.bold("Usage:", c.green),
            self.program,
            command.canonical_name(),
        );
        out.push_str(&self.render_section(command));
        if !command.examples.is_empty() {
            out.push_str(&self.render_examples(command.examples.iter()));
        }
        out
    }

    /// One-line error shown after the help text.
    pub fn render_error(&self, message: &str, subject: &str) -> String {
        let c = self.palette.colors();
        format!(
            "\n {} {} {}",
            self.palette.bold("Error:", c.red),
            message,
            self.palette.bold(subject, c.dark_orange),
        )
    }

    fn render_section(&self, command: &CommandSpec) -> String {
        let p = &self.palette;
        let c = p.colors();
        let mut out = format!(
            "{}\n {}\n",
            p.paint(&command.name, c.cyan),
            p.paint(&command.description, c.white),
        );

        if !command.flags.is_empty() {
            out.push_str(&format!(" {}\n", p.bold("FLAGS", c.orange)));
            for flag in command.flags.all() {
                out.push_str(&format!(
                    " {} {}\n",
                    p.paint(&flag.display, c.yellow),
                    self.highlight_required(&flag.description),
                ));
            }
        }

        if let Some(actions) = command.actions.as_set() {
            out.push_str(&format!(" {}\n", p.bold(&actions.title, c.orange)));
            for option in &actions.options {
                out.push_str(&format!(
                    " {} {}\n",
                    p.paint(&format!("{}:", option.name), c.cyan),
                    p.paint(&option.description, c.white),
                ));
            }
        }

        out.push('\n');
        out
    }

    fn render_examples<'a>(&self, examples: impl Iterator<Item = &'a String>) -> String {
        let c = self.palette.colors();
        let mut out = format!("{}\n", self.palette.bold("EXAMPLES", c.blue));
        for example in examples {
            out.push_str(&format!(" {}\n", self.palette.paint(example, c.light_green)));
        }
        out
    }

    fn highlight_required(&self, description: &str) -> String {
        if !self.palette.enabled {
            return description.to_string();
        }
        let required = self.palette.bold("required", self.palette.colors().red);
        description.replacen("required", &required, 1)
    }
}
