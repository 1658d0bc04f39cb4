//! Ordered command registry with alias resolution.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validate::{SchemaError, validate_command};
use crate::CommandSpec;

/// How a command token is matched against registered commands.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::AliasMatching;
///
/// assert_eq!(AliasMatching::default(), AliasMatching::Exact);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasMatching {
    /// The token must equal one of the command's aliases.
    #[default]
    Exact,
    /// The command's raw name string only has to contain the token.
    ///
    /// Kept for compatibility with older scripts. A short token can land on
    /// an unrelated command whose name happens to contain it. An empty token
    /// still matches nothing.
    Containment,
}

/// Commands known to the dispatcher, in registration order.
///
/// Built once through [`RegistryBuilder`]. The only mutation afterwards is
/// [`add_command`](Registry::add_command), which needs `&mut self` and so
/// cannot overlap a dispatch that borrows the registry.
///
/// # Examples
///
/// ```
/// use catalog_cli_core::{CommandSpec, Registry};
///
/// let registry = Registry::builder()
///     .command(CommandSpec::new("generate, g", "Generate data for testing", |_| Ok(())))
///     .command(CommandSpec::new("request, r", "Perform API requests", |_| Ok(())))
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.resolve("r").unwrap().canonical_name(), "request");
/// assert!(registry.resolve("req").is_none());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<CommandSpec>,
    matching: AliasMatching,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registers one more command after construction.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the descriptor is malformed or one of its
    /// aliases is already taken.
    pub fn add_command(&mut self, command: CommandSpec) -> Result<(), SchemaError> {
        validate_command(&command)?;
        let taken: HashSet<&str> = self
            .commands
            .iter()
            .flat_map(|c| c.aliases().iter().map(String::as_str))
            .collect();
        if let Some(alias) = command
            .aliases()
            .iter()
            .find(|alias| taken.contains(alias.as_str()))
        {
            return Err(SchemaError::DuplicateAlias(alias.clone()));
        }

        debug!(command = command.canonical_name(), aliases = ?command.aliases(), "Registered command");
        self.commands.push(command);
        Ok(())
    }

    /// Finds the first registered command matching `token`.
    ///
    /// An empty token never resolves, in either matching mode.
    pub fn resolve(&self, token: &str) -> Option<&CommandSpec> {
        if token.is_empty() {
            return None;
        }
        self.commands.iter().find(|command| match self.matching {
            AliasMatching::Exact => command.has_alias(token),
            AliasMatching::Containment => command.name == token || command.name.contains(token),
        })
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn alias_matching(&self) -> AliasMatching {
        self.matching
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Collects commands before the registry is sealed.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: Vec<CommandSpec>,
    matching: AliasMatching,
}

impl RegistryBuilder {
    pub fn command(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }

    pub fn alias_matching(mut self, matching: AliasMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Validates every command and builds the registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, in registration order.
    pub fn build(self) -> Result<Registry, SchemaError> {
        let mut registry = Registry {
            commands: Vec::with_capacity(self.commands.len()),
            matching: self.matching,
        };
        for command in self.commands {
            registry.add_command(command)?;
        }
        Ok(registry)
    }
}
