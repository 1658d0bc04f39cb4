//! The commands the `catalog-requests` binary registers.

pub mod generate;
pub mod request;

use catalog_cli_core::{Registry, SchemaError};
use catalog_data::CliConfig;

/// Builds the registry in help order: `generate`, then `request`.
pub fn build_registry(config: &CliConfig) -> Result<Registry, SchemaError> {
    Registry::builder()
        .alias_matching(config.alias_matching)
        .command(generate::command(&config.program)?)
        .command(request::command(&config.program, config.http.timeout())?)
        .build()
}
