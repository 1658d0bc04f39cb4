use std::io::{self, IsTerminal, Write};

use catalog_cli_core::{Dispatcher, EXIT_FAILURE, HelpRenderer};
use catalog_data::CliConfig;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod http;

/// Environment variable holding the log filter, e.g. `CATALOG_LOG=debug`.
const LOG_ENV: &str = "CATALOG_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32, String> {
    let config = CliConfig::discover().unwrap_or_else(|err| {
        warn!(error = %err, "Ignoring unreadable config, using defaults");
        CliConfig::default()
    });
    debug!(?config, "Loaded config");

    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
    let palette = config.palette(io::stdout().is_terminal(), no_color);

    let registry = commands::build_registry(&config)
        .map_err(|err| format!("invalid command registry: {err}"))?;
    let dispatcher = Dispatcher::new(&registry, HelpRenderer::new(&config.program, palette));

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let code = dispatcher.run(std::env::args().skip(1), &mut stdout, &mut stderr);
    stdout.flush().map_err(|err| err.to_string())?;
    Ok(code)
}
