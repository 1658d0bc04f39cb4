//! Command, flag and dispatch core for small developer CLIs.
//!
//! This crate turns a list of command descriptors into a working command
//! line:
//!
//! - [`CommandSpec`]: a command with aliases, [`CommandFlags`], an optional
//!   [`ActionSpec`] vocabulary, examples and a [`Handler`].
//! - [`FlagSpec`]: a flag with short/long spellings, a [`ValueType`] and an
//!   optional default.
//! - [`Registry`]: ordered commands with alias resolution
//!   ([`AliasMatching`]).
//! - [`parse_args`]: raw tokens into [`ParsedArgs`].
//! - [`validate_flags`]: type and requiredness checks, first violation wins.
//! - [`HelpRenderer`]: colorized usage text.
//! - [`Dispatcher`]: parse, resolve, validate, then invoke the handler with
//!   a clean [`CommandArgs`] record.
//!
//! # Example
//!
//! ```
//! use catalog_cli_core::*;
//!
//! let flags = CommandFlags::new(
//!     vec![
//!         FlagSpec::new("u", "url", ValueType::String)
//!             .with_description("Specify the URL for the request (required)"),
//!         FlagSpec::new("i", "index", ValueType::Number).with_default(0),
//!     ],
//!     &["url"],
//! )
//! .unwrap();
//!
//! let registry = Registry::builder()
//!     .command(
//!         CommandSpec::new("request, r", "Perform API requests", |args| {
//!             assert_eq!(args.usize("index")?, 0);
//!             Ok(())
//!         })
//!         .with_flags(flags),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new(&registry, HelpRenderer::new("demo", Palette::plain()));
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//! assert_eq!(dispatcher.run(["r", "--url", "http://localhost:3000/acts"], &mut out, &mut err), 0);
//! assert_eq!(dispatcher.run(["r"], &mut out, &mut err), 1);
//! ```

mod args;
mod dispatch;
mod help;
mod registry;
mod types;
mod validate;

pub use args::{ArgError, CommandArgs, ParsedArgs, parse_args};
pub use dispatch::{
    Dispatch, DispatchError, Dispatcher, EXIT_FAILURE, EXIT_SUCCESS, build_command_args,
};
pub use help::{ColorConfig, HelpRenderer, Palette};
pub use registry::{AliasMatching, Registry, RegistryBuilder};
pub use types::*;
pub use validate::{FlagError, SchemaError, validate_command, validate_flags};
