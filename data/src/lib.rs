//! Catalog data for the request CLI.
//!
//! - [`ActGenerator`] produces random [`Act`] trees for seeding a backend.
//! - [`save_json`] and [`read_acts`] move them to and from data files.
//! - [`IndexRange`] and [`item_at`] pick the items a request sends.
//! - [`CliConfig`] is the tool's YAML configuration.
//!
//! # Example
//!
//! ```
//! use catalog_data::{ActGenerator, IndexRange, read_acts, save_json};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("acts.json");
//!
//! let acts = ActGenerator::new().acts(4);
//! save_json(&path, &acts).unwrap();
//!
//! let loaded = read_acts(&path).unwrap();
//! let range: IndexRange = "1-2".parse().unwrap();
//! assert_eq!(range.select(&loaded).unwrap().len(), 2);
//! ```

mod config;
mod error;
mod generate;
mod model;
mod range;
mod store;

pub use config::{CONFIG_ENV, CliConfig, ColorMode, DEFAULT_CONFIG_FILE, HttpConfig};
pub use error::{DataError, Result};
pub use generate::{ActGenerator, DataKind};
pub use model::{Act, Album, AudioBitrate, AudioFeatures, Genre, Member, Song};
pub use range::IndexRange;
pub use store::{item_at, read_acts, read_json, save_json};
