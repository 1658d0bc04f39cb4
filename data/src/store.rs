//! Reading and writing JSON data files.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{DataError, Result};
use crate::model::Act;

/// Reads a JSON array of acts, as written by the `generate` command.
///
/// # Errors
///
/// Returns [`DataError::IoError`] if the file cannot be opened, or
/// [`DataError::JsonError`] if it does not hold a list of acts.
pub fn read_acts(path: impl AsRef<Path>) -> Result<Vec<Act>> {
    read_json(path)
}

/// Reads any JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading data file");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes `value` as pretty-printed JSON, creating parent directories.
///
/// # Examples
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("nested/acts.json");
///
/// catalog_data::save_json(&path, &vec!["a", "b"]).unwrap();
/// let back: Vec<String> = catalog_data::read_json(&path).unwrap();
/// assert_eq!(back, ["a", "b"]);
/// ```
pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(path = %path.display(), "Saved data file");
    Ok(())
}

/// Returns the item at `index`.
///
/// # Errors
///
/// Returns [`DataError::IndexOutOfBounds`] when `index >= items.len()`.
pub fn item_at<T>(items: &[T], index: usize) -> Result<&T> {
    items.get(index).ok_or(DataError::IndexOutOfBounds {
        index,
        len: items.len(),
    })
}
