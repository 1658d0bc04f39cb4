//! Inclusive index ranges over loaded data, as given to `--range`.

use std::fmt;
use std::str::FromStr;

use crate::error::{DataError, Result};

/// Either every item or an inclusive `start-end` span.
///
/// # Examples
///
/// ```
/// use catalog_data::IndexRange;
///
/// let items = ["a", "b", "c", "d"];
///
/// let all: IndexRange = "all".parse().unwrap();
/// assert_eq!(all.select(&items).unwrap(), &items[..]);
///
/// let span: IndexRange = "1-2".parse().unwrap();
/// assert_eq!(span.select(&items).unwrap(), &["b", "c"]);
///
/// assert!("3-9".parse::<IndexRange>().unwrap().select(&items).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexRange {
    #[default]
    All,
    /// Both ends included.
    Span { start: usize, end: usize },
}

impl IndexRange {
    /// Slices `items` to this range.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::RangeOutOfBounds`] when the span is reversed or
    /// its end is not a valid index into `items`.
    pub fn select<'a, T>(&self, items: &'a [T]) -> Result<&'a [T]> {
        match *self {
            IndexRange::All => Ok(items),
            IndexRange::Span { start, end } => {
                if start > end || end >= items.len() {
                    return Err(DataError::RangeOutOfBounds {
                        start,
                        end,
                        len: items.len(),
                    });
                }
                Ok(&items[start..=end])
            }
        }
    }
}

impl FromStr for IndexRange {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "all" {
            return Ok(IndexRange::All);
        }
        let invalid = || DataError::InvalidRange(s.to_string());
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = start.trim().parse().map_err(|_| invalid())?;
        let end = end.trim().parse().map_err(|_| invalid())?;
        Ok(IndexRange::Span { start, end })
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexRange::All => f.write_str("all"),
            IndexRange::Span { start, end } => write!(f, "{start}-{end}"),
        }
    }
}
