//! Dataset-level selection criteria

use crate::core::index::RgiSelector;
use crate::domain::time::parse_timestamp;
use crate::domain::{CardLiveError, Result};
use chrono::NaiveDateTime;

/// A selection over a [`Dataset`](super::Dataset)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Samples with `start <= timestamp <= end`
    Time {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Samples covered by the resistance index after applying a selector
    Rgi(RgiSelector),
}

impl Selection {
    /// Build a selection from table and selector names
    ///
    /// - `("main", "time", [start, end])` → [`Selection::Time`]
    /// - `("rgi", by, values)` → [`Selection::Rgi`] via [`RgiSelector::parse`]
    ///
    /// # Errors
    ///
    /// Returns [`CardLiveError::UnknownSelector`] for any other table, or a
    /// selector other than `time` on the main table;
    /// [`CardLiveError::UnsupportedSelector`] for unknown resistance selectors;
    /// [`CardLiveError::Validation`] if time bounds are missing or unparsable.
    pub fn parse<S: AsRef<str>>(table: &str, by: &str, values: &[S]) -> Result<Self> {
        match (table, by) {
            ("main", "time") => {
                let [start, end] = values else {
                    return Err(CardLiveError::Validation(format!(
                        "time selection needs exactly a start and an end, got {} value(s)",
                        values.len()
                    )));
                };
                Ok(Self::Time {
                    start: parse_bound(start.as_ref())?,
                    end: parse_bound(end.as_ref())?,
                })
            }
            ("rgi", by) => RgiSelector::parse(by, values).map(Self::Rgi),
            (table, by) => Err(CardLiveError::UnknownSelector {
                table: table.to_string(),
                by: by.to_string(),
            }),
        }
    }
}

fn parse_bound(value: &str) -> Result<NaiveDateTime> {
    parse_timestamp(value).map_err(CardLiveError::Validation)
}
