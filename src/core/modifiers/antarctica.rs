//! Historical geographic correction
//!
//! Early submissions defaulted the geographic area to Antarctica. Samples
//! reported before the correction instant with that code are reassigned to
//! "not applicable".

use crate::core::dataset::Dataset;
use crate::core::modifiers::DatasetModifier;
use crate::domain::ids::geo;
use crate::domain::time::parse_timestamp;
use crate::domain::{CardLiveError, Result};
use chrono::NaiveDateTime;

/// Reassigns Antarctica to "not applicable" for samples before `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AntarcticaCorrector {
    threshold: NaiveDateTime,
}

impl AntarcticaCorrector {
    pub fn new(threshold: NaiveDateTime) -> Self {
        Self { threshold }
    }

    /// Build a corrector from a textual instant such as `2020-07-20`
    ///
    /// # Errors
    ///
    /// Returns [`CardLiveError::Configuration`] if the instant cannot be parsed.
    pub fn from_cutoff(cutoff: &str) -> Result<Self> {
        parse_timestamp(cutoff)
            .map(Self::new)
            .map_err(|e| CardLiveError::Configuration(format!("Invalid Antarctica cutoff: {e}")))
    }

    pub fn threshold(&self) -> NaiveDateTime {
        self.threshold
    }
}

impl DatasetModifier for AntarcticaCorrector {
    fn modify(&self, data: &Dataset) -> Result<Dataset> {
        let mut corrected = 0usize;
        let result = data.with_samples(|sample| {
            if sample.geo_area_code == geo::ANTARCTICA && sample.timestamp < self.threshold {
                sample.geo_area_code = geo::NOT_APPLICABLE;
                corrected += 1;
            }
        });

        tracing::debug!(
            threshold = %self.threshold,
            corrected,
            "Corrected historical Antarctica codes"
        );
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "antarctica_corrector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::parse_sample;
    use crate::domain::ids::SampleKey;
    use serde_json::json;

    fn dataset() -> Dataset {
        let docs = [
            ("before", "2020-03-01T10:00:00", 10),
            ("at", "2020-07-20T00:00:00", 10),
            ("after", "2020-08-01", 10),
            ("other", "2020-01-01", 124),
        ];
        let parsed = docs
            .iter()
            .map(|(name, ts, geo)| {
                parse_sample(
                    SampleKey::new(*name).unwrap(),
                    &json!({"timestamp": ts, "geo_area_code": geo}),
                )
                .unwrap()
            })
            .collect();
        Dataset::from_parsed(parsed).unwrap()
    }

    fn geo_of(data: &Dataset, name: &str) -> i64 {
        data.sample(&SampleKey::new(name).unwrap())
            .unwrap()
            .geo_area_code
    }

    #[test]
    fn test_corrects_only_antarctica_before_threshold() {
        let data = dataset();
        let corrector = AntarcticaCorrector::from_cutoff("2020-07-20").unwrap();
        let corrected = corrector.modify(&data).unwrap();

        assert_eq!(geo_of(&corrected, "before"), geo::NOT_APPLICABLE);
        assert_eq!(geo_of(&corrected, "at"), geo::ANTARCTICA);
        assert_eq!(geo_of(&corrected, "after"), geo::ANTARCTICA);
        assert_eq!(geo_of(&corrected, "other"), 124);
    }

    #[test]
    fn test_source_is_unmodified() {
        let data = dataset();
        let _ = AntarcticaCorrector::from_cutoff("2021-01-01")
            .unwrap()
            .modify(&data)
            .unwrap();
        assert_eq!(geo_of(&data, "before"), geo::ANTARCTICA);
    }

    #[test]
    fn test_invalid_cutoff() {
        assert!(matches!(
            AntarcticaCorrector::from_cutoff("july"),
            Err(CardLiveError::Configuration(_))
        ));
    }
}
