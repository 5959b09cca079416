//! Resistance-call index
//!
//! A keyed selector over the primary resistance-call table. Selections narrow
//! the rows and the set of sample keys they cover; each one returns a new
//! index so earlier results stay valid.

use crate::domain::hits::ResistanceCall;
use crate::domain::ids::SampleKey;
use crate::domain::{CardLiveError, Result};
use std::collections::BTreeSet;

/// Accepted cutoff levels for a cutoff selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CutoffFilter {
    /// Pass every row through
    All,
    /// Keep rows whose cutoff equals one of these levels, ignoring case
    Levels(BTreeSet<String>),
}

impl CutoffFilter {
    /// Build a filter from level names; `"all"` anywhere disables filtering
    pub fn from_levels<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = BTreeSet::new();
        for level in levels {
            let level = level.as_ref().trim().to_lowercase();
            if level == "all" {
                return Self::All;
            }
            accepted.insert(level);
        }
        Self::Levels(accepted)
    }

    fn accepts(&self, call: &ResistanceCall) -> bool {
        match self {
            Self::All => true,
            Self::Levels(levels) => levels.iter().any(|level| call.has_cutoff(level)),
        }
    }
}

/// Criteria for narrowing a [`ResistanceIndex`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RgiSelector {
    /// Select by detection tier
    Cutoff(CutoffFilter),
    /// Keep rows whose drug-class list contains at least one of these classes
    DrugClass(BTreeSet<String>),
    /// Keep rows whose best-hit ARO is one of these values
    BestHitAro(BTreeSet<String>),
}

impl RgiSelector {
    /// Build a selector from its string name and values
    ///
    /// # Errors
    ///
    /// Returns [`CardLiveError::UnsupportedSelector`] for names other than
    /// `cutoff`, `drug_class` and `best_hit_aro`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardlive::core::index::{CutoffFilter, RgiSelector};
    ///
    /// let selector = RgiSelector::parse("cutoff", &["all"]).unwrap();
    /// assert_eq!(selector, RgiSelector::Cutoff(CutoffFilter::All));
    /// assert!(RgiSelector::parse("colour", &["red"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(by: &str, values: &[S]) -> Result<Self> {
        let set = || -> BTreeSet<String> {
            values.iter().map(|v| v.as_ref().to_string()).collect()
        };
        match by {
            "cutoff" | "cut_off" => Ok(Self::Cutoff(CutoffFilter::from_levels(values))),
            "drug_class" => Ok(Self::DrugClass(set())),
            "best_hit_aro" => Ok(Self::BestHitAro(set())),
            other => Err(CardLiveError::UnsupportedSelector(other.to_string())),
        }
    }

    fn matches(&self, call: &ResistanceCall) -> bool {
        match self {
            Self::Cutoff(filter) => filter.accepts(call),
            Self::DrugClass(classes) => classes.iter().any(|c| call.has_drug_class(c)),
            Self::BestHitAro(aros) => call
                .best_hit_aro
                .as_ref()
                .is_some_and(|aro| aros.contains(aro)),
        }
    }

    fn is_pass_through(&self) -> bool {
        matches!(self, Self::Cutoff(CutoffFilter::All))
    }
}

/// Selector over resistance calls plus the sample keys they represent
///
/// The universe starts as every sample of the dataset, including samples with
/// no calls, so an unfiltered index covers the whole dataset. Any filtering
/// selection shrinks the universe to the samples with at least one remaining
/// call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResistanceIndex {
    calls: Vec<ResistanceCall>,
    universe: BTreeSet<SampleKey>,
}

impl ResistanceIndex {
    /// Create an index over `calls` covering the samples in `universe`
    pub fn new(calls: Vec<ResistanceCall>, universe: BTreeSet<SampleKey>) -> Self {
        Self { calls, universe }
    }

    /// Apply a selector, returning a narrowed index
    pub fn select(&self, selector: &RgiSelector) -> Self {
        if selector.is_pass_through() {
            return self.clone();
        }

        let calls: Vec<ResistanceCall> = self
            .calls
            .iter()
            .filter(|call| selector.matches(call))
            .cloned()
            .collect();
        let universe = calls.iter().map(|c| c.key.clone()).collect();

        tracing::debug!(
            selector = ?selector,
            before = self.calls.len(),
            after = calls.len(),
            "Selected resistance calls"
        );

        Self { calls, universe }
    }

    /// Keep only calls and samples within `keys`
    pub fn select_by_files(&self, keys: &BTreeSet<SampleKey>) -> Self {
        Self {
            calls: self
                .calls
                .iter()
                .filter(|c| keys.contains(&c.key))
                .cloned()
                .collect(),
            universe: self.universe.intersection(keys).cloned().collect(),
        }
    }

    /// Sample keys covered by this index
    pub fn files(&self) -> &BTreeSet<SampleKey> {
        &self.universe
    }

    /// The resistance calls still selected
    pub fn calls(&self) -> &[ResistanceCall] {
        &self.calls
    }

    /// Distinct drug classes among the selected calls
    pub fn drug_classes(&self) -> BTreeSet<String> {
        self.calls
            .iter()
            .flat_map(|c| c.drug_class.iter().cloned())
            .collect()
    }

    /// Distinct best-hit AROs among the selected calls
    pub fn best_hit_aros(&self) -> BTreeSet<String> {
        self.calls
            .iter()
            .filter_map(|c| c.best_hit_aro.clone())
            .collect()
    }
}
