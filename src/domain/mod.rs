//! Domain models and types for the CARD:Live core.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SampleKey`])
//! - **Analysis categories** ([`AnalysisCategory`], [`CategoryStatuses`])
//! - **Row schemas** ([`SampleRecord`], [`ResistanceCall`], [`KmerTaxonomyRow`],
//!   [`WholeReadTaxonomyRow`], [`SequenceTypeRow`])
//! - **Error types** ([`CardLiveError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CardLiveError>`]:
//!
//! ```rust
//! use cardlive::domain::{CardLiveError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = cardlive::config::load_config("cardlive.toml")?;
//!     Ok(())
//! }
//! ```

pub mod category;
pub mod errors;
pub mod fields;
pub mod hits;
pub mod ids;
pub mod result;
pub mod sample;
pub mod time;

// Re-export commonly used types for convenience
pub use category::{AnalysisCategory, CategoryStatus, CategoryStatuses};
pub use errors::CardLiveError;
pub use fields::FieldMap;
pub use hits::{CategoryRow, KmerTaxonomyRow, ResistanceCall, SequenceTypeRow, WholeReadTaxonomyRow};
pub use ids::SampleKey;
pub use result::Result;
pub use sample::SampleRecord;
