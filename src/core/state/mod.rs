//! Live dataset state
//!
//! The [`DatasetRefresher`] decides whether the input directory changed and
//! reloads it; the [`DatasetStore`] holds the dataset currently served to
//! readers and swaps it wholesale after a successful refresh.

pub mod refresher;
pub mod store;

pub use refresher::DatasetRefresher;
pub use store::{DatasetStore, RefreshOutcome};
