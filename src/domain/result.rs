//! Result type alias for the CARD:Live core
//!
//! This module provides a convenient Result type alias that uses CardLiveError
//! as the error type.

use super::errors::CardLiveError;

/// Result type alias for CARD:Live operations
///
/// # Examples
///
/// ```
/// use cardlive::domain::result::Result;
/// use cardlive::domain::errors::CardLiveError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CardLiveError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CardLiveError>;
