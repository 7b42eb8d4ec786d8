/*!
 * Request size checks.
 *
 * Empty requests never reach the engine, and requests above the character
 * limit are rejected with 413.
 */

use log::debug;

use crate::errors::RequestError;
use crate::segmenter::SegmentedText;

/// Outcome of a passing length check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthCheck {
    /// No characters to translate
    Empty,
    /// Within the limit, with the observed character count
    Proceed(usize),
}

/// Check total sentence length against `char_limit`
pub fn check_length(segmented: &SegmentedText, char_limit: usize) -> Result<LengthCheck, RequestError> {
    let length = segmented.char_count();
    debug!("Request length: {} characters (limit {})", length, char_limit);

    if length == 0 {
        Ok(LengthCheck::Empty)
    } else if length > char_limit {
        Err(RequestError::PayloadTooLarge { length, limit: char_limit })
    } else {
        Ok(LengthCheck::Proceed(length))
    }
}
