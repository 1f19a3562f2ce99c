//! Validation of raw `<id>` arguments.

use crate::error::{QuizError, Result};
use crate::model::QuizId;

/// Turn a raw id argument into a quiz id.
///
/// Leading whitespace and an optional sign are accepted, and digits are read
/// up to the first non-digit character, so `"12abc"` yields 12 and `"3.7"`
/// yields 3. No bounds are checked: whether the id exists is the
/// repository's business.
pub fn validate_id(raw: Option<&str>) -> Result<QuizId> {
    let raw = raw.ok_or(QuizError::MissingParameter)?;
    parse_leading_int(raw).ok_or_else(|| QuizError::InvalidParameter(raw.to_string()))
}

fn parse_leading_int(raw: &str) -> Option<QuizId> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = &digits[..end];
    if negative {
        format!("-{magnitude}").parse().ok()
    } else {
        magnitude.parse().ok()
    }
}
