use crate::error::{GtdError, Result};

/// Parse a user-supplied task number.
///
/// Negative numbers parse successfully so that lookups can report them as
/// negative ids rather than as unreadable input.
pub fn parse_task_id(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| GtdError::InvalidId(trimmed.to_string()))
}
