//! Input parsing helpers.

use std::time::Duration;

use crate::error::{AppError, GiveawayError};

/// Longest accepted giveaway duration: ten years. Keeps `end_at` timestamps
/// well inside millisecond `i64` range no matter what the user types.
pub const MAX_DURATION_SECS: u64 = 10 * 365 * 86_400;

/// Parses a user-supplied giveaway duration like `30s`, `10m`, `2h` or `1d`.
///
/// The value must be a positive integer followed by a single unit suffix
/// (seconds, minutes, hours or days). Whitespace around and between the
/// number and the unit is tolerated. The input is untrusted, so the
/// amount-times-unit multiplication is checked and the result is capped at
/// [`MAX_DURATION_SECS`].
///
/// # Arguments
/// - `input` - The raw duration string, e.g. `"30m"`
///
/// # Returns
/// - `Ok(Duration)` - The parsed duration, guaranteed non-zero
/// - `Err(GiveawayError::InvalidInput)` - Unrecognized format, unknown unit
///   suffix, a zero duration, or a duration beyond the cap
pub fn parse_duration(input: &str) -> Result<Duration, GiveawayError> {
    let invalid = || {
        GiveawayError::InvalidInput(format!(
            "Invalid duration '{}'. Use a format like 30s, 10m, 2h or 1d.",
            input.trim()
        ))
    };

    let trimmed = input.trim().to_lowercase();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (number, unit) = trimmed.split_at(digits_end);

    let amount: u64 = number.parse().map_err(|_| invalid())?;
    if amount == 0 {
        return Err(invalid());
    }

    let seconds_per_unit = match unit.trim() {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        _ => return Err(invalid()),
    };

    let seconds = amount.checked_mul(seconds_per_unit).ok_or_else(invalid)?;
    if seconds > MAX_DURATION_SECS {
        return Err(GiveawayError::InvalidInput(format!(
            "Duration '{}' is too long.",
            input.trim()
        )));
    }

    Ok(Duration::from_secs(seconds))
}

/// Parses a u64 value (Discord snowflake) from a string.
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed snowflake
/// - `Err(AppError::GiveawayErr(InvalidInput))` - Not a valid id
pub fn parse_u64_from_string(value: &str) -> Result<u64, AppError> {
    let result = value.trim().parse::<u64>().map_err(|_| {
        GiveawayError::InvalidInput(format!("'{value}' is not a valid message id"))
    })?;

    Ok(result)
}
