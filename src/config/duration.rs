// src/config/duration.rs

use std::time::Duration;

/// Parse `<whole number><unit>` into a [`Duration`], with unit one of `ms`,
/// `s`, `m` or `h` (case-insensitive, surrounding whitespace ignored).
///
/// ```
/// # use std::time::Duration;
/// # use eelink_sim::config::parse_duration;
/// assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
/// assert!(parse_duration("1.5s").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let text = s.trim();
    if text.is_empty() {
        return Err("empty duration string".to_string());
    }

    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("duration '{text}' is missing a unit (ms, s, m or h)"))?;
    let (digits, unit) = text.split_at(digits_end);
    if digits.is_empty() {
        return Err(format!("duration '{text}' must start with a whole number"));
    }

    let amount: u64 = digits
        .parse()
        .map_err(|e| format!("invalid amount '{digits}' in duration '{text}': {e}"))?;

    let millis_per_unit: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "ms" => 1,
        "s" => 1_000,
        "m" => 60_000,
        "h" => 3_600_000,
        other => {
            return Err(format!(
                "unsupported duration unit '{other}' in '{text}'; expected ms, s, m or h"
            ));
        }
    };

    amount
        .checked_mul(millis_per_unit)
        .map(Duration::from_millis)
        .ok_or_else(|| format!("duration '{text}' overflows"))
}

/// Like [`parse_duration`], but rejects a zero duration.
///
/// Used for intervals that must make progress, such as the status poll.
pub fn parse_nonzero_duration(s: &str) -> Result<Duration, String> {
    let duration = parse_duration(s)?;
    if duration.is_zero() {
        return Err(format!("duration '{}' must be greater than zero", s.trim()));
    }
    Ok(duration)
}
