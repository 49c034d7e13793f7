//! Duration-literal parsing for `default = "..."` directives.
//!
//! The grammar is a sequence of decimal magnitudes with unit suffixes,
//! composable without separators: `300ms`, `1.5h`, `1h30m`. Supported units
//! are `ns`, `us` (alias `µs`), `ms`, `s`, `m`, and `h`. The bare literal
//! `0` is accepted without a unit.
//!
//! The generator validates default literals with this parser, and generated
//! constructors call it again at run time to initialize duration fields, so
//! both sides agree on the grammar.

use std::time::Duration;

use thiserror::Error;

/// Failure to parse a duration literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
    #[error("empty duration literal")]
    Empty,

    #[error("negative durations are not supported: `{0}`")]
    Negative(String),

    #[error("missing unit in duration `{0}`")]
    MissingUnit(String),

    #[error("unknown unit `{unit}` in duration `{literal}`")]
    UnknownUnit { literal: String, unit: String },

    #[error("invalid magnitude in duration `{0}`")]
    InvalidNumber(String),

    #[error("duration `{0}` overflows")]
    Overflow(String),
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => return None,
    })
}

/// Parse a duration literal like `3s`, `100ms`, or `1h30m`.
pub fn parse(literal: &str) -> Result<Duration, ParseDurationError> {
    let mut rest = literal;

    if rest.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    if let Some(stripped) = rest.strip_prefix('-') {
        if stripped.is_empty() {
            return Err(ParseDurationError::InvalidNumber(literal.to_string()));
        }
        return Err(ParseDurationError::Negative(literal.to_string()));
    }
    rest = rest.strip_prefix('+').unwrap_or(rest);

    // Special case matching the original grammar: a bare zero needs no unit.
    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    if rest.is_empty() {
        return Err(ParseDurationError::InvalidNumber(literal.to_string()));
    }

    let mut total: u128 = 0;

    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (magnitude, tail) = rest.split_at(digits_end);
        if magnitude.is_empty() {
            return Err(ParseDurationError::InvalidNumber(literal.to_string()));
        }

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit(literal.to_string()));
        }

        let scale = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            literal: literal.to_string(),
            unit: unit.to_string(),
        })?;

        let nanos = magnitude_nanos(magnitude, scale)
            .ok_or_else(|| ParseDurationError::InvalidNumber(literal.to_string()))?;

        total = total
            .checked_add(nanos)
            .ok_or_else(|| ParseDurationError::Overflow(literal.to_string()))?;

        rest = next;
    }

    let secs = total / NANOS_PER_SEC;
    if secs > u64::MAX as u128 {
        return Err(ParseDurationError::Overflow(literal.to_string()));
    }

    Ok(Duration::new(secs as u64, (total % NANOS_PER_SEC) as u32))
}

/// Convert one `int[.frac]` magnitude into nanoseconds at the given scale.
fn magnitude_nanos(magnitude: &str, scale: u128) -> Option<u128> {
    let (int_part, frac_part) = match magnitude.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (magnitude, None),
    };

    match frac_part {
        None if int_part.is_empty() => return None,
        Some(f) if int_part.is_empty() && f.is_empty() => return None,
        Some(f) if f.contains('.') => return None,
        _ => {}
    }

    let mut nanos = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<u128>().ok()?.checked_mul(scale)?
    };

    if let Some(frac) = frac_part {
        if !frac.is_empty() {
            let digits = frac.parse::<u128>().ok()?;
            let denom = 10u128.checked_pow(frac.len() as u32)?;
            nanos = nanos.checked_add(digits.checked_mul(scale)? / denom)?;
        }
    }

    Some(nanos)
}
