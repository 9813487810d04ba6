//! Decimal parsing helpers for string-typed monetary and weight fields.
//!
//! The hosted backend stores numeric fields as strings (preserves precision,
//! and the admin forms submit free text). Parsing is centralized here so the
//! fallback policy - degrade to zero, warn with the raw value - is enforced
//! in exactly one place. If correctness requirements tighten, this is the
//! single point to swap for a reject-on-parse-failure policy.

use rust_decimal::Decimal;
use tracing::warn;

/// Parse a decimal field, falling back to zero on failure.
///
/// A non-empty value that fails to parse is a data-quality problem (a bad
/// administrator entry), not a reason to crash checkout. It is logged at
/// `warn` with the raw value so the surrounding system can surface it.
#[must_use]
pub fn decimal_or_zero(raw: &str, field: &'static str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    trimmed.parse::<Decimal>().unwrap_or_else(|_| {
        warn!(field, raw, "non-numeric value, defaulting to zero");
        Decimal::ZERO
    })
}

/// Parse an optional decimal field, treating absence as zero.
///
/// Absence is an expected shape from the backend and is not logged; only a
/// present-but-unparseable value warns.
#[must_use]
pub fn decimal_or_zero_opt(raw: Option<&str>, field: &'static str) -> Decimal {
    raw.map_or(Decimal::ZERO, |value| decimal_or_zero(value, field))
}
