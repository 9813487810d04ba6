//! Typed shipping domain model.
//!
//! These are the shapes the matcher/selector/calculator operate on. They are
//! produced once from [`super::records`] immediately after fetch and are
//! read-only from then on; administrators create and edit them through a
//! separate write path that never calls into this crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use portside_core::{RateId, ZoneId};

/// Trailing marker that turns a zip pattern into a prefix match.
const WILDCARD: char = '*';

/// An administrator-defined geographic grouping that determines which
/// shipping rates apply to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZone {
    /// Opaque backend identifier.
    pub id: ZoneId,
    /// Human-readable label.
    pub name: String,
    /// Country names this zone applies to.
    pub countries: Vec<String>,
    /// Postal-code patterns, in configured order. Empty means this zone is
    /// the catch-all for its countries.
    pub zip_patterns: Vec<ZipPattern>,
    /// Deactivated zones are kept for display; matching does not filter on
    /// this flag today (it mirrors the admin UI's behavior).
    pub is_active: bool,
    /// Rates belonging to this zone, in configured order. The zone owns its
    /// rates exclusively; deleting a zone cascades to them.
    pub rates: Vec<ShippingRate>,
}

impl ShippingZone {
    /// Whether this zone has no postal-code restriction.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.zip_patterns.is_empty()
    }

    /// Case-insensitive membership test against the zone's country list.
    #[must_use]
    pub fn covers_country(&self, country: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(country))
    }

    /// Whether any configured pattern matches the given postal code.
    #[must_use]
    pub fn matches_zip(&self, zip_code: &str) -> bool {
        self.zip_patterns.iter().any(|p| p.matches(zip_code))
    }
}

/// A priced shipping method belonging to exactly one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    /// Opaque backend identifier, scoped to one zone.
    pub id: RateId,
    /// Owning zone.
    pub zone_id: ZoneId,
    /// Human-readable label. Matched loosely against address text by the
    /// selector's city/state heuristic.
    pub name: String,
    /// Pricing scheme.
    pub rate_type: RateType,
    /// Base cost; its meaning depends on `rate_type`.
    pub base_cost: Decimal,
    /// Lower weight bound (weight-based only).
    pub min_weight: Decimal,
    /// Upper weight bound (weight-based only). Absent means unbounded.
    pub max_weight: Option<Decimal>,
    /// Per-kilogram surcharge (weight-based only).
    pub price_per_kg: Decimal,
    /// Free-shipping eligibility threshold. Zero means always eligible.
    pub min_order_subtotal: Decimal,
    /// Free-text delivery estimate. Display-only.
    pub estimated_delivery: Option<String>,
}

/// Closed set of rate pricing schemes.
///
/// Anything else coming off the wire is a data-integrity fault surfaced as
/// [`crate::DataError::UnknownRateType`], never a silent zero cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// Fixed cost regardless of cart contents.
    Flat,
    /// Base cost plus a per-kilogram surcharge.
    WeightBased,
    /// No cost, gated by a minimum order subtotal.
    Free,
}

impl RateType {
    /// Parse a wire-format type string. Returns `None` for anything outside
    /// the closed set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "flat" => Some(Self::Flat),
            "weight_based" => Some(Self::WeightBased),
            "free" => Some(Self::Free),
            _ => None,
        }
    }
}

/// A single postal-code match pattern.
///
/// Patterns are stored lowercased so matching stays case-insensitive
/// without re-normalizing on every comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZipPattern {
    /// Case-insensitive string equality.
    Exact(String),
    /// Case-insensitive prefix match (configured with a trailing `*`).
    Prefix(String),
}

impl ZipPattern {
    /// Parse one raw pattern. Returns `None` for empty/whitespace entries.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.strip_suffix(WILDCARD).map_or_else(
            || Some(Self::Exact(trimmed.to_lowercase())),
            |prefix| Some(Self::Prefix(prefix.trim().to_lowercase())),
        )
    }

    /// Test a postal code against this pattern.
    #[must_use]
    pub fn matches(&self, zip_code: &str) -> bool {
        let zip = zip_code.trim().to_lowercase();
        match self {
            Self::Exact(pattern) => zip == *pattern,
            Self::Prefix(prefix) => zip.starts_with(prefix),
        }
    }
}
