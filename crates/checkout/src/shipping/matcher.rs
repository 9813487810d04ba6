//! Zone matching.
//!
//! Deterministic, single pass, no side effects. Absence of a match is
//! `None`, never an error; the caller renders a "no shipping option" state.

use tracing::debug;

use portside_core::ZoneId;

use super::model::ShippingZone;

/// Select at most one zone for the shopper's country and postal code.
///
/// 1. No country → no zone.
/// 2. Filter to zones covering the country (case-insensitive).
/// 3. With a non-empty zip, the first country-matched zone (input order)
///    containing a matching pattern wins.
/// 4. Otherwise fall back to the first catch-all zone for the country.
///
/// Inactive zones are not filtered out; `is_active` only drives admin
/// display today. Multiple catch-alls for one country resolve by input
/// order - avoiding that ambiguity is the administrator's job.
#[must_use]
pub fn match_zone(zip_code: &str, country: &str, zones: &[ShippingZone]) -> Option<ZoneId> {
    let country = country.trim();
    if country.is_empty() {
        return None;
    }

    let candidates: Vec<&ShippingZone> = zones
        .iter()
        .filter(|zone| zone.covers_country(country))
        .collect();
    if candidates.is_empty() {
        debug!(country, "no zone configured for country");
        return None;
    }

    let zip_code = zip_code.trim();
    if !zip_code.is_empty() {
        if let Some(zone) = candidates.iter().find(|zone| zone.matches_zip(zip_code)) {
            debug!(zone = %zone.id, zip_code, "matched zone by zip pattern");
            return Some(zone.id.clone());
        }
    }

    let fallback = candidates.iter().find(|zone| zone.is_catch_all());
    if let Some(zone) = fallback {
        debug!(zone = %zone.id, country, "matched catch-all zone");
    }
    fallback.map(|zone| zone.id.clone())
}
