//! Rate selection.
//!
//! Filters the matched zone's rates down to the ones the cart qualifies
//! for, then picks a default in strict priority order:
//!
//! 1. Free shipping - a business promotion, always preferred when the cart
//!    qualifies.
//! 2. City/state name heuristic - lets a zone with geographically-named
//!    sub-rates ("Brisbane Express") auto-select without geocoding.
//! 3. Stability - keep the shopper's current choice across unrelated
//!    recomputation so the selection doesn't flicker between renders.
//! 4. First eligible rate.

use rust_decimal::Decimal;
use tracing::debug;

use portside_core::RateId;

use super::model::{RateType, ShippingRate};

/// Select at most one rate from a zone's rate list.
///
/// `current_selection` is the shopper's existing choice, if any; it is kept
/// when no stronger rule fires and it is still eligible. Hints are free-text
/// city/state fields from the address form; empty hints never match.
#[must_use]
pub fn select_rate(
    rates: &[ShippingRate],
    subtotal: Decimal,
    current_selection: Option<&RateId>,
    city_hint: &str,
    state_hint: &str,
) -> Option<RateId> {
    let eligible: Vec<&ShippingRate> = rates
        .iter()
        .filter(|rate| is_eligible(rate, subtotal))
        .collect();
    if eligible.is_empty() {
        return None;
    }

    if let Some(free) = eligible
        .iter()
        .find(|rate| rate.rate_type == RateType::Free)
    {
        debug!(rate = %free.id, "selected free shipping");
        return Some(free.id.clone());
    }

    if let Some(named) = eligible.iter().find(|rate| {
        name_matches_hint(&rate.name, city_hint) || name_matches_hint(&rate.name, state_hint)
    }) {
        debug!(rate = %named.id, "selected rate by location-name heuristic");
        return Some(named.id.clone());
    }

    if let Some(current) = current_selection {
        if eligible.iter().any(|rate| rate.id == *current) {
            return Some(current.clone());
        }
    }

    eligible.first().map(|rate| rate.id.clone())
}

/// Type-specific eligibility: free shipping is gated by the order subtotal;
/// flat and weight-based rates have no subtotal gate at this layer.
fn is_eligible(rate: &ShippingRate, subtotal: Decimal) -> bool {
    match rate.rate_type {
        RateType::Free => subtotal >= rate.min_order_subtotal,
        RateType::Flat | RateType::WeightBased => true,
    }
}

/// Case-insensitive substring match of a non-empty hint against a rate name.
fn name_matches_hint(name: &str, hint: &str) -> bool {
    let hint = hint.trim();
    if hint.is_empty() {
        return false;
    }
    name.to_lowercase().contains(&hint.to_lowercase())
}
