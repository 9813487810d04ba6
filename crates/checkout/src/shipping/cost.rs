//! Shipping cost calculation.

use rust_decimal::Decimal;

use crate::cart::{CartLine, total_weight};

use super::model::{RateType, ShippingRate};

/// Placeholder weight per cart unit, in kilograms.
///
/// Products carry no weight field yet; every unit is priced at 0.5 kg.
/// Public so the follow-up that wires in real product weight has one place
/// to replace.
pub const FALLBACK_UNIT_WEIGHT_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Compute the monetary shipping cost for a selected rate.
///
/// Pure: same inputs, same output, no hidden state. `None` (no selection)
/// costs zero - the caller renders the missing-selection state separately.
#[must_use]
pub fn compute_shipping_cost(rate: Option<&ShippingRate>, cart: &[CartLine]) -> Decimal {
    let Some(rate) = rate else {
        return Decimal::ZERO;
    };

    match rate.rate_type {
        RateType::Free => Decimal::ZERO,
        RateType::Flat => rate.base_cost,
        RateType::WeightBased => rate.base_cost + total_weight(cart) * rate.price_per_kg,
    }
}
