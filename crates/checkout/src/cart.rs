//! Cart line shapes and the arithmetic the shipping core needs from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use portside_core::ProductId;

use crate::shipping::cost::FALLBACK_UNIT_WEIGHT_KG;

/// One line of the shopper's cart.
///
/// Produced by the live checkout session; never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Positive unit count.
    pub quantity: u32,
    /// Non-negative price per unit.
    pub unit_price: Decimal,
}

impl CartLine {
    /// Create a cart line.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }
}

/// Sum of `quantity * unit_price` over all lines.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|line| Decimal::from(line.quantity) * line.unit_price)
        .sum()
}

/// Total cart weight in kilograms.
///
/// Products carry no weight field yet, so every unit weighs
/// [`FALLBACK_UNIT_WEIGHT_KG`].
#[must_use]
pub fn total_weight(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|line| Decimal::from(line.quantity) * FALLBACK_UNIT_WEIGHT_KG)
        .sum()
}
