//! Collaborator seams.
//!
//! Everything stateful or remote sits behind these traits: the hosted
//! backend that stores zones and rates, the coupon validator, and order
//! placement. The decision core never calls them itself - the checkout
//! session does, once per session load or shopper action - and it carries
//! no retry policy; retries belong to implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use portside_core::OrderId;

use crate::error::{PlacementError, SourceError};
use crate::session::OrderDraft;
use crate::shipping::records::ZoneRecord;

/// Read access to the configured shipping zones.
#[async_trait]
pub trait ZoneSource {
    /// Fetch the full current zone set, nested rates included.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] on transport or auth failure. Callers must
    /// degrade to an empty zone set rather than failing checkout.
    async fn fetch_shipping_zones(&self) -> Result<Vec<ZoneRecord>, SourceError>;
}

/// Coupon validation service.
#[async_trait]
pub trait CouponService {
    /// Validate a coupon code against the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the service itself is unreachable; a
    /// merely invalid code is [`CouponOutcome::Rejected`], not an error.
    async fn validate_coupon(&self, code: &str) -> Result<CouponOutcome, SourceError>;
}

/// Order placement.
#[async_trait]
pub trait OrderGateway {
    /// Submit the final order draft.
    ///
    /// # Errors
    ///
    /// Returns a [`PlacementError`] with any backend-provided details when
    /// the order is not accepted.
    async fn place_order(&self, draft: &OrderDraft) -> Result<OrderId, PlacementError>;
}

/// Outcome of coupon validation.
///
/// The discount amount is computed and clamped to non-negative by the
/// coupon service, not by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouponOutcome {
    /// Coupon applies to the current cart.
    Applied {
        /// The validated code.
        code: String,
        /// Discount amount off the order total.
        discount: Decimal,
        /// Display message ("10% off your first order").
        message: String,
    },
    /// Coupon does not apply.
    Rejected {
        /// Display reason ("coupon expired").
        reason: String,
    },
}
