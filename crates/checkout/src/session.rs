//! Checkout session orchestration.
//!
//! The decision core ([`crate::shipping`]) is three pure functions; this
//! module owns the state between them and the ordering contract: the zone
//! matcher re-runs strictly before the rate selector whenever country or
//! postal code change, because the selector's rate list is derived from the
//! matched zone. Every mutator leaves the session fully recomputed, so
//! callers never observe a selector output derived from a stale zone.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use portside_core::{OrderId, RateId, ZoneId};

use crate::cart::{CartLine, subtotal};
use crate::error::{PlacementError, SourceError};
use crate::services::{CouponOutcome, CouponService, OrderGateway, ZoneSource};
use crate::shipping::{
    ShippingRate, ShippingZone, compute_shipping_cost, convert_zones, match_zone, select_rate,
};

/// Address fields as entered incrementally during checkout.
///
/// All free text, all transient; never persisted by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip_code: String,
}

/// Monetary breakdown of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    /// Produced and clamped to non-negative by the coupon collaborator.
    pub discount: Decimal,
    /// `subtotal + shipping_cost - discount`.
    pub total: Decimal,
}

/// Everything the order-placement collaborator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub shipping_rate_id: Option<RateId>,
    pub address: CustomerAddress,
}

/// One shopper's checkout state.
///
/// Holds the fetched zone set read-only, re-runs matching and selection as
/// inputs change, and composes totals. No I/O except through the
/// collaborator traits passed into the async entry points.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    zones: Vec<ShippingZone>,
    cart: Vec<CartLine>,
    address: CustomerAddress,
    matched_zone: Option<ZoneId>,
    selected_rate: Option<RateId>,
    discount: Decimal,
}

impl CheckoutSession {
    /// Create a session over an already-transformed zone set.
    #[must_use]
    pub fn new(zones: Vec<ShippingZone>, cart: Vec<CartLine>) -> Self {
        let mut session = Self {
            zones,
            cart,
            address: CustomerAddress::default(),
            matched_zone: None,
            selected_rate: None,
            discount: Decimal::ZERO,
        };
        session.rematch_zone();
        session
    }

    /// Create a session by fetching zones from the data-access collaborator.
    ///
    /// A fetch failure degrades to an empty zone set - the shopper sees "no
    /// shipping options", never an error page.
    pub async fn start(source: &impl ZoneSource, cart: Vec<CartLine>) -> Self {
        let zones = match source.fetch_shipping_zones().await {
            Ok(records) => {
                let (zones, faults) = convert_zones(records);
                if !faults.is_empty() {
                    warn!(fault_count = faults.len(), "dropped malformed shipping zones");
                }
                zones
            }
            Err(error) => {
                warn!(%error, "shipping zone fetch failed, no shipping options available");
                Vec::new()
            }
        };
        Self::new(zones, cart)
    }

    /// The currently matched zone, if any.
    #[must_use]
    pub const fn matched_zone(&self) -> Option<&ZoneId> {
        self.matched_zone.as_ref()
    }

    /// The currently selected rate, if any.
    #[must_use]
    pub const fn selected_rate(&self) -> Option<&RateId> {
        self.selected_rate.as_ref()
    }

    /// Rates offered by the matched zone, in configured order.
    #[must_use]
    pub fn available_rates(&self) -> &[ShippingRate] {
        self.matched_zone
            .as_ref()
            .and_then(|id| self.zones.iter().find(|zone| zone.id == *id))
            .map_or(&[], |zone| zone.rates.as_slice())
    }

    /// The address as entered so far.
    #[must_use]
    pub const fn address(&self) -> &CustomerAddress {
        &self.address
    }

    /// Update the destination country. Re-runs the matcher, then selection.
    pub fn set_country(&mut self, country: impl Into<String>) {
        self.address.country = country.into();
        self.rematch_zone();
    }

    /// Update the postal code. Re-runs the matcher, then selection.
    pub fn set_zip(&mut self, zip_code: impl Into<String>) {
        self.address.zip_code = zip_code.into();
        self.rematch_zone();
    }

    /// Update the city hint. Zone is unaffected; selection re-runs.
    pub fn set_city(&mut self, city: impl Into<String>) {
        self.address.city = city.into();
        self.reselect_rate();
    }

    /// Update the state hint. Zone is unaffected; selection re-runs.
    pub fn set_state(&mut self, state: impl Into<String>) {
        self.address.state = state.into();
        self.reselect_rate();
    }

    /// Replace the cart. Subtotal feeds eligibility, so selection re-runs.
    pub fn set_cart(&mut self, cart: Vec<CartLine>) {
        self.cart = cart;
        self.reselect_rate();
    }

    /// Replace the zone set (e.g. after an admin edit mid-session).
    pub fn replace_zones(&mut self, zones: Vec<ShippingZone>) {
        self.zones = zones;
        self.rematch_zone();
    }

    /// Record the shopper's explicit rate choice.
    ///
    /// The choice goes through the selector like any other recomputation, so
    /// a free rate or hint match still overrides it and an ineligible id is
    /// dropped. Returns whether the choice stuck.
    pub fn choose_rate(&mut self, rate_id: RateId) -> bool {
        self.selected_rate = Some(rate_id.clone());
        self.reselect_rate();
        self.selected_rate.as_ref() == Some(&rate_id)
    }

    /// Set the discount amount (already clamped by the coupon collaborator).
    pub const fn set_discount(&mut self, discount: Decimal) {
        self.discount = discount;
    }

    /// Validate a coupon and, when it applies, record its discount.
    ///
    /// # Errors
    ///
    /// Propagates a [`SourceError`] when the coupon service is unreachable.
    pub async fn apply_coupon(
        &mut self,
        service: &impl CouponService,
        code: &str,
    ) -> Result<CouponOutcome, SourceError> {
        let outcome = service.validate_coupon(code).await?;
        if let CouponOutcome::Applied { discount, .. } = &outcome {
            self.discount = *discount;
        }
        Ok(outcome)
    }

    /// Shipping cost for the current selection.
    #[must_use]
    pub fn shipping_cost(&self) -> Decimal {
        compute_shipping_cost(self.selected_shipping_rate(), &self.cart)
    }

    /// Current order totals: `subtotal + shipping - discount`.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        let subtotal = subtotal(&self.cart);
        let shipping_cost = self.shipping_cost();
        OrderTotals {
            subtotal,
            shipping_cost,
            discount: self.discount,
            total: subtotal + shipping_cost - self.discount,
        }
    }

    /// Build the draft handed to the order-placement collaborator.
    #[must_use]
    pub fn draft(&self) -> OrderDraft {
        let totals = self.totals();
        OrderDraft {
            subtotal: totals.subtotal,
            shipping_cost: totals.shipping_cost,
            discount: totals.discount,
            total: totals.total,
            shipping_rate_id: self.selected_rate.clone(),
            address: self.address.clone(),
        }
    }

    /// Submit the order.
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`PlacementError`] untouched.
    pub async fn place_order(
        &self,
        gateway: &impl OrderGateway,
    ) -> Result<OrderId, PlacementError> {
        gateway.place_order(&self.draft()).await
    }

    /// Re-run zone matching, then selection. Matching must happen before
    /// selection because the selector's rate list derives from the zone.
    fn rematch_zone(&mut self) {
        let matched = match_zone(&self.address.zip_code, &self.address.country, &self.zones);
        if matched != self.matched_zone {
            debug!(from = ?self.matched_zone, to = ?matched, "matched zone changed");
        }
        self.matched_zone = matched;
        self.reselect_rate();
    }

    /// Re-run rate selection over the matched zone's rates.
    fn reselect_rate(&mut self) {
        let next = select_rate(
            self.available_rates(),
            subtotal(&self.cart),
            self.selected_rate.as_ref(),
            &self.address.city,
            &self.address.state,
        );
        self.selected_rate = next;
    }

    fn selected_shipping_rate(&self) -> Option<&ShippingRate> {
        self.available_rates()
            .iter()
            .find(|rate| self.selected_rate.as_ref() == Some(&rate.id))
    }
}

#[cfg(test)]
mod tests {
    use portside_core::ProductId;

    use super::*;
    use crate::shipping::model::{RateType, ZipPattern};

    fn rate(id: &str, zone_id: &str, rate_type: RateType, base_cost: Decimal) -> ShippingRate {
        ShippingRate {
            id: RateId::new(id),
            zone_id: ZoneId::new(zone_id),
            name: id.to_owned(),
            rate_type,
            base_cost,
            min_weight: Decimal::ZERO,
            max_weight: None,
            price_per_kg: Decimal::ZERO,
            min_order_subtotal: Decimal::ZERO,
            estimated_delivery: None,
        }
    }

    fn zone(id: &str, country: &str, zip_patterns: &[&str], rates: Vec<ShippingRate>) -> ShippingZone {
        ShippingZone {
            id: ZoneId::new(id),
            name: id.to_owned(),
            countries: vec![country.to_owned()],
            zip_patterns: zip_patterns
                .iter()
                .filter_map(|&p| ZipPattern::parse(p))
                .collect(),
            is_active: true,
            rates,
        }
    }

    fn cart_100() -> Vec<CartLine> {
        vec![CartLine::new(
            ProductId::new("prod_1"),
            2,
            Decimal::new(50, 0),
        )]
    }

    fn two_zone_setup() -> Vec<ShippingZone> {
        vec![
            zone(
                "z1",
                "Australia",
                &["4000", "41*"],
                vec![rate("r1", "z1", RateType::Flat, Decimal::TEN)],
            ),
            zone(
                "z2",
                "Australia",
                &[],
                vec![rate("r2", "z2", RateType::Flat, Decimal::new(20, 0))],
            ),
        ]
    }

    #[test]
    fn test_country_change_rematches_zone_before_selecting() {
        let mut session = CheckoutSession::new(two_zone_setup(), cart_100());
        assert_eq!(session.matched_zone(), None);
        assert_eq!(session.selected_rate(), None);

        session.set_country("Australia");
        // Catch-all zone until a zip narrows it down
        assert_eq!(session.matched_zone(), Some(&ZoneId::new("z2")));
        assert_eq!(session.selected_rate(), Some(&RateId::new("r2")));

        session.set_zip("4000");
        // Zone changed, so the selection must come from the new zone's rates
        assert_eq!(session.matched_zone(), Some(&ZoneId::new("z1")));
        assert_eq!(session.selected_rate(), Some(&RateId::new("r1")));
    }

    #[test]
    fn test_clearing_country_clears_zone_and_selection() {
        let mut session = CheckoutSession::new(two_zone_setup(), cart_100());
        session.set_country("Australia");
        session.set_zip("4000");
        session.set_country("");
        assert_eq!(session.matched_zone(), None);
        assert_eq!(session.selected_rate(), None);
        assert_eq!(session.shipping_cost(), Decimal::ZERO);
    }

    #[test]
    fn test_city_change_keeps_zone() {
        let mut session = CheckoutSession::new(two_zone_setup(), cart_100());
        session.set_country("Australia");
        session.set_zip("4122");
        session.set_city("Brisbane");
        assert_eq!(session.matched_zone(), Some(&ZoneId::new("z1")));
    }

    #[test]
    fn test_choose_rate_sticks_when_eligible() {
        let zones = vec![zone(
            "z1",
            "Australia",
            &[],
            vec![
                rate("r1", "z1", RateType::Flat, Decimal::TEN),
                rate("r2", "z1", RateType::Flat, Decimal::new(25, 0)),
            ],
        )];
        let mut session = CheckoutSession::new(zones, cart_100());
        session.set_country("Australia");
        assert_eq!(session.selected_rate(), Some(&RateId::new("r1")));

        assert!(session.choose_rate(RateId::new("r2")));
        assert_eq!(session.selected_rate(), Some(&RateId::new("r2")));
        assert_eq!(session.shipping_cost(), Decimal::new(25, 0));

        // Unrelated recomputation must not flicker the choice away
        session.set_city("Nowhere");
        assert_eq!(session.selected_rate(), Some(&RateId::new("r2")));
    }

    #[test]
    fn test_choose_rate_rejects_unknown_id() {
        let mut session = CheckoutSession::new(two_zone_setup(), cart_100());
        session.set_country("Australia");
        assert!(!session.choose_rate(RateId::new("r9")));
        assert_eq!(session.selected_rate(), Some(&RateId::new("r2")));
    }

    #[test]
    fn test_free_rate_overrides_manual_choice() {
        let zones = vec![zone(
            "z1",
            "Australia",
            &[],
            vec![
                rate("r1", "z1", RateType::Flat, Decimal::TEN),
                ShippingRate {
                    min_order_subtotal: Decimal::new(50, 0),
                    ..rate("r2", "z1", RateType::Free, Decimal::ZERO)
                },
            ],
        )];
        let mut session = CheckoutSession::new(zones, cart_100());
        session.set_country("Australia");
        assert!(!session.choose_rate(RateId::new("r1")));
        assert_eq!(session.selected_rate(), Some(&RateId::new("r2")));
    }

    #[test]
    fn test_cart_change_reruns_eligibility() {
        let zones = vec![zone(
            "z1",
            "Australia",
            &[],
            vec![
                rate("r1", "z1", RateType::Flat, Decimal::TEN),
                ShippingRate {
                    min_order_subtotal: Decimal::new(50, 0),
                    ..rate("r2", "z1", RateType::Free, Decimal::ZERO)
                },
            ],
        )];
        let mut session = CheckoutSession::new(zones, cart_100());
        session.set_country("Australia");
        assert_eq!(session.selected_rate(), Some(&RateId::new("r2")));

        // Shrinking the cart below the threshold drops free shipping
        session.set_cart(vec![CartLine::new(
            ProductId::new("prod_1"),
            1,
            Decimal::new(20, 0),
        )]);
        assert_eq!(session.selected_rate(), Some(&RateId::new("r1")));
    }

    #[test]
    fn test_totals_compose_subtotal_shipping_discount() {
        let mut session = CheckoutSession::new(two_zone_setup(), cart_100());
        session.set_country("Australia");
        session.set_zip("4122");
        session.set_discount(Decimal::new(5, 0));

        let totals = session.totals();
        assert_eq!(totals.subtotal, Decimal::new(100, 0));
        assert_eq!(totals.shipping_cost, Decimal::TEN);
        assert_eq!(totals.discount, Decimal::new(5, 0));
        assert_eq!(totals.total, Decimal::new(105, 0));
    }

    #[test]
    fn test_draft_carries_selection_and_address() {
        let mut session = CheckoutSession::new(two_zone_setup(), cart_100());
        session.set_country("Australia");
        session.set_zip("4000");
        session.set_city("Brisbane");

        let draft = session.draft();
        assert_eq!(draft.shipping_rate_id, Some(RateId::new("r1")));
        assert_eq!(draft.address.city, "Brisbane");
        assert_eq!(draft.total, Decimal::new(110, 0));
    }

    #[test]
    fn test_empty_zone_set_never_panics() {
        let mut session = CheckoutSession::new(Vec::new(), cart_100());
        session.set_country("Australia");
        session.set_zip("4000");
        assert_eq!(session.matched_zone(), None);
        assert_eq!(session.totals().total, Decimal::new(100, 0));
    }
}
