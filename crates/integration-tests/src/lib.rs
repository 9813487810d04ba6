//! Integration tests for Portside.
//!
//! The checkout core is pure, so these tests need no running services: the
//! collaborators are in-memory fakes implementing the `portside-checkout`
//! service traits.
//!
//! # Test Categories
//!
//! - `checkout_flow` - End-to-end address entry → rate selection → totals
//! - `zone_data` - Backend record transformation and degradation paths

#![cfg_attr(not(test), forbid(unsafe_code))]

use async_trait::async_trait;
use rust_decimal::Decimal;

use portside_checkout::services::{CouponOutcome, CouponService, OrderGateway, ZoneSource};
use portside_checkout::shipping::ZoneRecord;
use portside_checkout::{OrderDraft, PlacementError, SourceError};
use portside_core::OrderId;

/// Zone source backed by a fixed record set.
pub struct StaticZoneSource {
    pub records: Vec<ZoneRecord>,
}

#[async_trait]
impl ZoneSource for StaticZoneSource {
    async fn fetch_shipping_zones(&self) -> Result<Vec<ZoneRecord>, SourceError> {
        Ok(self.records.clone())
    }
}

/// Zone source that always fails at the transport layer.
pub struct DownZoneSource;

#[async_trait]
impl ZoneSource for DownZoneSource {
    async fn fetch_shipping_zones(&self) -> Result<Vec<ZoneRecord>, SourceError> {
        Err(SourceError::Transport("connection refused".to_owned()))
    }
}

/// Coupon service that accepts a single known code for a fixed discount.
pub struct SingleCouponService {
    pub code: String,
    pub discount: Decimal,
}

#[async_trait]
impl CouponService for SingleCouponService {
    async fn validate_coupon(&self, code: &str) -> Result<CouponOutcome, SourceError> {
        if code.eq_ignore_ascii_case(&self.code) {
            Ok(CouponOutcome::Applied {
                code: self.code.clone(),
                discount: self.discount,
                message: format!("{} off your order", self.discount),
            })
        } else {
            Ok(CouponOutcome::Rejected {
                reason: "unknown coupon code".to_owned(),
            })
        }
    }
}

/// Gateway that records the draft it was handed and returns a fixed id.
#[derive(Default)]
pub struct RecordingGateway {
    pub placed: std::sync::Mutex<Vec<OrderDraft>>,
}

#[async_trait]
impl OrderGateway for RecordingGateway {
    async fn place_order(&self, draft: &OrderDraft) -> Result<OrderId, PlacementError> {
        self.placed
            .lock()
            .map_err(|_| PlacementError {
                message: "gateway poisoned".to_owned(),
                details: None,
            })?
            .push(draft.clone());
        Ok(OrderId::new("order_1"))
    }
}

/// Parse the standard two-zone Australia fixture used across tests.
///
/// Zone `z1` covers zips 4000/4122 with flat rate `r1` at 10.00; zone `z2`
/// is the national catch-all with flat rate `r2` at 20.00 and free rate
/// `r3` over 150.00.
#[must_use]
pub fn australia_zone_records() -> Vec<ZoneRecord> {
    serde_json::from_value(serde_json::json!([
        {
            "id": "z1",
            "name": "Brisbane Metro",
            "countries": ["Australia"],
            "zipCodes": "4000,4122",
            "isActive": true,
            "rates": [
                {
                    "id": "r1",
                    "zoneId": "z1",
                    "name": "Metro Flat",
                    "type": "flat",
                    "baseCost": "10",
                    "estimatedDelivery": "1-2 business days"
                }
            ]
        },
        {
            "id": "z2",
            "name": "Australia Wide",
            "countries": ["Australia"],
            "rates": [
                {
                    "id": "r2",
                    "zoneId": "z2",
                    "name": "Standard",
                    "type": "flat",
                    "baseCost": "20"
                },
                {
                    "id": "r3",
                    "zoneId": "z2",
                    "name": "Free Shipping",
                    "type": "free",
                    "minOrderSubtotal": "150"
                }
            ]
        }
    ]))
    .expect("fixture is valid")
}
