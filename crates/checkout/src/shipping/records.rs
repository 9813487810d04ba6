//! Boundary records as fetched from the hosted backend.
//!
//! The backend returns deeply nested, partially-optional shapes with
//! string-typed numeric fields and a comma-separated zip list. These records
//! mirror that wire shape exactly and are transformed into the typed
//! [`super::model`] once, immediately after fetch, so the decision core
//! never sees an optional or ambiguous field.

use serde::{Deserialize, Serialize};
use tracing::warn;

use portside_core::{RateId, ZoneId, decimal_or_zero, decimal_or_zero_opt};

use crate::error::DataError;

use super::model::{RateType, ShippingRate, ShippingZone, ZipPattern};

/// Shipping zone as stored by the backend, with nested rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub countries: Vec<String>,
    /// Comma-separated zip patterns. Absent or blank means catch-all.
    #[serde(default)]
    pub zip_codes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub rates: Vec<RateRecord>,
}

/// Shipping rate as stored by the backend. Numeric fields arrive as strings
/// (form-input provenance; precision preserved).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    pub id: String,
    pub zone_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub rate_type: String,
    #[serde(default)]
    pub base_cost: Option<String>,
    #[serde(default)]
    pub min_weight: Option<String>,
    #[serde(default)]
    pub max_weight: Option<String>,
    #[serde(default)]
    pub price_per_kg: Option<String>,
    #[serde(default)]
    pub min_order_subtotal: Option<String>,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl TryFrom<RateRecord> for ShippingRate {
    type Error = DataError;

    fn try_from(record: RateRecord) -> Result<Self, Self::Error> {
        let rate_id = RateId::new(record.id);
        let Some(rate_type) = RateType::parse(&record.rate_type) else {
            return Err(DataError::UnknownRateType {
                rate_id,
                raw: record.rate_type,
            });
        };

        Ok(Self {
            id: rate_id,
            zone_id: ZoneId::new(record.zone_id),
            name: record.name,
            rate_type,
            base_cost: decimal_or_zero_opt(record.base_cost.as_deref(), "base_cost"),
            min_weight: decimal_or_zero_opt(record.min_weight.as_deref(), "min_weight"),
            max_weight: record
                .max_weight
                .as_deref()
                .map(|raw| decimal_or_zero(raw, "max_weight")),
            price_per_kg: decimal_or_zero_opt(record.price_per_kg.as_deref(), "price_per_kg"),
            min_order_subtotal: decimal_or_zero_opt(
                record.min_order_subtotal.as_deref(),
                "min_order_subtotal",
            ),
            estimated_delivery: record.estimated_delivery,
        })
    }
}

impl TryFrom<ZoneRecord> for ShippingZone {
    type Error = DataError;

    fn try_from(record: ZoneRecord) -> Result<Self, Self::Error> {
        let zip_patterns = record
            .zip_codes
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(ZipPattern::parse)
            .collect();

        let rates = record
            .rates
            .into_iter()
            .map(ShippingRate::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: ZoneId::new(record.id),
            name: record.name,
            countries: record.countries,
            zip_patterns,
            is_active: record.is_active,
            rates,
        })
    }
}

/// Transform fetched records into the typed model.
///
/// A zone carrying a data-integrity fault is skipped rather than failing the
/// whole set; checkout degrades to the remaining zones and the faults come
/// back alongside so the caller can log them.
#[must_use]
pub fn convert_zones(records: Vec<ZoneRecord>) -> (Vec<ShippingZone>, Vec<DataError>) {
    let mut zones = Vec::with_capacity(records.len());
    let mut faults = Vec::new();

    for record in records {
        match ShippingZone::try_from(record) {
            Ok(zone) => zones.push(zone),
            Err(fault) => {
                warn!(%fault, "skipping malformed shipping zone");
                faults.push(fault);
            }
        }
    }

    (zones, faults)
}
