//! Shipping zone/rate resolution.
//!
//! Three pure stages, invoked in dependency order by the checkout session:
//!
//! 1. [`matcher`] - country + postal code + configured zones → at most one zone
//! 2. [`selector`] - the zone's rates + cart subtotal + address hints → at most one rate
//! 3. [`cost`] - the selected rate + cart lines → monetary shipping cost
//!
//! [`records`] holds the loosely-typed shapes as fetched from the hosted
//! backend; everything past the boundary transform works on the typed
//! [`model`] and never sees optional or ambiguous fields.

pub mod cost;
pub mod matcher;
pub mod model;
pub mod records;
pub mod selector;

pub use cost::{FALLBACK_UNIT_WEIGHT_KG, compute_shipping_cost};
pub use matcher::match_zone;
pub use model::{RateType, ShippingRate, ShippingZone, ZipPattern};
pub use records::{RateRecord, ZoneRecord, convert_zones};
pub use selector::select_rate;
