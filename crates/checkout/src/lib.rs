//! Portside Checkout library.
//!
//! Shipping zone/rate resolution and order totals for the storefront
//! checkout. The decision core is pure, synchronous computation over
//! in-memory values; all I/O lives behind the collaborator traits in
//! [`services`].
//!
//! Data flow: the checkout caller feeds address fields as the shopper types.
//! [`shipping::matcher`] re-runs on every country/zip change, its matched
//! zone feeds [`shipping::selector`], and the selected rate feeds
//! [`shipping::cost`]. [`session::CheckoutSession`] wires that chain
//! together and guarantees the matcher runs before the selector whenever
//! the zone can change.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod error;
pub mod services;
pub mod session;
pub mod shipping;

pub use cart::CartLine;
pub use error::{DataError, PlacementError, SourceError};
pub use session::{CheckoutSession, CustomerAddress, OrderDraft, OrderTotals};
pub use shipping::{RateType, ShippingRate, ShippingZone, ZipPattern};
