//! Portside Core - Shared types library.
//!
//! This crate provides common types used across all Portside components:
//! - `checkout` - Shipping zone/rate resolution for the storefront checkout
//! - future admin and data-access crates
//!
//! # Architecture
//!
//! The core crate contains only types and small pure utilities - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and decimal parsing helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
