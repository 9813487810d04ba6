//! Core types for Portside.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{decimal_or_zero, decimal_or_zero_opt};
