//! Test utilities for Showroom services.
//!
//! Test-only helpers.

pub mod auth;
