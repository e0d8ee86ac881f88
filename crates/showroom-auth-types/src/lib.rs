//! Auth types shared across Showroom services.
//!
//! Provides JWT claims, token validation and the `BearerToken` extractor.

pub mod identity;
pub mod token;
