//! Domain types shared across Showroom services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

mod macros;

pub mod numbering;
pub mod pagination;
pub mod user;
pub mod workflow;

pub use macros::UnknownVariant;
