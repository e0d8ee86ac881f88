//! HTTP and persistence plumbing shared by Showroom services.

pub mod error;
pub mod health;
pub mod middleware;
pub mod response;
pub mod sea_ext;
pub mod serde;
pub mod shutdown;
pub mod tracing;
