//! Backend services.
//!
//! # Services
//!
//! - [`extraction`] - Email upload to the extraction backend

pub mod extraction;

pub use extraction::*;
