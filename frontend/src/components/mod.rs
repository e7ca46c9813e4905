//! UI Components for the OfferAssistant application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//!
//! # Feature Components
//! - [`UploadForm`] - Email file upload with drag & drop
//! - [`ResultCard`] - Extracted data for one email

mod hero;
mod upload;
mod result_card;

pub use hero::*;
pub use upload::*;
pub use result_card::*;
