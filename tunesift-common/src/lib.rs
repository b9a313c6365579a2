//! # TuneSift Common Library
//!
//! Shared code for the TuneSift service:
//! - Audio feature vocabulary and tolerance policy
//! - Track resource identifier parsing
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod features;
pub mod uri;

pub use error::{Error, Result};
pub use features::{AudioFeature, FeatureRecord, FeatureTargets};
pub use uri::TrackId;
