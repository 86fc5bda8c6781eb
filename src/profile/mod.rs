//! Enrichment-API client and profile data model.

mod client;
mod quality;
mod types;

pub use client::{EnrichLayerClient, ProfileApi, ProfileError};
pub use quality::{DataQuality, QualityReport};
pub use types::{Education, Experience, Profile};
