//! Business Lead Extraction Library
//!
//! Discovers businesses for a location and set of industries against
//! OpenStreetMap (Nominatim geocoding + Overpass search), classifies them,
//! and enriches each lead by harvesting contact emails from its website.
//!
//! # Usage
//!
//! ```rust,ignore
//! use leadgen::{LeadExtractor, LeadQuery, OsmLeadExtractor};
//!
//! let extractor = OsmLeadExtractor::with_client(reqwest::Client::new());
//! let query = LeadQuery {
//!     location: "Austin, USA".into(),
//!     industries: vec!["Technology & Software".into()],
//!     max_results: 50,
//! };
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let extraction = extractor.extract(&query, tx).await?;
//! ```
//!
//! Email harvesting is best-effort enrichment: addresses are pattern
//! matches flagged `email_unverified`, and a failed website fetch never
//! fails the extraction.

pub mod emails;
pub mod error;
pub mod extractor;
pub mod geocode;
pub mod industries;
pub mod overpass;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use emails::EmailHarvester;
pub use error::ExtractError;
pub use extractor::{LeadExtractor, OsmLeadExtractor, ProgressSender, DEFAULT_FETCH_DELAY_MS};
pub use geocode::{BoundingBox, Geocoder, DEFAULT_NOMINATIM_URL};
pub use overpass::{OverpassClient, DEFAULT_OVERPASS_URL};
pub use testing::MockLeadExtractor;
pub use types::{Extraction, ExtractionStats, Lead, LeadQuery, CSV_FIELDS};
