//! Typed errors for the lead extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep the
//! failure modes of an extraction visible to callers.

use thiserror::Error;

/// Errors that can occur while extracting leads.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Location could not be resolved to a bounding box
    #[error("could not geocode location: {location}")]
    Geocode { location: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Overpass API returned a non-success status
    #[error("Overpass API returned HTTP {status}")]
    Overpass { status: u16 },

    /// Response body could not be parsed
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
