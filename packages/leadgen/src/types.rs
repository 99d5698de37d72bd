//! Data types shared across the extraction pipeline.

use serde::{Deserialize, Serialize};

/// One business lead: a flat row of extracted fields.
///
/// Every field is a string and defaults to empty rather than absent, so
/// CSV export always produces a well-formed row for the fixed column set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub industry: String,
    pub location: String,
    pub email: String,
    pub revenue: String,
    pub website: String,
    pub phone: String,
    pub extraction_date: String,

    /// Harvested emails are best-effort pattern matches, never verified
    /// deliverable addresses. Set whenever `email` was scraped from a
    /// website. Not part of the CSV column set.
    #[serde(default)]
    pub email_unverified: bool,
}

/// Fixed CSV column set, in export order.
pub const CSV_FIELDS: [&str; 8] = [
    "name",
    "industry",
    "location",
    "email",
    "revenue",
    "website",
    "phone",
    "extraction_date",
];

impl Lead {
    /// Field values in [`CSV_FIELDS`] order.
    pub fn csv_row(&self) -> [&str; 8] {
        [
            &self.name,
            &self.industry,
            &self.location,
            &self.email,
            &self.revenue,
            &self.website,
            &self.phone,
            &self.extraction_date,
        ]
    }
}

/// Parameters for one extraction run, validated by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadQuery {
    /// Free-form location, e.g. "Austin, USA"
    pub location: String,

    /// Selected industry names (see [`crate::industries`])
    pub industries: Vec<String>,

    /// Cap on the number of leads returned
    pub max_results: usize,
}

/// Counters describing one completed extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_found: usize,
    pub with_emails: usize,
    pub with_websites: usize,
    pub with_phones: usize,
    pub with_addresses: usize,
}

/// Output of a successful extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub leads: Vec<Lead>,
    pub stats: ExtractionStats,
}
