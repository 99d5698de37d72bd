//! The extraction pipeline: geocode, Overpass search, dedupe, enrich.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::emails::EmailHarvester;
use crate::error::Result;
use crate::geocode::Geocoder;
use crate::industries;
use crate::overpass::{build_query, lead_from_element, OverpassClient};
use crate::types::{Extraction, ExtractionStats, LeadQuery};

/// Channel for coarse, advisory progress checkpoints (0-100).
///
/// Senders must treat the channel as fire-and-forget: the receiver may be
/// dropped at any time and a failed send is not an error.
pub type ProgressSender = mpsc::UnboundedSender<u8>;

/// Send a checkpoint, ignoring a dropped receiver.
pub fn report(progress: &ProgressSender, value: u8) {
    let _ = progress.send(value);
}

/// A lead source: given a validated query, produce leads and stats.
///
/// Implementations may block for an extended, unbounded duration on
/// network activity; callers that need a bound must enforce their own
/// timeout around the call.
#[async_trait]
pub trait LeadExtractor: Send + Sync {
    async fn extract(&self, query: &LeadQuery, progress: ProgressSender) -> Result<Extraction>;

    /// Extractor name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Default delay between website fetches during enrichment.
pub const DEFAULT_FETCH_DELAY_MS: u64 = 500;

/// OpenStreetMap-backed extractor: Nominatim bbox lookup, Overpass
/// business search, then per-lead email harvesting.
pub struct OsmLeadExtractor {
    geocoder: Geocoder,
    overpass: OverpassClient,
    harvester: EmailHarvester,
    fetch_delay: Duration,
}

impl OsmLeadExtractor {
    pub fn new(geocoder: Geocoder, overpass: OverpassClient, harvester: EmailHarvester) -> Self {
        Self {
            geocoder,
            overpass,
            harvester,
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
        }
    }

    /// Build an extractor sharing one HTTP client across all collaborators.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self::new(
            Geocoder::new(client.clone()),
            OverpassClient::new(client.clone()),
            EmailHarvester::new(client),
        )
    }

    /// Delay between website fetches during email enrichment.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }
}

#[async_trait]
impl LeadExtractor for OsmLeadExtractor {
    async fn extract(&self, query: &LeadQuery, progress: ProgressSender) -> Result<Extraction> {
        info!(
            location = %query.location,
            industries = ?query.industries,
            max_results = query.max_results,
            "Starting lead extraction"
        );

        let bbox = self.geocoder.bbox_for(&query.location).await?;
        report(&progress, 20);

        let keywords = industries::keywords_for(&query.industries);
        let overpass_query = build_query(&bbox, &keywords, query.max_results);
        let elements = self.overpass.search(&overpass_query).await?;
        report(&progress, 40);

        // Dedupe by case-folded name, preserving discovery order.
        let mut seen_names: Vec<String> = Vec::new();
        let mut leads = Vec::new();
        for elem in &elements {
            if leads.len() >= query.max_results {
                break;
            }
            let Some(lead) = lead_from_element(elem, &query.location) else {
                continue;
            };
            let key = lead.name.to_lowercase();
            if seen_names.contains(&key) {
                continue;
            }
            seen_names.push(key);
            leads.push(lead);
        }

        debug!(
            elements = elements.len(),
            unique = leads.len(),
            "Deduplicated Overpass elements"
        );

        // Enrichment: scale 40..90 across the website visits.
        let mut stats = ExtractionStats::default();
        let total = leads.len();
        for (i, lead) in leads.iter_mut().enumerate() {
            if !lead.website.is_empty() {
                let emails = self.harvester.harvest(&lead.website).await;
                if !emails.is_empty() {
                    lead.email = emails.join("; ");
                    lead.email_unverified = true;
                    stats.with_emails += 1;
                }
                stats.with_websites += 1;

                if i + 1 < total && !self.fetch_delay.is_zero() {
                    tokio::time::sleep(self.fetch_delay).await;
                }
            }
            if !lead.phone.is_empty() {
                stats.with_phones += 1;
            }
            if lead.location != query.location {
                stats.with_addresses += 1;
            }

            if total > 0 {
                report(&progress, 40 + (50 * (i + 1) / total) as u8);
            }
        }
        stats.total_found = total;
        report(&progress, 90);

        info!(
            total = stats.total_found,
            with_emails = stats.with_emails,
            with_websites = stats.with_websites,
            "Lead extraction finished"
        );

        Ok(Extraction { leads, stats })
    }

    fn name(&self) -> &str {
        "osm"
    }
}
