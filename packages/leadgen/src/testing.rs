//! Mock implementations for testing without network access.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ExtractError, Result};
use crate::extractor::{report, LeadExtractor, ProgressSender};
use crate::types::{Extraction, ExtractionStats, Lead, LeadQuery};

/// A [`LeadExtractor`] that returns canned results.
///
/// Supports forced failure, artificial latency, and scripted intermediate
/// progress checkpoints for exercising job-tracking code.
#[derive(Default)]
pub struct MockLeadExtractor {
    leads: Vec<Lead>,
    fail_with: Option<String>,
    delay: Option<Duration>,
    checkpoints: Vec<u8>,
}

impl MockLeadExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these leads, truncated to the query's `max_results`.
    pub fn with_leads(mut self, leads: Vec<Lead>) -> Self {
        self.leads = leads;
        self
    }

    /// Fail every extraction with this message.
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Sleep before completing (or failing).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Send these progress values before completing.
    pub fn with_checkpoints(mut self, checkpoints: Vec<u8>) -> Self {
        self.checkpoints = checkpoints;
        self
    }

    /// Convenience: `count` leads named `Lead 1..=count`.
    pub fn canned_leads(count: usize) -> Vec<Lead> {
        (1..=count)
            .map(|i| Lead {
                name: format!("Lead {i}"),
                industry: "Technology & Software".to_string(),
                location: "Austin, USA".to_string(),
                website: format!("https://lead{i}.example"),
                extraction_date: "2026-08-28".to_string(),
                ..Lead::default()
            })
            .collect()
    }
}

#[async_trait]
impl LeadExtractor for MockLeadExtractor {
    async fn extract(&self, query: &LeadQuery, progress: ProgressSender) -> Result<Extraction> {
        for checkpoint in &self.checkpoints {
            report(&progress, *checkpoint);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.fail_with {
            return Err(ExtractError::Http(message.clone().into()));
        }

        let mut leads = self.leads.clone();
        leads.truncate(query.max_results);

        let stats = ExtractionStats {
            total_found: leads.len(),
            with_emails: leads.iter().filter(|l| !l.email.is_empty()).count(),
            with_websites: leads.iter().filter(|l| !l.website.is_empty()).count(),
            with_phones: leads.iter().filter(|l| !l.phone.is_empty()).count(),
            with_addresses: leads
                .iter()
                .filter(|l| l.location != query.location)
                .count(),
        };

        Ok(Extraction { leads, stats })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
