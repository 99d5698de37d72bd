//! Best-effort email harvesting from company websites.
//!
//! A single permissive pattern over the homepage HTML, minus known
//! false-positive domains. Harvested addresses are enrichment, not ground
//! truth: they are surfaced with an "unverified" marker and a failed fetch
//! never fails the extraction.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("email pattern is valid");
}

/// Domains that show up in page source but are never business contacts.
const EXCLUDED_FRAGMENTS: &[&str] = &[
    "example.com",
    "test.com",
    "lorem.ipsum",
    "@sentry.io",
    "@google-analytics.com",
];

/// Most emails kept per website.
const MAX_EMAILS_PER_SITE: usize = 3;

/// Extract candidate emails from raw HTML, deduplicated in first-seen
/// order, excluded fragments removed, capped at [`MAX_EMAILS_PER_SITE`].
pub fn filter_emails(html: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for m in EMAIL_RE.find_iter(html) {
        let email = m.as_str().to_string();
        let lower = email.to_lowercase();
        if EXCLUDED_FRAGMENTS.iter().any(|f| lower.contains(f)) {
            continue;
        }
        if found.iter().any(|e| e.eq_ignore_ascii_case(&email)) {
            continue;
        }
        found.push(email);
        if found.len() == MAX_EMAILS_PER_SITE {
            break;
        }
    }

    found
}

/// Prefix `https://` when a website tag carries no scheme.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Fetches homepages and pattern-matches contact emails out of them.
pub struct EmailHarvester {
    client: reqwest::Client,
}

impl EmailHarvester {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Harvest emails from a website's homepage.
    ///
    /// Returns an empty list on any failure; harvesting never aborts the
    /// surrounding extraction.
    pub async fn harvest(&self, website: &str) -> Vec<String> {
        if website.is_empty() {
            return Vec::new();
        }

        let url = normalize_url(website);
        let body = match self.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                debug!(url = %url, error = %e, "Email harvest fetch failed");
                return Vec::new();
            }
        };

        let emails = filter_emails(&body);
        debug!(url = %url, count = emails.len(), "Email harvest finished");
        emails
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        response.error_for_status()?.text().await
    }
}
