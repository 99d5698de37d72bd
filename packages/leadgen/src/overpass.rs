//! Overpass API client: query construction, execution, and conversion of
//! OSM elements into [`Lead`] records.

use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ExtractError, Result};
use crate::geocode::BoundingBox;
use crate::industries;
use crate::types::Lead;

/// Default public Overpass interpreter.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Cool-down before the single retry after a 429.
const RATE_LIMIT_BACKOFF_SECS: u64 = 60;

/// One element from an Overpass response.
#[derive(Debug, Clone, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OsmElement>,
}

/// Build an Overpass QL query over `bbox` matching business names against
/// the keyword list plus generic office/shop/amenity selectors.
pub fn build_query(bbox: &BoundingBox, keywords: &[&str], max_results: usize) -> String {
    let bb = format!("{},{},{},{}", bbox.south, bbox.west, bbox.north, bbox.east);

    let mut body = String::new();
    if !keywords.is_empty() {
        let escaped: Vec<String> = keywords
            .iter()
            .map(|kw| regex::escape(&kw.to_lowercase()))
            .collect();
        let name_regex = escaped.join("|");
        for element in ["node", "way", "relation"] {
            body.push_str(&format!("  {element}[\"name\"~\"{name_regex}\",i]({bb});\n"));
        }
    }
    for element in ["node", "way", "relation"] {
        body.push_str(&format!(
            "  {element}[\"office\"~\"company|business|it|financial|consulting|marketing\",i]({bb});\n"
        ));
    }
    for element in ["node", "way"] {
        body.push_str(&format!(
            "  {element}[\"shop\"~\"computer|electronics|mobile_phone|software\",i]({bb});\n"
        ));
    }
    for element in ["node", "way"] {
        body.push_str(&format!(
            "  {element}[\"amenity\"~\"bank|clinic|hospital|restaurant|cafe|school|university\",i]({bb});\n"
        ));
    }
    for key in ["industrial", "commercial"] {
        body.push_str(&format!("  node[\"{key}\"]({bb});\n"));
        body.push_str(&format!("  way[\"{key}\"]({bb});\n"));
    }

    format!("[out:json][timeout:120];\n(\n{body});\nout center {max_results};")
}

/// Thin client over the Overpass interpreter.
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_OVERPASS_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Execute a query, retrying once after a 429 cool-down.
    pub async fn search(&self, query: &str) -> Result<Vec<OsmElement>> {
        let mut response = self.post(query).await?;

        if response.status().as_u16() == 429 {
            warn!(
                backoff_secs = RATE_LIMIT_BACKOFF_SECS,
                "Overpass rate limited, backing off before retry"
            );
            tokio::time::sleep(std::time::Duration::from_secs(RATE_LIMIT_BACKOFF_SECS)).await;
            response = self.post(query).await?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Overpass {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Http(Box::new(e)))?;
        let parsed: OverpassResponse = serde_json::from_str(&body)?;

        info!(elements = parsed.elements.len(), "Overpass query completed");
        Ok(parsed.elements)
    }

    async fn post(&self, query: &str) -> Result<reqwest::Response> {
        self.client
            .post(&self.endpoint)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| ExtractError::Http(Box::new(e)))
    }
}

/// Convert an OSM element into a lead, or `None` for unnamed elements.
///
/// `fallback_location` stands in when the element carries no address tags.
pub fn lead_from_element(elem: &OsmElement, fallback_location: &str) -> Option<Lead> {
    let tags = &elem.tags;
    let name = tags.get("name").map(|n| n.trim()).unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    let tag = |keys: &[&str]| -> String {
        keys.iter()
            .find_map(|k| tags.get(*k))
            .cloned()
            .unwrap_or_default()
    };

    let website = tag(&["website", "contact:website", "url"]);
    let phone = tag(&["phone", "contact:phone", "telephone"]);

    let address_parts = [
        tags.get("addr:housenumber"),
        tags.get("addr:street"),
        tags.get("addr:city"),
        tags.get("addr:postcode"),
        tags.get("addr:country"),
    ];
    let mut address = address_parts
        .iter()
        .filter_map(|part| part.map(String::as_str))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if address.is_empty() {
        address = tag(&["addr:full"]);
    }

    Some(Lead {
        name: name.to_string(),
        industry: industries::classify(name, tags).to_string(),
        location: if address.is_empty() {
            fallback_location.to_string()
        } else {
            address
        },
        email: String::new(),
        revenue: industries::estimate_revenue(name, tags).to_string(),
        website,
        phone,
        extraction_date: Utc::now().format("%Y-%m-%d").to_string(),
        email_unverified: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tags: &[(&str, &str)]) -> OsmElement {
        OsmElement {
            kind: "node".to_string(),
            id: 1,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn build_query_includes_keywords_and_bbox() {
        let bbox = BoundingBox {
            south: 30.0,
            west: -98.0,
            north: 30.5,
            east: -97.5,
        };
        let query = build_query(&bbox, &["software", "fintech"], 50);

        assert!(query.starts_with("[out:json][timeout:120];"));
        assert!(query.contains("software|fintech"));
        assert!(query.contains("30,-98,30.5,-97.5"));
        assert!(query.ends_with("out center 50;"));
    }

    #[test]
    fn build_query_without_keywords_still_matches_generic_selectors() {
        let bbox = BoundingBox {
            south: 0.0,
            west: 0.0,
            north: 1.0,
            east: 1.0,
        };
        let query = build_query(&bbox, &[], 10);

        assert!(!query.contains("\"name\"~"));
        assert!(query.contains("\"office\"~"));
        assert!(query.contains("\"amenity\"~"));
    }

    #[test]
    fn build_query_escapes_regex_metacharacters() {
        let bbox = BoundingBox {
            south: 0.0,
            west: 0.0,
            north: 1.0,
            east: 1.0,
        };
        let query = build_query(&bbox, &["c++ consulting"], 10);
        assert!(query.contains("c\\+\\+ consulting"));
    }

    #[test]
    fn malformed_response_body_is_a_json_parse_error() {
        let err = serde_json::from_str::<OverpassResponse>("<html>rate limited</html>")
            .map_err(ExtractError::from)
            .unwrap_err();
        assert!(matches!(err, ExtractError::JsonParse(_)));
    }

    #[test]
    fn lead_from_element_assembles_address() {
        let elem = element(&[
            ("name", "Acme Software"),
            ("addr:housenumber", "42"),
            ("addr:street", "Congress Ave"),
            ("addr:city", "Austin"),
            ("website", "https://acme.example"),
            ("phone", "+1 512 555 0100"),
        ]);

        let lead = lead_from_element(&elem, "Austin, USA").unwrap();
        assert_eq!(lead.name, "Acme Software");
        assert_eq!(lead.location, "42, Congress Ave, Austin");
        assert_eq!(lead.industry, "Technology & Software");
        assert_eq!(lead.website, "https://acme.example");
        assert_eq!(lead.phone, "+1 512 555 0100");
        assert!(lead.email.is_empty());
    }

    #[test]
    fn lead_from_element_uses_fallback_location() {
        let elem = element(&[("name", "Acme")]);
        let lead = lead_from_element(&elem, "Austin, USA").unwrap();
        assert_eq!(lead.location, "Austin, USA");
    }

    #[test]
    fn lead_from_element_prefers_contact_prefixed_tags() {
        let elem = element(&[
            ("name", "Acme"),
            ("contact:website", "https://acme.example"),
            ("contact:phone", "+1 512 555 0100"),
        ]);
        let lead = lead_from_element(&elem, "Austin, USA").unwrap();
        assert_eq!(lead.website, "https://acme.example");
        assert_eq!(lead.phone, "+1 512 555 0100");
    }

    #[test]
    fn unnamed_element_is_skipped() {
        let elem = element(&[("office", "company")]);
        assert!(lead_from_element(&elem, "Austin, USA").is_none());
    }
}
