//! Industry catalog: keyword lists, classification, and revenue bands.
//!
//! The catalog drives both the Overpass query (keyword regex over business
//! names) and post-hoc classification of discovered leads.

use std::collections::HashMap;

/// Ordered industry → keyword catalog.
pub const INDUSTRIES: &[(&str, &[&str])] = &[
    (
        "Technology & Software",
        &[
            "software", "tech", "technology", "app", "saas", "it", "digital", "cyber",
            "development", "developer", "programming", "coding", "startup", "innovation",
        ],
    ),
    (
        "Data & Analytics",
        &[
            "data", "analytics", "business intelligence", "big data", "database", "ai", "ml",
            "machine learning", "artificial intelligence", "analysis", "statistics", "research",
            "insights", "metrics",
        ],
    ),
    (
        "E-commerce & Retail",
        &[
            "ecommerce", "retail", "online store", "marketplace", "shopping", "commerce",
            "e-commerce", "trade", "sales", "merchandise", "fashion", "goods",
        ],
    ),
    (
        "Healthcare & Medical",
        &[
            "healthcare", "medical", "health", "clinic", "hospital", "pharma", "biotech",
            "medicine", "therapy", "wellness", "care", "treatment", "diagnostic",
        ],
    ),
    (
        "Financial Services",
        &[
            "finance", "fintech", "banking", "investment", "insurance", "accounting",
            "financial", "credit", "loan", "wealth", "advisory", "capital",
        ],
    ),
    (
        "Marketing & Advertising",
        &[
            "marketing", "advertising", "agency", "digital marketing", "seo", "social media",
            "branding", "promotion", "campaign", "creative", "media", "communications",
        ],
    ),
    (
        "Consulting & Professional",
        &[
            "consulting", "professional services", "advisory", "consulting firm",
            "business consulting", "strategy", "management", "expertise", "solutions",
        ],
    ),
    (
        "Manufacturing & Industrial",
        &[
            "manufacturing", "industrial", "factory", "production", "engineering",
            "automotive", "machinery", "equipment", "fabrication", "assembly",
        ],
    ),
    (
        "Real Estate & Construction",
        &[
            "real estate", "construction", "property", "building", "architecture",
            "developer", "contractor", "residential", "commercial", "infrastructure",
        ],
    ),
    (
        "Education & Training",
        &[
            "education", "training", "school", "university", "learning", "educational",
            "teaching", "academic", "course", "certification", "coaching",
        ],
    ),
    (
        "Media & Entertainment",
        &[
            "media", "entertainment", "broadcasting", "publishing", "gaming", "content",
            "production", "creative", "film", "music", "streaming",
        ],
    ),
    (
        "Food & Beverage",
        &[
            "food", "restaurant", "catering", "beverage", "culinary", "hospitality",
            "dining", "kitchen", "cuisine", "bar", "cafe", "nutrition",
        ],
    ),
];

/// Industry used when nothing in the catalog matches.
pub const OTHER: &str = "Other";

/// Coarse revenue bands keyed by legal-suffix indicators in company names.
const REVENUE_INDICATORS: &[(&str, &str)] = &[
    ("enterprise", "$50M+"),
    ("corporation", "$25M-50M"),
    ("inc", "$10M-25M"),
    ("llc", "$5M-10M"),
    ("ltd", "$1M-5M"),
    ("co", "$1M-5M"),
];

/// All industry names, in catalog order.
pub fn industry_names() -> Vec<&'static str> {
    INDUSTRIES.iter().map(|(name, _)| *name).collect()
}

/// Keywords for the selected industries, deduplicated.
///
/// Unknown industry names contribute nothing; selection of only unknown
/// names yields an empty list, which callers should treat as "no name
/// filter" rather than an error.
pub fn keywords_for(industries: &[String]) -> Vec<&'static str> {
    let mut seen = Vec::new();
    for selected in industries {
        if let Some((_, keywords)) = INDUSTRIES.iter().find(|(name, _)| name == selected) {
            for kw in *keywords {
                if !seen.contains(kw) {
                    seen.push(kw);
                }
            }
        }
    }
    seen
}

/// Determine the most likely industry from a business name and OSM tags.
pub fn classify(name: &str, tags: &HashMap<String, String>) -> &'static str {
    let name_lower = name.to_lowercase();

    for (industry, keywords) in INDUSTRIES {
        if keywords.iter().any(|kw| name_lower.contains(kw)) {
            return industry;
        }
    }

    let tag = |key: &str| tags.get(key).map(|v| v.to_lowercase()).unwrap_or_default();
    let office = tag("office");
    let shop = tag("shop");
    let amenity = tag("amenity");

    match () {
        _ if office == "it" || office == "software" => "Technology & Software",
        _ if matches!(shop.as_str(), "computer" | "electronics" | "software") => {
            "Technology & Software"
        }
        _ if amenity == "bank" => "Financial Services",
        _ if matches!(amenity.as_str(), "clinic" | "hospital") => "Healthcare & Medical",
        _ if matches!(amenity.as_str(), "restaurant" | "cafe") => "Food & Beverage",
        _ if matches!(amenity.as_str(), "school" | "university") => "Education & Training",
        _ => OTHER,
    }
}

/// Estimate a revenue band from name indicators and OSM tags.
///
/// Heuristic only; "Undisclosed" when nothing matches.
pub fn estimate_revenue(name: &str, tags: &HashMap<String, String>) -> &'static str {
    if name.is_empty() {
        return "Undisclosed";
    }

    let name_lower = name.to_lowercase();

    for (indicator, band) in REVENUE_INDICATORS {
        if name_lower.contains(indicator) {
            return band;
        }
    }

    const ENTERPRISE_HINTS: &[&str] =
        &["enterprise", "corporation", "international", "global", "holdings"];
    if ENTERPRISE_HINTS.iter().any(|h| name_lower.contains(h)) {
        return "$25M-50M";
    }

    match tags.get("office").map(String::as_str) {
        Some("company") => return "$10M-25M",
        Some("business") => return "$5M-10M",
        _ => {}
    }

    if tags.contains_key("website") || tags.contains_key("contact:website") {
        return "$1M-5M";
    }

    "Undisclosed"
}
