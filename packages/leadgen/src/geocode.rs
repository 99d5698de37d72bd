//! Location → bounding box resolution via Nominatim.
//!
//! Falls back to a hardcoded table of common cities when the Nominatim
//! lookup fails or returns nothing.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};

/// Default Nominatim search endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Geographic bounding box: south/west/north/east in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Fallback boxes for locations the public geocoder commonly rate-limits.
const FALLBACK_BBOX: &[(&str, BoundingBox)] = &[
    ("New York, USA", bbox(40.477399, -74.259090, 40.917577, -73.700272)),
    ("Los Angeles, USA", bbox(33.7037, -118.6681, 34.3373, -118.1553)),
    ("Chicago, USA", bbox(41.6445, -87.9401, 42.0230, -87.5240)),
    ("London, UK", bbox(51.286760, -0.510375, 51.691874, 0.334015)),
    ("Paris, France", bbox(48.815573, 2.224199, 48.902145, 2.469921)),
    ("Berlin, Germany", bbox(52.3382, 13.0883, 52.6755, 13.7611)),
    ("Tokyo, Japan", bbox(35.5281, 139.3184, 35.8617, 139.8728)),
    ("Sydney, Australia", bbox(-34.1692, 150.5023, -33.5780, 151.3431)),
    ("Toronto, Canada", bbox(43.5810, -79.6390, 43.8554, -79.1168)),
    ("Dubai, UAE", bbox(24.9526, 54.9297, 25.3464, 55.5731)),
    ("Singapore", bbox(1.1496, 103.5675, 1.4784, 104.1147)),
    ("Mumbai, India", bbox(18.8800, 72.7800, 19.2800, 72.9800)),
    ("São Paulo, Brazil", bbox(-23.8277, -46.8754, -23.3565, -46.3657)),
    ("Mexico City, Mexico", bbox(19.2465, -99.3570, 19.5921, -98.9462)),
    ("Karachi, Pakistan", bbox(24.789, 66.845, 25.021, 67.157)),
    ("Istanbul, Turkey", bbox(40.8023, 28.5900, 41.2061, 29.1815)),
];

const fn bbox(south: f64, west: f64, north: f64, east: f64) -> BoundingBox {
    BoundingBox {
        south,
        west,
        north,
        east,
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // [south, north, west, east] as strings
    boundingbox: Vec<String>,
}

/// Nominatim-backed geocoder with a static fallback table.
pub struct Geocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl Geocoder {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_NOMINATIM_URL.to_string(),
        }
    }

    /// Point the geocoder at a non-default endpoint (tests, mirrors).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Resolve a free-form location to a bounding box.
    pub async fn bbox_for(&self, location: &str) -> Result<BoundingBox> {
        match self.lookup(location).await {
            Ok(Some(bbox)) => {
                debug!(location = %location, ?bbox, "Geocoded via Nominatim");
                Ok(bbox)
            }
            Ok(None) => self.fallback(location, "no Nominatim match"),
            Err(e) => self.fallback(location, &e.to_string()),
        }
    }

    async fn lookup(&self, location: &str) -> Result<Option<BoundingBox>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ExtractError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(ExtractError::Http(
                format!("Nominatim HTTP {}", response.status()).into(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Http(Box::new(e)))?;
        let places: Vec<NominatimPlace> = serde_json::from_str(&body)?;

        Ok(places.first().and_then(parse_boundingbox))
    }

    fn fallback(&self, location: &str, reason: &str) -> Result<BoundingBox> {
        warn!(location = %location, reason = %reason, "Nominatim lookup failed, trying fallback table");
        FALLBACK_BBOX
            .iter()
            .find(|(name, _)| *name == location)
            .map(|(_, bbox)| *bbox)
            .ok_or_else(|| ExtractError::Geocode {
                location: location.to_string(),
            })
    }
}

fn parse_boundingbox(place: &NominatimPlace) -> Option<BoundingBox> {
    if place.boundingbox.len() != 4 {
        return None;
    }
    let south = place.boundingbox[0].parse().ok()?;
    let north = place.boundingbox[1].parse().ok()?;
    let west = place.boundingbox[2].parse().ok()?;
    let east = place.boundingbox[3].parse().ok()?;
    Some(BoundingBox {
        south,
        west,
        north,
        east,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_boundingbox_reorders_fields() {
        let place = NominatimPlace {
            boundingbox: vec![
                "30.0986589".into(),
                "30.5169440".into(),
                "-97.9383829".into(),
                "-97.5614889".into(),
            ],
        };

        let bbox = parse_boundingbox(&place).unwrap();
        assert_eq!(bbox.south, 30.0986589);
        assert_eq!(bbox.north, 30.5169440);
        assert_eq!(bbox.west, -97.9383829);
        assert_eq!(bbox.east, -97.5614889);
    }

    #[test]
    fn parse_boundingbox_rejects_short_arrays() {
        let place = NominatimPlace {
            boundingbox: vec!["1.0".into(), "2.0".into()],
        };
        assert!(parse_boundingbox(&place).is_none());
    }

    #[test]
    fn fallback_table_covers_new_york() {
        let found = FALLBACK_BBOX.iter().find(|(name, _)| *name == "New York, USA");
        assert!(found.is_some());
    }
}
