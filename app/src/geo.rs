//! Address geocoding and the embedded 3D map.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const OLA_MAPS_BASE_URL: &str = "https://api.olamaps.io";
pub const DEFAULT_MAP_STYLE: &str =
    "https://api.olamaps.io/tiles/vector/v1/styles/default-light-standard/style.json";

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("geocoding request failed: {0}")]
    Request(String),

    #[error("geocoder returned HTTP {0}")]
    Http(u16),

    #[error("invalid geocoder response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Resolves free-form addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the address is unknown.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeoError>;
}

/// Ola Maps places API.
pub struct OlaGeocoder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default, rename = "geocodingResults")]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl OlaGeocoder {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| GeoError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn request(&self, address: &str) -> Result<reqwest::Request, GeoError> {
        self.http
            .get(format!("{}/places/v1/geocode", self.base_url))
            .query(&[("address", address), ("api_key", self.api_key.as_str())])
            .build()
            .map_err(|e| GeoError::Request(e.to_string()))
    }
}

/// First result's location, if any.
fn first_location(body: &str) -> Result<Option<Coordinates>, GeoError> {
    let response: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| GeoError::Decode(e.to_string()))?;
    Ok(response.results.into_iter().next().map(|r| r.geometry.location))
}

#[async_trait]
impl Geocoder for OlaGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeoError> {
        let request = self.request(address)?;
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| GeoError::Request(e.to_string()))?;
        if !response.status().is_success() {
            return Err(GeoError::Http(response.status().as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| GeoError::Request(e.to_string()))?;
        first_location(&body)
    }
}

/// A live map centred on a listing. Dropping it tears the map down.
#[derive(Debug)]
pub struct MapSession {
    pub location: String,
    pub center: Coordinates,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub style_url: String,
}

impl MapSession {
    pub fn new(location: impl Into<String>, center: Coordinates) -> Self {
        let session = Self {
            location: location.into(),
            center,
            zoom: 16.0,
            pitch: 50.0,
            bearing: -10.0,
            style_url: DEFAULT_MAP_STYLE.to_string(),
        };
        debug!(location = %session.location, lat = center.lat, lng = center.lng, "map opened");
        session
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        debug!(location = %self.location, "map torn down");
    }
}

/// Geocode `location` and open a map there. Any failure means no map.
pub async fn open_map(geocoder: &dyn Geocoder, location: &str) -> Option<MapSession> {
    match geocoder.geocode(location).await {
        Ok(Some(center)) => Some(MapSession::new(location, center)),
        Ok(None) => {
            debug!(location, "address not found, no map");
            None
        }
        Err(e) => {
            warn!(location, error = %e, "geocoding failed, no map");
            None
        }
    }
}
