//! Reverse geocoding: coordinates in, nearest city name out.
//!
//! Request construction and response parsing are plain functions so the app
//! only glues them to the HTTP capability.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, GeocodingConfig};
use crate::model::{CityName, Coordinates};

pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("no geocoding credential configured")]
    MissingCredential,

    #[error("invalid geocoding endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("geocoding service returned status {0}")]
    Status(u16),

    #[error("malformed geocoding response: {0}")]
    Malformed(String),

    #[error("geocoding service returned no cities")]
    NoResults,
}

impl From<ConfigError> for GeocodeError {
    fn from(error: ConfigError) -> Self {
        Self::InvalidEndpoint(error.to_string())
    }
}

/// A fully-built lookup, ready to hand to the HTTP capability.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

// Headers carry the credential.
impl std::fmt::Debug for LookupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupRequest")
            .field("url", &self.url)
            .field("header_count", &self.headers.len())
            .finish()
    }
}

pub fn lookup_request(
    config: &GeocodingConfig,
    coordinates: Coordinates,
) -> Result<LookupRequest, GeocodeError> {
    if !config.has_credential() {
        return Err(GeocodeError::MissingCredential);
    }

    let mut url = config.endpoint_url()?;
    url.query_pairs_mut()
        .append_pair("latitude", &coordinates.latitude().to_string())
        .append_pair("longitude", &coordinates.longitude().to_string())
        .append_pair("range", &config.range.to_string());

    Ok(LookupRequest {
        url: url.into(),
        headers: vec![
            (API_KEY_HEADER, config.api_key.expose_secret().clone()),
            (API_HOST_HEADER, config.api_host.clone()),
        ],
    })
}

#[derive(Debug, Deserialize)]
struct NearestCity {
    #[serde(rename = "City")]
    city: String,
}

/// Extracts the first result's `City` field from the service's JSON array.
pub fn parse_nearest_city(body: &[u8]) -> Result<CityName, GeocodeError> {
    let cities: Vec<NearestCity> =
        serde_json::from_slice(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;

    cities
        .into_iter()
        .next()
        .map(|nearest| CityName::new(nearest.city))
        .ok_or(GeocodeError::NoResults)
}

/// Maps a completed HTTP exchange to a city name.
pub fn city_from_response(
    result: crux_http::Result<crux_http::Response<Vec<u8>>>,
) -> Result<CityName, GeocodeError> {
    let mut response = result.map_err(|e| GeocodeError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeocodeError::Status(status.into()));
    }

    let body = response.take_body().unwrap_or_default();
    parse_nearest_city(&body)
}
