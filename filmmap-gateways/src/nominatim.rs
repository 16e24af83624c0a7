use crate::LookupError;
use filmmap_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::{blocking::Client, header};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://nominatim.openstreetmap.org";

/// Forward geocoding with OpenStreetMap Nominatim.
///
/// The usage policy requires an application specific User-Agent.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    api_url: String,
    user_agent: String,
}

impl Nominatim {
    pub fn new(api_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            user_agent: user_agent.into(),
        }
    }

    fn search(
        &self,
        address: &str,
        timeout: Duration,
    ) -> Result<Option<ResolvedLocation>, LookupError> {
        let url = format!("{}/search", self.api_url);
        let places: Vec<Place> = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(header::USER_AGENT, &self.user_agent)
            .timeout(timeout)
            .send()?
            .error_for_status()?
            .json()?;
        places
            .into_iter()
            .next()
            .map(Place::into_location)
            .transpose()
    }
}

impl GeoCodingGateway for Nominatim {
    fn resolve_address(&self, address: &str, timeout: Duration) -> Option<ResolvedLocation> {
        match self.search(address, timeout) {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                log::debug!("Nominatim found no place for '{address}'");
                None
            }
            Err(err) => {
                log::warn!("Failed to resolve '{address}' with Nominatim: {err}");
                None
            }
        }
    }
}

// Nominatim encodes coordinates as strings
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,
}

impl Place {
    fn into_location(self) -> Result<ResolvedLocation, LookupError> {
        let Self {
            lat,
            lon,
            display_name,
        } = self;
        let pos = MapPoint::parse_lat_lng_deg(&lat, &lon)
            .map_err(|err| LookupError::Coordinate(err.to_string()))?;
        Ok(ResolvedLocation {
            pos,
            address: display_name,
        })
    }
}
