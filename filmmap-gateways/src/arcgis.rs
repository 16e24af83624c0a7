use crate::LookupError;
use filmmap_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer";

/// Forward geocoding with the ArcGIS World Geocoding Service.
#[derive(Debug, Clone)]
pub struct ArcGis {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl ArcGis {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    fn find_address_candidates(
        &self,
        address: &str,
        timeout: Duration,
    ) -> Result<Option<ResolvedLocation>, LookupError> {
        let url = format!("{}/findAddressCandidates", self.api_url);
        let mut params = vec![
            ("singleLine", address),
            ("f", "json"),
            ("maxLocations", "1"),
            ("outSR", "4326"),
        ];
        if let Some(token) = &self.api_key {
            params.push(("token", token.as_str()));
        }
        let response: FindAddressCandidates = self
            .client
            .get(url)
            .query(&params)
            .timeout(timeout)
            .send()?
            .error_for_status()?
            .json()?;
        response.into_location()
    }
}

impl GeoCodingGateway for ArcGis {
    fn resolve_address(&self, address: &str, timeout: Duration) -> Option<ResolvedLocation> {
        match self.find_address_candidates(address, timeout) {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                log::debug!("ArcGIS found no candidates for '{address}'");
                None
            }
            Err(err) => {
                log::warn!("Failed to resolve '{address}' with ArcGIS: {err}");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct FindAddressCandidates {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    address: String,
    location: Point,
}

#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

impl FindAddressCandidates {
    fn into_location(self) -> Result<Option<ResolvedLocation>, LookupError> {
        let Self { candidates, error } = self;
        if let Some(ApiError { code, message }) = error {
            return Err(LookupError::Api { code, message });
        }
        let Some(Candidate { address, location }) = candidates.into_iter().next() else {
            return Ok(None);
        };
        let Point { x: lng, y: lat } = location;
        let pos = MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or_else(|| LookupError::Coordinate(format!("{lat},{lng}")))?;
        Ok(Some(ResolvedLocation { pos, address }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{silent_server_url, Fixed};
    use filmmap_core::gateways::geocode::Fallback;
    use std::time::Instant;

    fn parse(json: &str) -> Result<Option<ResolvedLocation>, LookupError> {
        serde_json::from_str::<FindAddressCandidates>(json)
            .unwrap()
            .into_location()
    }

    #[test]
    fn parse_first_candidate() {
        let json = r#"{
            "spatialReference": { "wkid": 4326, "latestWkid": 4326 },
            "candidates": [
                {
                    "address": "Washington, District of Columbia",
                    "location": { "x": -77.03195999999997, "y": 38.890370000000075 },
                    "score": 100,
                    "attributes": {}
                },
                {
                    "address": "Washington, Tyne and Wear",
                    "location": { "x": -1.5168, "y": 54.9000 },
                    "score": 95,
                    "attributes": {}
                }
            ]
        }"#;
        let loc = parse(json).unwrap().unwrap();
        assert_eq!("Washington, District of Columbia", loc.address);
        let (lat, lng) = loc.pos.to_lat_lng_deg();
        assert!((lat - 38.89037).abs() < 1e-6);
        assert!((lng + 77.03196).abs() < 1e-6);
    }

    #[test]
    fn no_candidates() {
        let json = r#"{ "spatialReference": { "wkid": 4326 }, "candidates": [] }"#;
        assert!(parse(json).unwrap().is_none());
    }

    #[test]
    fn api_error() {
        let json = r#"{ "error": { "code": 498, "message": "Invalid Token", "details": [] } }"#;
        assert!(matches!(
            parse(json),
            Err(LookupError::Api { code: 498, .. })
        ));
    }

    #[test]
    fn coordinate_out_of_range() {
        let json = r#"{ "candidates": [ { "address": "X", "location": { "x": 0.0, "y": 95.0 } } ] }"#;
        assert!(matches!(parse(json), Err(LookupError::Coordinate(_))));
    }

    #[test]
    fn unreachable_service_is_no_result() {
        let gw = ArcGis::new("http://127.0.0.1:9", None);
        assert!(gw
            .resolve_address("Washington", Duration::from_millis(500))
            .is_none());
    }

    #[test]
    fn timeout_falls_back_to_secondary() {
        let secondary = Fixed::new("fixed");
        let gw = Fallback::new(ArcGis::new(silent_server_url(), None), &secondary);
        let started = Instant::now();
        let location = gw.resolve_address("Washington", Duration::from_millis(300));
        let elapsed = started.elapsed();
        assert_eq!(Some("fixed"), location.as_ref().map(|l| l.address.as_str()));
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(5));
    }
}
