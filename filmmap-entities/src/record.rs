use crate::geo::*;

/// One catalog line that matched the requested release year.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub title        : String,
    pub year         : u16,
    pub raw_location : String,
}

/// A coordinate together with the canonical address
/// reported by the geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub pos: MapPoint,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedRecord {
    pub record: LocationRecord,
    /// `None` if no provider could resolve the raw location.
    pub location: Option<ResolvedLocation>,
}

impl GeocodedRecord {
    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecord {
    pub record: LocationRecord,
    pub location: ResolvedLocation,
    pub distance: Distance,
}

impl RankedRecord {
    pub fn distance_km(&self) -> f64 {
        self.distance.to_kilometers()
    }
}
