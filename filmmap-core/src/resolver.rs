use crate::{entities::*, gateways::geocode::GeoCodingGateway};
use std::{collections::HashMap, time::Duration};

/// Memoized geocoding results keyed by the exact address string.
///
/// Addresses that could not be resolved are cached as `None`
/// and are never looked up again.
#[derive(Debug, Default, Clone)]
pub struct GeocodeCache {
    entries: HashMap<String, Option<ResolvedLocation>>,
    hits: usize,
    misses: usize,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outer `Option` tells if the address is cached at all.
    pub fn get(&mut self, address: &str) -> Option<Option<ResolvedLocation>> {
        let cached = self.entries.get(address).cloned();
        if cached.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        cached
    }

    pub fn insert(&mut self, address: String, location: Option<ResolvedLocation>) {
        self.entries.insert(address, location);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn hits(&self) -> usize {
        self.hits
    }

    pub const fn misses(&self) -> usize {
        self.misses
    }
}

#[derive(Debug)]
pub struct LocationResolver<G> {
    gateway: G,
    cache: GeocodeCache,
    timeout: Duration,
}

impl<G> LocationResolver<G>
where
    G: GeoCodingGateway,
{
    pub fn new(gateway: G, timeout: Duration) -> Self {
        Self::with_cache(gateway, GeocodeCache::default(), timeout)
    }

    pub fn with_cache(gateway: G, cache: GeocodeCache, timeout: Duration) -> Self {
        Self {
            gateway,
            cache,
            timeout,
        }
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    pub fn into_cache(self) -> GeocodeCache {
        self.cache
    }

    pub fn resolve(&mut self, address: &str) -> Option<ResolvedLocation> {
        if let Some(cached) = self.cache.get(address) {
            return cached;
        }
        if address.trim().is_empty() {
            log::debug!("Skip geocoding of an empty location");
            self.cache.insert(address.to_string(), None);
            return None;
        }
        let location = self.gateway.resolve_address(address, self.timeout);
        match &location {
            Some(loc) => log::debug!("Resolved '{address}' to {} ({})", loc.pos, loc.address),
            None => log::info!("Could not resolve '{address}'"),
        }
        self.cache.insert(address.to_string(), location.clone());
        location
    }

    pub fn resolve_records(&mut self, records: Vec<LocationRecord>) -> Vec<GeocodedRecord> {
        let total = records.len();
        let geocoded: Vec<_> = records
            .into_iter()
            .map(|record| {
                let location = self.resolve(&record.raw_location);
                GeocodedRecord { record, location }
            })
            .collect();
        let resolved = geocoded.iter().filter(|r| r.is_resolved()).count();
        log::info!(
            "Resolved {resolved} of {total} locations (cache: {} entries, {} hits, {} misses)",
            self.cache.len(),
            self.cache.hits(),
            self.cache.misses()
        );
        geocoded
    }
}
