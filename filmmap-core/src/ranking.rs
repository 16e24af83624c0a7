use crate::entities::*;
use std::cmp::Ordering;

pub const MAX_RANKED_RECORDS: usize = 10;

/// Calculates the distance of every resolved record from `reference`.
/// Unresolved records are skipped, the order is preserved.
pub fn rank_by_distance(records: &[GeocodedRecord], reference: MapPoint) -> Vec<RankedRecord> {
    records
        .iter()
        .filter_map(|r| {
            let location = r.location.as_ref()?;
            let Some(distance) = MapPoint::distance(reference, location.pos) else {
                log::warn!("Invalid position of '{}': {}", r.record.title, location.pos);
                return None;
            };
            Some(RankedRecord {
                record: r.record.clone(),
                location: location.clone(),
                distance,
            })
        })
        .collect()
}

fn cmp_distance(a: &RankedRecord, b: &RankedRecord) -> Ordering {
    a.distance
        .partial_cmp(&b.distance)
        .unwrap_or(Ordering::Equal)
}

/// The `k` records with the smallest distance in ascending order.
/// Records with equal distance keep their relative order.
pub fn nearest(ranked: &[RankedRecord], k: usize) -> Vec<RankedRecord> {
    let mut sorted = ranked.to_vec();
    sorted.sort_by(cmp_distance);
    sorted.truncate(k);
    sorted
}

/// The `k` records with the largest distance in descending order.
/// Records with equal distance keep their relative order.
pub fn farthest(ranked: &[RankedRecord], k: usize) -> Vec<RankedRecord> {
    let mut sorted = ranked.to_vec();
    sorted.sort_by(|a, b| cmp_distance(b, a));
    sorted.truncate(k);
    sorted
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub nearest: Vec<RankedRecord>,
    pub farthest: Vec<RankedRecord>,
}

impl Ranking {
    pub fn new(records: &[GeocodedRecord], reference: MapPoint) -> Self {
        let ranked = rank_by_distance(records, reference);
        Self {
            nearest: nearest(&ranked, MAX_RANKED_RECORDS),
            farthest: farthest(&ranked, MAX_RANKED_RECORDS),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nearest.is_empty() && self.farthest.is_empty()
    }
}
