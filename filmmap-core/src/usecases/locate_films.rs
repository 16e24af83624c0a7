use super::prelude::*;
use crate::{
    catalog::read_records_by_year, gateways::geocode::GeoCodingGateway, ranking::Ranking,
    resolver::LocationResolver,
};
use std::path::Path;

/// Finds the films of `year` that were shot nearest to
/// and farthest from `reference`.
///
/// Fails only if the catalog cannot be read. Records whose location
/// cannot be resolved are silently left out.
pub fn locate_films<P, G>(
    catalog: P,
    year: u16,
    reference: MapPoint,
    resolver: &mut LocationResolver<G>,
) -> Result<Ranking>
where
    P: AsRef<Path>,
    G: GeoCodingGateway,
{
    let records = read_records_by_year(catalog, year)?;
    log::info!("Found {} films of {year}", records.len());
    let geocoded = resolver.resolve_records(records);
    let ranking = Ranking::new(&geocoded, reference);
    log::info!(
        "Ranked {} nearest and {} farthest films from {reference}",
        ranking.nearest.len(),
        ranking.farthest.len()
    );
    Ok(ranking)
}
