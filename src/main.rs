use anyhow::Result;
use clap::Parser;
use filmmap_core::{
    entities::{LatCoord, LngCoord, MapPoint, RankedRecord},
    gateways::map::{MapLayer, MapRenderer},
    ranking::Ranking,
    resolver::LocationResolver,
    usecases,
};
use filmmap_gateways::geojson::GeoJsonMap;
use std::{path::PathBuf, process};

mod config;
mod gateways;

/// Find the films of a year that were shot nearest to
/// and farthest from a place.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Release year of the films
    year: u16,
    /// Latitude of the reference point in degrees
    #[arg(allow_negative_numbers = true, value_parser = latitude)]
    lat: f64,
    /// Longitude of the reference point in degrees
    #[arg(allow_negative_numbers = true, value_parser = longitude)]
    lon: f64,
    /// Catalog file with filming locations
    path: PathBuf,
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Where to save the map [default: from configuration]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn latitude(s: &str) -> Result<f64, String> {
    let deg = s.parse::<f64>().map_err(|err| err.to_string())?;
    LatCoord::try_from_deg(deg)
        .map(|_| deg)
        .ok_or_else(|| format!("{deg} is not within [-90, 90]"))
}

fn longitude(s: &str) -> Result<f64, String> {
    let deg = s.parse::<f64>().map_err(|err| err.to_string())?;
    LngCoord::try_from_deg(deg)
        .map(|_| deg)
        .ok_or_else(|| format!("{deg} is not within [-180, 180]"))
}

fn log_ranking(name: &str, records: &[RankedRecord]) {
    for (idx, r) in records.iter().enumerate() {
        log::info!(
            "{name} #{}: {} ({}) {} => {}",
            idx + 1,
            r.record.title,
            r.location.address,
            r.location.pos,
            r.distance
        );
    }
}

fn run(args: Args) -> Result<()> {
    let Args {
        year,
        lat,
        lon,
        path,
        config: config_file,
        output,
    } = args;
    let cfg = config::Config::try_load_from_file_or_default(config_file)?;
    let reference = MapPoint::from_lat_lng_deg(lat, lon);

    let gateway = gateways::geocoding_gateway(&cfg.geocoding);
    let mut resolver = LocationResolver::new(gateway, cfg.geocoding.timeout);
    let Ranking { nearest, farthest } =
        usecases::locate_films(&path, year, reference, &mut resolver)?;
    log_ranking("nearest", &nearest);
    log_ranking("farthest", &farthest);

    let map = GeoJsonMap::new(output.unwrap_or(cfg.output.file));
    map.render(
        reference,
        &[
            MapLayer::new("nearest", nearest),
            MapLayer::new("farthest", farthest),
        ],
    )
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("{err:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_positional_arguments() {
        let args =
            Args::try_parse_from(["filmmap", "2000", "38.89", "-77.03", "locations.list"]).unwrap();
        assert_eq!(2000, args.year);
        assert_eq!(38.89, args.lat);
        assert_eq!(-77.03, args.lon);
        assert_eq!(PathBuf::from("locations.list"), args.path);
        assert!(args.config.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn parse_options() {
        let args = Args::try_parse_from([
            "filmmap",
            "--output",
            "out.geojson",
            "1999",
            "-33.86",
            "151.2",
            "locations.list",
        ])
        .unwrap();
        assert_eq!(Some(PathBuf::from("out.geojson")), args.output);
        assert_eq!(-33.86, args.lat);
    }

    #[test]
    fn reject_invalid_arguments() {
        assert!(Args::try_parse_from(["filmmap", "2000", "91", "0", "x"]).is_err());
        assert!(Args::try_parse_from(["filmmap", "2000", "0", "-181", "x"]).is_err());
        assert!(Args::try_parse_from(["filmmap", "two", "0", "0", "x"]).is_err());
        assert!(Args::try_parse_from(["filmmap", "2000", "0", "0"]).is_err());
    }
}
