use filmmap_core::{
    entities::*,
    gateways::map::{MapLayer, MapRenderer},
};
use serde_json::{json, Value};
use std::{fs, path::PathBuf};

const LAYER_COLORS: &[&str] = &["red", "green", "blue"];
const EXTRA_LAYER_COLOR: &str = "orange";

fn layer_color(idx: usize) -> &'static str {
    LAYER_COLORS.get(idx).copied().unwrap_or(EXTRA_LAYER_COLOR)
}

/// Writes the layers as a single GeoJSON `FeatureCollection`
/// that can be opened with any map viewer.
#[derive(Debug, Clone)]
pub struct GeoJsonMap {
    path: PathBuf,
}

impl GeoJsonMap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn point(pos: MapPoint) -> Value {
    let (lat, lng) = pos.to_lat_lng_deg();
    json!({ "type": "Point", "coordinates": [lng, lat] })
}

fn marker(layer: &str, color: &str, ranked: &RankedRecord) -> Value {
    let (lat, lng) = ranked.location.pos.to_lat_lng_deg();
    json!({
        "type": "Feature",
        "geometry": point(ranked.location.pos),
        "properties": {
            "layer": layer,
            "title": ranked.record.title,
            "year": ranked.record.year,
            "latitude": lat,
            "longitude": lng,
            "place": ranked.location.address,
            "distance_km": ranked.distance_km(),
            "marker-color": color,
        }
    })
}

pub fn feature_collection(center: MapPoint, layers: &[MapLayer]) -> Value {
    let center_feature = json!({
        "type": "Feature",
        "geometry": point(center),
        "properties": { "layer": "center", "marker-symbol": "star" }
    });
    let features: Vec<_> = std::iter::once(center_feature)
        .chain(layers.iter().enumerate().flat_map(|(idx, layer)| {
            let color = layer_color(idx);
            layer
                .records
                .iter()
                .map(move |r| marker(&layer.name, color, r))
        }))
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

impl MapRenderer for GeoJsonMap {
    fn render(&self, center: MapPoint, layers: &[MapLayer]) -> anyhow::Result<()> {
        let collection = feature_collection(center, layers);
        fs::write(&self.path, serde_json::to_string_pretty(&collection)?)?;
        log::info!("Saved map to {}", self.path.display());
        Ok(())
    }
}
