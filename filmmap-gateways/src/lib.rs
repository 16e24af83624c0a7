pub mod arcgis;
pub mod geojson;
pub mod nominatim;

mod error;

pub use self::error::LookupError;
