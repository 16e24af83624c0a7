use crate::config::{self, GeocodingGateway};
use filmmap_core::gateways::geocode::{Fallback, GeoCodingGateway};
use filmmap_gateways::{arcgis::ArcGis, nominatim::Nominatim};

pub type BoxedGeoCodingGateway = Box<dyn GeoCodingGateway>;

fn gateway(cfg: &GeocodingGateway) -> BoxedGeoCodingGateway {
    match cfg {
        GeocodingGateway::ArcGis { api_url, api_key } => {
            log::debug!("Use ArcGIS geocoding gateway ({api_url})");
            Box::new(ArcGis::new(api_url.clone(), api_key.clone()))
        }
        GeocodingGateway::Nominatim {
            api_url,
            user_agent,
        } => {
            log::debug!("Use Nominatim geocoding gateway ({api_url})");
            Box::new(Nominatim::new(api_url.clone(), user_agent.clone()))
        }
    }
}

pub fn geocoding_gateway(cfg: &config::Geocoding) -> BoxedGeoCodingGateway {
    let primary = gateway(&cfg.primary);
    match &cfg.secondary {
        Some(secondary) => Box::new(Fallback::new(primary, gateway(secondary))),
        None => {
            log::warn!("No fallback geocoding gateway configured");
            primary
        }
    }
}
