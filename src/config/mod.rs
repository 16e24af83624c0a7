use anyhow::{anyhow, Result};
use filmmap_gateways::{arcgis, nominatim};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "filmmap.toml";

const ENV_NAME_ARCGIS_API_KEY: &str = "ARCGIS_API_KEY";
const ENV_NAME_NOMINATIM_USER_AGENT: &str = "NOMINATIM_USER_AGENT";

#[derive(Debug)]
pub struct Config {
    pub geocoding: Geocoding,
    pub output: Output,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.geocoding.override_from_env();
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct Geocoding {
    pub timeout: Duration,
    pub primary: GeocodingGateway,
    pub secondary: Option<GeocodingGateway>,
}

impl Geocoding {
    fn gateways_mut(&mut self) -> impl Iterator<Item = &mut GeocodingGateway> {
        std::iter::once(&mut self.primary).chain(self.secondary.as_mut())
    }

    fn override_from_env(&mut self) {
        let api_key = env::var(ENV_NAME_ARCGIS_API_KEY).ok();
        let user_agent = env::var(ENV_NAME_NOMINATIM_USER_AGENT).ok();
        for gw in self.gateways_mut() {
            match gw {
                GeocodingGateway::ArcGis { api_key: key, .. } => {
                    if api_key.is_some() {
                        key.clone_from(&api_key);
                    }
                }
                GeocodingGateway::Nominatim {
                    user_agent: agent, ..
                } => {
                    if let Some(user_agent) = &user_agent {
                        agent.clone_from(user_agent);
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodingGateway {
    ArcGis {
        api_url: String,
        api_key: Option<String>,
    },
    Nominatim {
        api_url: String,
        user_agent: String,
    },
}

#[derive(Debug)]
pub struct Output {
    /// The map file
    pub file: PathBuf,
}

fn geocoding_gateway(
    gw_name: raw::GeocodingGateway,
    gateway: &raw::Gateway,
) -> Result<GeocodingGateway> {
    let toml_name = gw_name.name();
    let missing = || anyhow!("Missing '{toml_name}' gateway configuration");
    let gw = match gw_name {
        raw::GeocodingGateway::Arcgis => {
            let raw::ArcGis { api_url, api_key } = gateway.arcgis.clone().ok_or_else(missing)?;
            GeocodingGateway::ArcGis {
                api_url: api_url.unwrap_or_else(|| arcgis::DEFAULT_API_URL.to_string()),
                api_key,
            }
        }
        raw::GeocodingGateway::Nominatim => {
            let raw::Nominatim {
                api_url,
                user_agent,
            } = gateway.nominatim.clone().ok_or_else(missing)?;
            if user_agent.trim().is_empty() {
                return Err(anyhow!("Nominatim requires a user agent"));
            }
            GeocodingGateway::Nominatim {
                api_url: api_url.unwrap_or_else(|| nominatim::DEFAULT_API_URL.to_string()),
                user_agent,
            }
        }
    };
    Ok(gw)
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            output,
        } = from;

        let raw::Geocoding {
            timeout,
            primary,
            secondary,
        } = geocoding.unwrap_or_default();

        if timeout.is_zero() {
            return Err(anyhow!("The geocoding timeout must not be zero"));
        }
        if Some(primary) == secondary {
            log::warn!("Primary and secondary geocoding gateway are the same");
        }

        let gateway = gateway.unwrap_or_default();
        let primary = geocoding_gateway(primary, &gateway)?;
        let secondary = secondary
            .map(|gw_name| geocoding_gateway(gw_name, &gateway))
            .transpose()?;

        let geocoding = Geocoding {
            timeout,
            primary,
            secondary,
        };

        let raw::Output { file } = output.unwrap_or_default();
        let output = Output { file };

        Ok(Self { geocoding, output })
    }
}
