use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use slant_color::Color;
use slant_lighting::{DEFAULT_SHADOWLIGHT, DEFAULT_SUNLIGHT};
use slant_world::WorldGenConfig;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldGenConfig,
    pub env: EnvConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub sunlight: Color,
    pub shadowlight: Color,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self { sunlight: DEFAULT_SUNLIGHT, shadowlight: DEFAULT_SHADOWLIGHT }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    /// A missing file yields defaults; a malformed one is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn Error>> {
        match fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("config {:?} not found, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
