use anyhow::{anyhow, Result};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    pub vehicles_per_road: u32,
    /// World units per second for the demo vehicles.
    pub vehicle_speed: f32,
    /// Seconds each signal approach holds green.
    pub signal_cycle_secs: f32,
    pub seed: Option<u64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            vehicles_per_road: 3,
            vehicle_speed: 12.0,
            signal_cycle_secs: 5.0,
            seed: None,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for ViewerConfig {
    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(anyhow!("Window dimensions must be positive"));
        }

        if self.demo.vehicle_speed <= 0.0 {
            return Err(anyhow!("Vehicle speed must be positive"));
        }

        if self.demo.signal_cycle_secs <= 0.0 {
            return Err(anyhow!("Signal cycle must be positive"));
        }

        Ok(())
    }
}

impl ViewerConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ViewerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config, falling back to defaults when the file is absent.
    /// A present-but-invalid file is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: ViewerConfig = toml::from_str(&content)?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
