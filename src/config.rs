use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

use trundle_kinematics::{MotionConfig, Vec3, WheelConfig};
use trundle_rig::EnsembleConfig;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Everything the runtime reads at startup. No runtime reconfiguration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub drive: DriveSection,
    #[serde(default)]
    pub ensemble: EnsembleConfig,
    #[serde(default)]
    pub wheels: Vec<WheelSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriveSection {
    /// Identifier of the movement action to resolve at startup.
    pub action: String,
    #[serde(default)]
    pub motion: MotionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WheelSection {
    pub name: String,
    /// Chassis-local wheel mount position.
    pub mount: Vec3,
    /// Arm target offset from the wheel, chassis-local.
    pub arm_offset: Vec3,
    #[serde(default)]
    pub tuning: WheelConfig,
}

pub fn load() -> Result<AppConfig, ConfigError> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let settings = Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(true))
        .build()
        .and_then(|settings| settings.try_deserialize::<AppConfig>());

    match settings {
        Ok(app) => {
            info!(wheels = app.wheels.len(), "Successfully loaded configuration");
            Ok(app)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
