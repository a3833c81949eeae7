//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`CHISEL_SECTION__KEY`)

use chisel_input::{ChiselSettings, PrismCurve, DEFAULT_BACK_CAST_DISTANCE};
use chisel_math::Vec3;
use chisel_volume::{DensityVolume, VolumeError, DEFAULT_FILL_THRESHOLD};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// PRISM motion scaling curve
    #[serde(default)]
    pub prism: PrismConfig,
    /// Voxel targeting
    #[serde(default)]
    pub targeting: TargetingConfig,
    /// Chisel stroke tuning
    #[serde(default)]
    pub chisel: ChiselConfig,
    /// Volume rotation
    #[serde(default)]
    pub rotation: RotationConfig,
    /// Raw input mapping
    #[serde(default)]
    pub input: InputConfig,
    /// Clay blank the session starts with
    #[serde(default)]
    pub volume: VolumeConfig,
    /// Static scene geometry
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`CHISEL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CHISEL_PRISM__FAST_GAIN=1.1 -> prism.fast_gain = 1.1
        figment = figment.merge(Env::prefixed("CHISEL_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.prism.to_curve().is_valid() {
            return Err(ConfigError::invalid(
                "prism",
                "band edges must satisfy 0 <= noise_floor < blend_end <= pass_through_end",
            ));
        }
        if !(self.targeting.back_cast_distance > 0.0) {
            return Err(ConfigError::invalid("targeting", "back_cast_distance must be positive"));
        }
        if self.chisel.decrement < 0.0 {
            return Err(ConfigError::invalid("chisel", "decrement must not be negative"));
        }
        Ok(())
    }
}

/// PRISM curve configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    /// Per-tick distance below which motion is dropped
    pub noise_floor: f32,
    /// Top of the blend band
    pub blend_end: f32,
    /// Top of the unscaled band
    pub pass_through_end: f32,
    /// Gain at the bottom of the blend band
    pub blend_start_gain: f32,
    /// Gain for fast motion
    pub fast_gain: f32,
}

impl Default for PrismConfig {
    fn default() -> Self {
        let curve = PrismCurve::default();
        Self {
            noise_floor: curve.noise_floor,
            blend_end: curve.blend_end,
            pass_through_end: curve.pass_through_end,
            blend_start_gain: curve.blend_start_gain,
            fast_gain: curve.fast_gain,
        }
    }
}

impl PrismConfig {
    /// Convert to the curve used by the motion scaler
    pub fn to_curve(&self) -> PrismCurve {
        PrismCurve {
            noise_floor: self.noise_floor,
            blend_end: self.blend_end,
            pass_through_end: self.pass_through_end,
            blend_start_gain: self.blend_start_gain,
            fast_gain: self.fast_gain,
        }
    }
}

/// Targeting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// How far past the secondary controller the backward cast starts
    pub back_cast_distance: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            back_cast_distance: DEFAULT_BACK_CAST_DISTANCE,
        }
    }
}

/// Chisel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChiselConfig {
    /// Density removed per stroke
    pub decrement: f32,
    /// Lowest density a stroke can leave
    pub density_floor: f32,
}

impl Default for ChiselConfig {
    fn default() -> Self {
        let settings = ChiselSettings::default();
        Self {
            decrement: settings.decrement,
            density_floor: settings.density_floor,
        }
    }
}

/// Rotation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Degrees per unit of thumbstick x
    pub degrees_per_unit: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            degrees_per_unit: ChiselSettings::default().rotate_speed,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Thumbstick samples with magnitude at or below this are ignored
    pub thumbstick_dead_zone: f32,
}

/// Clay blank configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Cells along x, y, z
    pub dimensions: [usize; 3],
    /// Edge length of one cell
    pub cell_size: f32,
    /// World position of the grid's min corner
    pub origin: Vec3,
    /// Densities above this count as clay
    pub fill_threshold: f32,
    /// Radius of the starting cylinder
    pub blank_radius: f32,
    /// Density of the starting cylinder
    pub blank_density: f32,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            dimensions: [32, 32, 32],
            cell_size: 0.01,
            origin: Vec3::new(-0.16, 0.8, 0.34),
            fill_threshold: DEFAULT_FILL_THRESHOLD,
            blank_radius: 0.12,
            blank_density: 1.0,
        }
    }
}

impl VolumeConfig {
    /// Build the starting clay blank
    pub fn to_volume(&self) -> Result<DensityVolume, VolumeError> {
        let mut volume = DensityVolume::new(self.dimensions, self.cell_size, self.origin)?
            .with_threshold(self.fill_threshold);
        volume.fill_cylinder(self.blank_radius, self.blank_density);
        Ok(volume)
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Floor Y position
    pub floor_y: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { floor_y: 0.0 }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Controller tuning from the chisel and rotation sections
    pub fn to_settings(&self) -> ChiselSettings {
        ChiselSettings {
            decrement: self.chisel.decrement,
            density_floor: self.chisel.density_floor,
            rotate_speed: self.rotation.degrees_per_unit,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or parsed
    Load(String),
    /// A value parsed but is unusable
    Invalid { section: &'static str, message: &'static str },
}

impl ConfigError {
    fn invalid(section: &'static str, message: &'static str) -> Self {
        ConfigError::Invalid { section, message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(message) => write!(f, "Configuration error: {}", message),
            ConfigError::Invalid { section, message } => {
                write!(f, "Configuration error in [{}]: {}", section, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.prism.fast_gain, 1.05);
        assert_eq!(config.targeting.back_cast_distance, 100.0);
        assert_eq!(config.chisel.decrement, 0.1);
        assert_eq!(config.rotation.degrees_per_unit, 4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_curve_matches_controller_default() {
        assert_eq!(AppConfig::default().prism.to_curve(), PrismCurve::default());
        assert_eq!(AppConfig::default().to_settings(), ChiselSettings::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("noise_floor"));
        assert!(toml.contains("back_cast_distance"));
        assert!(toml.contains("degrees_per_unit"));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[chisel]\ndecrement = 0.25\n").unwrap();
        assert_eq!(config.chisel.decrement, 0.25);
        assert_eq!(config.chisel.density_floor, 0.0);
        assert_eq!(config.prism.noise_floor, 0.00065);
    }

    #[test]
    fn test_invalid_curve_rejected() {
        let mut config = AppConfig::default();
        config.prism.blend_end = 0.0001;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[prism]"));
    }

    #[test]
    fn test_non_positive_back_cast_rejected() {
        let mut config = AppConfig::default();
        config.targeting.back_cast_distance = 0.0;
        assert!(config.validate().is_err());
        config.targeting.back_cast_distance = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_volume_origin_from_toml_array() {
        let config: AppConfig = toml::from_str("[volume]\norigin = [0.5, 1.0, -2.0]\n").unwrap();
        assert_eq!(config.volume.origin, Vec3::new(0.5, 1.0, -2.0));
        assert_eq!(config.volume.dimensions, [32, 32, 32]);
        let corner = config.volume.to_volume().unwrap().grid_to_world(Vec3::ZERO);
        assert!((corner - Vec3::new(0.5, 1.0, -2.0)).length() < 1e-5);

        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("origin = [0.5, 1.0, -2.0]"));
    }

    #[test]
    fn test_volume_blank() {
        let volume = VolumeConfig::default().to_volume().unwrap();
        assert!(volume.filled_count() > 0);

        let bad = VolumeConfig {
            cell_size: 0.0,
            ..VolumeConfig::default()
        };
        assert!(bad.to_volume().is_err());
    }
}
