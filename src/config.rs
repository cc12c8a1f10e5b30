use crate::error::SimError;
use crate::scene::SceneKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_RESOLUTION: usize = 8;

/// The spectral solver needs an even resolution so the half spectrum has a
/// Nyquist column.
pub fn validate_resolution(size: usize) -> Result<(), SimError> {
    if size < MIN_RESOLUTION || size % 2 != 0 {
        return Err(SimError::InvalidResolution(size));
    }
    Ok(())
}

/// Fixed for the lifetime of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub resolution: usize,
    pub dt: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            resolution: 256,
            dt: 0.001,
        }
    }
}

impl SimConfig {
    pub fn new(resolution: usize, dt: f32) -> Self {
        Self { resolution, dt }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        validate_resolution(self.resolution)?;
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidTimestep(self.dt));
        }
        Ok(())
    }
}

/// Physical parameters for a single step, chosen by the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepParams {
    pub viscosity: f32,
    pub gravity: f32,
    pub density_retention: f32,
    pub density_diffusion_rate: f32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            viscosity: 0.0001,
            gravity: 9.81,
            density_retention: 0.9999,
            density_diffusion_rate: 0.0,
        }
    }
}

impl StepParams {
    pub fn new(viscosity: f32, gravity: f32, density_retention: f32, density_diffusion_rate: f32) -> Self {
        Self {
            viscosity,
            gravity,
            density_retention,
            density_diffusion_rate,
        }
    }

    /// Zero viscosity and zero diffusion are allowed; negative values are not.
    pub fn validate(&self) -> Result<(), SimError> {
        let non_negative = [
            ("viscosity", self.viscosity),
            ("density_diffusion_rate", self.density_diffusion_rate),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "gravity",
                value: self.gravity,
            });
        }
        if !(0.0..=1.0).contains(&self.density_retention) {
            return Err(SimError::InvalidParameter {
                name: "density_retention",
                value: self.density_retention,
            });
        }
        Ok(())
    }
}

/// Settings for the binary: simulator shape, starting scene, viewer and
/// headless export options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    pub scene: SceneKind,
    pub cell_size: f32,
    /// Scale applied to mouse drags before they become forces.
    pub interaction: f32,
    pub frames: usize,
    pub output_dir: PathBuf,
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            scene: SceneKind::MovingSources,
            cell_size: 3.0,
            interaction: 1.0e5,
            frames: 200,
            output_dir: PathBuf::from("output"),
            seed: 7,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.sim.validate()?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
