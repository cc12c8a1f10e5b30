//! Stable Fluids smoke simulation: semi-Lagrangian advection with an
//! FFT-based viscosity and projection step for velocity, and relaxation
//! diffusion for a coloured density field.

pub mod advect;
pub mod algebra;
pub mod analysis;
pub mod boundary;
pub mod config;
pub mod desktop;
pub mod diffuse;
pub mod error;
pub mod export;
pub mod glyphs;
pub mod grid;
pub mod render;
pub mod scene;
pub mod simulator;
pub mod spectral;

pub use advect::{advect, interpolate};
pub use algebra::{Color3, FieldValue};
pub use analysis::{AnalysisRecorder, FluidMetrics, divergence_l2, total_momentum};
pub use boundary::{set_density_boundary, set_velocity_boundary};
pub use config::{AppConfig, SimConfig, StepParams};
pub use desktop::FluidApp;
pub use diffuse::diffuse_density;
pub use error::SimError;
pub use export::ImageExporter;
pub use grid::GridCells;
pub use render::Renderer;
pub use scene::{BlankScene, FireScene, MovingSourcesScene, Scene, SceneKind, TextScene};
pub use simulator::FluidSimulator;
pub use spectral::SpectralDiffuser;

pub use glam::Vec2;
