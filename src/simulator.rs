use crate::advect::advect;
use crate::boundary::set_velocity_boundary;
use crate::config::{SimConfig, StepParams};
use crate::diffuse::diffuse_density;
use crate::error::SimError;
use crate::grid::GridCells;
use crate::scene::Scene;
use crate::spectral::SpectralDiffuser;
use glam::Vec2;
use std::time::Instant;

/// Owns one grid and the transform plans sized for it, and advances both
/// through the Stable Fluids pipeline.
#[derive(Debug)]
pub struct FluidSimulator {
    config: SimConfig,
    grid: GridCells,
    spectral: SpectralDiffuser,
    time: f32,
    frame: usize,
}

impl FluidSimulator {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let grid = GridCells::new(config.resolution)?;
        let spectral = SpectralDiffuser::new(config.resolution)?;
        log::info!(
            "fluid simulator ready: {n}x{n} cells, dt = {dt}",
            n = config.resolution,
            dt = config.dt
        );
        Ok(Self {
            config,
            grid,
            spectral,
            time: 0.0,
            frame: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.resolution
    }

    pub fn dt(&self) -> f32 {
        self.config.dt
    }

    /// Simulated time elapsed across all steps.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Read-only view for renderers; only valid between steps.
    pub fn grid(&self) -> &GridCells {
        &self.grid
    }

    /// Mutable view for injecting forces and density before the next step.
    pub fn grid_mut(&mut self) -> &mut GridCells {
        &mut self.grid
    }

    /// Zeroes the grid and the clock, keeping plans and buffers.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.time = 0.0;
        self.frame = 0;
    }

    /// Lets `scene` inject into the grid, then steps with its parameters.
    pub fn advance(&mut self, scene: &mut dyn Scene) -> Result<(), SimError> {
        scene.update(self.time, &mut self.grid);
        let params = scene.params();
        self.step(&params)
    }

    /// One full step: force integration, spectral diffusion and projection,
    /// velocity walls, density advection, density diffusion, velocity
    /// self-advection.
    pub fn step(&mut self, params: &StepParams) -> Result<(), SimError> {
        let started = Instant::now();
        let n = self.config.resolution;
        let dt = self.config.dt;
        let grid = &mut self.grid;

        let gravity = Vec2::new(0.0, params.gravity);
        for (velocity, force) in grid.velocity.iter_mut().zip(grid.force.iter_mut()) {
            *velocity += *force * dt;
            *force = gravity;
        }

        self.spectral.apply(&mut grid.velocity, params.viscosity, dt)?;
        set_velocity_boundary(n, &mut grid.velocity);

        grid.density_scratch.copy_from_slice(&grid.density);
        advect(n, dt, &grid.velocity, &grid.density_scratch, &mut grid.density);

        grid.density_scratch.copy_from_slice(&grid.density);
        diffuse_density(
            n,
            dt,
            &mut grid.density,
            &grid.density_scratch,
            params.density_diffusion_rate,
            params.density_retention,
        );

        grid.velocity_scratch.copy_from_slice(&grid.velocity);
        advect(n, dt, &grid.velocity_scratch, &grid.velocity_scratch, &mut grid.velocity);

        self.time += dt;
        self.frame += 1;
        log::trace!("step {} took {:?}", self.frame, started.elapsed());
        Ok(())
    }
}
