use crate::algebra::Color3;
use crate::error::SimError;
use crate::grid::GridCells;
use glam::Vec2;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// L2 norm of the central-difference divergence over interior cells.
pub fn divergence_l2(size: usize, velocity: &[Vec2]) -> f32 {
    let sum: f64 = (1..size - 1)
        .into_par_iter()
        .map(|j| {
            let mut row = 0.0f64;
            for i in 1..size - 1 {
                let idx = i + size * j;
                let div = 0.5
                    * (velocity[idx + 1].x - velocity[idx - 1].x + velocity[idx + size].y
                        - velocity[idx - size].y);
                row += (div as f64) * (div as f64);
            }
            row
        })
        .sum();
    sum.sqrt() as f32
}

/// Mean absolute central-difference vorticity over interior cells.
pub fn mean_vorticity(size: usize, velocity: &[Vec2]) -> f32 {
    let sum: f64 = (1..size - 1)
        .into_par_iter()
        .map(|j| {
            let mut row = 0.0f64;
            for i in 1..size - 1 {
                let idx = i + size * j;
                let curl = 0.5
                    * (velocity[idx + 1].y - velocity[idx - 1].y - velocity[idx + size].x
                        + velocity[idx - size].x);
                row += curl.abs() as f64;
            }
            row
        })
        .sum();
    let interior = ((size - 2) * (size - 2)).max(1);
    (sum / interior as f64) as f32
}

/// Sum of all velocity samples, accumulated in double precision.
pub fn total_momentum(velocity: &[Vec2]) -> (f64, f64) {
    velocity
        .par_iter()
        .map(|v| (v.x as f64, v.y as f64))
        .reduce(|| (0.0, 0.0), |(x1, y1), (x2, y2)| (x1 + x2, y1 + y2))
}

#[derive(Debug, Clone, Serialize)]
pub struct FluidMetrics {
    pub frame: usize,
    pub total_density: Color3,
    pub max_density: f32,
    pub total_momentum: Vec2,
    pub kinetic_energy: f32,
    pub max_speed: f32,
    pub divergence_l2: f32,
    pub vorticity: f32,
}

impl FluidMetrics {
    pub fn analyze(grid: &GridCells, frame: usize) -> Self {
        let size = grid.size();

        let (r, g, b, max_density) = grid
            .density
            .par_iter()
            .map(|c| (c.r as f64, c.g as f64, c.b as f64, c.max_channel()))
            .reduce(
                || (0.0, 0.0, 0.0, 0.0f32),
                |(r1, g1, b1, m1), (r2, g2, b2, m2)| (r1 + r2, g1 + g2, b1 + b2, m1.max(m2)),
            );

        let (energy, max_speed) = grid
            .velocity
            .par_iter()
            .map(|v| (0.5 * v.length_squared() as f64, v.length()))
            .reduce(|| (0.0, 0.0f32), |(e1, s1), (e2, s2)| (e1 + e2, s1.max(s2)));

        let (mx, my) = total_momentum(&grid.velocity);

        Self {
            frame,
            total_density: Color3::new(r as f32, g as f32, b as f32),
            max_density,
            total_momentum: Vec2::new(mx as f32, my as f32),
            kinetic_energy: energy as f32,
            max_speed,
            divergence_l2: divergence_l2(size, &grid.velocity),
            vorticity: mean_vorticity(size, &grid.velocity),
        }
    }

    pub fn print_summary(&self) {
        println!("Frame {} Metrics:", self.frame);
        println!(
            "  Total Density: r={:.4} g={:.4} b={:.4}",
            self.total_density.r, self.total_density.g, self.total_density.b
        );
        println!("  Max Density: {:.6}", self.max_density);
        println!(
            "  Momentum: ({:.6}, {:.6})",
            self.total_momentum.x, self.total_momentum.y
        );
        println!("  Kinetic Energy: {:.6}", self.kinetic_energy);
        println!("  Max Speed: {:.6}", self.max_speed);
        println!("  Divergence (L2): {:.6}", self.divergence_l2);
        println!("  Vorticity: {:.6}", self.vorticity);
        println!();
    }
}

#[derive(Debug, Default, Serialize)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, grid: &GridCells, frame: usize) -> &FluidMetrics {
        self.metrics_history.push(FluidMetrics::analyze(grid, frame));
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    pub fn print_trends(&self) {
        let (Some(first), Some(last)) = (self.metrics_history.first(), self.metrics_history.last())
        else {
            return;
        };
        if self.metrics_history.len() < 2 {
            return;
        }

        let first_mass = first.total_density.r + first.total_density.g + first.total_density.b;
        let last_mass = last.total_density.r + last.total_density.g + last.total_density.b;

        println!("=== TREND ANALYSIS ===");
        println!(
            "Density change: {:.6} -> {:.6} ({:+.3}%)",
            first_mass,
            last_mass,
            (last_mass - first_mass) / first_mass.max(0.001) * 100.0
        );
        println!(
            "Kinetic Energy change: {:.6} -> {:.6} ({:+.3}%)",
            first.kinetic_energy,
            last.kinetic_energy,
            (last.kinetic_energy - first.kinetic_energy) / first.kinetic_energy.max(0.001) * 100.0
        );
        println!(
            "Divergence change: {:.6} -> {:.6}",
            first.divergence_l2, last.divergence_l2
        );
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SimError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &self.metrics_history)?;
        Ok(())
    }
}
