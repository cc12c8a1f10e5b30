use crate::error::SimError;
use crate::grid::GridCells;
use crate::render::Renderer;
use crate::scene::Scene;
use crate::simulator::FluidSimulator;
use std::path::{Path, PathBuf};

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_density_png(&self, grid: &GridCells, path: &Path) -> Result<(), SimError> {
        self.renderer.render_to_image(grid).save(path)?;
        Ok(())
    }

    pub fn export_velocity_png(&self, grid: &GridCells, path: &Path) -> Result<(), SimError> {
        self.renderer.render_velocity_field(grid).save(path)?;
        Ok(())
    }

    /// Runs `steps` steps of `scene`, writing a density frame after each one.
    pub fn export_frame_sequence(
        &self,
        simulation: &mut FluidSimulator,
        scene: &mut dyn Scene,
        steps: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<Vec<PathBuf>, SimError> {
        std::fs::create_dir_all(output_dir)?;
        let mut written = Vec::with_capacity(steps);

        for i in 0..steps {
            simulation.advance(scene)?;

            let path = output_dir.join(format!("{prefix}_frame_{i:04}.png"));
            self.export_density_png(simulation.grid(), &path)?;
            written.push(path);
        }
        Ok(written)
    }
}
