use crate::grid::GridCells;
use image::{ImageBuffer, Rgb, RgbImage};

pub struct Renderer {
    width: u32,
    height: u32,
    velocity_scale: f32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            velocity_scale: 1.0,
        }
    }

    /// Speed that maps to full brightness in the velocity image.
    pub fn with_velocity_scale(mut self, scale: f32) -> Self {
        self.velocity_scale = scale.max(f32::EPSILON);
        self
    }

    /// Density as packed RGB8, one pixel per cell, row 0 first.
    pub fn density_rgb_bytes(grid: &GridCells) -> Vec<u8> {
        grid.density_channels()
            .iter()
            .map(|&channel| (channel.clamp(0.0, 1.0) * 255.0) as u8)
            .collect()
    }

    pub fn render_to_image(&self, grid: &GridCells) -> RgbImage {
        let size = grid.size();
        let scale_x = self.width as f32 / size as f32;
        let scale_y = self.height as f32 / size as f32;

        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let i = ((x as f32 / scale_x) as usize).min(size - 1);
            let j = ((y as f32 / scale_y) as usize).min(size - 1);
            let c = grid.density_at(i, j).clamped();
            Rgb([
                (c.r * 255.0) as u8,
                (c.g * 255.0) as u8,
                (c.b * 255.0) as u8,
            ])
        })
    }

    pub fn render_velocity_field(&self, grid: &GridCells) -> RgbImage {
        let size = grid.size();

        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let i = ((x as f32 / self.width as f32 * size as f32) as usize).min(size - 1);
            let j = ((y as f32 / self.height as f32 * size as f32) as usize).min(size - 1);
            let v = grid.velocity_at(i, j) / self.velocity_scale;

            // red/green for the signed x component, blue for y
            let r = (v.x.max(0.0) * 255.0).min(255.0) as u8;
            let g = ((-v.x).max(0.0) * 255.0).min(255.0) as u8;
            let b = (v.y.abs() * 255.0).min(255.0) as u8;
            Rgb([r, g, b])
        })
    }
}
