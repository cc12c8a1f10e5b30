use crate::algebra::Color3;
use crate::error::{SimError, alloc_buffer};
use glam::Vec2;

/// The simulation state: five same-sized square arrays addressed through
/// [`GridCells::index`].
#[derive(Debug, Clone)]
pub struct GridCells {
    size: usize,
    pub velocity: Vec<Vec2>,
    pub velocity_scratch: Vec<Vec2>,
    pub force: Vec<Vec2>,
    pub density: Vec<Color3>,
    pub density_scratch: Vec<Color3>,
}

impl GridCells {
    /// Allocates a zeroed `size x size` grid.
    pub fn new(size: usize) -> Result<Self, SimError> {
        if size < 3 {
            return Err(SimError::InvalidResolution(size));
        }
        let cells = size
            .checked_mul(size)
            .ok_or(SimError::Allocation { cells: usize::MAX })?;

        Ok(Self {
            size,
            velocity: alloc_buffer(cells, Vec2::ZERO)?,
            velocity_scratch: alloc_buffer(cells, Vec2::ZERO)?,
            force: alloc_buffer(cells, Vec2::ZERO)?,
            density: alloc_buffer(cells, Color3::ZERO)?,
            density_scratch: alloc_buffer(cells, Color3::ZERO)?,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Row-major offset of column `i`, row `j`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.size && j < self.size);
        i + self.size * j
    }

    fn checked_index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.size && j < self.size).then(|| self.index(i, j))
    }

    /// Saturating density injection; out-of-range cells are ignored.
    pub fn inject_density(&mut self, i: usize, j: usize, color: Color3) {
        if let Some(idx) = self.checked_index(i, j) {
            self.density[idx] = self.density[idx].saturating_add(color);
        }
    }

    pub fn set_density(&mut self, i: usize, j: usize, color: Color3) {
        if let Some(idx) = self.checked_index(i, j) {
            self.density[idx] = color.clamped();
        }
    }

    pub fn add_force(&mut self, i: usize, j: usize, force: Vec2) {
        if let Some(idx) = self.checked_index(i, j) {
            self.force[idx] += force;
        }
    }

    pub fn set_force(&mut self, i: usize, j: usize, force: Vec2) {
        if let Some(idx) = self.checked_index(i, j) {
            self.force[idx] = force;
        }
    }

    pub fn set_force_x(&mut self, i: usize, j: usize, fx: f32) {
        if let Some(idx) = self.checked_index(i, j) {
            self.force[idx].x = fx;
        }
    }

    pub fn add_velocity(&mut self, i: usize, j: usize, velocity: Vec2) {
        if let Some(idx) = self.checked_index(i, j) {
            self.velocity[idx] += velocity;
        }
    }

    pub fn density_at(&self, i: usize, j: usize) -> Color3 {
        self.density[self.index(i, j)]
    }

    pub fn velocity_at(&self, i: usize, j: usize) -> Vec2 {
        self.velocity[self.index(i, j)]
    }

    /// Density as interleaved `r, g, b` floats, ready for float-pixel upload.
    pub fn density_channels(&self) -> &[f32] {
        bytemuck::cast_slice(&self.density)
    }

    /// Zeroes every array, keeping the allocation.
    pub fn clear(&mut self) {
        self.velocity.fill(Vec2::ZERO);
        self.velocity_scratch.fill(Vec2::ZERO);
        self.force.fill(Vec2::ZERO);
        self.density.fill(Color3::ZERO);
        self.density_scratch.fill(Color3::ZERO);
    }
}
