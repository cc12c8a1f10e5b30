use crate::algebra::FieldValue;
use glam::Vec2;

/// Semi-Lagrangian transport: every interior cell of `target` is set to
/// `source` sampled at the cell traced back by `dt * N * velocity`.
/// The outer ring is left for the boundary conditions.
pub fn advect<T: FieldValue>(size: usize, dt: f32, velocity: &[Vec2], source: &[T], target: &mut [T]) {
    debug_assert_eq!(velocity.len(), size * size);
    debug_assert_eq!(source.len(), size * size);
    debug_assert_eq!(target.len(), size * size);

    let trace = dt * size as f32;
    for j in 1..size - 1 {
        for i in 1..size - 1 {
            let idx = i + size * j;
            let point = Vec2::new(i as f32, j as f32) - velocity[idx] * trace;
            target[idx] = interpolate(size, point, source);
        }
    }
}

/// Bilinear sample of the four cells around `point`, after clamping it to
/// `[0.5, N - 1.5]` on both axes.
pub fn interpolate<T: FieldValue>(size: usize, point: Vec2, field: &[T]) -> T {
    let max = size as f32 - 1.5;
    let x = point.x.clamp(0.5, max);
    let y = point.y.clamp(0.5, max);

    let ix = x as usize;
    let iy = y as usize;
    let dx = x - ix as f32;
    let dy = y - iy as f32;

    let pos = |i: usize, j: usize| i + size * j;

    field[pos(ix, iy)] * ((1.0 - dx) * (1.0 - dy))
        + field[pos(ix, iy + 1)] * ((1.0 - dx) * dy)
        + field[pos(ix + 1, iy)] * (dx * (1.0 - dy))
        + field[pos(ix + 1, iy + 1)] * (dx * dy)
}
