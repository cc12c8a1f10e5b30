//! Wall conditions on the outermost ring of cells.
//!
//! Edge cells are rebuilt from their interior neighbour, then each corner is
//! the average of the two edge cells next to it. Both passes only read cells
//! they do not write, so applying a condition twice is the same as once.

use crate::algebra::{Color3, FieldValue};
use glam::Vec2;

/// No-penetration on the left/right walls (x mirrored, y copied) and on the
/// top/bottom walls (y mirrored, x copied).
pub fn set_velocity_boundary(size: usize, velocity: &mut [Vec2]) {
    debug_assert_eq!(velocity.len(), size * size);
    let last = size - 1;
    let pos = |i: usize, j: usize| i + size * j;

    for k in 1..last {
        let inner = velocity[pos(1, k)];
        velocity[pos(0, k)] = Vec2::new(-inner.x, inner.y);
        let inner = velocity[pos(last - 1, k)];
        velocity[pos(last, k)] = Vec2::new(-inner.x, inner.y);

        let inner = velocity[pos(k, 1)];
        velocity[pos(k, 0)] = Vec2::new(inner.x, -inner.y);
        let inner = velocity[pos(k, last - 1)];
        velocity[pos(k, last)] = Vec2::new(inner.x, -inner.y);
    }

    average_corners(size, velocity);
}

/// Zero-gradient: every edge cell copies its nearest interior neighbour.
pub fn set_density_boundary(size: usize, density: &mut [Color3]) {
    debug_assert_eq!(density.len(), size * size);
    let last = size - 1;
    let pos = |i: usize, j: usize| i + size * j;

    for k in 1..last {
        density[pos(0, k)] = density[pos(1, k)];
        density[pos(last, k)] = density[pos(last - 1, k)];
        density[pos(k, 0)] = density[pos(k, 1)];
        density[pos(k, last)] = density[pos(k, last - 1)];
    }

    average_corners(size, density);
}

fn average_corners<T: FieldValue>(size: usize, data: &mut [T]) {
    let last = size - 1;
    let pos = |i: usize, j: usize| i + size * j;

    data[pos(0, 0)] = (data[pos(1, 0)] + data[pos(0, 1)]) * 0.5;
    data[pos(0, last)] = (data[pos(1, last)] + data[pos(0, last - 1)]) * 0.5;
    data[pos(last, 0)] = (data[pos(last - 1, 0)] + data[pos(last, 1)]) * 0.5;
    data[pos(last, last)] = (data[pos(last - 1, last)] + data[pos(last, last - 1)]) * 0.5;
}
