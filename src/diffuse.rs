use crate::algebra::Color3;
use crate::boundary::set_density_boundary;

pub const RELAXATION_SWEEPS: usize = 20;

/// Relaxes `target` toward a blur of its neighbours anchored on `source`,
/// scaled by `retention` every sweep. Sweeps update `target` in place, so
/// later cells see neighbours already updated in the same sweep.
pub fn diffuse_density(
    size: usize,
    dt: f32,
    target: &mut [Color3],
    source: &[Color3],
    diffusion_rate: f32,
    retention: f32,
) {
    debug_assert_eq!(target.len(), size * size);
    debug_assert_eq!(source.len(), size * size);

    let a = dt * diffusion_rate * (size * size) as f32;
    let scale = retention / (1.0 + 4.0 * a);

    for _ in 0..RELAXATION_SWEEPS {
        for j in 1..size - 1 {
            for i in 1..size - 1 {
                let idx = i + size * j;
                let neighbours =
                    target[idx - 1] + target[idx + 1] + target[idx - size] + target[idx + size];
                target[idx] = (source[idx] + neighbours * a) * scale;
            }
        }
        set_density_boundary(size, target);
    }
}
