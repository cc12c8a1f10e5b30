use stablefluids::{Color3, Vec2, advect, interpolate};

fn ramp(n: usize) -> Vec<Color3> {
    (0..n * n)
        .map(|idx| {
            let (i, j) = ((idx % n) as f32, (idx / n) as f32);
            Color3::new(i / n as f32, j / n as f32, (i * j) / (n * n) as f32)
        })
        .collect()
}

#[test]
fn test_interpolation_at_grid_point_is_exact() {
    let n = 16;
    let field = ramp(n);

    for &(i, j) in &[(1usize, 1usize), (3, 4), (7, 12), (14, 14)] {
        let sample = interpolate(n, Vec2::new(i as f32, j as f32), &field);
        assert_eq!(sample, field[i + n * j]);
    }
}

#[test]
fn test_interpolation_blends_neighbours() {
    let n = 8;
    let mut field = vec![Vec2::ZERO; n * n];
    field[3 + n * 3] = Vec2::new(4.0, 0.0);

    let sample = interpolate(n, Vec2::new(2.5, 3.0), &field);
    assert!((sample.x - 2.0).abs() < 1e-6);

    let sample = interpolate(n, Vec2::new(2.5, 2.5), &field);
    assert!((sample.x - 1.0).abs() < 1e-6);
}

#[test]
fn test_interpolation_clamps_outside_domain() {
    let n = 8;
    let field = ramp(n);

    let far = interpolate(n, Vec2::new(-100.0, 1000.0), &field);
    let edge = interpolate(n, Vec2::new(0.5, n as f32 - 1.5), &field);
    assert_eq!(far, edge);
}

#[test]
fn test_zero_velocity_copies_interior() {
    let n = 16;
    let source = ramp(n);
    let velocity = vec![Vec2::ZERO; n * n];
    let mut target = vec![Color3::ZERO; n * n];

    advect(n, 0.05, &velocity, &source, &mut target);

    for j in 0..n {
        for i in 0..n {
            let idx = i + n * j;
            if i == 0 || j == 0 || i == n - 1 || j == n - 1 {
                assert_eq!(target[idx], Color3::ZERO, "boundary cell ({i}, {j}) was written");
            } else {
                assert_eq!(target[idx], source[idx]);
            }
        }
    }
}

#[test]
fn test_uniform_velocity_shifts_by_one_cell() {
    let n = 16;
    let dt = 0.05;
    let source = ramp(n);
    // dt * N * vx == 1 cell
    let velocity = vec![Vec2::new(1.0 / (n as f32 * dt), 0.0); n * n];
    let mut target = vec![Color3::ZERO; n * n];

    advect(n, dt, &velocity, &source, &mut target);

    for j in 1..n - 1 {
        for i in 2..n - 1 {
            let got = target[i + n * j];
            let want = source[(i - 1) + n * j];
            assert!((got - want).norm() < 1e-5, "cell ({i}, {j}): {got:?} vs {want:?}");
        }
    }
}

#[test]
fn test_self_advection_of_vectors() {
    let n = 16;
    let dt = 0.01;
    let velocity = vec![Vec2::new(0.0, 2.0); n * n];
    let mut target = vec![Vec2::ZERO; n * n];

    advect(n, dt, &velocity, &velocity, &mut target);

    for j in 1..n - 1 {
        for i in 1..n - 1 {
            assert!((target[i + n * j] - Vec2::new(0.0, 2.0)).length() < 1e-6);
        }
    }
}
