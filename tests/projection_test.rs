use stablefluids::{SpectralDiffuser, Vec2, divergence_l2, total_momentum};

fn radial_field(n: usize, sigma: f32) -> Vec<Vec2> {
    let c = n as f32 / 2.0;
    (0..n * n)
        .map(|idx| {
            let x = (idx % n) as f32 - c;
            let y = (idx / n) as f32 - c;
            let g = (-(x * x + y * y) / (2.0 * sigma * sigma)).exp();
            Vec2::new(x * g, y * g)
        })
        .collect()
}

#[test]
fn test_projection_removes_divergence() {
    let n = 64;
    let mut velocity = radial_field(n, 6.0);
    let before = divergence_l2(n, &velocity);
    assert!(before > 1.0);

    let mut diffuser = SpectralDiffuser::new(n).unwrap();
    diffuser.apply(&mut velocity, 0.01, 0.01).unwrap();
    let after = divergence_l2(n, &velocity);

    println!("divergence L2: {before:.6} -> {after:.6}");
    assert!(after < before * 0.1, "divergence {before} -> {after}");
}

#[test]
fn test_mean_flow_passes_through() {
    let n = 32;
    let mut velocity = vec![Vec2::new(0.75, -0.25); n * n];

    let mut diffuser = SpectralDiffuser::new(n).unwrap();
    diffuser.apply(&mut velocity, 1.0, 0.1).unwrap();

    for v in &velocity {
        assert!((*v - Vec2::new(0.75, -0.25)).length() < 1e-5, "{v:?}");
    }
}

#[test]
fn test_viscosity_damps_shear() {
    let n = 32;
    // divergence-free shear: vx depends on y only
    let shear: Vec<Vec2> = (0..n * n)
        .map(|idx| {
            let y = (idx / n) as f32;
            Vec2::new((2.0 * std::f32::consts::PI * 3.0 * y / n as f32).sin(), 0.0)
        })
        .collect();

    let mut inviscid = shear.clone();
    let mut viscous = shear.clone();
    let mut diffuser = SpectralDiffuser::new(n).unwrap();
    diffuser.apply(&mut inviscid, 0.0, 0.01).unwrap();
    diffuser.apply(&mut viscous, 1.0, 0.01).unwrap();

    let energy = |field: &[Vec2]| field.iter().map(|v| v.length_squared()).sum::<f32>();
    let original = energy(&shear);
    assert!((energy(&inviscid) - original).abs() / original < 1e-4);

    // exp(-k² dt ν) with k = 3
    let expected = (-9.0f32 * 0.01).exp();
    let ratio = (energy(&viscous) / original).sqrt();
    assert!((ratio - expected).abs() < 1e-3, "ratio {ratio}, expected {expected}");
}

#[test]
fn test_spectral_step_conserves_momentum() {
    let n = 64;
    let mut velocity: Vec<Vec2> = radial_field(n, 8.0)
        .into_iter()
        .enumerate()
        .map(|(idx, v)| {
            let (i, j) = ((idx % n) as f32, (idx / n) as f32);
            v + Vec2::new(1.0 + 0.2 * (j * 0.3).sin(), -0.5 + 0.1 * (i * 0.2).cos())
        })
        .collect();

    let (mx0, my0) = total_momentum(&velocity);
    let magnitude = (mx0 * mx0 + my0 * my0).sqrt();

    let mut diffuser = SpectralDiffuser::new(n).unwrap();
    for _ in 0..100 {
        diffuser.apply(&mut velocity, 0.01, 0.01).unwrap();
    }

    let (mx, my) = total_momentum(&velocity);
    let drift = ((mx - mx0).powi(2) + (my - my0).powi(2)).sqrt() / magnitude;
    assert!(drift < 1e-4, "relative momentum drift {drift}");
}
