use stablefluids::{Color3, FluidSimulator, SceneKind, SimConfig, StepParams, Vec2, total_momentum};

#[test]
fn test_single_impulse_is_damped() {
    let mut sim = FluidSimulator::new(SimConfig::new(16, 0.05)).unwrap();
    let idx = sim.grid().index(8, 8);
    sim.grid_mut().force[idx] = Vec2::new(0.0, -100.0);

    sim.step(&StepParams::new(0.01, 9.8, 1.0, 0.0)).unwrap();

    let vy = sim.grid().velocity[idx].y;
    assert!(vy < 0.0, "impulse should still push upward, got {vy}");
    assert!(vy > -100.0 * 0.05, "impulse should be spread out, got {vy}");
    assert!(sim.grid().density.iter().all(|&c| c == Color3::ZERO));

    // force is reset to gravity for the next step
    assert!(sim.grid().force.iter().all(|&f| f == Vec2::new(0.0, 9.8)));
}

#[test]
fn test_quiescent_fluid_stays_at_rest() {
    let mut sim = FluidSimulator::new(SimConfig::new(64, 0.01)).unwrap();
    let params = StepParams::new(0.001, 0.0, 1.0, 0.0001);

    for _ in 0..100 {
        sim.step(&params).unwrap();
    }

    let (mx, my) = total_momentum(&sim.grid().velocity);
    assert_eq!((mx, my), (0.0, 0.0));
    assert!(sim.grid().density.iter().all(|&c| c == Color3::ZERO));
    assert_eq!(sim.frame(), 100);
    assert!((sim.time() - 1.0).abs() < 1e-4);
}

#[test]
fn test_gravity_pulls_density_down() {
    let mut sim = FluidSimulator::new(SimConfig::new(32, 0.01)).unwrap();
    for j in 10..14 {
        for i in 12..20 {
            sim.grid_mut().inject_density(i, j, Color3::new(1.0, 1.0, 1.0));
        }
    }
    let params = StepParams::new(0.001, 5.0, 1.0, 0.0);

    let centroid = |sim: &FluidSimulator| {
        let grid = sim.grid();
        let (mut mass, mut moment) = (0.0f32, 0.0f32);
        for j in 0..grid.size() {
            for i in 0..grid.size() {
                let r = grid.density_at(i, j).r;
                mass += r;
                moment += r * j as f32;
            }
        }
        moment / mass
    };

    let start = centroid(&sim);
    for _ in 0..10 {
        sim.step(&params).unwrap();
    }
    let end = centroid(&sim);
    assert!(end > start, "density should sink: {start} -> {end}");
}

#[test]
fn test_density_retention_fades() {
    let mut sim = FluidSimulator::new(SimConfig::new(16, 0.01)).unwrap();
    for j in 4..12 {
        for i in 4..12 {
            sim.grid_mut().inject_density(i, j, Color3::new(0.8, 0.0, 0.0));
        }
    }
    let total = |sim: &FluidSimulator| sim.grid().density.iter().map(|c| c.r).sum::<f32>();
    let before = total(&sim);

    sim.step(&StepParams::new(0.0, 0.0, 0.5, 0.0)).unwrap();

    let after = total(&sim);
    assert!(after < before * 0.6, "retention should fade density: {before} -> {after}");
}

#[test]
fn test_every_scene_runs_and_keeps_density_in_range() {
    for kind in SceneKind::ALL {
        let mut sim = FluidSimulator::new(SimConfig::new(64, 0.001)).unwrap();
        let mut scene = kind.build(64, 3);
        scene.params().validate().unwrap();

        for _ in 0..5 {
            sim.advance(scene.as_mut()).unwrap();
        }

        let grid = sim.grid();
        let total: f32 = grid.density.iter().map(|c| c.r + c.g + c.b).sum();
        assert!(total > 0.0, "scene {kind} injected nothing");
        for c in &grid.density {
            assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
            assert!(c.max_channel() <= 1.0 + 1e-5, "scene {kind} overflowed: {c:?}");
            assert!(c.r >= -1e-6 && c.g >= -1e-6 && c.b >= -1e-6);
        }
        assert!(grid.velocity.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_reset_clears_state() {
    let mut sim = FluidSimulator::new(SimConfig::new(32, 0.01)).unwrap();
    let mut scene = SceneKind::MovingSources.build(32, 0);
    sim.advance(scene.as_mut()).unwrap();
    assert_eq!(sim.frame(), 1);

    sim.reset();

    assert_eq!(sim.frame(), 0);
    assert_eq!(sim.time(), 0.0);
    assert!(sim.grid().velocity.iter().all(|&v| v == Vec2::ZERO));
    assert!(sim.grid().density.iter().all(|&c| c == Color3::ZERO));
}
