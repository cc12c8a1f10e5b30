use stablefluids::{
    AnalysisRecorder, AppConfig, Color3, FluidSimulator, GridCells, ImageExporter, Renderer,
    SceneKind, SimConfig, SimError,
};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stablefluids_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_density_bytes_are_clamped_rgb() {
    let mut grid = GridCells::new(8).unwrap();
    grid.set_density(0, 0, Color3::new(1.0, 0.5, 0.0));

    let bytes = Renderer::density_rgb_bytes(&grid);
    assert_eq!(bytes.len(), 8 * 8 * 3);
    assert_eq!(&bytes[0..3], &[255, 127, 0]);
    assert!(bytes[3..].iter().all(|&b| b == 0));
}

#[test]
fn test_render_scales_cells_to_pixels() {
    let mut grid = GridCells::new(8).unwrap();
    grid.set_density(1, 0, Color3::new(0.0, 1.0, 0.0));

    let image = Renderer::new(32, 32).render_to_image(&grid);
    assert_eq!(image.dimensions(), (32, 32));
    assert_eq!(image.get_pixel(5, 2).0, [0, 255, 0]);
    assert_eq!(image.get_pixel(1, 2).0, [0, 0, 0]);
}

#[test]
fn test_frame_sequence_is_written() {
    let dir = scratch_dir("frames");
    let mut sim = FluidSimulator::new(SimConfig::new(32, 0.001)).unwrap();
    let mut scene = SceneKind::MovingSources.build(32, 1);

    let exporter = ImageExporter::new(64, 64);
    let written = exporter
        .export_frame_sequence(&mut sim, scene.as_mut(), 3, &dir, "smoke")
        .unwrap();

    assert_eq!(written.len(), 3);
    assert_eq!(sim.frame(), 3);
    for path in &written {
        assert!(path.exists(), "{} missing", path.display());
        let image = image::open(path).unwrap();
        assert_eq!((image.width(), image.height()), (64, 64));
    }
    assert!(written[0].ends_with("smoke_frame_0000.png"));

    exporter
        .export_velocity_png(sim.grid(), &dir.join("velocity.png"))
        .unwrap();
    assert!(dir.join("velocity.png").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_metrics_are_recorded_and_written() {
    let dir = scratch_dir("metrics");
    let mut sim = FluidSimulator::new(SimConfig::new(32, 0.001)).unwrap();
    let mut scene = SceneKind::Blank.build(32, 0);
    let mut recorder = AnalysisRecorder::new();

    for frame in 0..4 {
        sim.advance(scene.as_mut()).unwrap();
        let metrics = recorder.record_frame(sim.grid(), frame);
        assert_eq!(metrics.frame, frame);
        assert!(metrics.total_density.r > 0.0);
        assert!(metrics.max_density <= 1.0);
        assert!(metrics.kinetic_energy.is_finite());
    }

    let path = dir.join("metrics.json");
    recorder.write_json(&path).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let frames = parsed.as_array().unwrap();
    assert_eq!(frames.len(), 4);
    assert!(frames[3]["divergence_l2"].is_number());
    assert!(frames[0]["total_density"]["r"].is_number());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = scratch_dir("config");
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{"sim": {"resolution": 64}, "scene": "fire"}"#).unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.sim.resolution, 64);
    assert_eq!(config.sim.dt, 0.001);
    assert_eq!(config.scene, SceneKind::Fire);
    assert_eq!(config.frames, AppConfig::default().frames);

    config.save(&path).unwrap();
    assert_eq!(AppConfig::load(&path).unwrap(), config);

    std::fs::write(&path, r#"{"sim": {"resolution": 65}}"#).unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(SimError::InvalidResolution(65))
    ));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(AppConfig::load(&path), Err(SimError::Json(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}
