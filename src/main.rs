use anyhow::{Context, Result, anyhow, bail};
use stablefluids::{AnalysisRecorder, AppConfig, FluidApp, FluidSimulator, ImageExporter, SceneKind};
use std::path::{Path, PathBuf};

const EXPORT_EVERY: usize = 10;

struct Args {
    headless: bool,
    config: Option<PathBuf>,
    scene: Option<SceneKind>,
    frames: Option<usize>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        headless: false,
        config: None,
        scene: None,
        frames: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "headless" | "test" => args.headless = true,
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--scene" => {
                let name = iter.next().context("--scene needs a name")?;
                args.scene = Some(name.parse().map_err(|err: String| anyhow!(err))?);
            }
            "--frames" => {
                let count = iter.next().context("--frames needs a count")?;
                args.frames = Some(count.parse().context("--frames must be a number")?);
            }
            other => bail!("unrecognised argument `{other}`"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(scene) = args.scene {
        config.scene = scene;
    }
    if let Some(frames) = args.frames {
        config.frames = frames;
    }

    if args.headless {
        run_headless(&config)
    } else {
        run_gui_app(&config)
    }
}

fn run_headless(config: &AppConfig) -> Result<()> {
    log::info!(
        "running scene {} headless for {} frames",
        config.scene,
        config.frames
    );

    let mut simulation = FluidSimulator::new(config.sim).context("failed to build simulator")?;
    let mut scene = config.scene.build(config.sim.resolution, config.seed);
    scene.params().validate()?;

    let out = config.output_dir.as_path();
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create output dir {}", out.display()))?;

    let size = (config.sim.resolution as u32).max(256);
    let exporter = ImageExporter::new(size, size);
    let mut recorder = AnalysisRecorder::new();

    recorder.record_frame(simulation.grid(), 0);
    export_frame(&exporter, &simulation, out, 0)?;

    for frame in 1..=config.frames {
        simulation.advance(scene.as_mut())?;

        if frame % EXPORT_EVERY == 0 || frame == config.frames {
            export_frame(&exporter, &simulation, out, frame)?;
            recorder.record_frame(simulation.grid(), frame).print_summary();
        }
    }

    recorder.print_trends();
    let metrics_path = out.join("metrics.json");
    recorder
        .write_json(&metrics_path)
        .with_context(|| format!("failed to write {}", metrics_path.display()))?;

    log::info!("wrote frames and metrics to {}", out.display());
    Ok(())
}

fn export_frame(
    exporter: &ImageExporter,
    simulation: &FluidSimulator,
    out: &Path,
    frame: usize,
) -> Result<()> {
    let path = out.join(format!("density_{frame:04}.png"));
    exporter
        .export_density_png(simulation.grid(), &path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn run_gui_app(config: &AppConfig) -> Result<()> {
    let app = FluidApp::new(config).context("failed to build simulator")?;
    let side = config.sim.resolution as f32 * config.cell_size + 40.0;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side, side + 60.0])
            .with_title("Stable Fluids"),
        ..Default::default()
    };

    eframe::run_native("stablefluids", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("viewer failed: {err}"))
}
