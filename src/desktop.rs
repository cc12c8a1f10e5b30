use crate::config::AppConfig;
use crate::error::SimError;
use crate::render::Renderer;
use crate::scene::{Scene, SceneKind};
use crate::simulator::FluidSimulator;
use eframe::egui;

/// Mouse moves shorter than this (in points) are ignored.
const MIN_DRAG: f32 = 2.0;

pub struct FluidApp {
    simulation: FluidSimulator,
    scene: Box<dyn Scene>,
    scene_kind: SceneKind,
    seed: u64,
    paused: bool,
    cell_size: f32,
    interaction: f32,
    texture: Option<egui::TextureHandle>,
    last_drag_pos: Option<egui::Pos2>,
    status: Option<String>,
}

impl FluidApp {
    pub fn new(config: &AppConfig) -> Result<Self, SimError> {
        let simulation = FluidSimulator::new(config.sim)?;
        let scene = config.scene.build(config.sim.resolution, config.seed);
        scene.params().validate()?;

        Ok(Self {
            simulation,
            scene,
            scene_kind: config.scene,
            seed: config.seed,
            paused: false,
            cell_size: config.cell_size,
            interaction: config.interaction,
            texture: None,
            last_drag_pos: None,
            status: None,
        })
    }

    fn switch_scene(&mut self, kind: SceneKind) {
        let scene = kind.build(self.simulation.size(), self.seed);
        if let Err(err) = scene.params().validate() {
            log::error!("scene {kind} rejected: {err}");
            self.status = Some(err.to_string());
            return;
        }
        log::info!("switching scene {} -> {}", self.scene_kind, kind);
        self.scene = scene;
        self.scene_kind = kind;
        self.simulation.reset();
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (next, pause, quit) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::P),
                i.key_pressed(egui::Key::Q),
            )
        });
        if next {
            self.switch_scene(self.scene_kind.next());
        }
        if pause {
            self.paused = !self.paused;
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn handle_drag(&mut self, response: &egui::Response, rect: egui::Rect) {
        if !response.dragged_by(egui::PointerButton::Primary) {
            if response.drag_stopped() {
                self.last_drag_pos = None;
            }
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let Some(last) = self.last_drag_pos else {
            self.last_drag_pos = Some(pos);
            return;
        };

        let delta = pos - last;
        if delta.length() < MIN_DRAG {
            return;
        }

        let n = self.simulation.size();
        let i = ((pos.x - rect.left()) / self.cell_size).max(0.0) as usize;
        let j = ((pos.y - rect.top()) / self.cell_size).max(0.0) as usize;
        let force = glam::Vec2::new(
            n as f32 * delta.x / rect.width(),
            n as f32 * delta.y / rect.height(),
        ) * self.interaction;
        self.simulation
            .grid_mut()
            .set_force(i.min(n - 1), j.min(n - 1), force);
        self.last_drag_pos = Some(pos);
    }

    fn upload_density(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let n = self.simulation.size();
        let bytes = Renderer::density_rgb_bytes(self.simulation.grid());
        let image = egui::ColorImage::from_rgb([n, n], &bytes);

        match &mut self.texture {
            Some(texture) => {
                texture.set(image, egui::TextureOptions::LINEAR);
                texture.id()
            }
            None => {
                let texture = ctx.load_texture("density", image, egui::TextureOptions::LINEAR);
                let id = texture.id();
                self.texture = Some(texture);
                id
            }
        }
    }
}

impl eframe::App for FluidApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Pause/Resume").clicked() {
                    self.paused = !self.paused;
                }
                if ui.button("Next Scene").clicked() {
                    self.switch_scene(self.scene_kind.next());
                }
                if ui.button("Reset").clicked() {
                    self.simulation.reset();
                }
                ui.add(egui::Slider::new(&mut self.cell_size, 1.0..=8.0).text("Cell Size"));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let n = self.simulation.size() as f32;
            let (rect, response) = ui.allocate_exact_size(
                egui::Vec2::splat(n * self.cell_size),
                egui::Sense::click_and_drag(),
            );

            self.handle_drag(&response, rect);

            if !self.paused {
                if let Err(err) = self.simulation.advance(self.scene.as_mut()) {
                    log::error!("step failed: {err}");
                    self.status = Some(err.to_string());
                    self.paused = true;
                }
            }

            let texture = self.upload_density(ctx);
            ui.painter().image(
                texture,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            ui.label(format!(
                "Scene: {} | Frame: {} | t = {:.3} | Space: next scene | P: pause | Q: quit | drag: push fluid",
                self.scene.name(),
                self.simulation.frame(),
                self.simulation.time()
            ));
            if let Some(status) = &self.status {
                ui.colored_label(egui::Color32::LIGHT_RED, status);
            }
        });

        ctx.request_repaint();
    }
}
