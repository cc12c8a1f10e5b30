//! Scenes decide what gets injected into the grid before each step and
//! which physical parameters the step runs with.

use crate::algebra::Color3;
use crate::config::StepParams;
use crate::glyphs::rasterize;
use crate::grid::GridCells;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait Scene {
    fn name(&self) -> &'static str;

    fn params(&self) -> StepParams;

    /// Writes sources into `grid`. `time` is the simulated time so far.
    fn update(&mut self, time: f32, grid: &mut GridCells);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Blank,
    MovingSources,
    Fire,
    Text,
}

impl SceneKind {
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Blank,
        SceneKind::MovingSources,
        SceneKind::Fire,
        SceneKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Blank => "blank",
            SceneKind::MovingSources => "moving_sources",
            SceneKind::Fire => "fire",
            SceneKind::Text => "text",
        }
    }

    /// The scene after this one, wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|&kind| kind == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn build(self, size: usize, seed: u64) -> Box<dyn Scene> {
        match self {
            SceneKind::Blank => Box::new(BlankScene::new(size)),
            SceneKind::MovingSources => Box::new(MovingSourcesScene::new(size)),
            SceneKind::Fire => Box::new(FireScene::new(size, seed)),
            SceneKind::Text => Box::new(TextScene::clock(size)),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("unknown scene `{s}`"))
    }
}

/// Adds a Gaussian blob of colour and velocity centred on `(cx, cy)`.
/// Density saturates at 1.0 per channel.
pub fn add_gaussian(
    grid: &mut GridCells,
    cx: i32,
    cy: i32,
    extent: i32,
    color: Color3,
    velocity: Vec2,
) {
    let size = grid.size() as i32;
    let alpha = std::f32::consts::LN_2 / ((size * size) as f32 / 2000.0);

    for i in -extent / 2..=extent / 2 {
        for j in -extent / 2..=extent / 2 {
            let (x, y) = (cx + i, cy + j);
            if x < 0 || y < 0 || x >= size || y >= size {
                continue;
            }
            let weight = (-alpha * (i * i + j * j) as f32).exp();
            grid.inject_density(x as usize, y as usize, color * weight);
            grid.add_velocity(x as usize, y as usize, velocity * weight);
        }
    }
}

/// A steady jet blowing in from the left wall.
#[derive(Debug, Clone)]
pub struct BlankScene {
    size: usize,
}

impl BlankScene {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Scene for BlankScene {
    fn name(&self) -> &'static str {
        "blank"
    }

    fn params(&self) -> StepParams {
        StepParams::new(0.0, 20.0, 1.0, 0.01)
    }

    fn update(&mut self, _time: f32, grid: &mut GridCells) {
        let n = self.size;
        for j in 0..n / 10 {
            for i in 0..n / 5 {
                let (x, y) = (1 + j, n / 5 + i);
                grid.set_density(x, y, Color3::new(0.5, 0.5, 0.8));
                grid.set_force_x(x, y, 100.0);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SourcePath {
    x_amp: f32,
    x_offset: f32,
    x_phase: f32,
    x_speed: f32,
    y_amp: f32,
    y_offset: f32,
    y_phase: f32,
    y_speed: f32,
    color: Color3,
}

impl SourcePath {
    fn position(&self, time: f32) -> (f32, f32) {
        (
            (time * self.x_speed + self.x_phase).sin() * self.x_amp + self.x_offset,
            (time * self.y_speed + self.y_phase).sin() * self.y_amp + self.y_offset,
        )
    }

    fn velocity(&self, time: f32) -> Vec2 {
        Vec2::new(
            (time * self.x_speed + self.x_phase).cos() * self.x_amp,
            (time * self.y_speed + self.y_phase).cos() * self.y_amp,
        )
    }
}

/// Coloured blobs sweeping Lissajous curves, dragging fluid with them.
#[derive(Debug, Clone)]
pub struct MovingSourcesScene {
    size: usize,
    sources: Vec<SourcePath>,
}

impl MovingSourcesScene {
    const VELOCITY_WEIGHT: f32 = 0.01;

    pub fn new(size: usize) -> Self {
        let amp = size as f32 * 0.4;
        let mid = (size / 2) as f32;
        let path = |phase: f32, x_speed: f32, y_speed: f32, color: Color3| SourcePath {
            x_amp: amp,
            x_offset: mid,
            x_phase: phase,
            x_speed,
            y_amp: amp,
            y_offset: mid,
            y_phase: phase,
            y_speed,
            color,
        };

        Self {
            size,
            sources: vec![
                path(0.0, 10.0, 13.0, Color3::new(0.1, 0.0, 0.0)),
                path(0.5, 12.0, 15.0, Color3::new(0.1, 0.1, 0.0)),
                path(1.0, 7.0, 5.0, Color3::new(0.0, 0.1, 0.0)),
                path(2.0, 11.0, 8.0, Color3::new(0.0, 0.0, 0.1)),
            ],
        }
    }
}

impl Scene for MovingSourcesScene {
    fn name(&self) -> &'static str {
        "moving_sources"
    }

    fn params(&self) -> StepParams {
        StepParams::new(0.001, 9.0, 0.999, 0.00001)
    }

    fn update(&mut self, time: f32, grid: &mut GridCells) {
        let extent = (self.size / 5).max(1) as i32;
        for source in &self.sources {
            let (x, y) = source.position(time);
            let velocity = source.velocity(time) * Self::VELOCITY_WEIGHT;
            add_gaussian(grid, x as i32, y as i32, extent, source.color, velocity);
        }
    }
}

/// Flames along the floor with random upward kicks and rare downdrafts.
#[derive(Debug, Clone)]
pub struct FireScene {
    size: usize,
    rng: StdRng,
}

impl FireScene {
    const DOWNDRAFT_FORCE: f32 = 1.0e4;

    pub fn new(size: usize, seed: u64) -> Self {
        Self {
            size,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Scene for FireScene {
    fn name(&self) -> &'static str {
        "fire"
    }

    fn params(&self) -> StepParams {
        StepParams::new(0.0, -9.0, 0.99, 0.001)
    }

    fn update(&mut self, _time: f32, grid: &mut GridCells) {
        let n = self.size;
        let downdraft_odds = (1_000_000 / n).max(1);

        for x in 0..n {
            let heat = self.rng.gen_range(50.0f32..150.0);
            grid.inject_density(x, n - 2, Color3::new(heat / 150.0, heat.sqrt() / 40.0, 0.0));

            if self.rng.gen_range(0..10) == 0 {
                let gust = self.rng.gen_range(0.0f32..100.0);
                let dir = self.rng.gen_range(-1i32..=1) as f32;
                let lift = self.rng.gen_range(0.0f32..100.0);
                grid.add_velocity(x, n - 5, Vec2::new(gust * gust * dir / 100.0, -lift));
            }

            if self.rng.gen_range(0..downdraft_odds) == 0 {
                let dir = self.rng.gen_range(-1i32..=1) as f32;
                for i in 50..99 {
                    let y = n * i / 1000;
                    grid.add_force(
                        x,
                        y,
                        Vec2::new(Self::DOWNDRAFT_FORCE * dir, Self::DOWNDRAFT_FORCE),
                    );
                }
            }
        }
    }
}

/// Stamps a line of text into the density field every step.
#[derive(Debug, Clone)]
pub struct TextScene {
    size: usize,
    text: Option<String>,
}

impl TextScene {
    /// Fixed text.
    pub fn new(size: usize, text: impl Into<String>) -> Self {
        Self {
            size,
            text: Some(text.into()),
        }
    }

    /// Shows the simulated clock as `MM:SS`.
    pub fn clock(size: usize) -> Self {
        Self { size, text: None }
    }

    fn current_text(&self, time: f32) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => {
                let seconds = time.max(0.0) as u32;
                format!("{:02}:{:02}", seconds / 60 % 100, seconds % 60)
            }
        }
    }
}

impl Scene for TextScene {
    fn name(&self) -> &'static str {
        "text"
    }

    fn params(&self) -> StepParams {
        StepParams::new(0.0, 10.0, 0.95, 0.0)
    }

    fn update(&mut self, time: f32, grid: &mut GridCells) {
        let scale = (self.size / 64).max(1);
        let origin = (self.size / 25).max(1);
        let bitmap = rasterize(&self.current_text(time), scale);

        for y in 0..bitmap.height {
            for x in 0..bitmap.width {
                let value = bitmap.get(x, y) as f32;
                if value == 0.0 {
                    continue;
                }
                grid.inject_density(
                    origin + x,
                    origin + y,
                    Color3::new(value / 2000.0, value / 4000.0, value / 4000.0),
                );
            }
        }
    }
}
