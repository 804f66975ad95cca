#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for pacmaze.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{get_last_key_pressed, is_key_down, is_key_pressed, KeyCode};
use pacmaze_core::{Direction, DirectionSet, LOOKAHEAD_RADIUS};
use pacmaze_rendering::{
    facing_angle, Color, FrameInput, GridPresentation, Overlay, Presentation, RenderingBackend,
    Scene, SceneItem,
};
use std::{
    collections::VecDeque,
    f32::consts::PI,
    time::{Duration, Instant},
};

const WINDOW_SIZE: i32 = 750;
const PELLET_RADIUS: f32 = 2.5;
const MOUTH_HALF_ANGLE: f32 = PI / 6.0;
const PLAYER_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
const TEXT_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const TEXT_SIZE: f32 = 24.0;
const LINE_SPACING: f32 = 36.0;

/// Keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyObservations {
    wasd: [bool; 4],
    arrows: [bool; 4],
    start: bool,
    reset: bool,
    quit: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        if let Some(key) = get_last_key_pressed() {
            tracing::trace!(?key, "key pressed");
        }

        Self {
            wasd: [KeyCode::A, KeyCode::D, KeyCode::W, KeyCode::S].map(is_key_down),
            arrows: [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down].map(is_key_down),
            start: is_key_pressed(KeyCode::Space),
            reset: is_key_pressed(KeyCode::R),
            quit: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }

    fn frame_input(&self) -> FrameInput {
        FrameInput {
            player: held_directions(self.wasd),
            rival: held_directions(self.arrows),
            start: self.start,
            reset: self.reset,
        }
    }
}

fn held_directions(keys: [bool; 4]) -> DirectionSet {
    let mut set = DirectionSet::EMPTY;
    for (held, direction) in keys.into_iter().zip(Direction::ALL) {
        if held {
            set.insert(direction);
        }
    }
    set
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    render_accum: Duration,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;
        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            match self.frame_times.pop_front() {
                Some(removed) => {
                    self.window_duration = self.window_duration.saturating_sub(removed);
                }
                None => break,
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let avg_render = self.render_accum / self.frames.max(1);

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.render_accum = Duration::ZERO;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_render,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_SIZE,
            window_height: WINDOW_SIZE,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keys = KeyObservations::poll();
                if keys.quit {
                    tracing::info!("quit requested");
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, keys.frame_input(), &mut scene);

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_grid(
                    &scene.grid,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                match &scene.overlay {
                    Some(overlay) => draw_overlay(overlay, &metrics),
                    None => draw_items(&scene, &metrics, clear_color),
                }

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    render: render_start.elapsed(),
                });
                if show_fps {
                    if let Some(metrics) = fps_metrics {
                        tracing::info!(
                            fps = metrics.per_second,
                            trailing = metrics.trailing_ten_seconds,
                            render_ms = metrics.avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
    cell_step: f32,
    width: f32,
    height: f32,
}

impl SceneMetrics {
    fn from_grid(grid: &GridPresentation, screen_width: f32, screen_height: f32) -> Self {
        let world_width = grid.width();
        let world_height = grid.height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };
        let offset = Vec2::new(
            ((screen_width - world_width * scale) * 0.5).max(0.0),
            ((screen_height - world_height * scale) * 0.5).max(0.0),
        );

        Self {
            scale,
            offset,
            cell_step: grid.cell_length * scale,
            width: screen_width,
            height: screen_height,
        }
    }

    /// Maps a point in grid screen units onto the window.
    fn to_window(&self, grid_point: Vec2) -> Vec2 {
        self.offset + grid_point * self.scale
    }
}

fn draw_items(scene: &Scene, metrics: &SceneMetrics, background: Color) {
    let wall_color = to_macroquad_color(scene.grid.wall_color);
    let pellet_color = to_macroquad_color(scene.grid.pellet_color);
    let sprite_radius = LOOKAHEAD_RADIUS * metrics.scale;

    let grid = &scene.grid;
    for item in &scene.items {
        match *item {
            SceneItem::Obstacle { cell } => {
                let origin = metrics.to_window(grid.cell_origin(cell));
                macroquad::shapes::draw_rectangle(
                    origin.x,
                    origin.y,
                    metrics.cell_step,
                    metrics.cell_step,
                    wall_color,
                );
            }
            SceneItem::Pellet { position } => {
                let centre = metrics.to_window(grid.to_screen(position));
                macroquad::shapes::draw_circle(
                    centre.x,
                    centre.y,
                    PELLET_RADIUS * metrics.scale,
                    pellet_color,
                );
            }
            SceneItem::Player { position, heading } => {
                let centre = metrics.to_window(grid.to_screen(position));
                macroquad::shapes::draw_circle(
                    centre.x,
                    centre.y,
                    sprite_radius,
                    to_macroquad_color(PLAYER_COLOR),
                );
                let [upper, lower] = mouth_corners(centre, sprite_radius, facing_angle(heading));
                macroquad::shapes::draw_triangle(
                    to_macroquad_vec(centre),
                    to_macroquad_vec(upper),
                    to_macroquad_vec(lower),
                    to_macroquad_color(background),
                );
            }
            SceneItem::Adversary { position, color } => {
                let centre = metrics.to_window(grid.to_screen(position));
                let color = to_macroquad_color(color);
                macroquad::shapes::draw_circle(centre.x, centre.y, sprite_radius, color);
                macroquad::shapes::draw_rectangle(
                    centre.x - sprite_radius,
                    centre.y,
                    sprite_radius * 2.0,
                    sprite_radius,
                    color,
                );
            }
        }
    }
}

/// Corners of the mouth cut out of the player's disc, reaching past its rim.
fn mouth_corners(centre: Vec2, radius: f32, facing: f32) -> [Vec2; 2] {
    let reach = radius * 1.5;
    [facing - MOUTH_HALF_ANGLE, facing + MOUTH_HALF_ANGLE]
        .map(|angle| centre + Vec2::new(angle.cos(), angle.sin()) * reach)
}

fn draw_overlay(overlay: &Overlay, metrics: &SceneMetrics) {
    let lines = overlay.lines();
    let color = to_macroquad_color(TEXT_COLOR);
    for (index, line) in lines.iter().enumerate() {
        let dimensions = macroquad::text::measure_text(line, None, TEXT_SIZE as u16, 1.0);
        let origin = overlay_line_origin(metrics, lines.len(), index, dimensions.width);
        let _ = macroquad::text::draw_text(line, origin.x, origin.y, TEXT_SIZE, color);
    }
}

fn overlay_line_origin(metrics: &SceneMetrics, line_count: usize, index: usize, width: f32) -> Vec2 {
    let block_height = line_count.saturating_sub(1) as f32 * LINE_SPACING;
    let top = (metrics.height - block_height) * 0.5;
    Vec2::new(
        ((metrics.width - width) * 0.5).max(0.0),
        top + index as f32 * LINE_SPACING,
    )
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

fn to_macroquad_vec(vector: Vec2) -> macroquad::math::Vec2 {
    macroquad::math::Vec2::new(vector.x, vector.y)
}
