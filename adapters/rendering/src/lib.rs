#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for pacmaze adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use pacmaze_core::{ActorColor, CellCoord, Direction, DirectionSet, GridPoint, InputState};
use std::{error::Error, f32::consts::PI, fmt, time::Duration};

const WIN_LINES: [&str; 2] = [
    "CONGRATULATIONS, PACMAN, YOU WON!",
    "To start or restart the game, press the R key.",
];
const LOSS_HEADLINE: &str = "SORRY, PACMAN, YOU LOST ...";
const RESTART_HINT: &str = "To start or restart the game, press the R key.";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<ActorColor> for Color {
    fn from(color: ActorColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Directions held on the player's keys (WASD).
    pub player: DirectionSet,
    /// Directions held on the rival's keys (arrows).
    pub rival: DirectionSet,
    /// Whether the start key is held.
    pub start: bool,
    /// Whether the reset key is held.
    pub reset: bool,
}

impl From<FrameInput> for InputState {
    fn from(input: FrameInput) -> Self {
        Self {
            player: input.player,
            rival: input.rival,
            start: input.start,
            reset: input.reset,
        }
    }
}

/// Describes the maze grid rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell expressed in screen units.
    pub cell_length: f32,
    /// Color used when filling wall cells.
    pub wall_color: Color,
    /// Color used when drawing pellets.
    pub pellet_color: Color,
}

impl GridPresentation {
    /// Creates a new grid descriptor.
    ///
    /// Returns an error when the grid has no area or the cell length is not positive.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        wall_color: Color,
        pellet_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyGrid { columns, rows });
        }
        if !(cell_length.is_finite() && cell_length > 0.0) {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            wall_color,
            pellet_color,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Converts a position in cell units into screen units.
    #[must_use]
    pub fn to_screen(&self, position: Vec2) -> Vec2 {
        position * self.cell_length
    }

    /// Top-left corner of the provided cell in screen units.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }
}

/// Drawable element of the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneItem {
    /// Wall cell filled with the grid's wall color.
    Obstacle {
        /// Cell occupied by the wall.
        cell: CellCoord,
    },
    /// Pellet awaiting consumption, positioned in cell units.
    Pellet {
        /// Pellet centre.
        position: Vec2,
    },
    /// Player character drawn as a wedge facing its heading.
    Player {
        /// Centre of the player in cell units.
        position: Vec2,
        /// Direction of the last committed step, if any.
        heading: Option<Direction>,
    },
    /// Adversary drawn with its assigned color.
    Adversary {
        /// Centre of the adversary in cell units.
        position: Vec2,
        /// Body color.
        color: Color,
    },
}

impl SceneItem {
    /// Creates an item positioned at the provided grid point.
    #[must_use]
    pub fn pellet(position: GridPoint) -> Self {
        Self::Pellet {
            position: to_vec2(position),
        }
    }

    /// Creates a player item at the provided grid point.
    #[must_use]
    pub fn player(position: GridPoint, heading: Option<Direction>) -> Self {
        Self::Player {
            position: to_vec2(position),
            heading,
        }
    }

    /// Creates an adversary item at the provided grid point.
    #[must_use]
    pub fn adversary(position: GridPoint, color: ActorColor) -> Self {
        Self::Adversary {
            position: to_vec2(position),
            color: color.into(),
        }
    }
}

fn to_vec2(point: GridPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}

/// Angle in radians the player's wedge faces, measured clockwise from the
/// positive x axis on a y-down screen.
#[must_use]
pub fn facing_angle(heading: Option<Direction>) -> f32 {
    match heading {
        None | Some(Direction::Right) => 0.0,
        Some(Direction::Down) => PI * 0.5,
        Some(Direction::Left) => PI,
        Some(Direction::Up) => PI * 1.5,
    }
}

/// Full-screen text shown instead of the maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// Greeting shown before the first round.
    Welcome {
        /// Headline of the welcome screen.
        banner: String,
        /// Control hints listed below the banner.
        instructions: Vec<String>,
    },
    /// Banner shown once every pellet has been consumed.
    Won {
        /// Final score.
        score: u32,
    },
    /// Banner shown once an adversary caught the player.
    Lost {
        /// Final score.
        score: u32,
    },
}

impl Overlay {
    /// Lines of text composing the overlay, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Welcome {
                banner,
                instructions,
            } => std::iter::once(banner.clone())
                .chain(instructions.iter().cloned())
                .collect(),
            Self::Won { .. } => WIN_LINES.iter().map(|line| (*line).to_owned()).collect(),
            Self::Lost { score } => vec![
                LOSS_HEADLINE.to_owned(),
                format!("You got: {score} points!"),
                RESTART_HINT.to_owned(),
            ],
        }
    }
}

/// Scene description combining the maze grid, its inhabitants and overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub grid: GridPresentation,
    /// Drawable items in painter's order.
    pub items: Vec<SceneItem>,
    /// Text screen replacing the maze, if any.
    pub overlay: Option<Overlay>,
    /// Pellets consumed in the current round.
    pub score: u32,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        grid: GridPresentation,
        items: Vec<SceneItem>,
        overlay: Option<Overlay>,
        score: u32,
    ) -> Self {
        Self {
            grid,
            items,
            overlay,
            score,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting pacmaze scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and rebuilds the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The grid must contain at least one cell.
    EmptyGrid {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// Cell length must be finite and positive.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { columns, rows } => {
                write!(f, "grid must contain cells (received {columns}x{rows})")
            }
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridPresentation {
        GridPresentation::new(
            15,
            15,
            50.0,
            Color::from_rgb_u8(255, 0, 0),
            Color::from_rgb_u8(255, 255, 255),
        )
        .expect("valid grid")
    }

    #[test]
    fn grid_creation_rejects_degenerate_dimensions_without_panicking() {
        let black = Color::from_rgb_u8(0, 0, 0);
        assert_eq!(
            GridPresentation::new(0, 15, 50.0, black, black),
            Err(RenderingError::EmptyGrid {
                columns: 0,
                rows: 15
            })
        );
        assert!(matches!(
            GridPresentation::new(15, 15, 0.0, black, black),
            Err(RenderingError::InvalidCellLength { .. })
        ));
    }

    #[test]
    fn canonical_grid_fills_a_750_pixel_window() {
        let grid = grid();
        assert_eq!(grid.width(), 750.0);
        assert_eq!(grid.height(), 750.0);
        assert_eq!(grid.to_screen(Vec2::new(1.5, 1.5)), Vec2::new(75.0, 75.0));
        assert_eq!(
            grid.cell_origin(CellCoord::new(2, 3)),
            Vec2::new(100.0, 150.0)
        );
    }

    #[test]
    fn loss_overlay_reports_the_score() {
        let lines = Overlay::Lost { score: 42 }.lines();
        assert_eq!(lines[0], LOSS_HEADLINE);
        assert_eq!(lines[1], "You got: 42 points!");
        assert_eq!(lines[2], RESTART_HINT);
    }

    #[test]
    fn welcome_overlay_lists_banner_first() {
        let overlay = Overlay::Welcome {
            banner: "PACMAN vs. GHOST".to_owned(),
            instructions: vec!["To control Pacman use WASD.".to_owned()],
        };
        assert_eq!(
            overlay.lines(),
            vec!["PACMAN vs. GHOST", "To control Pacman use WASD."]
        );
        assert_eq!(Overlay::Won { score: 105 }.lines().len(), 2);
    }

    #[test]
    fn facing_angle_follows_heading() {
        assert_eq!(facing_angle(None), 0.0);
        assert_eq!(facing_angle(Some(Direction::Left)), PI);
        assert!(facing_angle(Some(Direction::Up)) > facing_angle(Some(Direction::Down)));
    }

    #[test]
    fn frame_input_maps_onto_input_state() {
        let input = FrameInput {
            player: DirectionSet::from_directions(&[Direction::Up]),
            reset: true,
            ..FrameInput::default()
        };
        let state = InputState::from(input);
        assert!(state.player.contains(Direction::Up));
        assert!(state.reset);
        assert!(!state.start);
    }

    #[test]
    fn actor_colors_convert_to_opaque_channels() {
        let color = Color::from(ActorColor::from_rgb(255, 0, 0));
        assert_eq!(color, Color::new(1.0, 0.0, 0.0, 1.0));
    }
}
