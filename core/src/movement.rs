//! Look-ahead collision resolution shared by every actor.
//!
//! A step is legal when the point lying one probe step plus one
//! look-ahead radius ahead of the actor, measured along the axis of travel,
//! falls inside an open cell. The coordinate on the perpendicular axis is the
//! actor's current one, so sliding along a corridor never tests the cells
//! beside it.

use crate::{
    CellCoord, Direction, GridPoint, Maze, StepOffset, CELL_SIZE, LOOKAHEAD_RADIUS, PROBE_STEP,
};

/// Pixel-space constants governing the resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepGeometry {
    cell_size: f32,
    probe_step: f32,
    lookahead_radius: f32,
}

impl StepGeometry {
    /// Geometry matching the canonical 50-pixel maze.
    pub const CANONICAL: StepGeometry = StepGeometry {
        cell_size: CELL_SIZE,
        probe_step: PROBE_STEP,
        lookahead_radius: LOOKAHEAD_RADIUS,
    };

    /// Creates a new geometry description.
    ///
    /// Returns `None` unless every dimension is finite and strictly positive.
    #[must_use]
    pub fn new(cell_size: f32, probe_step: f32, lookahead_radius: f32) -> Option<Self> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if valid(cell_size) && valid(probe_step) && valid(lookahead_radius) {
            Some(Self {
                cell_size,
                probe_step,
                lookahead_radius,
            })
        } else {
            None
        }
    }

    /// Side length of a cell in pixel units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Length of a single committed step expressed in cell units.
    #[must_use]
    pub fn step_length(&self) -> f32 {
        self.probe_step / self.cell_size
    }

    /// Fractional displacement in cell units accumulated by `offset`.
    #[must_use]
    pub fn increment(&self, offset: StepOffset) -> (f32, f32) {
        (
            offset.x as f32 * self.probe_step / self.cell_size,
            offset.y as f32 * self.probe_step / self.cell_size,
        )
    }

    /// Position in cell units of an actor spawned at `spawn` after `offset`.
    #[must_use]
    pub fn position(&self, spawn: GridPoint, offset: StepOffset) -> GridPoint {
        let (x, y) = self.pixel_position(spawn, offset);
        GridPoint::new(x / self.cell_size, y / self.cell_size)
    }

    /// Cell containing the centre of an actor spawned at `spawn` after `offset`.
    #[must_use]
    pub fn cell(&self, spawn: GridPoint, offset: StepOffset) -> CellCoord {
        let (x, y) = self.pixel_position(spawn, offset);
        CellCoord::new(self.to_cell(x), self.to_cell(y))
    }

    fn pixel_position(&self, spawn: GridPoint, offset: StepOffset) -> (f32, f32) {
        (
            spawn.x * self.cell_size + offset.x as f32 * self.probe_step,
            spawn.y * self.cell_size + offset.y as f32 * self.probe_step,
        )
    }

    fn to_cell(&self, pixel: f32) -> i32 {
        (pixel / self.cell_size).floor() as i32
    }
}

impl Default for StepGeometry {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Result of attempting a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The probe landed in an open cell and the step was committed.
    Advanced(StepOffset),
    /// The probe landed in the reported wall cell.
    Blocked(CellCoord),
}

/// Computes the cell tested when an actor attempts to step in `direction`.
#[must_use]
pub fn probe_cell(
    geometry: &StepGeometry,
    spawn: GridPoint,
    offset: StepOffset,
    direction: Direction,
) -> CellCoord {
    let (x, y) = geometry.pixel_position(spawn, offset);
    let reach = geometry.probe_step + geometry.lookahead_radius;
    let (dx, dy) = direction.delta();
    if direction.is_horizontal() {
        CellCoord::new(geometry.to_cell(x + dx as f32 * reach), geometry.to_cell(y))
    } else {
        CellCoord::new(geometry.to_cell(x), geometry.to_cell(y + dy as f32 * reach))
    }
}

/// Attempts to advance an actor by one probe step in `direction`.
#[must_use]
pub fn resolve_step(
    maze: &Maze,
    geometry: &StepGeometry,
    spawn: GridPoint,
    offset: StepOffset,
    direction: Direction,
) -> StepOutcome {
    let probe = probe_cell(geometry, spawn, offset, direction);
    if maze.is_wall_at(probe) {
        StepOutcome::Blocked(probe)
    } else {
        StepOutcome::Advanced(offset.stepped(direction))
    }
}
