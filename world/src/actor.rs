use pacmaze_core::{movement::StepGeometry, CellCoord, Direction, GridPoint, StepOffset};

/// Positioned character shared by the player and every adversary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Actor {
    spawn: GridPoint,
    offset: StepOffset,
    heading: Option<Direction>,
    initial_heading: Option<Direction>,
}

impl Actor {
    /// Creates a new actor standing on its spawn point.
    #[must_use]
    pub const fn spawned_at(spawn: GridPoint, heading: Option<Direction>) -> Self {
        Self {
            spawn,
            offset: StepOffset::ZERO,
            heading,
            initial_heading: heading,
        }
    }

    /// Position assigned at construction and on every reset.
    #[must_use]
    pub const fn spawn(&self) -> GridPoint {
        self.spawn
    }

    /// Steps accumulated since the last reset.
    #[must_use]
    pub const fn offset(&self) -> StepOffset {
        self.offset
    }

    /// Current heading, if any.
    #[must_use]
    pub const fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Current position in cell units.
    #[must_use]
    pub fn position(&self, geometry: &StepGeometry) -> GridPoint {
        geometry.position(self.spawn, self.offset)
    }

    /// Cell containing the actor's centre.
    #[must_use]
    pub fn cell(&self, geometry: &StepGeometry) -> CellCoord {
        geometry.cell(self.spawn, self.offset)
    }

    pub(crate) fn commit(&mut self, offset: StepOffset, direction: Direction) {
        self.offset = offset;
        self.heading = Some(direction);
    }

    pub(crate) fn turn(&mut self, heading: Direction) -> Option<Direction> {
        self.heading.replace(heading)
    }

    pub(crate) fn reset(&mut self) {
        self.offset = StepOffset::ZERO;
        self.heading = self.initial_heading;
    }
}
