#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the pacmaze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems read immutable snapshots such as
//! [`AdversaryView`] and the static [`Maze`], and respond exclusively with new
//! command batches.
//!
//! The [`movement`] module hosts the look-ahead collision resolver shared by
//! the world (which validates every step) and the systems (which consult it
//! before proposing one).

mod maze;
pub mod movement;

use serde::{Deserialize, Serialize};

pub use maze::Maze;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "PACMAN vs. GHOST";

/// Number of columns and rows in the canonical maze.
pub const GRID_SIZE: u32 = 15;

/// Side length of a single maze cell expressed in pixel units.
pub const CELL_SIZE: f32 = 50.0;

/// Distance in pixel units an actor travels during one committed step.
pub const PROBE_STEP: f32 = 2.0;

/// Radius of an actor's visual bounding circle in pixel units.
///
/// The resolver tests the point this far ahead of the probed position so a
/// sprite never overlaps a wall before the collision is detected.
pub const LOOKAHEAD_RADIUS: f32 = 16.0;

/// Half-width of the square used to capture pellets, in pixel units.
///
/// Equals `16 * cos(359°)`. The value is kept as a literal rather than
/// rounded to 16 so that boundary behaviour stays identical.
pub const PELLET_CAPTURE_RADIUS: f32 = 15.997_563;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the adversary roster and returns the round to its pre-start state.
    ConfigureAdversaries {
        /// Adversaries to spawn, in spawn order.
        roster: Vec<AdversarySpawn>,
    },
    /// Begins a fresh round when none is in progress.
    StartRound,
    /// Restores every actor and pellet to its canonical state and resumes play.
    ResetRound,
    /// Requests that the player advance a single probe step.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that an adversary advance a single probe step.
    StepAdversary {
        /// Identifier of the adversary attempting to move.
        adversary: AdversaryId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Replaces the heading of an adversary without moving it.
    TurnAdversary {
        /// Identifier of the adversary that turns.
        adversary: AdversaryId,
        /// Heading the adversary adopts.
        heading: Direction,
    },
    /// Closes the current tick: consumes pellets around the player and
    /// evaluates the terminal condition.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the adversary roster was replaced.
    AdversariesConfigured {
        /// Number of adversaries in the new roster.
        count: usize,
    },
    /// Announces that a round began after a full reset.
    RoundStarted,
    /// Announces that the round in progress was restored to its canonical state.
    RoundReset,
    /// Confirms that the player committed a step.
    PlayerAdvanced {
        /// Direction of the committed step.
        direction: Direction,
        /// Cell containing the player's centre after the step.
        cell: CellCoord,
    },
    /// Confirms that an adversary committed a step.
    AdversaryAdvanced {
        /// Identifier of the adversary that moved.
        adversary: AdversaryId,
        /// Direction of the committed step.
        direction: Direction,
        /// Cell containing the adversary's centre after the step.
        cell: CellCoord,
    },
    /// Confirms that an adversary changed heading.
    AdversaryTurned {
        /// Identifier of the adversary that turned.
        adversary: AdversaryId,
        /// Heading before the turn, if the adversary had one.
        from: Option<Direction>,
        /// Heading after the turn.
        to: Direction,
    },
    /// Reports that a step request was rejected.
    MoveRejected {
        /// Actor that attempted the step.
        mover: Mover,
        /// Direction of the rejected step.
        direction: Direction,
        /// Specific reason the step failed.
        reason: MoveRejection,
    },
    /// Reports that pellets were consumed during the tick.
    PelletsConsumed {
        /// Number of pellets captured by this tick.
        count: u32,
        /// Score after the capture.
        score: u32,
    },
    /// Indicates that the tick finished resolving.
    TickResolved {
        /// Number of ticks resolved since the round started.
        tick: u64,
    },
    /// Announces that an adversary reached the player's cell.
    PlayerCaught {
        /// Adversary that caught the player.
        adversary: AdversaryId,
        /// Cell shared by the player and the adversary.
        cell: CellCoord,
    },
    /// Announces that the round reached its terminal state.
    RoundOver {
        /// Whether the player won or lost.
        outcome: RoundOutcome,
        /// Score at the moment the round ended.
        score: u32,
    },
}

/// Cardinal directions available to every actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
}

impl Direction {
    /// Every direction in resolution order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit offset along the column and row axes.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }

    /// Reports whether the direction moves along the column axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The three directions that differ from `self`, in resolution order.
    #[must_use]
    pub fn others(self) -> [Direction; 3] {
        let mut others = [self; 3];
        let mut index = 0;
        for direction in Self::ALL {
            if direction != self {
                others[index] = direction;
                index += 1;
            }
        }
        others
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Left => 0b0001,
            Self::Right => 0b0010,
            Self::Up => 0b0100,
            Self::Down => 0b1000,
        }
    }
}

/// Set of directions held during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// Set that holds no direction.
    pub const EMPTY: DirectionSet = DirectionSet(0);

    /// Creates a set containing the provided directions.
    #[must_use]
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut set = Self::EMPTY;
        for direction in directions {
            set.insert(*direction);
        }
        set
    }

    /// Adds a direction to the set.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Reports whether the set holds the direction.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Reports whether no direction is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterator over the held directions in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

/// Logical inputs read by the simulation once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// Directions held for the player.
    pub player: DirectionSet,
    /// Directions held for keyboard-driven adversaries.
    pub rival: DirectionSet,
    /// Whether the start signal is active.
    pub start: bool,
    /// Whether the reset signal is active.
    pub reset: bool,
}

/// Actor that issued a step request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mover {
    /// The player character.
    Player,
    /// One of the adversaries.
    Adversary(AdversaryId),
}

/// Reasons a step request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The look-ahead probe landed inside a wall cell.
    Blocked {
        /// Cell that stopped the step.
        cell: CellCoord,
    },
    /// No round is in progress.
    RoundInactive,
    /// No adversary with the provided identifier exists.
    UnknownAdversary,
}

/// Lifecycle of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    /// The session waits for the start signal.
    #[default]
    NotStarted,
    /// Actors move and pellets are consumed every tick.
    InProgress,
    /// The round ended; only a reset resumes play.
    Over,
}

/// Terminal result of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// Every pellet was consumed.
    Won,
    /// An adversary caught the player.
    Lost,
}

impl RoundOutcome {
    /// Reports whether the outcome is a win.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Strategy steering an adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Autonomous obstacle-avoiding random walk.
    RandomWander,
    /// Keyboard-driven second player.
    SecondPlayer,
}

/// Unique identifier assigned to an adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdversaryId(u32);

impl AdversaryId {
    /// Creates a new adversary identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Visual appearance applied to an adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl ActorColor {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Location of a single maze cell expressed as column and row coordinates.
///
/// Coordinates are signed so that probes past the maze edge remain
/// representable; the maze reports such cells as walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

/// Fractional position measured in cell units; `1.5` is the centre of cell 1.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPoint {
    /// Horizontal coordinate in cell units.
    pub x: f32,
    /// Vertical coordinate in cell units.
    pub y: f32,
}

impl GridPoint {
    /// Creates a point from cell-unit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Centre of the provided cell.
    #[must_use]
    pub fn centre_of(cell: CellCoord) -> Self {
        Self::new(cell.column() as f32 + 0.5, cell.row() as f32 + 0.5)
    }

    /// Cell containing the point, truncating toward negative infinity.
    #[must_use]
    pub fn cell(&self) -> CellCoord {
        CellCoord::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// Number of committed probe steps an actor accumulated since it spawned.
///
/// Positions are derived from integral step counts so that repeated movement
/// never drifts off the pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StepOffset {
    /// Net steps along the column axis.
    pub x: i32,
    /// Net steps along the row axis.
    pub y: i32,
}

impl StepOffset {
    /// Offset of an actor that has not moved.
    pub const ZERO: StepOffset = StepOffset { x: 0, y: 0 };

    /// Creates an offset from step counts.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the offset after one more step in `direction`.
    #[must_use]
    pub const fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Spawn description for one adversary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdversarySpawn {
    /// Strategy steering the adversary.
    pub control: Control,
    /// Position assigned at construction and on every reset.
    pub spawn: GridPoint,
    /// Appearance assigned to the adversary.
    pub color: ActorColor,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Spawn position of the player.
    pub spawn: GridPoint,
    /// Steps accumulated since the last reset.
    pub offset: StepOffset,
    /// Current position in cell units.
    pub position: GridPoint,
    /// Cell containing the player's centre.
    pub cell: CellCoord,
    /// Direction of the last committed step, if any.
    pub heading: Option<Direction>,
}

/// Immutable representation of a single adversary's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdversarySnapshot {
    /// Unique identifier assigned to the adversary.
    pub id: AdversaryId,
    /// Strategy steering the adversary.
    pub control: Control,
    /// Appearance assigned to the adversary.
    pub color: ActorColor,
    /// Spawn position of the adversary.
    pub spawn: GridPoint,
    /// Steps accumulated since the last reset.
    pub offset: StepOffset,
    /// Current position in cell units.
    pub position: GridPoint,
    /// Cell containing the adversary's centre.
    pub cell: CellCoord,
    /// Current heading, if the adversary has one.
    pub heading: Option<Direction>,
}

/// Read-only snapshot describing all adversaries in the maze.
#[derive(Clone, Debug, Default)]
pub struct AdversaryView {
    snapshots: Vec<AdversarySnapshot>,
}

impl AdversaryView {
    /// Creates a new adversary view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AdversarySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &AdversarySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AdversarySnapshot> {
        self.snapshots
    }
}
