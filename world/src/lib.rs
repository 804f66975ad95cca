#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state for pacmaze.
//!
//! The [`World`] owns the maze, the player, the adversaries and the pellet
//! field. It is mutated exclusively through [`apply`], which validates every
//! requested step against the look-ahead resolver and reports the outcome as
//! [`Event`] values. Adapters and systems observe the state through the
//! [`query`] module.

mod actor;
mod layout;
mod pellets;

use pacmaze_core::{
    movement::{self, StepGeometry, StepOutcome},
    AdversaryId, AdversarySpawn, CellCoord, Command, Control, Direction, Event, Maze,
    MoveRejection, Mover, RoundOutcome, RoundPhase, PELLET_CAPTURE_RADIUS, WELCOME_BANNER,
};

pub use actor::Actor;
pub use pellets::PelletField;

/// Default number of random-wander adversaries spawned by [`World::new`].
pub const DEFAULT_ADVERSARY_COUNT: usize = 4;

/// Builds a roster of up to four random-wander adversaries in spawn order.
#[must_use]
pub fn wander_roster(count: usize) -> Vec<AdversarySpawn> {
    layout::WANDERERS
        .iter()
        .copied()
        .take(count.min(layout::WANDERERS.len()))
        .collect()
}

/// Builds the roster of the two-player variant: one keyboard-driven adversary.
#[must_use]
pub fn versus_roster() -> Vec<AdversarySpawn> {
    vec![layout::rival()]
}

/// Represents the authoritative pacmaze round state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    maze: Maze,
    geometry: StepGeometry,
    player: Actor,
    adversaries: Vec<Adversary>,
    pellets: PelletField,
    phase: RoundPhase,
    outcome: Option<RoundOutcome>,
    tick_index: u64,
    moved_since_reset: bool,
}

impl World {
    /// Creates a new world on the canonical maze with the default wander roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            maze: Maze::from_grid(&layout::MAZE),
            geometry: StepGeometry::CANONICAL,
            player: Actor::spawned_at(layout::PLAYER_SPAWN, None),
            adversaries: spawn_adversaries(&wander_roster(DEFAULT_ADVERSARY_COUNT)),
            pellets: PelletField::new(layout::pellets()),
            phase: RoundPhase::NotStarted,
            outcome: None,
            tick_index: 0,
            moved_since_reset: false,
        }
    }

    fn reset_round(&mut self) {
        self.player.reset();
        for adversary in &mut self.adversaries {
            adversary.actor.reset();
        }
        self.pellets.reset();
        self.outcome = None;
        self.tick_index = 0;
        self.moved_since_reset = false;
    }

    fn adversary_mut(&mut self, id: AdversaryId) -> Option<&mut Adversary> {
        self.adversaries
            .iter_mut()
            .find(|adversary| adversary.id == id)
    }

    fn step_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.phase != RoundPhase::InProgress {
            out_events.push(Event::MoveRejected {
                mover: Mover::Player,
                direction,
                reason: MoveRejection::RoundInactive,
            });
            return;
        }

        let outcome = movement::resolve_step(
            &self.maze,
            &self.geometry,
            self.player.spawn(),
            self.player.offset(),
            direction,
        );
        match outcome {
            StepOutcome::Advanced(offset) => {
                self.player.commit(offset, direction);
                self.moved_since_reset = true;
                out_events.push(Event::PlayerAdvanced {
                    direction,
                    cell: self.player.cell(&self.geometry),
                });
            }
            StepOutcome::Blocked(cell) => out_events.push(Event::MoveRejected {
                mover: Mover::Player,
                direction,
                reason: MoveRejection::Blocked { cell },
            }),
        }
    }

    fn step_adversary(
        &mut self,
        id: AdversaryId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let mover = Mover::Adversary(id);
        if self.phase != RoundPhase::InProgress {
            out_events.push(Event::MoveRejected {
                mover,
                direction,
                reason: MoveRejection::RoundInactive,
            });
            return;
        }

        let maze = &self.maze;
        let geometry = self.geometry;
        let Some(adversary) = self.adversaries.iter_mut().find(|entry| entry.id == id) else {
            out_events.push(Event::MoveRejected {
                mover,
                direction,
                reason: MoveRejection::UnknownAdversary,
            });
            return;
        };

        let actor = &mut adversary.actor;
        match movement::resolve_step(maze, &geometry, actor.spawn(), actor.offset(), direction) {
            StepOutcome::Advanced(offset) => {
                actor.commit(offset, direction);
                self.moved_since_reset = true;
                out_events.push(Event::AdversaryAdvanced {
                    adversary: id,
                    direction,
                    cell: actor.cell(&geometry),
                });
            }
            StepOutcome::Blocked(cell) => out_events.push(Event::MoveRejected {
                mover,
                direction,
                reason: MoveRejection::Blocked { cell },
            }),
        }
    }

    fn resolve_tick(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);

        let capture_radius = PELLET_CAPTURE_RADIUS / self.geometry.cell_size();
        let consumed = self
            .pellets
            .consume_near(self.player.position(&self.geometry), capture_radius);
        if consumed > 0 {
            out_events.push(Event::PelletsConsumed {
                count: consumed,
                score: self.pellets.score(),
            });
        }

        if let Some((adversary, cell)) = self.capturing_adversary() {
            tracing::debug!(adversary = adversary.get(), ?cell, "player caught");
            out_events.push(Event::PlayerCaught { adversary, cell });
            self.finish(RoundOutcome::Lost, out_events);
        } else if self.pellets.is_cleared() {
            self.finish(RoundOutcome::Won, out_events);
        }

        out_events.push(Event::TickResolved {
            tick: self.tick_index,
        });
    }

    /// First adversary sharing the player's cell once every move of the tick has been committed.
    ///
    /// Only end-of-tick cells are compared, so two actors that swap cells within one tick pass
    /// through each other.
    fn capturing_adversary(&self) -> Option<(AdversaryId, CellCoord)> {
        if !self.moved_since_reset {
            return None;
        }

        let player_cell = self.player.cell(&self.geometry);
        self.adversaries
            .iter()
            .find(|adversary| adversary.actor.cell(&self.geometry) == player_cell)
            .map(|adversary| (adversary.id, player_cell))
    }

    fn finish(&mut self, outcome: RoundOutcome, out_events: &mut Vec<Event>) {
        let score = self.pellets.score();
        tracing::info!(?outcome, score, tick = self.tick_index, "round over");
        self.phase = RoundPhase::Over;
        self.outcome = Some(outcome);
        out_events.push(Event::RoundOver { outcome, score });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureAdversaries { roster } => {
            world.adversaries = spawn_adversaries(&roster);
            world.phase = RoundPhase::NotStarted;
            world.reset_round();
            tracing::debug!(count = roster.len(), "adversaries configured");
            out_events.push(Event::AdversariesConfigured {
                count: roster.len(),
            });
        }
        Command::StartRound => {
            if world.phase == RoundPhase::InProgress {
                return;
            }
            world.reset_round();
            world.phase = RoundPhase::InProgress;
            tracing::info!("round started");
            out_events.push(Event::RoundStarted);
        }
        Command::ResetRound => {
            world.reset_round();
            world.phase = RoundPhase::InProgress;
            tracing::info!("round reset");
            out_events.push(Event::RoundReset);
        }
        Command::StepPlayer { direction } => world.step_player(direction, out_events),
        Command::StepAdversary {
            adversary,
            direction,
        } => world.step_adversary(adversary, direction, out_events),
        Command::TurnAdversary { adversary, heading } => {
            if world.phase != RoundPhase::InProgress {
                return;
            }
            if let Some(entry) = world.adversary_mut(adversary) {
                let from = entry.actor.turn(heading);
                tracing::trace!(adversary = adversary.get(), ?from, to = ?heading, "adversary turned");
                out_events.push(Event::AdversaryTurned {
                    adversary,
                    from,
                    to: heading,
                });
            }
        }
        Command::Tick => {
            if world.phase == RoundPhase::InProgress {
                world.resolve_tick(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pacmaze_core::{
        movement::StepGeometry, AdversarySnapshot, AdversaryView, GridPoint, Maze,
        PlayerSnapshot, RoundOutcome, RoundPhase,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Provides the pixel-space constants used by the resolver.
    #[must_use]
    pub fn geometry(world: &World) -> StepGeometry {
        world.geometry
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let actor = &world.player;
        PlayerSnapshot {
            spawn: actor.spawn(),
            offset: actor.offset(),
            position: actor.position(&world.geometry),
            cell: actor.cell(&world.geometry),
            heading: actor.heading(),
        }
    }

    /// Captures a read-only view of the adversaries roaming the maze.
    #[must_use]
    pub fn adversary_view(world: &World) -> AdversaryView {
        let snapshots = world
            .adversaries
            .iter()
            .map(|adversary| AdversarySnapshot {
                id: adversary.id,
                control: adversary.control,
                color: adversary.color,
                spawn: adversary.actor.spawn(),
                offset: adversary.actor.offset(),
                position: adversary.actor.position(&world.geometry),
                cell: adversary.actor.cell(&world.geometry),
                heading: adversary.actor.heading(),
            })
            .collect();
        AdversaryView::from_snapshots(snapshots)
    }

    /// Pellets that have not been consumed yet.
    #[must_use]
    pub fn remaining_pellets(world: &World) -> &[GridPoint] {
        world.pellets.remaining()
    }

    /// Number of pellets consumed since the last reset.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.pellets.score()
    }

    /// Number of pellets the player must consume to win.
    #[must_use]
    pub fn pellet_target(world: &World) -> u32 {
        world.pellets.total()
    }

    /// Current lifecycle phase of the round.
    #[must_use]
    pub fn phase(world: &World) -> RoundPhase {
        world.phase
    }

    /// Terminal result of the round, present only once the round is over.
    #[must_use]
    pub fn outcome(world: &World) -> Option<RoundOutcome> {
        world.outcome
    }

    /// Number of ticks resolved since the round last started or reset.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[derive(Clone, Debug)]
struct Adversary {
    id: AdversaryId,
    control: Control,
    color: pacmaze_core::ActorColor,
    actor: Actor,
}

fn spawn_adversaries(roster: &[AdversarySpawn]) -> Vec<Adversary> {
    roster
        .iter()
        .enumerate()
        .map(|(index, spawn)| {
            let heading = match spawn.control {
                Control::RandomWander => Some(Direction::Left),
                Control::SecondPlayer => None,
            };
            Adversary {
                id: AdversaryId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                control: spawn.control,
                color: spawn.color,
                actor: Actor::spawned_at(spawn.spawn, heading),
            }
        })
        .collect()
}
