#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random-walk system steering autonomous adversaries.
//!
//! Every tick each wandering adversary keeps walking along its heading until
//! the look-ahead probe reports a wall. It then spends the tick turning to one
//! of the three other headings, picked uniformly at random, without moving.
//! Wanderers know nothing about the player or about each other.

use pacmaze_core::{
    movement::{self, StepGeometry, StepOutcome},
    AdversarySnapshot, AdversaryView, Command, Control, Direction, Maze, RoundPhase,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Heading assumed for a wanderer that has not been assigned one.
pub const INITIAL_HEADING: Direction = Direction::Left;

/// Configuration parameters required to construct the wander system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that emits step and turn commands for wandering adversaries.
#[derive(Debug)]
pub struct Wander {
    rng: ChaCha8Rng,
}

impl Wander {
    /// Creates a new wander system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Inspects the adversaries and emits one command per wanderer.
    pub fn handle(
        &mut self,
        phase: RoundPhase,
        adversaries: &AdversaryView,
        maze: &Maze,
        geometry: &StepGeometry,
        out: &mut Vec<Command>,
    ) {
        if phase != RoundPhase::InProgress {
            return;
        }

        for adversary in adversaries
            .iter()
            .filter(|adversary| adversary.control == Control::RandomWander)
        {
            out.push(self.decide(adversary, maze, geometry));
        }
    }

    fn decide(
        &mut self,
        adversary: &AdversarySnapshot,
        maze: &Maze,
        geometry: &StepGeometry,
    ) -> Command {
        let heading = adversary.heading.unwrap_or(INITIAL_HEADING);
        match movement::resolve_step(maze, geometry, adversary.spawn, adversary.offset, heading) {
            StepOutcome::Advanced(_) => Command::StepAdversary {
                adversary: adversary.id,
                direction: heading,
            },
            StepOutcome::Blocked(cell) => {
                let turned = self.redraw(heading);
                tracing::trace!(
                    adversary = adversary.id.get(),
                    ?cell,
                    from = ?heading,
                    to = ?turned,
                    "wanderer blocked"
                );
                Command::TurnAdversary {
                    adversary: adversary.id,
                    heading: turned,
                }
            }
        }
    }

    fn redraw(&mut self, blocked: Direction) -> Direction {
        let candidates = blocked.others();
        candidates[self.rng.gen_range(0..candidates.len())]
    }
}
