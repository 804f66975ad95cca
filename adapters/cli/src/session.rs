//! Fixed-rate driver tying the world to its systems and to the renderer.

use std::{fmt, time::Duration};

use anyhow::Result;
use pacmaze_core::{Command, Event, InputState, RoundOutcome, RoundPhase};
use pacmaze_rendering::{Color, GridPresentation, Overlay, Scene, SceneItem};
use pacmaze_system_bootstrap::Bootstrap;
use pacmaze_system_controls::Controls;
use pacmaze_system_wander::{Config as WanderConfig, Wander};
use pacmaze_world::{self as world, query, versus_roster, wander_roster, World};

use crate::config::{Mode, Settings};

/// Upper bound on ticks simulated per frame; a longer backlog is dropped.
const MAX_TICKS_PER_FRAME: u32 = 8;
const WALL_COLOR: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
const PELLET_COLOR: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);

/// Owns the world and every system acting on it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    bootstrap: Bootstrap,
    controls: Controls,
    wander: Wander,
    tick_interval: Duration,
    accumulator: Duration,
    pending: InputState,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    /// Creates a session populated with the adversaries the settings ask for.
    pub(crate) fn new(settings: &Settings) -> Self {
        let roster = match settings.mode {
            Mode::Wander => wander_roster(settings.adversaries),
            Mode::Versus => versus_roster(),
        };

        let mut session = Self {
            world: World::new(),
            bootstrap: Bootstrap,
            controls: Controls,
            wander: Wander::new(WanderConfig::new(settings.seed)),
            tick_interval: Duration::from_secs_f32(1.0 / settings.tick_rate),
            accumulator: Duration::ZERO,
            pending: InputState::default(),
            commands: Vec::new(),
            events: Vec::new(),
        };
        session.apply(Command::ConfigureAdversaries { roster });
        session
    }

    /// Feeds one frame of input and simulates every tick that became due.
    ///
    /// Start and reset presses are latched until the next tick consumes them.
    /// Returns the number of ticks simulated.
    pub(crate) fn advance(&mut self, dt: Duration, input: InputState) -> u32 {
        self.pending.player = input.player;
        self.pending.rival = input.rival;
        self.pending.start |= input.start;
        self.pending.reset |= input.reset;

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut ticks = 0;
        while self.accumulator >= self.tick_interval {
            if ticks == MAX_TICKS_PER_FRAME {
                tracing::debug!(backlog = ?self.accumulator, "dropping simulation backlog");
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator = self.accumulator.saturating_sub(self.tick_interval);
            self.tick(self.pending);
            self.pending.start = false;
            self.pending.reset = false;
            ticks += 1;
        }
        ticks
    }

    /// Runs one simulation tick: inputs, then wanderers, then resolution.
    fn tick(&mut self, input: InputState) {
        self.controls.handle(
            &input,
            query::phase(&self.world),
            &query::adversary_view(&self.world),
            &mut self.commands,
        );
        self.flush();

        self.wander.handle(
            query::phase(&self.world),
            &query::adversary_view(&self.world),
            query::maze(&self.world),
            &query::geometry(&self.world),
            &mut self.commands,
        );
        self.flush();

        self.apply(Command::Tick);
    }

    fn apply(&mut self, command: Command) {
        self.commands.push(command);
        self.flush();
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        for event in self.events.drain(..) {
            tracing::trace!(?event, "world event");
        }
    }

    /// Starts a round and simulates up to `ticks` ticks without a window.
    ///
    /// Stops early once the round is over.
    pub(crate) fn run_headless(&mut self, ticks: u64) -> Summary {
        let mut simulated = 0;
        let mut input = InputState {
            start: true,
            ..InputState::default()
        };
        while simulated < ticks {
            self.tick(input);
            input = InputState::default();
            simulated += 1;
            if query::phase(&self.world) == RoundPhase::Over {
                break;
            }
        }
        self.summary(simulated)
    }

    fn summary(&self, ticks: u64) -> Summary {
        Summary {
            ticks,
            phase: query::phase(&self.world),
            outcome: query::outcome(&self.world),
            score: query::score(&self.world),
            target: query::pellet_target(&self.world),
        }
    }

    /// Builds the initial scene for the renderer.
    pub(crate) fn scene(&self) -> Result<Scene> {
        let maze = self.bootstrap.maze(&self.world);
        let grid = GridPresentation::new(
            maze.columns(),
            maze.rows(),
            query::geometry(&self.world).cell_size(),
            WALL_COLOR,
            PELLET_COLOR,
        )?;
        let mut scene = Scene::new(grid, Vec::new(), None, 0);
        self.populate(&mut scene);
        Ok(scene)
    }

    /// Rewrites `scene` to reflect the current state of the world.
    pub(crate) fn populate(&self, scene: &mut Scene) {
        scene.score = query::score(&self.world);
        scene.overlay = self.overlay();
        scene.items.clear();
        if scene.overlay.is_some() {
            return;
        }

        scene.items.extend(
            self.bootstrap
                .maze(&self.world)
                .walls()
                .map(|cell| SceneItem::Obstacle { cell }),
        );
        scene.items.extend(
            query::remaining_pellets(&self.world)
                .iter()
                .copied()
                .map(SceneItem::pellet),
        );
        let player = query::player(&self.world);
        scene
            .items
            .push(SceneItem::player(player.position, player.heading));
        scene.items.extend(
            query::adversary_view(&self.world)
                .iter()
                .map(|adversary| SceneItem::adversary(adversary.position, adversary.color)),
        );
    }

    fn overlay(&self) -> Option<Overlay> {
        match (query::phase(&self.world), query::outcome(&self.world)) {
            (RoundPhase::NotStarted, _) => Some(Overlay::Welcome {
                banner: self.bootstrap.welcome_banner(&self.world).to_owned(),
                instructions: self
                    .bootstrap
                    .instructions(&self.world)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            }),
            (RoundPhase::Over, Some(outcome)) if outcome.is_win() => Some(Overlay::Won {
                score: query::score(&self.world),
            }),
            (RoundPhase::Over, _) => Some(Overlay::Lost {
                score: query::score(&self.world),
            }),
            (RoundPhase::InProgress, _) => None,
        }
    }
}

/// Outcome of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Summary {
    ticks: u64,
    phase: RoundPhase,
    outcome: Option<RoundOutcome>,
    score: u32,
    target: u32,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.phase, self.outcome) {
            (_, Some(RoundOutcome::Won)) => "won",
            (_, Some(RoundOutcome::Lost)) => "lost",
            (RoundPhase::NotStarted, None) => "not started",
            _ => "in progress",
        };
        write!(
            f,
            "round {state} after {} ticks with {}/{} points",
            self.ticks, self.score, self.target
        )
    }
}
