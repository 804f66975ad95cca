#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the pacmaze welcome screen.

use pacmaze_core::{Control, Maze};
use pacmaze_world::{query, World};

const PLAYER_HELP: &str = "To control Pacman use WASD.";
const RIVAL_HELP: &str = "To control the ghost use arrow keys.";
const START_HELP: &str = "To start the game, press the space key.";
const RESET_HELP: &str = "To reset the game, press the R key.";

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Control instructions matching the configured adversaries.
    ///
    /// The arrow-key hint is listed only when a keyboard-driven adversary exists.
    #[must_use]
    pub fn instructions(&self, world: &World) -> Vec<&'static str> {
        let has_rival = query::adversary_view(world)
            .iter()
            .any(|adversary| adversary.control == Control::SecondPlayer);

        let mut lines = vec![PLAYER_HELP];
        if has_rival {
            lines.push(RIVAL_HELP);
        }
        lines.extend([START_HELP, RESET_HELP]);
        lines
    }

    /// Exposes the maze layout required for rendering.
    #[must_use]
    pub fn maze<'world>(&self, world: &'world World) -> &'world Maze {
        query::maze(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacmaze_core::{Command, WELCOME_BANNER};
    use pacmaze_world::{apply, versus_roster};

    #[test]
    fn banner_comes_from_the_world() {
        let world = World::new();
        assert_eq!(Bootstrap.welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn wander_roster_omits_the_arrow_key_hint() {
        let world = World::new();
        let lines = Bootstrap.instructions(&world);
        assert_eq!(lines, vec![PLAYER_HELP, START_HELP, RESET_HELP]);
    }

    #[test]
    fn versus_roster_explains_the_arrow_keys() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureAdversaries {
                roster: versus_roster(),
            },
            &mut events,
        );
        assert!(Bootstrap.instructions(&world).contains(&RIVAL_HELP));
    }

    #[test]
    fn maze_is_the_canonical_fifteen_by_fifteen_grid() {
        let world = World::new();
        let maze = Bootstrap.maze(&world);
        assert_eq!((maze.columns(), maze.rows()), (15, 15));
    }
}
