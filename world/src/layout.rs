//! Canonical maze, pellet, and spawn layout compiled into the world.

use pacmaze_core::{ActorColor, AdversarySpawn, Control, GridPoint, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Row-major wall layout of the canonical maze, `1` marking walls.
pub(crate) const MAZE: [[u8; SIZE]; SIZE] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1],
    [1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Pellet rows of the canonical maze, listed column by column.
///
/// Every open cell carries a pellet except (5, 11).
const PELLET_COLUMNS: [(u8, &[u8]); 13] = [
    (1, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]),
    (2, &[1, 6, 9, 13]),
    (3, &[1, 2, 3, 4, 6, 8, 9, 10, 11, 13]),
    (4, &[1, 4, 5, 6, 7, 8, 11, 12, 13]),
    (5, &[1, 2, 5, 10, 13]),
    (6, &[2, 3, 4, 5, 7, 10, 13]),
    (7, &[5, 6, 7, 9, 10, 11, 12, 13]),
    (8, &[2, 3, 4, 5, 7, 10, 13]),
    (9, &[1, 2, 5, 10, 11, 13]),
    (10, &[1, 4, 5, 6, 7, 8, 11, 12, 13]),
    (11, &[1, 2, 3, 4, 6, 8, 9, 10, 11, 13]),
    (12, &[1, 6, 9, 13]),
    (13, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]),
];

/// Spawn point of the player.
pub(crate) const PLAYER_SPAWN: GridPoint = GridPoint::new(1.5, 1.5);

/// Spawn point of the keyboard-driven adversary.
pub(crate) const RIVAL_SPAWN: GridPoint = GridPoint::new(3.5, 3.5);

const RIVAL_COLOR: ActorColor = ActorColor::from_rgb(0xff, 0x00, 0x00);

/// Roster of the four random-wander monsters in spawn order.
pub(crate) const WANDERERS: [AdversarySpawn; 4] = [
    AdversarySpawn {
        control: Control::RandomWander,
        spawn: GridPoint::new(10.5, 8.5),
        color: ActorColor::from_rgb(0x33, 0x66, 0xff),
    },
    AdversarySpawn {
        control: Control::RandomWander,
        spawn: GridPoint::new(13.5, 1.5),
        color: ActorColor::from_rgb(0xff, 0xb8, 0xff),
    },
    AdversarySpawn {
        control: Control::RandomWander,
        spawn: GridPoint::new(4.5, 6.5),
        color: ActorColor::from_rgb(0x00, 0xff, 0xff),
    },
    AdversarySpawn {
        control: Control::RandomWander,
        spawn: GridPoint::new(2.5, 13.5),
        color: ActorColor::from_rgb(0xff, 0xb8, 0x52),
    },
];

/// Canonical pellet coordinates at cell centres.
pub(crate) fn pellets() -> Vec<GridPoint> {
    PELLET_COLUMNS
        .iter()
        .flat_map(|(column, rows)| {
            rows.iter()
                .map(move |row| GridPoint::new(f32::from(*column) + 0.5, f32::from(*row) + 0.5))
        })
        .collect()
}

/// Single keyboard-driven adversary used by the two-player variant.
pub(crate) const fn rival() -> AdversarySpawn {
    AdversarySpawn {
        control: Control::SecondPlayer,
        spawn: RIVAL_SPAWN,
        color: RIVAL_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacmaze_core::Maze;

    #[test]
    fn canonical_pellet_list_has_one_hundred_five_entries() {
        assert_eq!(pellets().len(), 105);
    }

    #[test]
    fn every_pellet_sits_on_an_open_cell() {
        let maze = Maze::from_grid(&MAZE);
        for pellet in pellets() {
            assert!(!maze.is_wall_at(pellet.cell()), "pellet on wall {pellet:?}");
        }
    }

    #[test]
    fn spawns_sit_on_open_cells() {
        let maze = Maze::from_grid(&MAZE);
        assert!(!maze.is_wall_at(PLAYER_SPAWN.cell()));
        assert!(!maze.is_wall_at(RIVAL_SPAWN.cell()));
        for wanderer in WANDERERS {
            assert!(!maze.is_wall_at(wanderer.spawn.cell()));
        }
    }

    #[test]
    fn only_one_open_cell_lacks_a_pellet() {
        let maze = Maze::from_grid(&MAZE);
        let pellets = pellets();
        let bare: Vec<_> = maze
            .open_cells()
            .filter(|cell| !pellets.iter().any(|pellet| pellet.cell() == *cell))
            .collect();
        assert_eq!(bare, vec![pacmaze_core::CellCoord::new(5, 11)]);
    }
}
