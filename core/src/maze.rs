use crate::CellCoord;

/// Immutable occupancy grid describing which cells of the maze are walls.
///
/// The outer ring is always solid: [`Maze::from_grid`] seals the border
/// regardless of the layout it receives, so no actor can leave the bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    columns: u32,
    rows: u32,
    walls: Vec<bool>,
}

impl Maze {
    /// Creates a new maze from a row-major literal layout, `1` marking walls.
    ///
    /// Layouts narrower than three cells along either axis consist of border only.
    #[must_use]
    pub fn from_grid<const COLUMNS: usize, const ROWS: usize>(
        layout: &[[u8; COLUMNS]; ROWS],
    ) -> Self {
        let columns = u32::try_from(COLUMNS).unwrap_or(u32::MAX);
        let rows = u32::try_from(ROWS).unwrap_or(u32::MAX);
        let mut walls = Vec::with_capacity(COLUMNS * ROWS);
        for (row, line) in layout.iter().enumerate() {
            for (column, cell) in line.iter().enumerate() {
                let border = row == 0 || column == 0 || row + 1 == ROWS || column + 1 == COLUMNS;
                walls.push(border || *cell != 0);
            }
        }

        Self {
            columns,
            rows,
            walls,
        }
    }

    /// Number of columns contained in the maze.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the maze.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell at the provided column and row is impassable.
    ///
    /// Cells outside the grid are treated as walls.
    #[must_use]
    pub fn is_wall(&self, column: i32, row: i32) -> bool {
        self.index(column, row)
            .and_then(|index| self.walls.get(index).copied())
            .unwrap_or(true)
    }

    /// Reports whether the provided cell is impassable.
    #[must_use]
    pub fn is_wall_at(&self, cell: CellCoord) -> bool {
        self.is_wall(cell.column(), cell.row())
    }

    /// Iterator over every wall cell in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells().filter(|cell| self.is_wall_at(*cell))
    }

    /// Iterator over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells().filter(|cell| !self.is_wall_at(*cell))
    }

    fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = i32::try_from(self.columns).unwrap_or(i32::MAX);
        let rows = i32::try_from(self.rows).unwrap_or(i32::MAX);
        (0..rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        Some(usize::try_from(row).ok()? * width + usize::try_from(column).ok()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: [[u8; 5]; 4] = [
        [1, 1, 1, 1, 1],
        [1, 0, 0, 1, 1],
        [1, 0, 1, 0, 1],
        [1, 1, 1, 1, 1],
    ];

    #[test]
    fn layout_is_read_row_major() {
        let maze = Maze::from_grid(&SMALL);
        assert_eq!(maze.columns(), 5);
        assert_eq!(maze.rows(), 4);
        assert!(!maze.is_wall(2, 1));
        assert!(maze.is_wall(2, 2));
        assert!(!maze.is_wall(3, 2));
    }

    #[test]
    fn border_is_sealed_even_when_layout_leaves_it_open() {
        let open = [[0u8; 4]; 4];
        let maze = Maze::from_grid(&open);
        let walls: Vec<_> = maze.walls().collect();
        assert_eq!(walls.len(), 12);
        let open_cells: Vec<_> = maze.open_cells().collect();
        assert_eq!(
            open_cells,
            vec![
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn out_of_bounds_cells_are_walls() {
        let maze = Maze::from_grid(&SMALL);
        assert!(maze.is_wall(-1, 1));
        assert!(maze.is_wall(1, -1));
        assert!(maze.is_wall(5, 1));
        assert!(maze.is_wall(1, 4));
        assert!(maze.is_wall(i32::MAX, i32::MIN));
    }
}
