use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Smallest legal side length, a one cell interior inside the wall ring.
pub const MIN_SIDE: Coord = 3;

/// Rectangular arena of cell states, indexed `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<CellState>,
}

impl Grid {
    /// Creates an all-empty grid. Boundary walls are the generator's job.
    pub fn new(size: Coord2) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
        })
    }

    pub fn from_cells(cells: Array2<CellState>) -> Result<Self> {
        let (x, y) = cells.dim();
        let size = (
            x.try_into().map_err(|_| ArenaError::InvalidBoardShape)?,
            y.try_into().map_err(|_| ArenaError::InvalidBoardShape)?,
        );
        check_size(size)?;
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        // construction guarantees both axes fit a Coord
        (x as Coord, y as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn cells(&self) -> &Array2<CellState> {
        &self.cells
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 < width && coords.1 < height
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(ArenaError::OutOfBounds {
                x: coords.0,
                y: coords.1,
            })
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn set(&mut self, coords: Coord2, state: CellState) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords] = state;
        Ok(())
    }

    pub fn is_boundary(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 == 0 || coords.1 == 0 || coords.0 == width - 1 || coords.1 == height - 1
    }

    pub fn is_interior(&self, coords: Coord2) -> bool {
        self.contains(coords) && !self.is_boundary(coords)
    }

    /// Turns every cell of the outer ring into a wall.
    pub fn stamp_boundary(&mut self) {
        let (width, height) = self.size();
        for x in 0..width {
            self[(x, 0)] = CellState::Wall;
            self[(x, height - 1)] = CellState::Wall;
        }
        for y in 0..height {
            self[(0, y)] = CellState::Wall;
            self[(width - 1, y)] = CellState::Wall;
        }
    }

    /// Every cell except the outer ring, column by column.
    pub fn iter_interior(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (1..width - 1).flat_map(move |x| (1..height - 1).map(move |y| (x, y)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }
}

fn check_size((width, height): Coord2) -> Result<()> {
    if width < MIN_SIDE || height < MIN_SIDE {
        Err(ConfigIssue::TooSmall.into())
    } else {
        Ok(())
    }
}

impl Index<Coord2> for Grid {
    type Output = CellState;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Builds a grid from rows of `#` (wall) and `.` (empty).
#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> Grid {
    let height = rows.len();
    let width = rows[0].len();
    let mut cells = Array2::from_elem([width, height], CellState::Empty);
    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            if symbol == '#' {
                cells[[x, y]] = CellState::Wall;
            }
        }
    }
    Grid::from_cells(cells).unwrap()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn rejects_grids_without_an_interior() {
        assert_eq!(
            Grid::new((2, 5)),
            Err(ArenaError::InvalidConfiguration(ConfigIssue::TooSmall))
        );
        assert_eq!(
            Grid::new((5, 0)),
            Err(ArenaError::InvalidConfiguration(ConfigIssue::TooSmall))
        );
        assert!(Grid::new((3, 3)).is_ok());
    }

    #[test]
    fn access_outside_the_grid_fails() {
        let mut grid = Grid::new((4, 3)).unwrap();

        assert_eq!(grid.get((4, 0)), Err(ArenaError::OutOfBounds { x: 4, y: 0 }));
        assert_eq!(
            grid.set((0, 3), CellState::Wall),
            Err(ArenaError::OutOfBounds { x: 0, y: 3 })
        );
        assert_eq!(grid.get((3, 2)), Ok(CellState::Empty));
    }

    #[test]
    fn boundary_stamp_covers_the_whole_ring() {
        let mut grid = Grid::new((5, 4)).unwrap();
        grid.stamp_boundary();

        assert_eq!(grid.count(CellState::Wall), 5 * 2 + 2 * 2);
        for x in 0..5 {
            for y in 0..4 {
                assert_eq!(grid[(x, y)].is_wall(), grid.is_boundary((x, y)));
            }
        }
    }

    #[test]
    fn interior_iteration_skips_the_ring() {
        let grid = Grid::new((4, 3)).unwrap();
        let interior: Vec<_> = grid.iter_interior().collect();

        assert_eq!(interior, [(1, 1), (2, 1)]);
        assert!(grid.is_interior((2, 1)));
        assert!(!grid.is_interior((3, 1)));
    }
}
