use alloc::collections::VecDeque;
use ndarray::Array2;

use crate::*;

/// Longest path, in cells including the start, a flood fill will follow.
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// Cells reached by one flood fill, stored as a mask over the whole grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Reachable {
    mask: Array2<bool>,
    count: usize,
}

impl Reachable {
    fn empty(size: Coord2) -> Self {
        Self {
            mask: Array2::default(size.to_nd_index()),
            count: 0,
        }
    }

    fn insert(&mut self, coords: Coord2) -> bool {
        let visited = &mut self.mask[coords.to_nd_index()];
        if *visited {
            return false;
        }
        *visited = true;
        self.count += 1;
        true
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mask
            .indexed_iter()
            .filter(|&(_, &visited)| visited)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

/// Breadth-first search over 4-connected non-wall cells.
///
/// The start cell has depth 1 and a neighbor is only admitted while the
/// current depth is below `max_depth`. A start that is a wall or lies outside
/// the grid yields an empty set.
pub fn flood_fill(grid: &Grid, start: Coord2, max_depth: u32) -> Reachable {
    let mut reachable = Reachable::empty(grid.size());
    if !grid.contains(start) || grid[start].is_wall() {
        return reachable;
    }

    reachable.insert(start);
    let mut to_visit = VecDeque::from([(start, 1u32)]);

    while let Some((coords, depth)) = to_visit.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for neighbor in grid.iter_neighbors(coords) {
            if !grid[neighbor].is_wall() && reachable.insert(neighbor) {
                to_visit.push_back((neighbor, depth + 1));
            }
        }
    }

    reachable
}

/// Walls off every interior open cell the flood fill did not reach.
///
/// Returns how many cells were converted.
pub fn prune_unreachable(grid: &mut Grid, reachable: &Reachable) -> usize {
    let mut pruned = 0;
    for coords in grid.iter_interior() {
        if !grid[coords].is_wall() && !reachable.contains(coords) {
            grid[coords] = CellState::Wall;
            pruned += 1;
        }
    }
    pruned
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn fills_the_open_region_only() {
        let grid = grid_from_rows(&["#######", "#..#..#", "#..#..#", "#######"]);

        let reachable = flood_fill(&grid, (1, 1), DEFAULT_MAX_DEPTH);

        assert_eq!(reachable.len(), 4);
        assert!(reachable.contains((2, 2)));
        assert!(!reachable.contains((4, 1)));
        assert_eq!(
            reachable.iter().collect::<Vec<_>>(),
            [(1, 1), (1, 2), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn depth_bound_counts_the_start() {
        let grid = grid_from_rows(&["#######", "#.....#", "#######"]);

        assert_eq!(flood_fill(&grid, (1, 1), 1).len(), 1);
        assert_eq!(flood_fill(&grid, (1, 1), 3).len(), 3);
        assert!(!flood_fill(&grid, (1, 1), 3).contains((4, 1)));
        assert_eq!(flood_fill(&grid, (1, 1), DEFAULT_MAX_DEPTH).len(), 5);
    }

    #[test]
    fn wall_or_outside_start_reaches_nothing() {
        let grid = grid_from_rows(&["###", "#.#", "###"]);

        assert!(flood_fill(&grid, (0, 0), DEFAULT_MAX_DEPTH).is_empty());
        assert!(flood_fill(&grid, (9, 9), DEFAULT_MAX_DEPTH).is_empty());
        assert!(!flood_fill(&grid, (9, 9), DEFAULT_MAX_DEPTH).contains((9, 9)));
    }

    #[test]
    fn each_cell_is_visited_once_in_open_rooms() {
        let grid = generate_walls((40, 40), 0, &Strategy::Open).unwrap();

        let reachable = flood_fill(&grid, (1, 1), u32::MAX);

        assert_eq!(reachable.len(), 38 * 38);
        assert_eq!(reachable.iter().count(), 38 * 38);
    }

    #[test]
    fn pruning_walls_off_disconnected_pockets() {
        let mut grid = grid_from_rows(&["#######", "#..#..#", "#..#..#", "#######"]);
        let reachable = flood_fill(&grid, (1, 1), DEFAULT_MAX_DEPTH);

        let pruned = prune_unreachable(&mut grid, &reachable);

        assert_eq!(pruned, 4);
        assert!(grid[(4, 1)].is_wall());
        assert!(grid[(5, 2)].is_wall());
        assert!(grid[(2, 2)].is_empty());
    }
}
