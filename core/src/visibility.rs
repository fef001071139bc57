//! Line of sight from an eye cell towards every point of the arena boundary.
//!
//! Rays are rasterized with a symmetric integer walk: `ix` and `iy` count the
//! steps taken along each axis and the sign of
//! `(1 + 2 * ix) * ny - (1 + 2 * iy) * nx` decides whether the next step moves
//! along x, along y, or exactly through a cell corner onto the diagonal.
//!
//! A corner crossing is blocked only when both orthogonal cells beside the
//! corner are walls. Otherwise every open one of them is seen, followed by the
//! diagonal cell itself. This is not symmetric: in some corner layouts `a`
//! sees `b` while `b` does not see `a`.
//!
//! Boundary targets are kept in fixed point, every coordinate multiplied by the
//! sampling resolution, so ray stepping never touches floating point.

use alloc::collections::BTreeSet;
use core::cmp::Ordering;

use crate::*;

/// Perimeter samples per unit of edge length.
pub const DEFAULT_RESOLUTION: u32 = 1;

/// Largest accepted resolution. Keeps every fixed-point coordinate of the
/// largest grid well inside `u32`.
pub const MAX_RESOLUTION: u32 = 256;

/// Cells visible from one eye, ordered by `(x, y)`.
pub type VisibleSet = BTreeSet<Coord2>;

/// A boundary point with both coordinates in units of `1 / resolution`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target {
    pub x: u32,
    pub y: u32,
}

pub(crate) fn check_resolution(resolution: u32) -> Result<()> {
    if resolution == 0 {
        return Err(ConfigIssue::ZeroResolution.into());
    }
    if resolution > MAX_RESOLUTION {
        return Err(ConfigIssue::ResolutionTooLarge.into());
    }
    Ok(())
}

/// All distinct sample points on the four outer edges of a `size` grid.
pub fn perimeter_targets(size: Coord2, resolution: u32) -> Result<BTreeSet<Target>> {
    check_resolution(resolution)?;
    Ok(sample_perimeter(size, resolution))
}

/// `resolution` must already have passed [`check_resolution`].
fn sample_perimeter(size: Coord2, resolution: u32) -> BTreeSet<Target> {
    let far_x = u32::from(size.0.saturating_sub(1)) * resolution;
    let far_y = u32::from(size.1.saturating_sub(1)) * resolution;

    let mut targets = BTreeSet::new();
    for y in 0..=far_y {
        targets.insert(Target { x: 0, y });
        targets.insert(Target { x: far_x, y });
    }
    for x in 0..=far_x {
        targets.insert(Target { x, y: 0 });
        targets.insert(Target { x, y: far_y });
    }
    targets
}

#[derive(Clone, Debug)]
pub struct VisibilityEngine<'a> {
    grid: &'a Grid,
    resolution: u32,
    targets: BTreeSet<Target>,
}

impl<'a> VisibilityEngine<'a> {
    pub fn new(grid: &'a Grid, resolution: u32) -> Result<Self> {
        check_resolution(resolution)?;
        Ok(Self::with_checked_resolution(grid, resolution))
    }

    /// For callers that already validated `resolution`, such as a built board.
    pub(crate) fn with_checked_resolution(grid: &'a Grid, resolution: u32) -> Self {
        Self {
            grid,
            resolution,
            targets: sample_perimeter(grid.size(), resolution),
        }
    }

    pub fn targets(&self) -> &BTreeSet<Target> {
        &self.targets
    }

    /// Every cell some ray from `eye` reaches before hitting a wall.
    ///
    /// The eye cell itself is not part of the result. An eye outside the grid
    /// sees nothing.
    pub fn visible_from(&self, eye: Coord2) -> VisibleSet {
        let mut visible = VisibleSet::new();
        if !self.grid.contains(eye) {
            return visible;
        }
        for &target in &self.targets {
            self.trace(eye, target, &mut visible);
        }
        visible
    }

    fn trace(&self, eye: Coord2, target: Target, visible: &mut VisibleSet) {
        let scale = i64::from(self.resolution);
        let dx = i64::from(target.x) - i64::from(eye.0) * scale;
        let dy = i64::from(target.y) - i64::from(eye.1) * scale;
        let (nx, ny) = (dx.abs(), dy.abs());
        let sign_x = if dx > 0 { 1 } else { -1 };
        let sign_y = if dy > 0 { 1 } else { -1 };

        let (mut x, mut y) = (i64::from(eye.0), i64::from(eye.1));
        let (mut ix, mut iy) = (0i64, 0i64);

        while ix * scale < nx || iy * scale < ny {
            let decision = (1 + 2 * ix) * ny - (1 + 2 * iy) * nx;
            match decision.cmp(&0) {
                Ordering::Equal => {
                    let beside_x = self.open_cell(x + sign_x, y);
                    let beside_y = self.open_cell(x, y + sign_y);
                    if beside_x.is_none() && beside_y.is_none() {
                        break;
                    }
                    visible.extend(beside_x);
                    visible.extend(beside_y);

                    x += sign_x;
                    y += sign_y;
                    ix += 1;
                    iy += 1;
                }
                Ordering::Less => {
                    x += sign_x;
                    ix += 1;
                }
                Ordering::Greater => {
                    y += sign_y;
                    iy += 1;
                }
            }

            match self.open_cell(x, y) {
                Some(coords) => {
                    visible.insert(coords);
                }
                None => break,
            }
        }
    }

    /// The cell at `(x, y)` when it exists and is not a wall.
    fn open_cell(&self, x: i64, y: i64) -> Option<Coord2> {
        let coords = (Coord::try_from(x).ok()?, Coord::try_from(y).ok()?);
        (self.grid.contains(coords) && !self.grid[coords].is_wall()).then_some(coords)
    }
}

/// Paints `agent`'s vision overlay over the empty cells of `visible`.
///
/// Walls, agents, and cells already carrying an overlay are left alone.
/// Returns the number of cells painted.
pub fn stamp_vision(grid: &mut Grid, agent: AgentId, visible: &VisibleSet) -> usize {
    let mut painted = 0;
    for &coords in visible {
        if grid.get(coords).is_ok_and(CellState::is_empty) {
            grid[coords] = CellState::vision(agent);
            painted += 1;
        }
    }
    painted
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn visible(grid: &Grid, eye: Coord2) -> VisibleSet {
        VisibilityEngine::new(grid, DEFAULT_RESOLUTION)
            .unwrap()
            .visible_from(eye)
    }

    #[test]
    fn perimeter_targets_are_deduplicated() {
        assert_eq!(perimeter_targets((30, 30), 1).unwrap().len(), 116);
        assert_eq!(perimeter_targets((30, 30), 2).unwrap().len(), 232);
        assert_eq!(perimeter_targets((3, 3), 1).unwrap().len(), 8);

        let targets = perimeter_targets((4, 3), 2).unwrap();
        assert!(targets.contains(&Target { x: 3, y: 0 }));
        assert!(targets.contains(&Target { x: 6, y: 1 }));
        assert!(!targets.contains(&Target { x: 3, y: 1 }));
    }

    #[test]
    fn out_of_range_resolutions_are_rejected() {
        let grid = grid_from_rows(&["###", "#.#", "###"]);

        assert_eq!(
            VisibilityEngine::new(&grid, 0).err(),
            Some(ArenaError::InvalidConfiguration(ConfigIssue::ZeroResolution))
        );
        assert_eq!(
            VisibilityEngine::new(&grid, MAX_RESOLUTION + 1).err(),
            Some(ArenaError::InvalidConfiguration(ConfigIssue::ResolutionTooLarge))
        );
        assert_eq!(
            perimeter_targets((3, 3), 0).err(),
            Some(ArenaError::InvalidConfiguration(ConfigIssue::ZeroResolution))
        );
    }

    #[test]
    fn largest_grid_at_huge_resolution_fails_cleanly() {
        let grid = generate_walls((255, 255), 0, &Strategy::Open).unwrap();

        assert_eq!(
            VisibilityEngine::new(&grid, 1 << 25).err(),
            Some(ArenaError::InvalidConfiguration(ConfigIssue::ResolutionTooLarge))
        );
        assert_eq!(
            perimeter_targets((255, 255), u32::MAX).err(),
            Some(ArenaError::InvalidConfiguration(ConfigIssue::ResolutionTooLarge))
        );

        let targets = perimeter_targets((255, 255), MAX_RESOLUTION).unwrap();
        assert_eq!(targets.len(), 4 * 254 * MAX_RESOLUTION as usize);
        assert!(targets.contains(&Target { x: 254 * MAX_RESOLUTION, y: 0 }));
    }

    #[test]
    fn open_room_is_fully_visible() {
        let grid = grid_from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);

        let seen = visible(&grid, (2, 2));

        assert_eq!(seen.len(), 8);
        assert!(!seen.contains(&(2, 2)));
        assert!(seen.iter().all(|&coords| !grid[coords].is_wall()));
    }

    #[test]
    fn lone_interior_cell_sees_nothing() {
        let grid = grid_from_rows(&["###", "#.#", "###"]);

        assert!(visible(&grid, (1, 1)).is_empty());
    }

    #[test]
    fn walls_stop_straight_rays() {
        let grid = grid_from_rows(&["#######", "#..#..#", "#######"]);

        let seen = visible(&grid, (1, 1));

        assert_eq!(seen.into_iter().collect::<Vec<_>>(), [(2, 1)]);
    }

    #[test]
    fn diagonal_is_blocked_when_both_corners_are_walls() {
        let grid = grid_from_rows(&["#####", "#...#", "##..#", "#.#.#", "#####"]);

        let seen = visible(&grid, (1, 3));

        assert!(seen.is_empty());
    }

    #[test]
    fn diagonal_passes_a_single_open_corner() {
        let grid = grid_from_rows(&["#####", "#...#", "##..#", "#...#", "#####"]);

        let seen = visible(&grid, (1, 3));

        assert!(seen.contains(&(2, 3)));
        assert!(seen.contains(&(2, 2)));
        assert!(seen.contains(&(3, 1)));
        assert!(!seen.contains(&(1, 2)));
    }

    #[test]
    fn higher_resolution_never_sees_less() {
        let grid = grid_from_rows(&[
            "##########",
            "#....#...#",
            "#.##...#.#",
            "#....#...#",
            "#.#....#.#",
            "##########",
        ]);

        let coarse = visible(&grid, (1, 1));
        let fine = VisibilityEngine::new(&grid, 4).unwrap().visible_from((1, 1));

        assert!(coarse.is_subset(&fine));
    }

    #[test]
    fn repeated_runs_agree() {
        let grid = generate_walls((30, 30), 9, &Strategy::CoherentNoise).unwrap();
        let engine = VisibilityEngine::new(&grid, 3).unwrap();

        for eye in grid.iter_interior().filter(|&coords| !grid[coords].is_wall()) {
            assert_eq!(engine.visible_from(eye), engine.visible_from(eye));
        }
    }

    #[test]
    fn stamping_only_paints_empty_cells() {
        let mut grid = grid_from_rows(&["#####", "#...#", "#####"]);
        grid[(1, 1)] = CellState::Agent1;
        grid[(3, 1)] = CellState::Agent2;
        let seen = visible(&grid, (1, 1));

        let painted = stamp_vision(&mut grid, AgentId::Seeker, &seen);

        assert_eq!(painted, 1);
        assert_eq!(grid[(2, 1)], CellState::Agent1Vision);
        assert_eq!(grid[(3, 1)], CellState::Agent2);

        let painted = stamp_vision(&mut grid, AgentId::Hider, &seen);
        assert_eq!(painted, 0);
        assert_eq!(grid[(2, 1)], CellState::Agent1Vision);
    }
}
