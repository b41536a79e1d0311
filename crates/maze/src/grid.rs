//! The maze cell grid: carving and solving.
//!
//! Cells are stored in a flat row-major arena and addressed by
//! `(col, row)`; the solver records parents as flat indices, so there are
//! no reference cycles and solve state is rebuilt from scratch on every
//! call rather than persisted on the cells.

use plotlines_core::glam::DVec2;
use plotlines_core::Xorshift64;
use std::collections::VecDeque;

/// Wall slots per cell, in neighbor-scan order.
const TOP: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const LEFT: usize = 3;

/// One grid cell: four boundary-wall flags plus the carve-visited mark.
#[derive(Debug, Clone)]
struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    fn sealed() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }
}

/// An N×M maze grid over which carving and solving run.
#[derive(Debug, Clone)]
pub struct MazeGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// Creates a grid with every wall present and every cell unvisited.
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![Cell::sealed(); cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    /// Whether the wall on `side` of `(col, row)` is present.
    pub fn wall(&self, col: usize, row: usize, side: usize) -> bool {
        self.cells[self.index(col, row)].walls[side]
    }

    /// The flat indices of in-bounds neighbors, paired with the wall side
    /// of the source cell that faces them. Scan order: top, right, bottom,
    /// left.
    fn neighbors(&self, index: usize) -> Vec<(usize, usize)> {
        let (col, row) = self.coords(index);
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push((self.index(col, row - 1), TOP));
        }
        if col + 1 < self.cols {
            out.push((self.index(col + 1, row), RIGHT));
        }
        if row + 1 < self.rows {
            out.push((self.index(col, row + 1), BOTTOM));
        }
        if col > 0 {
            out.push((self.index(col - 1, row), LEFT));
        }
        out
    }

    /// Removes the wall between two adjacent cells symmetrically: clearing
    /// `side` on the source also clears the opposite side on the neighbor.
    fn remove_wall(&mut self, from: usize, to: usize, side: usize) {
        let opposite = (side + 2) % 4;
        self.cells[from].walls[side] = false;
        self.cells[to].walls[opposite] = false;
    }

    /// Carves a perfect maze with randomized depth-first search.
    ///
    /// Starts at (0, 0); repeatedly moves to a uniformly chosen unvisited
    /// neighbor (removing the shared wall) and backtracks via an explicit
    /// stack when stuck. Afterward the open-wall graph is a spanning tree:
    /// every cell visited, `cols·rows − 1` wall pairs removed, no cycles.
    pub fn carve(&mut self, rng: &mut Xorshift64) {
        let mut stack: Vec<usize> = Vec::new();
        let mut current = 0;
        self.cells[current].visited = true;
        loop {
            let unvisited: Vec<(usize, usize)> = self
                .neighbors(current)
                .into_iter()
                .filter(|&(n, _)| !self.cells[n].visited)
                .collect();
            if let Some(&(next, side)) = rng.pick(&unvisited) {
                stack.push(current);
                self.remove_wall(current, next, side);
                current = next;
                self.cells[current].visited = true;
            } else if let Some(prev) = stack.pop() {
                current = prev;
            } else {
                break;
            }
        }
    }

    /// Whether two adjacent cells are connected through an open wall.
    pub fn connected(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        let ai = self.index(a.0, a.1);
        self.neighbors(ai)
            .into_iter()
            .any(|(n, side)| n == self.index(b.0, b.1) && !self.cells[ai].walls[side])
    }

    /// Number of removed (open) wall pairs. Exactly `cols·rows − 1` after
    /// carving a perfect maze.
    pub fn open_wall_pairs(&self) -> usize {
        let mut open = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = &self.cells[self.index(col, row)];
                if col + 1 < self.cols && !cell.walls[RIGHT] {
                    open += 1;
                }
                if row + 1 < self.rows && !cell.walls[BOTTOM] {
                    open += 1;
                }
            }
        }
        open
    }

    /// Flood-fills from `(col, row)` through open walls and returns the
    /// number of reachable cells.
    pub fn reachable_cell_count(&self, col: usize, row: usize) -> usize {
        let start = self.index(col, row);
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([start]);
        seen[start] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for (next, side) in self.neighbors(cell) {
                if !self.cells[cell].walls[side] && !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Finds the shortest open-wall path from (0, 0) to the bottom-right
    /// cell with breadth-first search.
    ///
    /// Solve state (visited marks and parent indices) lives in local
    /// arenas rebuilt per call, never on the cells. Returns the path in
    /// start→goal order as `(col, row)` pairs; empty if the goal is
    /// unreachable, which cannot happen for a fully carved maze.
    pub fn solve(&self) -> Vec<(usize, usize)> {
        let start = 0;
        let goal = self.cells.len() - 1;
        let mut visited = vec![false; self.cells.len()];
        let mut parent: Vec<Option<usize>> = vec![None; self.cells.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(cell) = queue.pop_front() {
            if cell == goal {
                let mut path = Vec::new();
                let mut cursor = Some(goal);
                while let Some(i) = cursor {
                    path.push(self.coords(i));
                    cursor = parent[i];
                }
                path.reverse();
                return path;
            }
            for (next, side) in self.neighbors(cell) {
                if !self.cells[cell].walls[side] && !visited[next] {
                    visited[next] = true;
                    parent[next] = Some(cell);
                    queue.push_back(next);
                }
            }
        }
        Vec::new()
    }

    /// Wall geometry in grid units: one segment per present top/left wall
    /// of every cell, plus the right and bottom outer boundary. Scaling to
    /// canvas coordinates is the caller's concern.
    pub fn wall_segments(&self) -> Vec<(DVec2, DVec2)> {
        let mut segments = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = &self.cells[self.index(col, row)];
                let x = col as f64;
                let y = row as f64;
                if cell.walls[TOP] {
                    segments.push((DVec2::new(x, y), DVec2::new(x + 1.0, y)));
                }
                if cell.walls[LEFT] {
                    segments.push((DVec2::new(x, y), DVec2::new(x, y + 1.0)));
                }
                if col + 1 == self.cols && cell.walls[RIGHT] {
                    segments.push((DVec2::new(x + 1.0, y), DVec2::new(x + 1.0, y + 1.0)));
                }
                if row + 1 == self.rows && cell.walls[BOTTOM] {
                    segments.push((DVec2::new(x, y + 1.0), DVec2::new(x + 1.0, y + 1.0)));
                }
            }
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_grid_has_all_walls_and_no_open_pairs() {
        let grid = MazeGrid::new(4, 4);
        assert_eq!(grid.open_wall_pairs(), 0);
        for row in 0..4 {
            for col in 0..4 {
                for side in 0..4 {
                    assert!(grid.wall(col, row, side));
                }
            }
        }
    }

    #[test]
    fn fresh_grid_flood_fill_reaches_only_the_start() {
        let grid = MazeGrid::new(4, 4);
        assert_eq!(grid.reachable_cell_count(0, 0), 1);
    }

    #[test]
    fn wall_removal_is_symmetric() {
        let mut grid = MazeGrid::new(3, 3);
        let a = grid.index(0, 0);
        let b = grid.index(1, 0);
        grid.remove_wall(a, b, RIGHT);
        assert!(!grid.wall(0, 0, RIGHT));
        assert!(!grid.wall(1, 0, LEFT));
        assert!(grid.connected((0, 0), (1, 0)));
        assert!(grid.connected((1, 0), (0, 0)));
    }

    #[test]
    fn carving_is_deterministic_per_seed() {
        let mut a = MazeGrid::new(8, 8);
        let mut b = MazeGrid::new(8, 8);
        a.carve(&mut Xorshift64::new(55));
        b.carve(&mut Xorshift64::new(55));
        assert_eq!(a.solve(), b.solve());
        assert_eq!(a.wall_segments(), b.wall_segments());
    }

    #[test]
    fn solve_on_uncarved_grid_returns_empty_path() {
        // Goal unreachable through closed walls: empty result, not a panic.
        let grid = MazeGrid::new(4, 4);
        assert!(grid.solve().is_empty());
    }

    #[test]
    fn one_by_one_grid_is_trivially_solved() {
        let mut grid = MazeGrid::new(1, 1);
        grid.carve(&mut Xorshift64::new(1));
        assert_eq!(grid.solve(), vec![(0, 0)]);
        assert_eq!(grid.open_wall_pairs(), 0);
    }

    #[test]
    fn wall_segment_count_for_a_fresh_grid_matches_the_lattice() {
        // 3×2 fresh grid: every edge present. Horizontal edges: 3·3 = 9,
        // vertical edges: 4·2 = 8.
        let grid = MazeGrid::new(3, 2);
        assert_eq!(grid.wall_segments().len(), 17);
    }

    #[test]
    fn carved_grid_loses_one_wall_segment_per_open_pair() {
        let mut grid = MazeGrid::new(6, 6);
        grid.carve(&mut Xorshift64::new(3));
        // Fresh 6×6 lattice: 7·6 horizontal + 7·6 vertical = 84 edges.
        assert_eq!(grid.wall_segments().len(), 84 - grid.open_wall_pairs());
        assert_eq!(grid.open_wall_pairs(), 35);
    }
}
