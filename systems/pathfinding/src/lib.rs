#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic best-first search over the maze grid.
//!
//! The search is an A* variant with a Manhattan heuristic on a 4-connected
//! grid. Candidates are kept in insertion order and the first node with the
//! lowest `f` score is expanded, so equal scores always favour the node that
//! was discovered earlier. Neighbours are explored in [`Direction::ALL`]
//! order, which makes the returned route a pure function of the grid and the
//! endpoints.
//!
//! [`Direction::ALL`]: gesture_maze_core::Direction::ALL

use gesture_maze_core::{CellCoord, Grid, Path};

/// Search bookkeeping for a single discovered cell.
#[derive(Clone, Copy, Debug)]
struct PathNode {
    cell: CellCoord,
    g: u32,
    h: u32,
    f: u32,
    parent: Option<usize>,
}

impl PathNode {
    fn new(cell: CellCoord, g: u32, goal: CellCoord, parent: Option<usize>) -> Self {
        let h = cell.manhattan_distance(goal);
        Self {
            cell,
            g,
            h,
            f: g + h,
            parent,
        }
    }

    fn relink(&mut self, g: u32, parent: usize) {
        self.g = g;
        self.f = g + self.h;
        self.parent = Some(parent);
    }
}

/// Finds a shortest route between `start` and `goal`, endpoints included.
///
/// Returns an empty [`Path`] when the goal is unreachable, when either
/// endpoint is a wall, or when either endpoint lies outside the grid. The grid
/// is never mutated.
#[must_use]
pub fn find_path(grid: &Grid, start: CellCoord, goal: CellCoord) -> Path {
    if !grid.is_open(start) || !grid.is_open(goal) {
        return Path::empty();
    }

    let size = grid.size();
    let cell_count = (size as usize) * (size as usize);
    let mut discovered: Vec<Option<usize>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];
    let mut nodes = vec![PathNode::new(start, 0, goal, None)];
    let mut open = vec![0_usize];
    discovered[index(size, start)] = Some(0);

    while let Some(position) = lowest_score(&open, &nodes) {
        let current = open.remove(position);
        let node = nodes[current];
        if node.cell == goal {
            return reconstruct(&nodes, current);
        }

        closed[index(size, node.cell)] = true;

        for neighbor in node.cell.neighbors(size) {
            let neighbor_index = index(size, neighbor);
            if closed[neighbor_index] || !grid.is_open(neighbor) {
                continue;
            }

            let g = node.g + 1;
            match discovered[neighbor_index] {
                Some(existing) => {
                    if g < nodes[existing].g {
                        nodes[existing].relink(g, current);
                    }
                }
                None => {
                    let created = nodes.len();
                    nodes.push(PathNode::new(neighbor, g, goal, Some(current)));
                    open.push(created);
                    discovered[neighbor_index] = Some(created);
                }
            }
        }
    }

    Path::empty()
}

/// Reports whether any route connects `start` and `goal`.
#[must_use]
pub fn is_reachable(grid: &Grid, start: CellCoord, goal: CellCoord) -> bool {
    !find_path(grid, start, goal).is_empty()
}

fn lowest_score(open: &[usize], nodes: &[PathNode]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (position, &node) in open.iter().enumerate() {
        let f = nodes[node].f;
        if best.map_or(true, |(_, best_f)| f < best_f) {
            best = Some((position, f));
        }
    }
    best.map(|(position, _)| position)
}

fn reconstruct(nodes: &[PathNode], goal_node: usize) -> Path {
    let mut cells = Vec::new();
    let mut cursor = Some(goal_node);
    while let Some(node) = cursor {
        cells.push(nodes[node].cell);
        cursor = nodes[node].parent;
    }
    cells.reverse();
    Path::new(cells)
}

fn index(size: u32, cell: CellCoord) -> usize {
    cell.row() as usize * size as usize + cell.column() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(f: u32) -> PathNode {
        PathNode {
            cell: CellCoord::new(0, 0),
            g: f,
            h: 0,
            f,
            parent: None,
        }
    }

    #[test]
    fn lowest_score_prefers_earliest_tie() {
        let nodes = vec![node(5), node(3), node(3), node(4)];
        let open = vec![0, 1, 2, 3];
        assert_eq!(lowest_score(&open, &nodes), Some(1));
    }

    #[test]
    fn lowest_score_on_empty_open_set() {
        assert_eq!(lowest_score(&[], &[]), None);
    }

    #[test]
    fn relink_recomputes_total_score() {
        let mut discovered = PathNode::new(CellCoord::new(2, 0), 5, CellCoord::new(4, 0), None);
        assert_eq!(discovered.f, 7);
        discovered.relink(3, 9);
        assert_eq!(discovered.f, 5);
        assert_eq!(discovered.parent, Some(9));
    }
}
