// Path planner
//
// Single-source breadth-first search from the acting snake's head through
// cells the safety classifier allows. The search runs until the frontier
// is exhausted so that one pass answers every "shortest route to X" query
// for the turn (all food, rival heads, tail targets). First arrival wins;
// neighbor expansion follows the fixed direction order, which makes
// equal-distance tie-breaks deterministic.

use std::collections::{HashMap, VecDeque};

use crate::grid;
use crate::profiler::{Stage, StageGuard};
use crate::safety;
use crate::types::{Battlesnake, Board, Coord};

/// BFS result: first-arrival distance and parent pointer per reached cell
#[derive(Debug)]
pub struct PathMap {
    start: Coord,
    distance: HashMap<Coord, u32>,
    parent: HashMap<Coord, Coord>,
}

impl PathMap {
    /// Shortest step count from the origin to `cell`, if reached
    pub fn distance_to(&self, cell: Coord) -> Option<u32> {
        self.distance.get(&cell).copied()
    }

    /// Reconstructs the full path from the origin to `cell`, inclusive of
    /// both endpoints. `None` when the cell was never reached.
    pub fn path_to(&self, cell: Coord) -> Option<Vec<Coord>> {
        if !self.distance.contains_key(&cell) {
            return None;
        }

        let mut path = vec![cell];
        let mut current = cell;
        while current != self.start {
            current = self.parent[&current];
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Runs BFS from `start` on behalf of `acting`, expanding through safe
/// cells only. The start cell is exempt from the safety check since it is
/// normally the acting snake's own head.
pub fn shortest_paths(board: &Board, acting: &Battlesnake, start: Coord) -> PathMap {
    let _guard = StageGuard::new(Stage::Pathfind);

    let mut distance: HashMap<Coord, u32> = HashMap::new();
    let mut parent: HashMap<Coord, Coord> = HashMap::new();
    let mut queue: VecDeque<Coord> = VecDeque::new();

    distance.insert(start, 0);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let next_distance = distance[&cell] + 1;
        for neighbor in grid::adjacent(cell).iter() {
            if distance.contains_key(neighbor) {
                continue;
            }
            if !safety::is_safe_cell(board, acting, *neighbor) {
                continue;
            }
            distance.insert(*neighbor, next_distance);
            parent.insert(*neighbor, cell);
            queue.push_back(*neighbor);
        }
    }

    PathMap {
        start,
        distance,
        parent,
    }
}
