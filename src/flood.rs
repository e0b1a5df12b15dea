// Reachability engine
//
// Flood fill over 4-connected cells under an ephemeral obstacle set.
// Expansion is bounded by the actual board area (width * height), never by
// a fixed cap: a magic cap under-counts reachable space on large boards
// and turns "enough room to survive" checks into false alarms.

use std::collections::{HashSet, VecDeque};

use crate::grid;
use crate::profiler::{Stage, StageGuard};
use crate::types::{Board, Coord};

/// Counts the cells reachable from `start`, blocked by off-board cells and
/// by `obstacles`. The start cell itself is counted when it is open;
/// a blocked or off-board start yields 0.
pub fn reachable_area(board: &Board, obstacles: &HashSet<Coord>, start: Coord) -> usize {
    let _guard = StageGuard::new(Stage::Flood);

    if grid::is_off_board(board, start) || obstacles.contains(&start) {
        return 0;
    }

    let cell_budget = (board.width as usize) * (board.height as usize);

    let mut visited: HashSet<Coord> = HashSet::new();
    let mut queue: VecDeque<Coord> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if visited.len() >= cell_budget {
            break;
        }
        for neighbor in grid::adjacent(cell).iter() {
            if grid::is_off_board(board, *neighbor)
                || obstacles.contains(neighbor)
                || visited.contains(neighbor)
            {
                continue;
            }
            visited.insert(*neighbor);
            queue.push_back(*neighbor);
        }
    }

    visited.len()
}
