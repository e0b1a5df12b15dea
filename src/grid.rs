// Grid geometry helpers
//
// Pure coordinate arithmetic shared by the classifier, the planner, and the
// policy. Total functions over all inputs, no board mutation.

use crate::types::{Board, Coord, Direction};

/// Checks whether a coordinate lies outside the board
pub fn is_off_board(board: &Board, cell: Coord) -> bool {
    cell.x < 0 || cell.y < 0 || cell.x >= board.width || cell.y >= board.height
}

/// Returns the four neighbors of a cell in the fixed tie-break order
/// (Up, Down, Left, Right). May include off-board coordinates; callers
/// filter with `is_off_board`.
pub fn adjacent(cell: Coord) -> [Coord; 4] {
    [
        Direction::Up.apply(&cell),
        Direction::Down.apply(&cell),
        Direction::Left.apply(&cell),
        Direction::Right.apply(&cell),
    ]
}

/// Manhattan distance between two coordinates
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Distance from a cell to the nearest board edge
pub fn edge_distance(board: &Board, cell: Coord) -> i32 {
    let dx = cell.x.min(board.width - 1 - cell.x);
    let dy = cell.y.min(board.height - 1 - cell.y);
    dx.min(dy)
}

/// Returns the direction that steps from `from` to the adjacent cell `to`,
/// or `None` when the cells are not 4-adjacent.
pub fn step_between(from: Coord, to: Coord) -> Option<Direction> {
    Direction::all()
        .iter()
        .find(|dir| dir.apply(&from) == to)
        .copied()
}
