// Obstacle/safety classification
//
// Pure predicates deciding whether a cell is occupiable this turn for a
// given acting snake. Rules fail closed: any matching rule marks the cell
// unsafe. Head-to-head proximity against equal-or-larger rivals counts as
// unsafe because both snakes pick their moves from the same pre-move
// snapshot and the acting snake loses (or ties into elimination) the
// resulting collision.

use crate::grid;
use crate::profiler::{Stage, StageGuard};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Full safety classification for a candidate cell.
///
/// Unsafe when the cell is off-board, coincides with any live snake's body
/// (including the acting snake's own), or sits adjacent to the head of a
/// rival whose length is greater than or equal to the acting snake's.
pub fn is_safe_cell(board: &Board, acting: &Battlesnake, cell: Coord) -> bool {
    if grid::is_off_board(board, cell) {
        return false;
    }

    for snake in &board.snakes {
        if snake.health <= 0 {
            continue;
        }
        if snake.body.contains(&cell) {
            return false;
        }
    }

    // Head-to-head guard, inclusive on length
    for snake in &board.snakes {
        if snake.health <= 0 || snake.id == acting.id {
            continue;
        }
        if snake.length >= acting.length && grid::adjacent(snake.head).contains(&cell) {
            return false;
        }
    }

    true
}

/// Cell occupancy alone: in-bounds and clear of every live snake body.
/// Used where head-to-head proximity is not the question, e.g. when
/// enumerating the cells an opponent could physically step into.
pub fn is_open_cell(board: &Board, cell: Coord) -> bool {
    if grid::is_off_board(board, cell) {
        return false;
    }
    board
        .snakes
        .iter()
        .filter(|snake| snake.health > 0)
        .all(|snake| !snake.body.contains(&cell))
}

/// Weaker predicate for the terminal fallback chain: in-bounds and not
/// colliding with the acting snake's own body. Other snakes are ignored;
/// once no safe move exists, the snake is lost either way and a
/// predictable in-bounds move beats an out-of-bounds one.
pub fn is_legal_cell(board: &Board, acting: &Battlesnake, cell: Coord) -> bool {
    !grid::is_off_board(board, cell) && !acting.body.contains(&cell)
}

/// Enumerates the acting snake's safe moves in the fixed direction order
pub fn safe_moves(board: &Board, acting: &Battlesnake) -> Vec<Direction> {
    let _guard = StageGuard::new(Stage::Safety);
    Direction::all()
        .iter()
        .filter(|dir| is_safe_cell(board, acting, dir.apply(&acting.head)))
        .copied()
        .collect()
}

/// Enumerates the acting snake's merely-legal moves in the fixed direction
/// order (fallback chain input)
pub fn legal_moves(board: &Board, acting: &Battlesnake) -> Vec<Direction> {
    Direction::all()
        .iter()
        .filter(|dir| is_legal_cell(board, acting, dir.apply(&acting.head)))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: Vec<Coord>) -> Battlesnake {
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn board_with(snakes: Vec<Battlesnake>) -> Board {
        Board {
            width: 11,
            height: 11,
            food: vec![],
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_open_cell_is_safe() {
        let you = snake("you", vec![Coord { x: 5, y: 5 }, Coord { x: 5, y: 4 }]);
        let board = board_with(vec![you.clone()]);
        assert!(is_safe_cell(&board, &you, Coord { x: 7, y: 7 }));
    }

    #[test]
    fn test_off_board_is_unsafe() {
        let you = snake("you", vec![Coord { x: 0, y: 0 }]);
        let board = board_with(vec![you.clone()]);
        assert!(!is_safe_cell(&board, &you, Coord { x: -1, y: 0 }));
        assert!(!is_safe_cell(&board, &you, Coord { x: 0, y: 11 }));
    }

    #[test]
    fn test_own_body_is_unsafe() {
        let you = snake(
            "you",
            vec![Coord { x: 5, y: 5 }, Coord { x: 5, y: 4 }, Coord { x: 4, y: 4 }],
        );
        let board = board_with(vec![you.clone()]);
        assert!(!is_safe_cell(&board, &you, Coord { x: 5, y: 4 }));
        assert!(!is_safe_cell(&board, &you, Coord { x: 4, y: 4 }));
    }

    #[test]
    fn test_rival_body_is_unsafe() {
        let you = snake("you", vec![Coord { x: 1, y: 1 }]);
        let rival = snake("rival", vec![Coord { x: 8, y: 8 }, Coord { x: 8, y: 7 }]);
        let board = board_with(vec![you.clone(), rival]);
        assert!(!is_safe_cell(&board, &you, Coord { x: 8, y: 7 }));
    }

    #[test]
    fn test_dead_snake_body_is_ignored() {
        let you = snake("you", vec![Coord { x: 1, y: 1 }]);
        let mut rival = snake("rival", vec![Coord { x: 8, y: 8 }]);
        rival.health = 0;
        let board = board_with(vec![you.clone(), rival]);
        assert!(is_safe_cell(&board, &you, Coord { x: 8, y: 8 }));
    }

    #[test]
    fn test_head_to_head_zone_of_equal_rival_is_unsafe() {
        // Inclusive comparison: an equal-length rival's head neighborhood
        // is off-limits.
        let you = snake("you", vec![Coord { x: 2, y: 5 }, Coord { x: 1, y: 5 }]);
        let rival = snake("rival", vec![Coord { x: 4, y: 5 }, Coord { x: 5, y: 5 }]);
        let board = board_with(vec![you.clone(), rival]);
        assert!(!is_safe_cell(&board, &you, Coord { x: 3, y: 5 }));
        assert!(!is_safe_cell(&board, &you, Coord { x: 4, y: 6 }));
    }

    #[test]
    fn test_head_to_head_zone_of_smaller_rival_is_safe() {
        let you = snake(
            "you",
            vec![Coord { x: 2, y: 5 }, Coord { x: 1, y: 5 }, Coord { x: 0, y: 5 }],
        );
        let rival = snake("rival", vec![Coord { x: 4, y: 5 }, Coord { x: 5, y: 5 }]);
        let board = board_with(vec![you.clone(), rival]);
        // Winning a head-to-head against a shorter snake is allowed
        assert!(is_safe_cell(&board, &you, Coord { x: 3, y: 5 }));
    }

    #[test]
    fn test_own_head_zone_does_not_block_self() {
        let you = snake("you", vec![Coord { x: 5, y: 5 }, Coord { x: 5, y: 4 }]);
        let board = board_with(vec![you.clone()]);
        assert!(is_safe_cell(&board, &you, Coord { x: 5, y: 6 }));
    }

    #[test]
    fn test_open_cell_ignores_head_proximity() {
        let you = snake("you", vec![Coord { x: 2, y: 5 }, Coord { x: 1, y: 5 }]);
        let rival = snake("rival", vec![Coord { x: 4, y: 5 }, Coord { x: 5, y: 5 }]);
        let board = board_with(vec![you.clone(), rival]);
        // Unsafe by the full classifier (equal rival's head zone), but
        // physically open
        assert!(!is_safe_cell(&board, &you, Coord { x: 3, y: 5 }));
        assert!(is_open_cell(&board, Coord { x: 3, y: 5 }));
        // Body cells and off-board cells stay closed
        assert!(!is_open_cell(&board, Coord { x: 5, y: 5 }));
        assert!(!is_open_cell(&board, Coord { x: 11, y: 5 }));
    }

    #[test]
    fn test_legal_cell_ignores_rivals() {
        let you = snake("you", vec![Coord { x: 1, y: 1 }, Coord { x: 1, y: 0 }]);
        let rival = snake("rival", vec![Coord { x: 2, y: 1 }]);
        let board = board_with(vec![you.clone(), rival]);
        // Rival body cell: unsafe but legal
        assert!(!is_safe_cell(&board, &you, Coord { x: 2, y: 1 }));
        assert!(is_legal_cell(&board, &you, Coord { x: 2, y: 1 }));
        // Own body cell: neither
        assert!(!is_legal_cell(&board, &you, Coord { x: 1, y: 0 }));
        // Off-board: neither
        assert!(!is_legal_cell(&board, &you, Coord { x: -1, y: 1 }));
    }

    #[test]
    fn test_safe_moves_preserve_direction_order() {
        let you = snake("you", vec![Coord { x: 5, y: 5 }, Coord { x: 5, y: 4 }]);
        let board = board_with(vec![you.clone()]);
        // Down is the neck, everything else is open
        assert_eq!(
            safe_moves(&board, &you),
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
    }
}
