// Forward simulator
//
// Simulates the acting snake's body sliding forward along hypothetical
// moves. Other snakes are treated as static walls: the simulator answers
// "does this line of play keep MY body legal", not "how does the whole
// game evolve" (the authoritative rules engine is out of scope).

use crate::grid;
use crate::profiler::{Stage, StageGuard};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Advances a body one step: the new head is prepended; unless the step
/// grows the snake (eating), the tail cell is vacated.
pub fn advance_body(body: &[Coord], new_head: Coord, grows: bool) -> Vec<Coord> {
    let mut next = Vec::with_capacity(body.len() + 1);
    next.push(new_head);
    if grows {
        next.extend_from_slice(body);
    } else if !body.is_empty() {
        next.extend_from_slice(&body[..body.len() - 1]);
    }
    next
}

/// Walks a body along a full BFS path (origin head first). Only the final
/// step grows: intermediate cells are passed through, the target cell is
/// consumed.
pub fn advance_along_path(body: &[Coord], path: &[Coord]) -> Vec<Coord> {
    let mut current = body.to_vec();
    for (i, cell) in path.iter().enumerate().skip(1) {
        let grows = i == path.len() - 1;
        current = advance_body(&current, *cell, grows);
    }
    current
}

/// Validates a simulated body: head in bounds, head clear of every other
/// snake's current body, no duplicate cells anywhere in the simulated
/// body (which also covers the head re-entering its own trailing
/// segments).
pub fn is_body_safe(board: &Board, acting_id: &str, body: &[Coord]) -> bool {
    let head = match body.first() {
        Some(head) => *head,
        None => return false,
    };

    if grid::is_off_board(board, head) {
        return false;
    }

    for snake in &board.snakes {
        if snake.health <= 0 || snake.id == acting_id {
            continue;
        }
        if snake.body.contains(&head) {
            return false;
        }
    }

    for (i, cell) in body.iter().enumerate() {
        if body[..i].contains(cell) {
            return false;
        }
    }

    true
}

/// N-step lookahead: plays `first_move`, then greedily extends the line,
/// preferring to continue straight (reduces thrashing) and otherwise
/// trying the remaining directions in the fixed order. Returns false the
/// moment no direction keeps the simulated body safe.
///
/// The greedy continuation is deterministic, so a line that dies within
/// `k` steps also dies within `k + 1`.
pub fn lookahead_survives(
    board: &Board,
    acting: &Battlesnake,
    first_move: Direction,
    steps: u32,
) -> bool {
    let _guard = StageGuard::new(Stage::Lookahead);

    let mut body = acting.body.clone();
    let mut heading = first_move;

    for step in 0..steps {
        let head = match body.first() {
            Some(head) => *head,
            None => return false,
        };

        let mut advanced = None;
        for dir in candidate_directions(heading, step == 0).iter() {
            let new_head = dir.apply(&head);
            let grows = board.food.contains(&new_head);
            let next = advance_body(&body, new_head, grows);
            if is_body_safe(board, &acting.id, &next) {
                advanced = Some((*dir, next));
                break;
            }
        }

        match advanced {
            Some((dir, next)) => {
                heading = dir;
                body = next;
            }
            None => return false,
        }
    }

    true
}

/// Step 0 must play the move under test; later steps prefer the current
/// heading, then the rest of the fixed order.
fn candidate_directions(heading: Direction, first_step: bool) -> Vec<Direction> {
    if first_step {
        return vec![heading];
    }
    let mut dirs = vec![heading];
    for dir in Direction::all().iter() {
        if *dir != heading {
            dirs.push(*dir);
        }
    }
    dirs
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

    fn board_with(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_advance_body_slides() {
        let body = vec![
            Coord { x: 2, y: 2 },
            Coord { x: 2, y: 1 },
            Coord { x: 2, y: 0 },
        ];
        let next = advance_body(&body, Coord { x: 2, y: 3 }, false);
        assert_eq!(
            next,
            vec![
                Coord { x: 2, y: 3 },
                Coord { x: 2, y: 2 },
                Coord { x: 2, y: 1 },
            ]
        );
    }

    #[test]
    fn test_advance_body_grows() {
        let body = vec![Coord { x: 2, y: 2 }, Coord { x: 2, y: 1 }];
        let next = advance_body(&body, Coord { x: 2, y: 3 }, true);
        assert_eq!(
            next,
            vec![
                Coord { x: 2, y: 3 },
                Coord { x: 2, y: 2 },
                Coord { x: 2, y: 1 },
            ]
        );
    }

    #[test]
    fn test_path_growth_only_on_final_step() {
        let body = vec![
            Coord { x: 0, y: 0 },
            Coord { x: 1, y: 0 },
            Coord { x: 2, y: 0 },
        ];
        // Three-step path ending on food
        let path = vec![
            Coord { x: 0, y: 0 },
            Coord { x: 0, y: 1 },
            Coord { x: 0, y: 2 },
            Coord { x: 0, y: 3 },
        ];

        // Replay step by step to watch the intermediate lengths
        let mut current = body.clone();
        for (i, cell) in path.iter().enumerate().skip(1) {
            current = advance_body(&current, *cell, i == path.len() - 1);
            if i < path.len() - 1 {
                assert_eq!(current.len(), body.len());
            }
        }
        assert_eq!(current.len(), body.len() + 1);

        // And the one-shot helper agrees
        let final_body = advance_along_path(&body, &path);
        assert_eq!(final_body, current);
        assert_eq!(final_body[0], Coord { x: 0, y: 3 });
    }

    #[test]
    fn test_body_safe_rejects_off_board_head() {
        let you = snake("you", vec![Coord { x: 0, y: 0 }]);
        let board = board_with(5, 5, vec![you]);
        let body = vec![Coord { x: -1, y: 0 }, Coord { x: 0, y: 0 }];
        assert!(!is_body_safe(&board, "you", &body));
    }

    #[test]
    fn test_body_safe_rejects_other_snake_collision() {
        let you = snake("you", vec![Coord { x: 0, y: 0 }]);
        let rival = snake("rival", vec![Coord { x: 2, y: 0 }, Coord { x: 2, y: 1 }]);
        let board = board_with(5, 5, vec![you, rival]);
        let body = vec![Coord { x: 2, y: 0 }, Coord { x: 1, y: 0 }];
        assert!(!is_body_safe(&board, "you", &body));
    }

    #[test]
    fn test_body_safe_rejects_self_overlap() {
        let you = snake("you", vec![Coord { x: 0, y: 0 }]);
        let board = board_with(5, 5, vec![you]);
        let body = vec![
            Coord { x: 1, y: 1 },
            Coord { x: 1, y: 0 },
            Coord { x: 1, y: 1 },
        ];
        assert!(!is_body_safe(&board, "you", &body));
    }

    #[test]
    fn test_body_safe_accepts_clean_body() {
        let you = snake("you", vec![Coord { x: 0, y: 0 }]);
        let board = board_with(5, 5, vec![you]);
        let body = vec![
            Coord { x: 1, y: 1 },
            Coord { x: 1, y: 0 },
            Coord { x: 0, y: 0 },
        ];
        assert!(is_body_safe(&board, "you", &body));
    }

    #[test]
    fn test_lookahead_survives_open_board() {
        let you = snake(
            "you",
            vec![Coord { x: 5, y: 5 }, Coord { x: 5, y: 4 }, Coord { x: 5, y: 3 }],
        );
        let board = board_with(11, 11, vec![you.clone()]);
        assert!(lookahead_survives(&board, &you, Direction::Up, 5));
        assert!(lookahead_survives(&board, &you, Direction::Left, 8));
    }

    #[test]
    fn test_lookahead_rejects_immediate_wall() {
        let you = snake("you", vec![Coord { x: 0, y: 5 }, Coord { x: 1, y: 5 }]);
        let board = board_with(11, 11, vec![you.clone()]);
        assert!(!lookahead_survives(&board, &you, Direction::Left, 1));
    }

    #[test]
    fn test_lookahead_detects_dead_end_pocket() {
        // Two-cell pocket at the top-left, sealed below by a rival.
        // Entering survives two steps, then every continuation is blocked.
        let you = snake(
            "you",
            vec![
                Coord { x: 2, y: 4 },
                Coord { x: 2, y: 3 },
                Coord { x: 2, y: 2 },
                Coord { x: 2, y: 1 },
            ],
        );
        let rival = snake("rival", vec![Coord { x: 0, y: 3 }, Coord { x: 1, y: 3 }]);
        let board = board_with(5, 5, vec![you.clone(), rival]);

        assert!(lookahead_survives(&board, &you, Direction::Left, 1));
        assert!(lookahead_survives(&board, &you, Direction::Left, 2));
        assert!(!lookahead_survives(&board, &you, Direction::Left, 3));
    }

    #[test]
    fn test_lookahead_failure_is_monotone() {
        // Same pocket as above: once a line fails at k steps it must keep
        // failing for every deeper horizon.
        let you = snake(
            "you",
            vec![
                Coord { x: 2, y: 4 },
                Coord { x: 2, y: 3 },
                Coord { x: 2, y: 2 },
                Coord { x: 2, y: 1 },
            ],
        );
        let rival = snake("rival", vec![Coord { x: 0, y: 3 }, Coord { x: 1, y: 3 }]);
        let board = board_with(5, 5, vec![you.clone(), rival]);

        let mut failed = false;
        for steps in 1..8 {
            let survives = lookahead_survives(&board, &you, Direction::Left, steps);
            if failed {
                assert!(!survives, "failure at a shallower depth must persist");
            }
            if !survives {
                failed = true;
            }
        }
        assert!(failed);
    }

    #[test]
    fn test_lookahead_tail_chase_survives() {
        // A snake filling a 2x2 board can circle its own tail forever:
        // the tail cell vacates exactly when the head arrives.
        let you = snake(
            "you",
            vec![
                Coord { x: 0, y: 0 },
                Coord { x: 1, y: 0 },
                Coord { x: 1, y: 1 },
                Coord { x: 0, y: 1 },
            ],
        );
        let board = board_with(2, 2, vec![you.clone()]);
        assert!(lookahead_survives(&board, &you, Direction::Up, 12));
    }

    #[test]
    fn test_lookahead_grows_on_food() {
        // Same tail chase, but the tail cell holds food: eating keeps the
        // tail in place, so the head lands on a still-occupied cell.
        let you = snake(
            "you",
            vec![
                Coord { x: 0, y: 0 },
                Coord { x: 1, y: 0 },
                Coord { x: 1, y: 1 },
                Coord { x: 0, y: 1 },
            ],
        );
        let mut board = board_with(2, 2, vec![you.clone()]);
        board.food = vec![Coord { x: 0, y: 1 }];
        assert!(!lookahead_survives(&board, &you, Direction::Up, 1));
    }
}
