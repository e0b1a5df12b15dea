// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    pub ruleset: HashMap<String, Value>,
    pub timeout: u32,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    pub latency: String,
    pub shout: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions in the fixed tie-break order used everywhere
    /// downstream: Up, Down, Left, Right.
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_apply() {
        let origin = Coord { x: 3, y: 3 };
        assert_eq!(Direction::Up.apply(&origin), Coord { x: 3, y: 4 });
        assert_eq!(Direction::Down.apply(&origin), Coord { x: 3, y: 2 });
        assert_eq!(Direction::Left.apply(&origin), Coord { x: 2, y: 3 });
        assert_eq!(Direction::Right.apply(&origin), Coord { x: 4, y: 3 });
    }

    #[test]
    fn test_direction_order_is_stable() {
        // Downstream tie-breaks depend on this exact order
        let all = Direction::all();
        assert_eq!(all[0], Direction::Up);
        assert_eq!(all[1], Direction::Down);
        assert_eq!(all[2], Direction::Left);
        assert_eq!(all[3], Direction::Right);
    }

    #[test]
    fn test_direction_as_str() {
        assert_eq!(Direction::Up.as_str(), "up");
        assert_eq!(Direction::Down.as_str(), "down");
        assert_eq!(Direction::Left.as_str(), "left");
        assert_eq!(Direction::Right.as_str(), "right");
    }

    #[test]
    fn test_game_state_deserializes_from_api_payload() {
        let payload = r#"{
            "game": {"id": "g1", "ruleset": {"name": "standard"}, "timeout": 500},
            "turn": 12,
            "board": {
                "height": 11,
                "width": 11,
                "food": [{"x": 5, "y": 5}],
                "snakes": [{
                    "id": "s1",
                    "name": "cardinal",
                    "health": 90,
                    "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}],
                    "head": {"x": 1, "y": 1},
                    "length": 2,
                    "latency": "21",
                    "shout": null
                }],
                "hazards": []
            },
            "you": {
                "id": "s1",
                "name": "cardinal",
                "health": 90,
                "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}],
                "head": {"x": 1, "y": 1},
                "length": 2,
                "latency": "21",
                "shout": null
            }
        }"#;

        let state: GameState = serde_json::from_str(payload).unwrap();
        assert_eq!(state.turn, 12);
        assert_eq!(state.board.width, 11);
        assert_eq!(state.you.body.len(), 2);
        assert_eq!(state.you.head, state.you.body[0]);
    }
}
