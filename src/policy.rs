// Turn policy
//
// Composes the classifier, planner, reachability engine, and simulator
// into one move per turn. The phase is re-selected from scratch every
// turn; nothing is remembered between requests, so the decision is a pure
// function of (snapshot, config, seed).
//
// Phase priority, first match wins: Trap > FillSpace > Defensive >
// Aggressive > Hungry. A phase that cannot produce a move falls through
// toward Hungry, and below that sits the terminal fallback chain, which
// always yields a move.

use std::collections::HashSet;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

use crate::config::{Config, PolicyConfig};
use crate::flood;
use crate::grid;
use crate::pathfind::{self, PathMap};
use crate::profiler::{Stage, StageGuard};
use crate::safety;
use crate::sim;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Behavioral mode selected each turn from current board conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hungry,
    Defensive,
    Aggressive,
    FillSpace,
    Trap,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Hungry => "hungry",
            Phase::Defensive => "defensive",
            Phase::Aggressive => "aggressive",
            Phase::FillSpace => "fill_space",
            Phase::Trap => "trap",
        }
    }
}

/// The outcome of one turn decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub phase: Phase,
}

/// Scored route to one food cell, built fresh each turn
struct FoodCandidate {
    target: Coord,
    first_step: Coord,
    distance: u32,
    area: usize,
}

/// Computes the move for this turn. Total: always returns exactly one
/// direction, even when boxed in on a degenerate board.
pub fn decide(board: &Board, you: &Battlesnake, config: &Config, rng: &mut StdRng) -> Decision {
    let _guard = StageGuard::new(Stage::Policy);

    let pc = &config.policy;
    let phase = select_phase(board, you, pc);
    let safe = safety::safe_moves(board, you);

    let mut chosen: Option<Direction> = None;
    for fallback_phase in phase_sequence(phase).iter() {
        chosen = match fallback_phase {
            Phase::Trap => trap_move(board, you, &safe),
            Phase::FillSpace => fill_space_move(board, you, &safe),
            Phase::Defensive => defensive_move(board, you, pc, &safe),
            Phase::Aggressive => aggressive_move(board, you, &safe),
            Phase::Hungry => hungry_move(board, you, pc, rng),
        };
        if chosen.is_some() {
            break;
        }
    }

    // Safety/space fallback: with no phase target, take the first safe
    // move and let the post-checks steer it.
    if let Some(direction) = chosen.or_else(|| safe.first().copied()) {
        let direction = ensure_space(board, you, direction, &safe);
        let direction = ensure_lookahead(board, you, direction, &safe, pc.lookahead_steps);
        return Decision { direction, phase };
    }

    // Boxed in: prefer a merely-legal move, else the configured default.
    // The snake is lost either way; determinism is what matters here.
    let direction = safety::legal_moves(board, you)
        .first()
        .copied()
        .unwrap_or_else(|| pc.fallback_direction());
    Decision { direction, phase }
}

/// Selects the behavioral phase from current board conditions.
/// Priority order, first match wins.
pub fn select_phase(board: &Board, you: &Battlesnake, pc: &PolicyConfig) -> Phase {
    let rivals = live_rivals(board, you);

    if rivals.len() == 1 && you.length >= pc.trap_min_length {
        let opponent = rivals[0];
        if grid::edge_distance(board, opponent.head) <= pc.trap_edge_distance {
            return Phase::Trap;
        }
    }

    if you.length >= pc.fill_space_min_length {
        return Phase::FillSpace;
    }

    let nearby =
        |rival: &Battlesnake| grid::manhattan(rival.head, you.head) <= pc.alert_radius;

    if rivals.iter().any(|r| nearby(r) && r.length >= you.length) {
        return Phase::Defensive;
    }

    if you.length >= pc.attack_min_length
        && rivals.iter().any(|r| nearby(r) && r.length < you.length)
    {
        return Phase::Aggressive;
    }

    Phase::Hungry
}

/// Fall-through order when a phase produces no move. Trap falls straight
/// to food-seeking; Defensive may degrade into Aggressive first.
fn phase_sequence(phase: Phase) -> &'static [Phase] {
    match phase {
        Phase::Trap => &[Phase::Trap, Phase::Hungry],
        Phase::FillSpace => &[Phase::FillSpace, Phase::Hungry],
        Phase::Defensive => &[Phase::Defensive, Phase::Aggressive, Phase::Hungry],
        Phase::Aggressive => &[Phase::Aggressive, Phase::Hungry],
        Phase::Hungry => &[Phase::Hungry],
    }
}

/// Hungry: route to the best surviving food candidate.
///
/// Every reachable food is scored in parallel; a candidate is rejected
/// when eating it would strand the snake (post-eat reachable area smaller
/// than the post-eat body) or when an equal-or-larger rival reaches it at
/// least as fast — unless health is desperate, in which case contested
/// food is taken anyway.
fn hungry_move(
    board: &Board,
    you: &Battlesnake,
    pc: &PolicyConfig,
    rng: &mut StdRng,
) -> Option<Direction> {
    if board.food.is_empty() {
        return None;
    }

    let paths = pathfind::shortest_paths(board, you, you.head);
    let rival_paths: Vec<PathMap> = live_rivals(board, you)
        .into_iter()
        .filter(|rival| rival.length >= you.length)
        .map(|rival| pathfind::shortest_paths(board, rival, rival.head))
        .collect();
    let desperate = you.health < pc.desperate_health;

    let mut candidates: Vec<FoodCandidate> = board
        .food
        .par_iter()
        .filter_map(|&food| {
            let path = paths.path_to(food)?;
            if path.len() < 2 {
                return None;
            }
            let distance = (path.len() - 1) as u32;

            if !desperate {
                let contested = rival_paths
                    .iter()
                    .filter_map(|map| map.distance_to(food))
                    .any(|rival_distance| rival_distance <= distance);
                if contested {
                    return None;
                }
            }

            let eaten_body = sim::advance_along_path(&you.body, &path);
            let area = area_for_body(board, you, &eaten_body);
            if area < eaten_body.len() {
                return None;
            }

            Some(FoodCandidate {
                target: food,
                first_step: path[1],
                distance,
                area,
            })
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    if pc.shuffle_equal_candidates {
        candidates.shuffle(rng);
    }
    // Stable sort: equal (distance, area) candidates keep their food-list
    // (or shuffled) order.
    candidates.sort_by(|a, b| a.distance.cmp(&b.distance).then(b.area.cmp(&a.area)));

    let best = &candidates[0];
    debug!(
        "hungry: food {:?} at distance {} leaves area {}",
        best.target, best.distance, best.area
    );
    grid::step_between(you.head, best.first_step)
}

/// Defensive: step along the sum of unit directions away from each
/// nearby equal-or-larger rival head.
fn defensive_move(
    board: &Board,
    you: &Battlesnake,
    pc: &PolicyConfig,
    safe: &[Direction],
) -> Option<Direction> {
    let threats: Vec<&Battlesnake> = live_rivals(board, you)
        .into_iter()
        .filter(|rival| {
            rival.length >= you.length
                && grid::manhattan(rival.head, you.head) <= pc.alert_radius
        })
        .collect();
    if threats.is_empty() {
        return None;
    }

    let away_x: i32 = threats.iter().map(|t| (you.head.x - t.head.x).signum()).sum();
    let away_y: i32 = threats.iter().map(|t| (you.head.y - t.head.y).signum()).sum();
    if away_x == 0 && away_y == 0 {
        return None;
    }

    best_scoring_move(safe, |dir| {
        let next = dir.apply(&you.head);
        ((next.x - you.head.x) * away_x + (next.y - you.head.y) * away_y) as i64
    })
}

/// Aggressive: close the Manhattan distance to the nearest strictly
/// smaller rival's head.
fn aggressive_move(board: &Board, you: &Battlesnake, safe: &[Direction]) -> Option<Direction> {
    let mut target: Option<(&Battlesnake, i32)> = None;
    for rival in live_rivals(board, you) {
        if rival.length >= you.length {
            continue;
        }
        let dist = grid::manhattan(rival.head, you.head);
        let closer = match target {
            Some((_, best)) => dist < best,
            None => true,
        };
        if closer {
            target = Some((rival, dist));
        }
    }
    let (prey, _) = target?;

    best_scoring_move(safe, |dir| {
        -(grid::manhattan(dir.apply(&you.head), prey.head) as i64)
    })
}

/// FillSpace: keep the most room open after the move
fn fill_space_move(board: &Board, you: &Battlesnake, safe: &[Direction]) -> Option<Direction> {
    best_scoring_move(safe, |dir| post_move_area(board, you, dir) as i64)
}

/// Trap: occupy one of the 1v1 opponent's remaining open next cells,
/// shrinking its move set. Exits are judged on occupancy alone — the
/// whole point is to become the head-to-head threat on that cell.
/// Nothing to occupy → fall through to Hungry.
fn trap_move(board: &Board, you: &Battlesnake, safe: &[Direction]) -> Option<Direction> {
    let rivals = live_rivals(board, you);
    if rivals.len() != 1 {
        return None;
    }
    let opponent = rivals[0];

    let exits: Vec<Coord> = grid::adjacent(opponent.head)
        .iter()
        .copied()
        .filter(|cell| safety::is_open_cell(board, *cell))
        .collect();

    safe.iter()
        .copied()
        .find(|dir| exits.contains(&dir.apply(&you.head)))
}

/// Wall/corridor check: a move must leave at least body-length cells
/// reachable. When the chosen move fails, the first safe alternative that
/// meets the requirement wins; when none does, the original stands.
fn ensure_space(
    board: &Board,
    you: &Battlesnake,
    chosen: Direction,
    safe: &[Direction],
) -> Direction {
    let needed = you.length.max(0) as usize;
    if post_move_area(board, you, chosen) >= needed {
        return chosen;
    }
    safe.iter()
        .copied()
        .find(|&dir| dir != chosen && post_move_area(board, you, dir) >= needed)
        .unwrap_or(chosen)
}

/// Lookahead check: reject moves that die within the configured horizon.
/// When every safe move fails the horizon, the original choice stands —
/// better to have a move than none.
fn ensure_lookahead(
    board: &Board,
    you: &Battlesnake,
    chosen: Direction,
    safe: &[Direction],
    steps: u32,
) -> Direction {
    if steps == 0 || sim::lookahead_survives(board, you, chosen, steps) {
        return chosen;
    }
    safe.iter()
        .copied()
        .find(|&dir| dir != chosen && sim::lookahead_survives(board, you, dir, steps))
        .unwrap_or(chosen)
}

fn live_rivals<'a>(board: &'a Board, you: &Battlesnake) -> Vec<&'a Battlesnake> {
    board
        .snakes
        .iter()
        .filter(|snake| snake.id != you.id && snake.health > 0)
        .collect()
}

/// First strict maximum over the fixed-order move list: deterministic
/// tie-break without sorting.
fn best_scoring_move<F>(moves: &[Direction], mut score: F) -> Option<Direction>
where
    F: FnMut(Direction) -> i64,
{
    let mut best: Option<(Direction, i64)> = None;
    for &dir in moves {
        let value = score(dir);
        let better = match best {
            Some((_, incumbent)) => value > incumbent,
            None => true,
        };
        if better {
            best = Some((dir, value));
        }
    }
    best.map(|(dir, _)| dir)
}

/// Reachable area from a hypothetical post-move head, with the simulated
/// own body and every rival body as obstacles
fn post_move_area(board: &Board, you: &Battlesnake, dir: Direction) -> usize {
    let new_head = dir.apply(&you.head);
    let grows = board.food.contains(&new_head);
    let body = sim::advance_body(&you.body, new_head, grows);
    area_for_body(board, you, &body)
}

fn area_for_body(board: &Board, you: &Battlesnake, body: &[Coord]) -> usize {
    let head = match body.first() {
        Some(&head) => head,
        None => return 0,
    };

    let mut obstacles: HashSet<Coord> = body.iter().skip(1).copied().collect();
    for snake in &board.snakes {
        if snake.health <= 0 || snake.id == you.id {
            continue;
        }
        obstacles.extend(snake.body.iter().copied());
    }

    flood::reachable_area(board, &obstacles, head)
}
