//! Move Engine Tests
//!
//! Scenario tests for the per-turn decision plus sampled checks over
//! generated boards: never leave the board, never reverse onto the neck,
//! never step onto an occupied cell while any safe move exists.

use bumblebee_snake::decide;
use bumblebee_snake::engine::{evaluate, DecisionReason, FALLBACK_DIRECTION};
use bumblebee_snake::types::{Battlesnake, Board, Coord, Direction, TurnSnapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn coords(cells: &[(i32, i32)]) -> Vec<Coord> {
    cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
}

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body = coords(body);
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

fn board(
    width: i32,
    height: i32,
    snakes: Vec<Battlesnake>,
    food: &[(i32, i32)],
    hazards: &[(i32, i32)],
) -> Board {
    Board {
        width,
        height,
        food: coords(food),
        snakes,
        hazards: coords(hazards),
    }
}

fn seeded() -> StdRng {
    StdRng::seed_from_u64(0xB33)
}

#[test]
fn test_aligned_food_above_moves_up() {
    let you = snake("me", &[(5, 5), (5, 4), (5, 3)]);
    let board = board(11, 11, vec![you.clone()], &[(5, 8)], &[]);

    let dir = decide(&TurnSnapshot::new(10, &board, &you), &mut seeded());
    assert_eq!(dir, Direction::Up);
}

#[test]
fn test_left_wall_with_food_to_the_right_moves_right() {
    // Left is off the board, the neck is below, food is straight right
    let you = snake("me", &[(0, 5), (0, 4), (0, 3)]);
    let board = board(11, 11, vec![you.clone()], &[(10, 5)], &[]);

    let decision = evaluate(&TurnSnapshot::new(3, &board, &you), &mut seeded());
    assert!(!decision.safety.is_safe(Direction::Left));
    assert!(!decision.safety.is_safe(Direction::Down));
    assert_eq!(decision.direction, Direction::Right);
    assert_eq!(decision.reason, DecisionReason::TowardFood);
}

#[test]
fn test_food_straight_through_neck_is_never_chased() {
    // Head on the left wall with the neck to its right: food lies straight
    // right, but stepping right reverses onto the neck
    let you = snake("me", &[(0, 5), (1, 5), (2, 5)]);
    let board = board(11, 11, vec![you.clone()], &[(10, 5)], &[]);

    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = evaluate(&TurnSnapshot::new(3, &board, &you), &mut rng);
        assert_eq!(decision.reason, DecisionReason::TargetUnsafe);
        assert!(
            decision.direction == Direction::Up || decision.direction == Direction::Down,
            "seed {} chose {}",
            seed,
            decision.direction
        );
    }
}

#[test]
fn test_surrounded_returns_down_regardless_of_food_and_hazards() {
    let you = snake("me", &[(5, 5), (5, 4), (5, 3)]);
    let left = snake("left", &[(4, 5), (3, 5)]);
    let right = snake("right", &[(6, 5), (7, 5)]);
    let top = snake("top", &[(5, 7), (5, 6)]);
    let board = board(
        11,
        11,
        vec![you.clone(), left, right, top],
        &[(5, 10), (0, 5)],
        &[(2, 2)],
    );

    let decision = evaluate(&TurnSnapshot::new(50, &board, &you), &mut seeded());
    assert_eq!(decision.direction, FALLBACK_DIRECTION);
    assert_eq!(decision.direction, Direction::Down);
    assert_eq!(decision.reason, DecisionReason::NoSafeMoves);
}

#[test]
fn test_surrounded_in_corner_still_returns_down() {
    // Down is off the board here; the fallback does not care
    let you = snake("me", &[(0, 0), (1, 0), (1, 1), (0, 1)]);
    let board = board(11, 11, vec![you.clone()], &[(0, 5)], &[]);

    let dir = decide(&TurnSnapshot::new(1, &board, &you), &mut seeded());
    assert_eq!(dir, Direction::Down);
}

#[test]
fn test_equidistant_food_first_in_list_wins() {
    // Neck to the left leaves both up and down open
    let you = snake("me", &[(5, 5), (4, 5), (3, 5)]);

    let board_up_first = board(11, 11, vec![you.clone()], &[(5, 6), (5, 4)], &[]);
    let dir = decide(&TurnSnapshot::new(0, &board_up_first, &you), &mut seeded());
    assert_eq!(dir, Direction::Up);

    let board_down_first = board(11, 11, vec![you.clone()], &[(5, 4), (5, 6)], &[]);
    let dir = decide(&TurnSnapshot::new(0, &board_down_first, &you), &mut seeded());
    assert_eq!(dir, Direction::Down);
}

#[test]
fn test_hazard_between_head_and_food_blocks_when_outside_hazard() {
    let you = snake("me", &[(5, 5), (5, 4), (5, 3)]);
    let board = board(11, 11, vec![you.clone()], &[(5, 8)], &[(5, 6)]);

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = evaluate(&TurnSnapshot::new(0, &board, &you), &mut rng);
        assert_eq!(decision.reason, DecisionReason::TargetUnsafe);
        assert!(!decision.safety.is_safe(Direction::Up));
        assert_ne!(decision.direction, Direction::Up);
    }
}

#[test]
fn test_hazard_ignored_when_already_standing_in_hazard() {
    let you = snake("me", &[(5, 5), (5, 4), (5, 3)]);
    let board = board(11, 11, vec![you.clone()], &[(5, 8)], &[(5, 5), (5, 6)]);

    let decision = evaluate(&TurnSnapshot::new(0, &board, &you), &mut seeded());
    assert!(decision.safety.is_safe(Direction::Up));
    assert_eq!(decision.direction, Direction::Up);
    assert_eq!(decision.reason, DecisionReason::TowardFood);
}

#[test]
fn test_hazards_alone_can_force_the_fallback() {
    let you = snake("me", &[(5, 5), (5, 4), (5, 3)]);
    let board = board(11, 11, vec![you.clone()], &[], &[(4, 5), (6, 5), (5, 6)]);

    let decision = evaluate(&TurnSnapshot::new(0, &board, &you), &mut seeded());
    assert_eq!(decision.reason, DecisionReason::NoSafeMoves);
    assert_eq!(decision.direction, Direction::Down);
}

#[test]
fn test_same_seed_same_move() {
    let you = snake("me", &[(5, 5), (5, 4), (5, 3)]);
    let board = board(11, 11, vec![you.clone()], &[], &[]);
    let snapshot = TurnSnapshot::new(7, &board, &you);

    for seed in 0..64 {
        let first = decide(&snapshot, &mut StdRng::seed_from_u64(seed));
        let second = decide(&snapshot, &mut StdRng::seed_from_u64(seed));
        assert_eq!(first, second, "seed {} disagreed", seed);
    }
}

#[test]
fn test_random_fallback_reaches_every_safe_move() {
    let you = snake("me", &[(5, 5), (5, 4), (5, 3)]);
    let board = board(11, 11, vec![you.clone()], &[], &[]);
    let snapshot = TurnSnapshot::new(0, &board, &you);

    let mut rng = seeded();
    let mut seen = Vec::new();
    for _ in 0..200 {
        let dir = decide(&snapshot, &mut rng);
        if !seen.contains(&dir) {
            seen.push(dir);
        }
    }

    seen.sort_by_key(|d| d.as_str());
    assert_eq!(seen, vec![Direction::Left, Direction::Right, Direction::Up]);
}

fn random_body(rng: &mut StdRng, width: i32, height: i32, len: usize) -> Vec<Coord> {
    let mut body = vec![Coord::new(rng.random_range(0..width), rng.random_range(0..height))];
    while body.len() < len {
        let last = body[body.len() - 1];
        let next = Direction::all()[rng.random_range(0..4)].apply(&last);
        if next.x >= 0 && next.x < width && next.y >= 0 && next.y < height {
            body.push(next);
        }
    }
    body
}

fn random_snake(rng: &mut StdRng, id: &str, width: i32, height: i32) -> Battlesnake {
    let len = rng.random_range(2..8);
    let body = random_body(rng, width, height, len);
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: rng.random_range(1..=100),
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

#[test]
fn test_generated_boards_never_choose_an_unsafe_move_when_a_safe_one_exists() {
    let mut rng = StdRng::seed_from_u64(2025);

    for round in 0..500 {
        let width = rng.random_range(3..=12);
        let height = rng.random_range(3..=12);

        let you = random_snake(&mut rng, "me", width, height);
        let mut snakes = vec![you.clone()];
        for i in 0..rng.random_range(0..4) {
            snakes.push(random_snake(&mut rng, &format!("enemy-{}", i), width, height));
        }

        let food: Vec<Coord> = (0..rng.random_range(0..4))
            .map(|_| Coord::new(rng.random_range(0..width), rng.random_range(0..height)))
            .collect();
        let hazards: Vec<Coord> = (0..rng.random_range(0..6))
            .map(|_| Coord::new(rng.random_range(0..width), rng.random_range(0..height)))
            .collect();

        let board = Board {
            width,
            height,
            food,
            snakes,
            hazards,
        };
        let snapshot = TurnSnapshot::new(round, &board, &you);
        let decision = evaluate(&snapshot, &mut rng);

        if decision.reason == DecisionReason::NoSafeMoves {
            assert_eq!(decision.direction, Direction::Down);
            continue;
        }

        let next = decision.direction.apply(&you.head);
        assert!(
            !board.is_out_of_bounds(&next),
            "round {}: {} from {} leaves a {}x{} board",
            round,
            decision.direction,
            you.head,
            width,
            height
        );
        assert_ne!(Some(next), you.neck(), "round {}: reversed onto neck", round);
        for s in &board.snakes {
            assert!(
                !s.body.contains(&next) && s.head != next,
                "round {}: {} runs into {}",
                round,
                decision.direction,
                s.id
            );
        }
        if !board.hazards.contains(&you.head) {
            assert!(!board.hazards.contains(&next), "round {}: walked into hazard", round);
        }
    }
}
