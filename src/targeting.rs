// Food targeting: which food to go for, and whether one step gets us lined up on it

use crate::types::{Coord, Direction};

/// Closest food to `head` by straight-line distance.
/// Ties go to whichever food appears first in `food`.
pub fn nearest_food(head: &Coord, food: &[Coord]) -> Option<Coord> {
    let mut closest: Option<(Coord, i64)> = None;

    for candidate in food {
        let dist = head.distance_squared(candidate);
        match closest {
            Some((_, best)) if dist >= best => {}
            _ => closest = Some((*candidate, dist)),
        }
    }

    closest.map(|(coord, _)| coord)
}

/// Direction from `head` to `target` when they share a row or column.
/// Diagonal targets, and a target on the head itself, resolve to `None`.
pub fn resolve_direction(head: &Coord, target: &Coord) -> Option<Direction> {
    let dx = target.x - head.x;
    let dy = target.y - head.y;

    match (dx, dy) {
        (0, dy) if dy > 0 => Some(Direction::Up),
        (0, dy) if dy < 0 => Some(Direction::Down),
        (dx, 0) if dx < 0 => Some(Direction::Left),
        (dx, 0) if dx > 0 => Some(Direction::Right),
        _ => None,
    }
}
