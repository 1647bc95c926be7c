// Per-turn move safety
//
// Builds a SafetyMap for the four directions out of the current head:
// - never step back onto the neck
// - never leave the board
// - never step onto a cell occupied by any snake right now
// and, unless we are already standing in one, never step into a hazard.

use log::debug;

use crate::types::{Coord, Direction, TurnSnapshot};

/// One flag per direction. Starts all-safe; rules only ever clear flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyMap {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl SafetyMap {
    pub fn all_safe() -> Self {
        SafetyMap {
            up: true,
            down: true,
            left: true,
            right: true,
        }
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn mark_unsafe(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
    }

    /// Safe directions in `Direction::all()` order
    pub fn safe_directions(&self) -> Vec<Direction> {
        Direction::all()
            .into_iter()
            .filter(|&dir| self.is_safe(dir))
            .collect()
    }

    pub fn any_safe(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Clears every direction whose neighbouring cell is in `cells`
    fn exclude_adjacent(&mut self, head: &Coord, cells: &[Coord]) {
        for dir in Direction::all() {
            if cells.contains(&dir.apply(head)) {
                self.mark_unsafe(dir);
            }
        }
    }
}

/// Runs the neck, boundary and occupancy rules for `you`
pub fn evaluate_safety(snapshot: &TurnSnapshot) -> SafetyMap {
    let mut safety = SafetyMap::all_safe();
    let you = snapshot.you;
    let head = you.head;

    match you.neck() {
        Some(neck) => {
            if let Some(back) = direction_toward_neck(&head, &neck) {
                safety.mark_unsafe(back);
            }
        }
        None => debug!(
            "Turn {}: body has {} segment(s), skipping neck check",
            snapshot.turn,
            you.body.len()
        ),
    }

    for dir in Direction::all() {
        if snapshot.board.is_out_of_bounds(&dir.apply(&head)) {
            safety.mark_unsafe(dir);
        }
    }

    safety.exclude_adjacent(&head, &you.body);
    for opponent in snapshot.opponents() {
        safety.exclude_adjacent(&head, std::slice::from_ref(&opponent.head));
        safety.exclude_adjacent(&head, &opponent.body);
    }

    safety
}

/// Clears directions that step into a hazard, unless the head is already on one
pub fn apply_hazard_filter(snapshot: &TurnSnapshot, safety: &mut SafetyMap) {
    let head = snapshot.you.head;
    let hazards = &snapshot.board.hazards;

    if hazards.contains(&head) {
        debug!(
            "Turn {}: head {} already in hazard, not filtering hazards",
            snapshot.turn, head
        );
        return;
    }

    safety.exclude_adjacent(&head, hazards);
}

/// The direction that would move the head back toward its neck.
/// A neck stacked on the head (start of game) has no such direction.
fn direction_toward_neck(head: &Coord, neck: &Coord) -> Option<Direction> {
    if neck.x < head.x {
        Some(Direction::Left)
    } else if neck.x > head.x {
        Some(Direction::Right)
    } else if neck.y < head.y {
        Some(Direction::Down)
    } else if neck.y > head.y {
        Some(Direction::Up)
    } else {
        None
    }
}
