// Move decision engine
//
// One call per turn, no state carried between calls. The only
// non-determinism is the random pick among safe moves, and the caller
// supplies the random source for that.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::safety::{apply_hazard_filter, evaluate_safety, SafetyMap};
use crate::targeting::{nearest_food, resolve_direction};
use crate::types::{Coord, Direction, TurnSnapshot};

/// Returned when nothing is safe. Knowingly unsafe.
pub const FALLBACK_DIRECTION: Direction = Direction::Down;

/// Why the engine picked the move it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// No direction was safe; returned FALLBACK_DIRECTION
    NoSafeMoves,
    /// Nearest food lies straight ahead in a safe direction
    TowardFood,
    /// Board has no food; random safe move
    NoFood,
    /// Nearest food is not in line with the head; random safe move
    TargetUnaligned,
    /// Nearest food is in line but that direction is unsafe; random safe move
    TargetUnsafe,
}

impl DecisionReason {
    /// True when the same snapshot always produces the same move
    pub fn is_deterministic(&self) -> bool {
        matches!(self, DecisionReason::NoSafeMoves | DecisionReason::TowardFood)
    }
}

/// Full result of one decision, for logging and replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub reason: DecisionReason,
    pub safety: SafetyMap,
    pub target: Option<Coord>,
}

impl Decision {
    pub fn safe_directions(&self) -> Vec<Direction> {
        self.safety.safe_directions()
    }
}

/// Picks this turn's move
pub fn decide<R: Rng>(snapshot: &TurnSnapshot, rng: &mut R) -> Direction {
    evaluate(snapshot, rng).direction
}

/// Picks this turn's move and reports how it got there
pub fn evaluate<R: Rng>(snapshot: &TurnSnapshot, rng: &mut R) -> Decision {
    let mut safety = evaluate_safety(snapshot);
    apply_hazard_filter(snapshot, &mut safety);

    let safe_moves = safety.safe_directions();
    debug!(
        "Turn {}: safe moves {:?}",
        snapshot.turn,
        safe_moves.iter().map(|d| d.as_str()).collect::<Vec<_>>()
    );

    if safe_moves.is_empty() {
        warn!(
            "Turn {}: No safe moves detected! Moving {}",
            snapshot.turn, FALLBACK_DIRECTION
        );
        return Decision {
            direction: FALLBACK_DIRECTION,
            reason: DecisionReason::NoSafeMoves,
            safety,
            target: None,
        };
    }

    let head = snapshot.you.head;
    let target = nearest_food(&head, &snapshot.board.food);

    let reason = match target {
        None => DecisionReason::NoFood,
        Some(food) => {
            debug!("Turn {}: nearest food {}", snapshot.turn, food);
            match resolve_direction(&head, &food) {
                Some(dir) if safety.is_safe(dir) => {
                    return Decision {
                        direction: dir,
                        reason: DecisionReason::TowardFood,
                        safety,
                        target,
                    };
                }
                Some(dir) => {
                    debug!("Turn {}: food is {} but that is unsafe", snapshot.turn, dir);
                    DecisionReason::TargetUnsafe
                }
                None => DecisionReason::TargetUnaligned,
            }
        }
    };

    let direction = safe_moves[rng.random_range(0..safe_moves.len())];

    Decision {
        direction,
        reason,
        safety,
        target,
    }
}
