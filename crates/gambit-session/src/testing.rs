//! A deterministic rules engine for unit tests.

use gambit_protocol::MoveDescriptor;
use gambit_rules::{IllegalMove, MoveOutcome, RulesEngine, Side};
use serde_json::Value;

/// Accepts any string move except `"bad"`, and alternates sides.
///
/// The position is `"start"` before any move, then the played moves
/// joined by commas.
#[derive(Debug, Default)]
pub(crate) struct ScriptedEngine {
    moves: Vec<String>,
}

impl RulesEngine for ScriptedEngine {
    fn new_game() -> Self {
        Self::default()
    }

    fn side_to_move(&self) -> Side {
        if self.moves.len() % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    fn play(&mut self, mv: &MoveDescriptor) -> MoveOutcome {
        match mv.as_value() {
            Value::String(text) if text == "bad" => {
                MoveOutcome::Illegal(IllegalMove::NotLegal(text.clone()))
            }
            Value::String(text) => {
                self.moves.push(text.clone());
                MoveOutcome::Applied
            }
            other => MoveOutcome::Illegal(IllegalMove::Malformed(other.to_string())),
        }
    }

    fn position(&self) -> String {
        if self.moves.is_empty() {
            "start".to_owned()
        } else {
            self.moves.join(",")
        }
    }
}
