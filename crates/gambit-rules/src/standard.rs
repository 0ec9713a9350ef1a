//! Standard chess, backed by `shakmaty`.

use gambit_protocol::MoveDescriptor;
use serde_json::Value;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};

use crate::{IllegalMove, MoveOutcome, RulesEngine, Side};

/// A FEN string that does not describe a playable position.
#[derive(Debug, thiserror::Error)]
#[error("invalid position {fen:?}: {reason}")]
pub struct InvalidPosition {
    fen: String,
    reason: String,
}

/// Standard chess rules.
///
/// Accepted move descriptors:
///
/// - `{"from": "e7", "to": "e8", "promotion": "q"}` (`promotion` optional)
/// - a UCI string: `"e2e4"`, `"e7e8q"`
/// - a SAN string: `"e4"`, `"Nf3"`, `"O-O"`, `"exd5"`
///
/// Anything else is [`IllegalMove::Malformed`].
#[derive(Debug, Clone, Default)]
pub struct StandardChess {
    position: Chess,
}

impl StandardChess {
    /// Starts from an arbitrary position instead of the initial one.
    pub fn from_fen(fen: &str) -> Result<Self, InvalidPosition> {
        let invalid = |reason: String| InvalidPosition {
            fen: fen.to_owned(),
            reason,
        };
        let parsed: Fen = fen.parse().map_err(|e| invalid(format!("{e}")))?;
        let position = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Self { position })
    }

    fn resolve(&self, mv: &MoveDescriptor) -> Result<Move, IllegalMove> {
        match mv.as_value() {
            Value::String(text) => self.resolve_notation(text),
            Value::Object(fields) => {
                let square = |name: &str| {
                    fields.get(name).and_then(Value::as_str).ok_or_else(|| {
                        IllegalMove::Malformed(format!("missing `{name}` square"))
                    })
                };
                let from = square("from")?;
                let to = square("to")?;
                let promotion = match fields.get("promotion") {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(piece)) => piece.to_ascii_lowercase(),
                    Some(other) => {
                        return Err(IllegalMove::Malformed(format!(
                            "`promotion` must be a piece letter, got {other}"
                        )));
                    }
                };
                self.resolve_uci(&format!("{from}{to}{promotion}"))
            }
            other => Err(IllegalMove::Malformed(format!(
                "expected a move string or a from/to object, got {other}"
            ))),
        }
    }

    /// Tries UCI, then SAN.
    fn resolve_notation(&self, text: &str) -> Result<Move, IllegalMove> {
        if text.parse::<UciMove>().is_ok() {
            return self.resolve_uci(text);
        }
        // SanPlus tolerates a trailing `+` or `#`.
        let san: SanPlus = text
            .parse()
            .map_err(|e| IllegalMove::Malformed(format!("{text:?}: {e}")))?;
        san.san
            .to_move(&self.position)
            .map_err(|e| IllegalMove::NotLegal(format!("{text}: {e}")))
    }

    fn resolve_uci(&self, text: &str) -> Result<Move, IllegalMove> {
        let uci: UciMove = text
            .parse()
            .map_err(|e| IllegalMove::Malformed(format!("{text:?}: {e}")))?;
        uci.to_move(&self.position)
            .map_err(|e| IllegalMove::NotLegal(format!("{text}: {e}")))
    }
}

impl RulesEngine for StandardChess {
    fn new_game() -> Self {
        Self::default()
    }

    fn side_to_move(&self) -> Side {
        match self.position.turn() {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }

    fn play(&mut self, mv: &MoveDescriptor) -> MoveOutcome {
        match self.resolve(mv) {
            // `to_move` only yields moves that are legal here.
            Ok(legal) => {
                self.position.play_unchecked(&legal);
                MoveOutcome::Applied
            }
            Err(reason) => MoveOutcome::Illegal(reason),
        }
    }

    fn position(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

    fn mv(value: Value) -> MoveDescriptor {
        MoveDescriptor::new(value)
    }

    #[test]
    fn test_new_game_is_standard_start() {
        let game = StandardChess::new_game();
        assert_eq!(game.position(), START);
        assert_eq!(game.side_to_move(), Side::White);
    }

    #[test]
    fn test_object_descriptor_plays_move() {
        let mut game = StandardChess::new_game();
        let outcome = game.play(&mv(json!({"from": "e2", "to": "e4"})));
        assert_eq!(outcome, MoveOutcome::Applied);
        assert_eq!(game.position(), AFTER_E4);
        assert_eq!(game.side_to_move(), Side::Black);
    }

    #[test]
    fn test_uci_and_san_strings_reach_same_position() {
        let mut by_uci = StandardChess::new_game();
        let mut by_san = StandardChess::new_game();
        assert!(by_uci.play(&mv(json!("e2e4"))).is_applied());
        assert!(by_san.play(&mv(json!("e4"))).is_applied());
        assert_eq!(by_uci.position(), AFTER_E4);
        assert_eq!(by_san.position(), AFTER_E4);
    }

    #[test]
    fn test_null_promotion_is_ignored() {
        let mut game = StandardChess::new_game();
        let outcome = game.play(&mv(json!({"from": "g1", "to": "f3", "promotion": null})));
        assert!(outcome.is_applied());
    }

    #[test]
    fn test_illegal_move_leaves_position_untouched() {
        let mut game = StandardChess::new_game();
        let outcome = game.play(&mv(json!({"from": "e2", "to": "e5"})));
        assert!(matches!(outcome, MoveOutcome::Illegal(IllegalMove::NotLegal(_))));
        assert_eq!(game.position(), START);
        assert_eq!(game.side_to_move(), Side::White);
    }

    #[test]
    fn test_moving_opponents_piece_is_illegal() {
        let mut game = StandardChess::new_game();
        let outcome = game.play(&mv(json!("e7e5")));
        assert!(matches!(outcome, MoveOutcome::Illegal(IllegalMove::NotLegal(_))));
    }

    #[test]
    fn test_malformed_descriptors_are_reported_not_panicked() {
        let mut game = StandardChess::new_game();
        for bad in [
            json!(42),
            json!(null),
            json!([1, 2]),
            json!({"from": "e2"}),
            json!({"from": "e2", "to": 4}),
            json!({"from": "e2", "to": "e4", "promotion": 5}),
            json!({"from": "zz", "to": "e4"}),
            json!("definitely not chess"),
        ] {
            let outcome = game.play(&mv(bad.clone()));
            assert!(
                matches!(outcome, MoveOutcome::Illegal(IllegalMove::Malformed(_))),
                "{bad} should be malformed, got {outcome:?}"
            );
        }
        assert_eq!(game.position(), START);
    }

    #[test]
    fn test_promotion_requires_piece() {
        let fen = "8/4P3/8/8/8/8/8/k6K w - - 0 1";

        let mut bare = StandardChess::from_fen(fen).unwrap();
        let outcome = bare.play(&mv(json!({"from": "e7", "to": "e8"})));
        assert!(!outcome.is_applied());

        let mut queened = StandardChess::from_fen(fen).unwrap();
        let outcome = queened.play(&mv(json!({"from": "e7", "to": "e8", "promotion": "Q"})));
        assert!(outcome.is_applied());
        assert_eq!(queened.position(), "4Q3/8/8/8/8/8/8/k6K b - - 0 1");
    }

    #[test]
    fn test_no_moves_after_checkmate() {
        let mut game = StandardChess::new_game();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            assert!(game.play(&mv(json!(san))).is_applied(), "{san}");
        }
        assert_eq!(game.side_to_move(), Side::White);
        assert!(!game.play(&mv(json!("a3"))).is_applied());
    }

    #[test]
    fn test_from_fen_rejects_garbage() {
        let err = StandardChess::from_fen("not a fen").unwrap_err();
        assert!(err.to_string().contains("not a fen"));
    }
}
