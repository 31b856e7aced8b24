//! Standard chess rules implementation.

use super::{MoveError, RuleSet};
use crate::evaluate;
use crate::movegen::{generate_moves, is_in_check, legal_moves, make_move};
use crate::{MoveList, Position, RuleOptions, Status};
use chess_core::{Move, PieceKind, Square};
use tracing::debug;

/// Standard chess rules.
///
/// - Standard piece movement
/// - Castling (kingside and queenside)
/// - En passant
/// - Pawn promotion
/// - Check, checkmate, and stalemate detection
///
/// Behaviour the rules leave open is set through [`RuleOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardChess {
    options: RuleOptions,
}

impl StandardChess {
    pub const fn new(options: RuleOptions) -> Self {
        StandardChess { options }
    }

    pub const fn options(&self) -> &RuleOptions {
        &self.options
    }
}

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn generate_moves(&self, position: &Position) -> MoveList {
        generate_moves(position)
    }

    fn legal_moves_from(&self, position: &Position, from: Square) -> MoveList {
        let Some(piece) = position.piece_at(from) else {
            return MoveList::new();
        };
        if self.options.enforce_turn_order && piece.color != position.side_to_move {
            return MoveList::new();
        }
        legal_moves(
            &position.board,
            piece,
            from,
            position.en_passant,
            position.castling,
        )
    }

    fn resolve_move(
        &self,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveError> {
        let piece = position.piece_at(from).ok_or_else(|| {
            debug!(%from, %to, "rejected move from empty square");
            MoveError::EmptySquare(from)
        })?;

        if self.options.enforce_turn_order && piece.color != position.side_to_move {
            debug!(%from, %to, %piece, "rejected move out of turn");
            return Err(MoveError::WrongSideToMove {
                expected: position.side_to_move,
            });
        }

        let moves = legal_moves(
            &position.board,
            piece,
            from,
            position.en_passant,
            position.castling,
        );
        let Some(found) = moves.iter().copied().find(|m| m.to == to) else {
            debug!(%from, %to, fen = %position.to_fen(), "rejected illegal move");
            return Err(MoveError::IllegalMove { from, to });
        };
        if found.promotion().is_none() {
            return Ok(found);
        }

        let kind = promotion.unwrap_or(self.options.default_promotion);
        if !kind.is_promotion_target() {
            debug!(%from, %to, ?kind, "rejected promotion piece");
            return Err(MoveError::InvalidPromotion(kind));
        }
        moves
            .iter()
            .copied()
            .find(|m| m.to == to && m.promotion() == Some(kind))
            .ok_or(MoveError::IllegalMove { from, to })
    }

    fn make_move(&self, position: &Position, m: Move) -> Position {
        make_move(position, m, &self.options)
    }

    fn is_check(&self, position: &Position) -> bool {
        is_in_check(&position.board, position.side_to_move, position.en_passant)
    }

    fn status(&self, position: &Position) -> Status {
        evaluate::status(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DrawReason, GameResult};
    use chess_core::{Color, Fen, Piece};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    fn relaxed() -> StandardChess {
        StandardChess::new(RuleOptions {
            enforce_turn_order: false,
            ..RuleOptions::default()
        })
    }

    #[test]
    fn initial_position() {
        let pos = StandardChess::default().initial_position();
        assert_eq!(pos.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn legal_moves_for_pawn_and_knight() {
        let rules = StandardChess::default();
        let position = rules.initial_position();
        let mut pawn = rules.legal_moves_for(&position, sq("e2"));
        pawn.sort();
        assert_eq!(pawn, vec![sq("e3"), sq("e4")]);
        let mut knight = rules.legal_moves_for(&position, Square::G1);
        knight.sort();
        assert_eq!(knight, vec![sq("f3"), sq("h3")]);
        assert!(rules.legal_moves_for(&position, sq("e4")).is_empty());
    }

    #[test]
    fn turn_order_enforced_by_default() {
        let rules = StandardChess::default();
        let position = rules.initial_position();
        assert!(rules.legal_moves_for(&position, sq("e7")).is_empty());
        assert_eq!(
            rules.apply_move(&position, sq("e7"), sq("e5")),
            Err(MoveError::WrongSideToMove {
                expected: Color::White
            })
        );
    }

    #[test]
    fn turn_order_can_be_relaxed() {
        let rules = relaxed();
        let position = rules.initial_position();
        assert_eq!(rules.legal_moves_for(&position, sq("e7")).len(), 2);
        let after = rules.apply_move(&position, sq("e7"), sq("e5")).unwrap();
        assert_eq!(after.side_to_move, Color::White);
        assert_eq!(after.fullmove_number, 2);
        assert_eq!(after.en_passant, Some(sq("e6")));
    }

    #[test]
    fn apply_move_rejects_and_leaves_position() {
        let rules = StandardChess::default();
        let position = rules.initial_position();
        assert_eq!(
            rules.apply_move(&position, sq("e2"), sq("e5")),
            Err(MoveError::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(
            rules.apply_move(&position, sq("e4"), sq("e5")),
            Err(MoveError::EmptySquare(sq("e4")))
        );
        assert_eq!(position, Position::startpos());
    }

    #[test]
    fn promotion_destinations_listed_once() {
        let rules = StandardChess::default();
        let position = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(rules.legal_moves_from(&position, sq("a7")).len(), 4);
        assert_eq!(rules.legal_moves_for(&position, sq("a7")), vec![Square::A8]);
    }

    #[test]
    fn promotion_default_and_choice() {
        let position = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let rules = StandardChess::default();
        let queen = rules.apply_move(&position, sq("a7"), Square::A8).unwrap();
        assert_eq!(
            queen.piece_at(Square::A8),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );

        let rook = rules
            .apply_move_with_promotion(&position, sq("a7"), Square::A8, Some(PieceKind::Rook))
            .unwrap();
        assert_eq!(
            rook.piece_at(Square::A8),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );

        let knights = StandardChess::new(RuleOptions {
            default_promotion: PieceKind::Knight,
            ..RuleOptions::default()
        });
        let knight = knights.apply_move(&position, sq("a7"), Square::A8).unwrap();
        assert_eq!(
            knight.piece_at(Square::A8),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );

        let king =
            rules.apply_move_with_promotion(&position, sq("a7"), Square::A8, Some(PieceKind::King));
        assert_eq!(king, Err(MoveError::InvalidPromotion(PieceKind::King)));
    }

    #[test]
    fn promotion_piece_ignored_for_other_moves() {
        let rules = StandardChess::default();
        let position = rules.initial_position();
        let after = rules
            .apply_move_with_promotion(&position, sq("e2"), sq("e4"), Some(PieceKind::King))
            .unwrap();
        assert_eq!(
            after.piece_at(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn huge_clocks_do_not_overflow() {
        let rules = StandardChess::default();
        let position = pos("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1");
        let after = rules.apply_move(&position, Square::E1, sq("d1")).unwrap();
        assert_eq!(after.halfmove_clock, u32::MAX);

        let position = pos("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295");
        let after = rules.apply_move(&position, Square::E8, sq("d8")).unwrap();
        assert_eq!(after.fullmove_number, u32::MAX);
    }

    #[test]
    fn castling_through_apply_move() {
        let rules = StandardChess::default();
        let position = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(rules.legal_moves_for(&position, Square::E1).contains(&Square::G1));
        let after = rules.apply_move(&position, Square::E1, Square::G1).unwrap();
        assert_eq!(after.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
    }

    #[test]
    fn en_passant_through_apply_move() {
        let rules = StandardChess::default();
        let position = pos("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
        let position = rules.apply_move(&position, sq("d7"), sq("d5")).unwrap();
        assert_eq!(position.en_passant, Some(sq("d6")));
        assert!(rules.legal_moves_for(&position, sq("e5")).contains(&sq("d6")));
        let position = rules.apply_move(&position, sq("e5"), sq("d6")).unwrap();
        assert!(position.piece_at(sq("d5")).is_none());
        assert_eq!(position.to_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
    }

    #[test]
    fn fools_mate_result() {
        let rules = StandardChess::default();
        let position = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(rules.is_check(&position));
        assert!(rules.status(&position).checkmate);
        assert_eq!(rules.game_result(&position), Some(GameResult::BlackWins));
        assert!(rules.generate_moves(&position).is_empty());
    }

    #[test]
    fn stalemate_result() {
        let rules = StandardChess::default();
        let position = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(
            rules.game_result(&position),
            Some(GameResult::Draw(DrawReason::Stalemate))
        );
        assert!(rules.is_game_over(&position));
        assert!(!rules.is_game_over(&Position::startpos()));
    }

    #[test]
    fn is_legal_checks_full_move() {
        let rules = StandardChess::default();
        let position = rules.initial_position();
        let double_push = Move::new(sq("e2"), sq("e4"), chess_core::MoveKind::DoublePush);
        assert!(rules.is_legal(&position, double_push));
        assert!(!rules.is_legal(&position, Move::normal(sq("e2"), sq("e4"))));
    }
}
