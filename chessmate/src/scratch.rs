/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::trace;

use super::{
    castle_side_of, is_attacked, is_pseudo_legal, Board, CastleSide, CastlingRights, Color,
    IllegalMove, Move, Scrutiny, Square,
};

/// An alias for an [`arrayvec::ArrayVec`] of destination squares.
///
/// A Queen in the middle of an empty board reaches 27 squares, so 32 always suffices.
pub type SquareList = arrayvec::ArrayVec<Square, 32>;

/// The part of a position that decides what moves are possible: pieces, castling rights, and en passant targets.
///
/// Every legality check runs on a copy of this, so checking never touches the live game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Scratch {
    board: Board,
    castling_rights: [CastlingRights; Color::COUNT],
    ep_targets: [Option<Square>; Color::COUNT],
}

impl Scratch {
    #[inline(always)]
    pub const fn new(
        board: Board,
        castling_rights: [CastlingRights; Color::COUNT],
        ep_targets: [Option<Square>; Color::COUNT],
    ) -> Self {
        Self {
            board,
            castling_rights,
            ep_targets,
        }
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline(always)]
    pub const fn castling_rights_for(&self, color: Color) -> CastlingRights {
        self.castling_rights[color.index()]
    }

    /// The en passant target created by `color`'s last move, if any.
    #[inline(always)]
    pub const fn ep_target(&self, color: Color) -> Option<Square> {
        self.ep_targets[color.index()]
    }

    /// Applies the move and every state change it causes. No enforcement of legality.
    pub fn make_move(&mut self, mv: &Move) {
        let color = mv.color();
        self.ep_targets[color.index()] = None;

        self.board.apply(mv);

        // Rights only ever get revoked
        if mv.piece().is_king() {
            self.castling_rights[color.index()].revoke_all();
        } else if mv.piece().is_rook() {
            if let Some(side) = CastleSide::from_rook_home(mv.from(), color) {
                self.castling_rights[color.index()].revoke(side);
            }
        }

        if let Some(victim) = mv.captured().filter(|piece| piece.is_rook()) {
            let victim_color = victim.color();
            if let Some(side) = CastleSide::from_rook_home(mv.captured_square(), victim_color) {
                self.castling_rights[victim_color.index()].revoke(side);
            }
        }

        if mv.is_pawn_double_push() {
            self.ep_targets[color.index()] = mv.from().offset(color.forward(), 0);
        }
    }

    /// Copies `self` and returns a [`Scratch`] after moving the piece on `from` to `to`.
    ///
    /// If `from` is empty, the copy is returned unchanged.
    #[inline(always)]
    pub fn with_move_made(&self, from: Square, to: Square) -> Self {
        let mut copied = *self;
        if let Some(mv) = Move::describe(&self.board, from, to) {
            copied.make_move(&mv);
        }
        copied
    }

    /// Finds `color`'s King.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.king(color)
    }

    /// Returns `true` if `color`'s King is attacked. A missing King is never in check.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Color, Position};
    /// let scratch = Position::from_fen("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1").unwrap().scratch();
    /// assert!(scratch.is_in_check(Color::White));
    /// assert!(!scratch.is_in_check(Color::Black));
    /// ```
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| is_attacked(self, king, color.opponent()))
    }

    /// Returns `true` if moving the piece on `from` to `to` would leave that piece's King attacked.
    ///
    /// Returns `false` if `from` is empty.
    pub fn leaves_king_in_check(&self, from: Square, to: Square) -> bool {
        let Some(color) = self.board.color_at(from) else {
            return false;
        };
        self.with_move_made(from, to).is_in_check(color)
    }

    /// Vets the move from `from` to `to` at the given [`Scrutiny`], returning the classified [`Move`] if it passes.
    ///
    /// Turn order and pending promotions are not known here, so [`Scrutiny::Full`] is treated as [`Scrutiny::KingSafe`].
    /// Attack scans inside this function only ever run pseudo-legal checks.
    pub fn check_legality_of(
        &self,
        from: Square,
        to: Square,
        scrutiny: Scrutiny,
    ) -> Result<Move, IllegalMove> {
        let piece = self.board.piece_at(from).ok_or(IllegalMove::NoPiece(from))?;

        if !is_pseudo_legal(self, from, to) {
            return Err(IllegalMove::Unreachable {
                kind: piece.kind(),
                from,
                to,
            });
        }

        let mv = Move::describe(&self.board, from, to).ok_or(IllegalMove::NoPiece(from))?;

        if scrutiny == Scrutiny::PseudoLegal {
            return Ok(mv);
        }

        let color = piece.color();

        if let Some(side) = castle_side_of(self, from, to) {
            if self.is_in_check(color) {
                return Err(IllegalMove::CastleOutOfCheck(color));
            }

            // The King may not pass over an attacked square
            if let Some(crossed) = from.offset(0, side.direction()) {
                if self.leaves_king_in_check(from, crossed) {
                    trace!("{color} castling from {from} crosses attacked square {crossed}");
                    return Err(IllegalMove::CastleThroughCheck {
                        color,
                        square: crossed,
                    });
                }
            }
        }

        if self.leaves_king_in_check(from, to) {
            trace!("{mv} would leave {color}'s King attacked");
            return Err(IllegalMove::KingLeftInCheck { color, from, to });
        }

        Ok(mv)
    }

    /// Returns `true` if the move passes [`Scrutiny::KingSafe`].
    #[inline(always)]
    pub fn is_king_safe(&self, from: Square, to: Square) -> bool {
        self.check_legality_of(from, to, Scrutiny::KingSafe).is_ok()
    }

    /// Returns `true` if any piece of `color` has a king-safe move.
    pub fn has_any_legal_move(&self, color: Color) -> bool {
        self.board.pieces_of(color).any(|(from, _)| {
            Square::iter().any(|to| self.is_king_safe(from, to))
        })
    }

    /// All king-safe destinations for the piece on `from`, in row order from `a8`.
    pub fn legal_destinations(&self, from: Square) -> SquareList {
        Square::iter()
            .filter(|&to| self.is_king_safe(from, to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, Position};

    fn scratch(fen: &str) -> Scratch {
        Position::from_fen(fen).unwrap().scratch()
    }

    #[test]
    fn test_with_move_made_leaves_source_alone() {
        let source = scratch("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        let moved = source.with_move_made(Square::E2, Square::E4);

        assert_eq!(source.board().piece_at(Square::E2), Some(Piece::WHITE_PAWN));
        assert_eq!(moved.board().piece_at(Square::E4), Some(Piece::WHITE_PAWN));
        assert_eq!(moved.ep_target(Color::White), Some(Square::E3));
        assert_eq!(source.ep_target(Color::White), None);
    }

    #[test]
    fn test_ep_target_cleared_when_same_color_moves_again() {
        let s = scratch("4k3/p7/8/8/8/8/4P3/4K3 w - - 0 1")
            .with_move_made(Square::E2, Square::E4)
            .with_move_made(Square::A7, Square::A6);
        assert_eq!(s.ep_target(Color::White), Some(Square::E3));

        let s = s.with_move_made(Square::E1, Square::D1);
        assert_eq!(s.ep_target(Color::White), None);
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let s = scratch("8/8/8/8/8/8/4q3/8 w - - 0 1");
        assert!(!s.is_in_check(Color::White));
        assert!(!s.is_in_check(Color::Black));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // The e2 Bishop is pinned by the e8 Rook
        let s = scratch("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(s.check_legality_of(Square::E2, Square::D3, Scrutiny::PseudoLegal).is_ok());
        assert_eq!(
            s.check_legality_of(Square::E2, Square::D3, Scrutiny::KingSafe),
            Err(IllegalMove::KingLeftInCheck {
                color: Color::White,
                from: Square::E2,
                to: Square::D3
            })
        );
    }

    #[test]
    fn test_castling_attack_conditions() {
        let base = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
        assert!(scratch(base).is_king_safe(Square::E1, Square::G1));

        // Queen on g8 covers the destination
        let into = scratch("4k1q1/8/8/8/8/8/8/4K2R w K - 0 1");
        assert_eq!(
            into.check_legality_of(Square::E1, Square::G1, Scrutiny::KingSafe),
            Err(IllegalMove::KingLeftInCheck {
                color: Color::White,
                from: Square::E1,
                to: Square::G1
            })
        );

        // Queen on f8 covers the square the King crosses
        let through = scratch("4kq2/8/8/8/8/8/8/4K2R w K - 0 1");
        assert_eq!(
            through.check_legality_of(Square::E1, Square::G1, Scrutiny::KingSafe),
            Err(IllegalMove::CastleThroughCheck {
                color: Color::White,
                square: Square::F1
            })
        );

        // Queen on e7 gives check
        let out_of = scratch("k7/4q3/8/8/8/8/8/4K2R w K - 0 1");
        assert_eq!(
            out_of.check_legality_of(Square::E1, Square::G1, Scrutiny::KingSafe),
            Err(IllegalMove::CastleOutOfCheck(Color::White))
        );
    }

    #[test]
    fn test_castling_relocates_rook_and_revokes_rights() {
        let s = scratch("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").with_move_made(Square::E1, Square::C1);
        assert_eq!(s.board().piece_at(Square::C1), Some(Piece::WHITE_KING));
        assert_eq!(s.board().piece_at(Square::D1), Some(Piece::WHITE_ROOK));
        assert!(!s.board().has(Square::A1));
        assert_eq!(s.castling_rights_for(Color::White), CastlingRights::NONE);
        assert_eq!(s.castling_rights_for(Color::Black), CastlingRights::ALL);
    }

    #[test]
    fn test_legal_destinations_of_knight() {
        let s = Position::default().scratch();
        let destinations = s.legal_destinations(Square::G1);
        assert_eq!(destinations.as_slice(), &[Square::F3, Square::H3]);
        assert!(s.has_any_legal_move(Color::White));
        assert!(s.has_any_legal_move(Color::Black));
    }
}
