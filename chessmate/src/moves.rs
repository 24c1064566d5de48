/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Board, CastleSide, Color, Piece, PieceKind, Square};

/// How thoroughly a proposed move is vetted.
///
/// Every legality question in the engine goes through a single function that takes one of these,
/// so the depth of any recursive check is explicit at the call site.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Scrutiny {
    /// Piece geometry, obstruction, and capture rules only. King safety is not considered.
    ///
    /// This is what attack scans use, and it never recurses.
    PseudoLegal,

    /// Pseudo-legal, castling preconditions hold, and the mover's King is not attacked afterward.
    ///
    /// Turn order and a pending promotion are ignored, which makes this the level for internal simulations.
    KingSafe,

    /// Everything in [`Scrutiny::KingSafe`], plus turn order and the pending-promotion gate.
    Full,
}

/// The reason a move was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, thiserror::Error)]
pub enum IllegalMove {
    #[error("there is no piece on {0} to move")]
    NoPiece(Square),

    #[error("it is {side_to_move}'s turn, not {mover}'s")]
    OutOfTurn { mover: Color, side_to_move: Color },

    #[error("the promotion on {0} must be resolved before any other move")]
    PromotionPending(Square),

    #[error("a {kind} cannot move from {from} to {to}")]
    Unreachable {
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("{0} cannot castle while in check")]
    CastleOutOfCheck(Color),

    #[error("{color} cannot castle through the attacked square {square}")]
    CastleThroughCheck { color: Color, square: Square },

    #[error("moving from {from} to {to} leaves {color}'s King in check")]
    KingLeftInCheck {
        color: Color,
        from: Square,
        to: Square,
    },
}

/// Represents the different kinds of moves that can be made during a chess game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveKind {
    /// Involves only a single piece moving from one location to another, and does not change the quantity or kind of any pieces on the board.
    Quiet,

    /// Involves a piece moving onto a square occupied by an opponent's piece, removing it from the board.
    Capture,

    /// A special variant of a quiet move, wherein a Pawn moves two squares from its starting row.
    PawnDoublePush,

    /// A special variant of capturing that occurs when a Pawn executes En Passant.
    EnPassantCapture,

    /// The King and the kingside Rook swap sides.
    ShortCastle,

    /// The King and the queenside Rook swap sides.
    LongCastle,
}

/// A move that has been classified against a specific board.
///
/// A [`Move`] records which piece moved, what (if anything) it captured, and what kind of move it was,
/// so that applying and logging it need no further look-ups.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// Classifies the move from `from` to `to` on `board`.
    ///
    /// Returns `None` if there is no piece on `from`.
    /// This does not check legality; it assumes the move has already been vetted (or is being simulated).
    pub fn describe(board: &Board, from: Square, to: Square) -> Option<Self> {
        let piece = board.piece_at(from)?;
        let (drow, dcol) = from.delta(to);

        let (kind, captured) = match piece.kind() {
            PieceKind::King if drow == 0 && dcol.abs() == 2 => {
                let kind = if dcol > 0 {
                    MoveKind::ShortCastle
                } else {
                    MoveKind::LongCastle
                };
                (kind, None)
            }

            // A diagonal pawn step onto an empty square can only be en passant
            PieceKind::Pawn if dcol != 0 && !board.has(to) => {
                let victim = Square::new(from.row(), to.col()).and_then(|sq| board.piece_at(sq));
                (MoveKind::EnPassantCapture, victim)
            }

            PieceKind::Pawn if drow.abs() == 2 => (MoveKind::PawnDoublePush, None),

            _ => match board.piece_at(to) {
                Some(captured) => (MoveKind::Capture, Some(captured)),
                None => (MoveKind::Quiet, None),
            },
        };

        Some(Self {
            from,
            to,
            piece,
            captured,
            kind,
        })
    }

    /// The square the piece moved from.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square the piece moved to.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece that moved.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The [`Color`] of the piece that moved.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.piece.color()
    }

    /// The piece removed from the board by this move, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns `true` if this move removes an enemy piece, including en passant.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassantCapture)
    }

    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassantCapture)
    }

    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self.kind, MoveKind::PawnDoublePush)
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::ShortCastle | MoveKind::LongCastle)
    }

    /// Which side this move castles to, if it is a castle.
    #[inline(always)]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::ShortCastle => Some(CastleSide::Kingside),
            MoveKind::LongCastle => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Returns `true` if this is a Pawn arriving on its far row.
    #[inline(always)]
    pub const fn promotes(&self) -> bool {
        self.piece.is_pawn() && self.to.row() == self.piece.color().far_row()
    }

    /// The square whose occupant this move removes.
    ///
    /// For en passant that is beside the origin, not the destination.
    #[inline(always)]
    pub fn captured_square(&self) -> Square {
        if self.is_en_passant() {
            Square::new(self.from.row(), self.to.col()).unwrap_or(self.to)
        } else {
            self.to
        }
    }

    /// For a castle, the Rook's `(origin, destination)` squares.
    #[inline(always)]
    pub fn castling_rook_squares(&self) -> Option<(Square, Square)> {
        let side = self.castle_side()?;
        let rook_from = Square::new(self.from.row(), side.rook_col())?;
        // The Rook lands on the square the King crossed
        let rook_to = self.from.offset(0, side.direction())?;
        Some((rook_from, rook_to))
    }
}

impl fmt::Display for Move {
    /// Displays this move in coordinate form, like `e2e4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_classifies_special_moves() {
        let board = Board::from_fen("r3k2r/8/8/3pP3/8/8/4P3/R3K2R").unwrap();

        let castle = Move::describe(&board, Square::E1, Square::G1).unwrap();
        assert_eq!(castle.kind(), MoveKind::ShortCastle);
        assert_eq!(castle.castling_rook_squares(), Some((Square::H1, Square::F1)));

        let long = Move::describe(&board, Square::E8, Square::C8).unwrap();
        assert_eq!(long.kind(), MoveKind::LongCastle);
        assert_eq!(long.castling_rook_squares(), Some((Square::A8, Square::D8)));

        let ep = Move::describe(&board, Square::E5, Square::D6).unwrap();
        assert_eq!(ep.kind(), MoveKind::EnPassantCapture);
        assert_eq!(ep.captured(), Some(Piece::BLACK_PAWN));
        assert_eq!(ep.captured_square(), Square::D5);

        let push = Move::describe(&board, Square::E2, Square::E4).unwrap();
        assert!(push.is_pawn_double_push());

        let capture = Move::describe(&board, Square::A1, Square::A8).unwrap();
        assert_eq!(capture.captured(), Some(Piece::BLACK_ROOK));
        assert!(capture.is_capture());

        assert!(Move::describe(&board, Square::C3, Square::C4).is_none());
    }

    #[test]
    fn test_promotion_is_detected_per_color() {
        let board = Board::from_fen("8/P7/8/8/8/8/p7/8").unwrap();
        assert!(Move::describe(&board, Square::A7, Square::A8).unwrap().promotes());
        assert!(Move::describe(&board, Square::A2, Square::A1).unwrap().promotes());
        assert!(!Move::describe(&board, Square::A7, Square::A6).unwrap().promotes());
    }
}
