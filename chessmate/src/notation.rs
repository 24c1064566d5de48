/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    CastleSide, Move, PieceKind, Scratch, KINGSIDE_CASTLE_TOKEN, QUEENSIDE_CASTLE_TOKEN,
};

/// Encodes a move in algebraic notation, like `Nf3`, `exd6`, `R1a3`, `Qe8#`, or `0-0`.
///
/// `before` must be the position the move was made from: the origin qualifier is decided by asking it
/// which other like pieces could also reach the destination.
///
/// # Example
/// ```
/// # use chessmate::{encode_move, Move, Position, Square};
/// let before = Position::default().scratch();
/// let mv = Move::describe(before.board(), Square::G1, Square::F3).unwrap();
/// assert_eq!(encode_move(&before, &mv, false, false), "Nf3");
/// ```
pub fn encode_move(before: &Scratch, mv: &Move, check: bool, checkmate: bool) -> String {
    if let Some(side) = mv.castle_side() {
        return String::from(match side {
            CastleSide::Kingside => KINGSIDE_CASTLE_TOKEN,
            CastleSide::Queenside => QUEENSIDE_CASTLE_TOKEN,
        });
    }

    let mut notation = String::with_capacity(8);

    if mv.piece().is_pawn() {
        if mv.is_capture() {
            notation.push(mv.from().file_char());
        }
    } else {
        notation.push(mv.piece().kind().char());

        let (file, rank) = disambiguation(before, mv);
        if file {
            notation.push(mv.from().file_char());
        }
        if rank {
            notation.push(mv.from().rank_char());
        }
    }

    if mv.is_capture() {
        notation.push('x');
    }

    notation += &mv.to().to_string();

    if checkmate {
        notation.push('#');
    } else if check {
        notation.push('+');
    }

    notation
}

/// Whether the origin file and origin rank are needed to tell `mv` apart from moves by other like pieces.
///
/// A sibling on the same file needs the rank. Any other sibling needs the file.
pub fn disambiguation(before: &Scratch, mv: &Move) -> (bool, bool) {
    let origin = mv.from();

    before
        .board()
        .pieces_of(mv.color())
        .filter(|&(square, piece)| piece == mv.piece() && square != origin)
        .filter(|&(square, _)| before.is_king_safe(square, mv.to()))
        .fold((false, false), |(file, rank), (sibling, _)| {
            if sibling.same_col(origin) {
                (file, true)
            } else {
                (true, rank)
            }
        })
}

/// Suffix appended to a move once its promotion is chosen, like `=(Q)`.
#[inline(always)]
pub fn encode_promotion(kind: PieceKind) -> String {
    format!("=({})", kind.char())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Square};

    /// Encodes a move the way a committed game would, without any turn or legality gate.
    fn encode(fen: &str, from: Square, to: Square) -> String {
        let before = Position::from_fen(fen).unwrap().scratch();
        let mv = Move::describe(before.board(), from, to).unwrap();

        let after = before.with_move_made(from, to);
        let opponent = mv.color().opponent();
        let check = after.is_in_check(opponent);
        let checkmate = check && !after.has_any_legal_move(opponent);

        encode_move(&before, &mv, check, checkmate)
    }

    const NORMAL: &str = "8/8/8/8/8/8/PNBQK3/8 w - - 0 1";
    const CAPTURES: &str = "8/8/8/6Pp/p7/1p1p4/PNBQK3/8 w - h6 0 1";
    const AMBIGUOUS: &str = "3r3r/b7/3b4/R7/4Q2Q/8/8/R6Q w - - 0 1";
    const SPECIALTY: &str = "8/P7/8/8/8/8/8/R3K2R w KQ - 0 1";
    const CHECKS: &str = "3q4/8/8/8/8/n7/3P1P2/3RKR2 b - - 0 1";

    #[test]
    fn test_plain_moves() {
        assert_eq!(encode(NORMAL, Square::A2, Square::A3), "a3");
        assert_eq!(encode(NORMAL, Square::B2, Square::A4), "Na4");
        assert_eq!(encode(NORMAL, Square::C2, Square::B3), "Bb3");
        assert_eq!(encode(NORMAL, Square::D2, Square::D3), "Qd3");
        assert_eq!(encode(NORMAL, Square::E2, Square::E3), "Ke3");
    }

    #[test]
    fn test_captures() {
        assert_eq!(encode(CAPTURES, Square::A2, Square::B3), "axb3");
        assert_eq!(encode(CAPTURES, Square::G5, Square::H6), "gxh6");
        assert_eq!(encode(CAPTURES, Square::B2, Square::A4), "Nxa4");
        assert_eq!(encode(CAPTURES, Square::C2, Square::B3), "Bxb3");
        assert_eq!(encode(CAPTURES, Square::D2, Square::D3), "Qxd3");
        assert_eq!(encode(CAPTURES, Square::E2, Square::D3), "Kxd3");
    }

    #[test]
    fn test_disambiguation() {
        // Other rook on the same file: rank digit
        assert_eq!(encode(AMBIGUOUS, Square::A1, Square::A3), "R1a3");
        // Other rook on the same rank: file letter
        assert_eq!(encode(AMBIGUOUS, Square::D8, Square::F8), "Rdf8");
        // One queen shares the rank, another the file: both
        assert_eq!(encode(AMBIGUOUS, Square::H4, Square::E1), "Qh4e1");
        // Other bishop shares neither: file letter
        assert_eq!(encode(AMBIGUOUS, Square::D6, Square::B8), "Bdb8");
    }

    #[test]
    fn test_siblings_that_cannot_reach_are_ignored() {
        // The a1 rook is blocked from a6 by the a5 rook, so no qualifier is needed
        assert_eq!(encode(AMBIGUOUS, Square::A5, Square::A6), "Ra6");
    }

    #[test]
    fn test_castling_and_promotion() {
        assert_eq!(encode(SPECIALTY, Square::E1, Square::G1), "0-0");
        assert_eq!(encode(SPECIALTY, Square::E1, Square::C1), "0-0-0");
        assert_eq!(encode(SPECIALTY, Square::A7, Square::A8), "a8");
        for kind in PieceKind::PROMOTIONS {
            assert_eq!(
                format!("a8{}", encode_promotion(kind)),
                format!("a8=({})", kind.char())
            );
        }
        assert_eq!(encode_promotion(PieceKind::Queen), "=(Q)");
    }

    #[test]
    fn test_check_and_mate_suffixes() {
        assert_eq!(encode(CHECKS, Square::A3, Square::C2), "Nc2+");
        assert_eq!(encode(CHECKS, Square::D8, Square::E8), "Qe8#");
    }
}
