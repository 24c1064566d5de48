/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, CastleSide, Color, PieceKind, Scratch, Square, KING_HOME_COL};

/// Returns `true` if `from` and `to` share a row, column, or diagonal and every square strictly between them is empty.
///
/// Squares that are not on a shared line never have a clear path.
///
/// # Example
/// ```
/// # use chessmate::{path_is_clear, Board, Square};
/// let board = Board::default();
/// assert!(path_is_clear(&board, Square::A2, Square::A7));
/// assert!(!path_is_clear(&board, Square::A1, Square::A3));
/// assert!(!path_is_clear(&board, Square::B1, Square::C3));
/// ```
pub fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    if from == to || !(drow == 0 || dcol == 0 || drow.abs() == dcol.abs()) {
        return false;
    }

    let step = (drow.signum(), dcol.signum());
    let mut current = from;
    loop {
        let Some(next) = current.offset(step.0, step.1) else {
            return false;
        };
        if next == to {
            return true;
        }
        if board.has(next) {
            return false;
        }
        current = next;
    }
}

/// Returns `true` if `to` holds a piece of the same color as the piece on `from`.
#[inline(always)]
pub fn is_friendly(board: &Board, from: Square, to: Square) -> bool {
    match (board.color_at(from), board.color_at(to)) {
        (Some(mover), Some(occupant)) => mover == occupant,
        _ => false,
    }
}

/// Returns `true` if `to` holds a piece of the opposite color to the piece on `from`.
#[inline(always)]
pub fn is_enemy(board: &Board, from: Square, to: Square) -> bool {
    match (board.color_at(from), board.color_at(to)) {
        (Some(mover), Some(occupant)) => mover != occupant,
        _ => false,
    }
}

/// Returns `true` if the piece on `from` could end its move on `to`: empty, or holding an enemy.
#[inline(always)]
pub fn can_land_on(board: &Board, from: Square, to: Square) -> bool {
    !is_friendly(board, from, to)
}

#[inline(always)]
fn is_straight(from: Square, to: Square) -> bool {
    from.same_row(to) || from.same_col(to)
}

#[inline(always)]
fn is_diagonal(from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow.abs() == dcol.abs()
}

/// Rook geometry: a straight line with nothing in the way.
pub fn rook_can_move(board: &Board, from: Square, to: Square) -> bool {
    is_straight(from, to) && path_is_clear(board, from, to) && can_land_on(board, from, to)
}

/// Bishop geometry: a diagonal with nothing in the way.
pub fn bishop_can_move(board: &Board, from: Square, to: Square) -> bool {
    is_diagonal(from, to) && path_is_clear(board, from, to) && can_land_on(board, from, to)
}

pub fn queen_can_move(board: &Board, from: Square, to: Square) -> bool {
    rook_can_move(board, from, to) || bishop_can_move(board, from, to)
}

pub fn knight_can_move(board: &Board, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    matches!((drow.abs(), dcol.abs()), (1, 2) | (2, 1)) && can_land_on(board, from, to)
}

/// A single step in any direction, or the structural part of castling.
///
/// The attack conditions of castling (not in check, not crossing an attacked square) are
/// decided by the legality layer, since they require king-safety simulation.
pub fn king_can_move(scratch: &Scratch, from: Square, to: Square) -> bool {
    let board = scratch.board();
    let (drow, dcol) = from.delta(to);

    if drow.abs() <= 1 && dcol.abs() <= 1 {
        return can_land_on(board, from, to);
    }

    castle_side_of(scratch, from, to).is_some()
}

/// If moving the King on `from` to `to` is a structurally valid castle, returns its side.
pub fn castle_side_of(scratch: &Scratch, from: Square, to: Square) -> Option<CastleSide> {
    let board = scratch.board();
    let king = board.piece_at(from).filter(|piece| piece.is_king())?;
    let color = king.color();

    if from.row() != color.home_row() || from.col() != KING_HOME_COL || !from.same_row(to) {
        return None;
    }

    let side = match from.delta(to).1 {
        2 => CastleSide::Kingside,
        -2 => CastleSide::Queenside,
        _ => return None,
    };

    if !scratch.castling_rights_for(color).allows(side) {
        return None;
    }

    let rook_square = side.rook_home(color);
    let has_rook = board
        .piece_at(rook_square)
        .is_some_and(|piece| piece.is_rook() && piece.color() == color);

    (has_rook && path_is_clear(board, from, rook_square)).then_some(side)
}

/// Forward one onto an empty square, forward two from the start row, a diagonal capture, or en passant.
pub fn pawn_can_move(scratch: &Scratch, from: Square, to: Square) -> bool {
    let board = scratch.board();
    let Some(color) = board.color_at(from) else {
        return false;
    };
    let (drow, dcol) = from.delta(to);
    let forward = color.forward();

    match (drow, dcol.abs()) {
        (d, 0) if d == forward => !board.has(to),

        (d, 0) if d == 2 * forward => {
            from.row() == color.pawn_row()
                && from
                    .offset(forward, 0)
                    .is_some_and(|skipped| !board.has(skipped))
                && !board.has(to)
        }

        (d, 1) if d == forward => {
            is_enemy(board, from, to) || is_en_passant(scratch, from, to)
        }

        _ => false,
    }
}

/// Returns `true` if the Pawn on `from` may capture en passant by moving to `to`.
///
/// `to` must be the en passant target of the opposite color, and an enemy Pawn must sit beside `from` on `to`'s column.
pub fn is_en_passant(scratch: &Scratch, from: Square, to: Square) -> bool {
    let board = scratch.board();
    let Some(pawn) = board.piece_at(from).filter(|piece| piece.is_pawn()) else {
        return false;
    };
    let color = pawn.color();

    let (drow, dcol) = from.delta(to);
    if drow != color.forward() || dcol.abs() != 1 || board.has(to) {
        return false;
    }

    if scratch.ep_target(color.opponent()) != Some(to) {
        return false;
    }

    Square::new(from.row(), to.col())
        .and_then(|victim| board.piece_at(victim))
        .is_some_and(|victim| victim.is_pawn() && victim.color() != color)
}

/// Geometry, obstruction, and capture rules for the piece on `from`.
///
/// King safety is not considered. Returns `false` if `from` is empty or `from == to`.
///
/// # Example
/// ```
/// # use chessmate::{is_pseudo_legal, Position, Square};
/// let scratch = Position::default().scratch();
/// assert!(is_pseudo_legal(&scratch, Square::B1, Square::C3));
/// assert!(is_pseudo_legal(&scratch, Square::E2, Square::E4));
/// assert!(!is_pseudo_legal(&scratch, Square::F1, Square::C4));
/// ```
pub fn is_pseudo_legal(scratch: &Scratch, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let board = scratch.board();
    let Some(kind) = board.kind_at(from) else {
        return false;
    };

    match kind {
        PieceKind::Pawn => pawn_can_move(scratch, from, to),
        PieceKind::Knight => knight_can_move(board, from, to),
        PieceKind::Bishop => bishop_can_move(board, from, to),
        PieceKind::Rook => rook_can_move(board, from, to),
        PieceKind::Queen => queen_can_move(board, from, to),
        PieceKind::King => king_can_move(scratch, from, to),
    }
}

/// Returns `true` if any piece of color `by` pseudo-legally reaches `square`.
///
/// Pawns only count through their diagonal, so `square` should hold a piece of the other color
/// (as it does when asking whether a King is in check).
pub fn is_attacked(scratch: &Scratch, square: Square, by: Color) -> bool {
    scratch
        .board()
        .pieces_of(by)
        .any(|(from, _)| is_pseudo_legal(scratch, from, square))
}
