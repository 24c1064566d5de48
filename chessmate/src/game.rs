/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::Result;
use log::debug;

use super::{
    encode_move, encode_promotion, Color, IllegalMove, Move, Piece, PieceKind, Position, Scrutiny,
    Snapshot, Square, SquareList,
};

/// A game of chess: a [`Position`] plus the rules that decide which moves it accepts.
///
/// Only [`Game::attempt_move`] (and its variants) and [`Game::resolve_promotion`] change a game.
/// Every other method is a read-only query.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    /// The current [`Position`] of the game, including piece layouts, castling rights, turn counters, etc.
    position: Position,

    /// If set, either color may move at any time.
    allow_out_of_turn: bool,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Position`].
    #[inline(always)]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            allow_out_of_turn: false,
        }
    }

    /// Creates a new [`Game`] from an explicit [`Snapshot`].
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Board, Color, Game, Snapshot};
    /// let game = Game::from_snapshot(Snapshot {
    ///     board: Board::from_fen("8/8/8/4k3/4r3/8/4q3/4K3").unwrap(),
    ///     ..Default::default()
    /// });
    /// assert!(game.is_checkmate(Color::White));
    /// ```
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let allow_out_of_turn = snapshot.allow_out_of_turn;
        Self {
            position: Position::from_snapshot(snapshot),
            allow_out_of_turn,
        }
    }

    /// Creates a new [`Game`] from the provided FEN string.
    #[inline(always)]
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::new(Position::from_fen(fen)?))
    }

    /// Returns this game with out-of-turn play enabled or disabled.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Game, Square};
    /// let mut game = Game::default().with_out_of_turn(true);
    /// assert!(game.attempt_move(Square::E2, Square::E4));
    /// assert!(game.attempt_move(Square::D2, Square::D4));
    /// ```
    #[inline(always)]
    pub fn with_out_of_turn(mut self, allow: bool) -> Self {
        self.allow_out_of_turn = allow;
        self
    }

    #[inline(always)]
    pub const fn allows_out_of_turn(&self) -> bool {
        self.allow_out_of_turn
    }

    /// Fetches the current [`Position`] of this game.
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Vets the move from `from` to `to` at the given [`Scrutiny`] without changing anything.
    ///
    /// Only [`Scrutiny::Full`] consults turn order and the pending promotion.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Game, IllegalMove, Scrutiny, Square};
    /// let game = Game::default();
    /// assert!(game.check_legality_of(Square::E2, Square::E4, Scrutiny::Full).is_ok());
    /// assert!(matches!(
    ///     game.check_legality_of(Square::E7, Square::E5, Scrutiny::Full),
    ///     Err(IllegalMove::OutOfTurn { .. })
    /// ));
    /// assert!(game.check_legality_of(Square::E7, Square::E5, Scrutiny::KingSafe).is_ok());
    /// ```
    pub fn check_legality_of(
        &self,
        from: Square,
        to: Square,
        scrutiny: Scrutiny,
    ) -> Result<Move, IllegalMove> {
        if scrutiny == Scrutiny::Full {
            let mover = self
                .position
                .color_at(from)
                .ok_or(IllegalMove::NoPiece(from))?;

            let side_to_move = self.position.side_to_move();
            if !self.allow_out_of_turn && mover != side_to_move {
                return Err(IllegalMove::OutOfTurn {
                    mover,
                    side_to_move,
                });
            }

            if let Some(pending) = self.position.promotion_pending() {
                return Err(IllegalMove::PromotionPending(pending));
            }
        }

        self.position
            .scratch()
            .check_legality_of(from, to, scrutiny)
    }

    /// Applies the move from `from` to `to` if it is legal. If it is not legal, returns an `Err` explaining why
    /// and leaves the game untouched.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<Move> {
        let mv = match self.check_legality_of(from, to, Scrutiny::Full) {
            Ok(mv) => mv,
            Err(reason) => {
                debug!("Rejected {from}{to}: {reason}");
                return Err(reason.into());
            }
        };

        self.commit(&mv);
        Ok(mv)
    }

    /// Applies the move from `from` to `to` if it is legal, returning whether it was applied.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Game, Square};
    /// let mut game = Game::default();
    /// assert!(game.attempt_move(Square::A2, Square::A3));
    /// // Still White's pawn, but it's Black's turn
    /// assert!(!game.attempt_move(Square::A3, Square::A4));
    /// ```
    #[inline(always)]
    pub fn attempt_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Like [`Game::attempt_move`], but with squares written like `"e2"`. Malformed squares are a rejection.
    pub fn attempt_move_uci(&mut self, from: &str, to: &str) -> bool {
        match (Square::from_uci(from), Square::from_uci(to)) {
            (Ok(from), Ok(to)) => self.attempt_move(from, to),
            (Err(err), _) | (_, Err(err)) => {
                debug!("Rejected {from:?} -> {to:?}: {err}");
                false
            }
        }
    }

    /// Mutates the live position and logs the move. The move must already be vetted.
    fn commit(&mut self, mv: &Move) {
        let before = self.position.scratch();
        self.position.make_move(mv);

        let opponent = mv.color().opponent();
        let check = self.position.in_check()[opponent.index()];
        let checkmate = check && !self.has_any_legal_move(opponent);

        let notation = encode_move(&before, mv, check, checkmate);
        debug!(
            "Move {} applied {mv} as {notation}",
            self.position.move_number() - 1
        );
        self.position.record(notation);
    }

    /// Returns `true` if `color`'s King is attacked right now. A missing King is never in check.
    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.position.scratch().is_in_check(color)
    }

    /// Check status of both colors, computed fresh from the board and indexed by [`Color::index`].
    ///
    /// [`Position::in_check`] instead reports the flags stored after the last move or promotion.
    #[inline(always)]
    pub fn check_status(&self) -> [bool; Color::COUNT] {
        Color::ALL.map(|color| self.is_in_check(color))
    }

    /// Returns `true` if moving the piece on `from` to `to` would leave that piece's King attacked.
    ///
    /// Returns `false` if `from` is empty.
    #[inline(always)]
    pub fn would_be_in_check_after(&self, from: Square, to: Square) -> bool {
        self.position.scratch().leaves_king_in_check(from, to)
    }

    /// Returns `true` if `color` has at least one king-safe move, ignoring whose turn it is.
    #[inline(always)]
    pub fn has_any_legal_move(&self, color: Color) -> bool {
        self.position.scratch().has_any_legal_move(color)
    }

    /// Returns `true` if `color` is in check and has no legal move.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Color, Game, Square};
    /// let mut game = Game::default();
    /// for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
    ///     assert!(game.attempt_move_uci(from, to));
    /// }
    /// assert!(game.is_checkmate(Color::White));
    /// assert_eq!(game.history().last().unwrap(), "Qh4#");
    /// ```
    #[inline(always)]
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Returns `true` if `color` is not in check but has no legal move.
    #[inline(always)]
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Returns `true` if `square` holds a Pawn standing on its far row.
    pub fn is_promotable(&self, square: Square) -> bool {
        self.position
            .piece_at(square)
            .is_some_and(|piece| piece.is_pawn() && square.row() == piece.color().far_row())
    }

    /// Replaces the pending Pawn on `square` with a `kind` of the same color.
    ///
    /// `kind` must be a Knight, Bishop, Rook, or Queen, and `square` must be the pending promotion square.
    /// On success the choice is appended to the last history entry and the new piece returned.
    /// Otherwise returns `None` and nothing changes.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Game, Piece, PieceKind, Square};
    /// let mut game = Game::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    /// assert!(game.attempt_move(Square::A7, Square::A8));
    /// assert_eq!(game.resolve_promotion(Square::A8, PieceKind::King), None);
    /// assert_eq!(game.resolve_promotion(Square::A8, PieceKind::Rook), Some(Piece::WHITE_ROOK));
    /// assert_eq!(game.history(), ["a8=(R)"]);
    /// ```
    pub fn resolve_promotion(&mut self, square: Square, kind: PieceKind) -> Option<Piece> {
        if !kind.is_promotion_target()
            || self.position.promotion_pending() != Some(square)
            || !self.is_promotable(square)
        {
            debug!("Rejected promotion of {square} to {kind}");
            return None;
        }

        let promoted = self.position.promote(square, kind)?;
        self.position.annotate_last(&encode_promotion(kind));
        debug!("Promoted {square} to {promoted}");
        Some(promoted)
    }

    /// All squares the piece on `from` could legally move to, ignoring whose turn it is.
    #[inline(always)]
    pub fn legal_destinations(&self, from: Square) -> SquareList {
        self.position.scratch().legal_destinations(from)
    }
}

impl Deref for Game {
    type Target = Position;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new(Position::default())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.position().fmt(f)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position:\n{:?}\nOut of turn: {}\nHistory: {}",
            self.position,
            self.allow_out_of_turn,
            self.position.history().join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, CastlingRights};

    fn setup(fen: &str) -> Game {
        Game::from_fen(fen).unwrap()
    }

    #[test]
    fn test_queries_are_read_only() {
        let game = setup("r3k2r/pp3ppp/8/3pP3/8/8/PPP2PPP/R3K2R w KQkq d6 0 1");
        let before = game.clone();

        let _ = game.is_in_check(Color::White);
        let _ = game.check_status();
        let _ = game.would_be_in_check_after(Square::E1, Square::D2);
        let _ = game.would_be_in_check_after(Square::E5, Square::D6);
        let _ = game.has_any_legal_move(Color::Black);
        let _ = game.is_checkmate(Color::White);
        let _ = game.is_stalemate(Color::Black);
        let _ = game.legal_destinations(Square::E1);
        let _ = game.check_legality_of(Square::E1, Square::G1, Scrutiny::KingSafe);
        let _ = game.check_legality_of(Square::E5, Square::D6, Scrutiny::Full);

        assert_eq!(game, before);
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::default();
        assert!(game.attempt_move(Square::A2, Square::A3));
        assert_eq!(game.side_to_move(), Color::Black);
        assert!(!game.attempt_move(Square::A3, Square::A4));
        assert!(game.attempt_move(Square::A7, Square::A6));
        assert!(game.attempt_move(Square::A3, Square::A4));
        assert_eq!(game.move_number(), 4);
        assert_eq!(game.history(), ["a3", "a6", "a4"]);

        let mut game = Game::default().with_out_of_turn(true);
        assert!(game.attempt_move(Square::A2, Square::A3));
        assert!(game.attempt_move(Square::A3, Square::A4));
        // The side to move always follows the last mover
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn test_rejections_explain_themselves() {
        let mut game = Game::default();
        let err = game.try_move(Square::E7, Square::E5).unwrap_err();
        assert!(err.to_string().contains("turn"));

        let err = game.try_move(Square::E4, Square::E5).unwrap_err();
        assert_eq!(
            err.downcast_ref::<IllegalMove>(),
            Some(&IllegalMove::NoPiece(Square::E4))
        );

        let err = game.try_move(Square::E2, Square::E5).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IllegalMove>(),
            Some(IllegalMove::Unreachable { .. })
        ));
        assert_eq!(game, Game::default());
    }

    #[test]
    fn test_malformed_squares_are_rejected() {
        let mut game = Game::default();
        assert!(!game.attempt_move_uci("z9", "e4"));
        assert!(!game.attempt_move_uci("e2", ""));
        assert!(!game.attempt_move_uci("e2", "e44"));
        assert_eq!(game, Game::default());
        assert!(game.attempt_move_uci("e2", "e4"));
    }

    #[test]
    fn test_check_must_be_answered() {
        let mut game = setup("4k3/4q3/8/8/8/8/P7/4K3 w - - 0 1");
        let before = game.clone();

        assert!(game.is_in_check(Color::White));
        assert!(!game.attempt_move(Square::A2, Square::A3));
        assert_eq!(game, before);
        assert!(game.is_in_check(Color::White));
        assert!(game.check_status()[Color::White.index()]);

        assert!(game.attempt_move(Square::E1, Square::D1));
        assert!(!game.is_in_check(Color::White));
    }

    #[test]
    fn test_moving_into_check_is_rejected() {
        let mut game = setup("4k3/8/8/8/8/8/8/3rK3 w - - 0 1");
        // The King would still be on the Rook's rank
        assert!(game.would_be_in_check_after(Square::E1, Square::F1));
        assert!(!game.attempt_move(Square::E1, Square::F1));
        assert!(game.attempt_move(Square::E1, Square::D1));
        assert_eq!(game.history(), ["Kxd1"]);
    }

    #[test]
    fn test_en_passant_round_trip() {
        let mut game = setup("4k3/p7/8/1P6/8/8/8/4K3 b - - 0 1");
        assert!(game.attempt_move(Square::A7, Square::A5));
        assert_eq!(game.ep_target(Color::Black), Some(Square::A6));

        assert!(game.attempt_move(Square::B5, Square::A6));
        assert_eq!(game.piece_at(Square::A6), Some(Piece::WHITE_PAWN));
        assert!(!game.has(Square::A5));
        assert!(!game.has(Square::B5));
        assert_eq!(game.history(), ["a5", "bxa6"]);
    }

    #[test]
    fn test_black_captures_en_passant() {
        let mut game = setup("4k3/8/8/8/1p6/8/P7/4K3 w - - 0 1");
        assert!(game.attempt_move(Square::A2, Square::A4));
        assert_eq!(game.ep_target(Color::White), Some(Square::A3));

        assert!(game.attempt_move(Square::B4, Square::A3));
        assert_eq!(game.piece_at(Square::A3), Some(Piece::BLACK_PAWN));
        assert!(!game.has(Square::A4));
        assert!(!game.has(Square::B4));
        assert_eq!(game.history(), ["a4", "bxa3"]);
    }

    #[test]
    fn test_en_passant_window_closes() {
        let mut game = setup("4k3/p7/8/1P6/8/8/8/4K3 b - - 0 1");
        assert!(game.attempt_move(Square::A7, Square::A5));
        assert!(game.attempt_move(Square::E1, Square::E2));
        assert!(game.attempt_move(Square::E8, Square::E7));
        assert_eq!(game.ep_target(Color::Black), None);
        assert!(!game.attempt_move(Square::B5, Square::A6));
    }

    #[test]
    fn test_castling() {
        let mut game = setup("8/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(game.attempt_move(Square::E1, Square::G1));
        assert_eq!(game.piece_at(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(game.piece_at(Square::F1), Some(Piece::WHITE_ROOK));
        assert!(!game.has(Square::H1));
        assert_eq!(game.castling_rights_for(Color::White), CastlingRights::NONE);
        assert_eq!(game.history(), ["0-0"]);

        let mut game = setup("8/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(game.attempt_move(Square::E1, Square::C1));
        assert_eq!(game.piece_at(Square::D1), Some(Piece::WHITE_ROOK));
        assert_eq!(game.history(), ["0-0-0"]);
    }

    #[test]
    fn test_castling_is_blocked_by_attacks() {
        // Into check, through check, and out of check
        for fen in [
            "6q1/8/8/8/8/8/8/4K2R w K - 0 1",
            "5q2/8/8/8/8/8/8/4K2R w K - 0 1",
            "4q3/8/8/8/8/8/8/4K2R w K - 0 1",
        ] {
            let mut game = setup(fen);
            assert!(!game.attempt_move(Square::E1, Square::G1), "{fen}");
        }
    }

    #[test]
    fn test_castling_rights_do_not_come_back() {
        let mut game = setup("8/8/8/8/8/8/8/4K2R w K - 0 1").with_out_of_turn(true);
        assert!(game.attempt_move(Square::E1, Square::E2));
        assert!(game.attempt_move(Square::E2, Square::E1));
        assert!(!game.attempt_move(Square::E1, Square::G1));

        let mut game = setup("8/8/8/8/8/8/8/4K2R w K - 0 1").with_out_of_turn(true);
        assert!(game.attempt_move(Square::H1, Square::H2));
        assert!(game.attempt_move(Square::H2, Square::H1));
        assert!(!game.attempt_move(Square::E1, Square::G1));
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let mate = setup("8/8/8/4k3/4r3/8/4q3/4K3 w - - 0 1");
        assert!(mate.is_checkmate(Color::White));
        assert!(!mate.is_stalemate(Color::White));

        let stalemate = setup("8/8/8/8/5r2/3qk3/8/4K3 w - - 0 1");
        assert!(stalemate.is_stalemate(Color::White));
        assert!(!stalemate.is_checkmate(Color::White));

        let not_stalemate = setup("8/8/8/8/5r2/4k3/3q4/4K3 w - - 0 1");
        assert!(!not_stalemate.is_stalemate(Color::White));
        assert!(not_stalemate.is_checkmate(Color::White));
    }

    #[test]
    fn test_check_status_reads_the_board_not_stored_flags() {
        let game = Game::from_snapshot(Snapshot {
            board: Board::from_fen("4k3/8/8/8/8/8/4q3/4K3").unwrap(),
            in_check: Some([false, false]),
            ..Default::default()
        });
        assert_eq!(game.position().in_check(), [false, false]);
        assert_eq!(game.check_status(), [true, false]);
    }

    #[test]
    fn test_missing_king_only_affects_its_own_color() {
        let game = Game::from_snapshot(Snapshot {
            board: Board::from_fen("8/8/8/8/8/8/4q3/4K3").unwrap(),
            ..Default::default()
        });
        assert_eq!(game.check_status(), [true, false]);
        assert!(!game.is_checkmate(Color::Black));
    }

    #[test]
    fn test_promotion_flow() {
        let mut game = setup("8/P7/8/8/7k/8/8/4K3 w - - 0 1");
        assert!(game.attempt_move(Square::A7, Square::A8));
        assert_eq!(game.promotion_pending(), Some(Square::A8));
        assert!(game.is_promotable(Square::A8));

        // Nothing else moves until the promotion is resolved
        let err = game.try_move(Square::H4, Square::H5).unwrap_err();
        assert_eq!(
            err.downcast_ref::<IllegalMove>(),
            Some(&IllegalMove::PromotionPending(Square::A8))
        );

        let before = game.clone();
        assert_eq!(game.resolve_promotion(Square::A8, PieceKind::Pawn), None);
        assert_eq!(game.resolve_promotion(Square::A8, PieceKind::King), None);
        assert_eq!(game.resolve_promotion(Square::E1, PieceKind::Queen), None);
        assert_eq!(game, before);

        assert_eq!(
            game.resolve_promotion(Square::A8, PieceKind::Knight),
            Some(Piece::WHITE_KNIGHT)
        );
        assert_eq!(game.promotion_pending(), None);
        assert!(!game.is_promotable(Square::A8));
        assert_eq!(game.history(), ["a8=(N)"]);

        assert!(game.attempt_move(Square::H4, Square::H5));
    }

    #[test]
    fn test_promotion_can_give_check() {
        let mut game = setup("8/P7/8/8/8/8/8/k3K3 w - - 0 1");
        assert!(game.attempt_move(Square::A7, Square::A8));
        assert!(!game.check_status()[Color::Black.index()]);
        assert_eq!(game.resolve_promotion(Square::A8, PieceKind::Queen), Some(Piece::WHITE_QUEEN));
        assert!(game.position().in_check()[Color::Black.index()]);
        assert_eq!(game.history(), ["a8=(Q)"]);
    }

    #[test]
    fn test_check_suffix_is_recorded() {
        let mut game = Game::from_snapshot(Snapshot {
            board: Board::from_fen("3q4/8/8/8/8/n7/3P1P2/3RKR2").unwrap(),
            allow_out_of_turn: true,
            ..Default::default()
        });
        assert!(game.attempt_move(Square::A3, Square::C2));
        assert!(game.check_status()[Color::White.index()]);
        assert_eq!(game.history(), ["Nc2+"]);
    }

    #[test]
    fn test_legal_destinations_respect_pins() {
        let game = setup("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(game.legal_destinations(Square::E2).is_empty());
        assert_eq!(
            game.legal_destinations(Square::E1).as_slice(),
            &[Square::D2, Square::F2, Square::D1, Square::F1]
        );
    }
}
