/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Deref, Index},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{
    Color, Move, Piece, PieceKind, Scratch, Square, BOARD_SIZE, FEN_STARTPOS, KINGSIDE_ROOK_COL,
    QUEENSIDE_ROOK_COL,
};

/// One of the two directions a King may castle in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    /// Toward the h-file ("short" castling).
    Kingside,
    /// Toward the a-file ("long" castling).
    Queenside,
}

impl CastleSide {
    /// Column of the Rook that takes part in castling to this side.
    #[inline(always)]
    pub const fn rook_col(&self) -> u8 {
        match self {
            Self::Kingside => KINGSIDE_ROOK_COL,
            Self::Queenside => QUEENSIDE_ROOK_COL,
        }
    }

    /// Column step the King takes toward the Rook.
    #[inline(always)]
    pub const fn direction(&self) -> i8 {
        match self {
            Self::Kingside => 1,
            Self::Queenside => -1,
        }
    }

    /// The corner square the Rook for this side starts on.
    #[inline(always)]
    pub const fn rook_home(&self, color: Color) -> Square {
        match (color, *self) {
            (Color::White, Self::Kingside) => Square::H1,
            (Color::White, Self::Queenside) => Square::A1,
            (Color::Black, Self::Kingside) => Square::H8,
            (Color::Black, Self::Queenside) => Square::A8,
        }
    }

    /// The side whose Rook starts on `square` for `color`, if any.
    pub fn from_rook_home(square: Square, color: Color) -> Option<Self> {
        [Self::Kingside, Self::Queenside]
            .into_iter()
            .find(|side| side.rook_home(color) == square)
    }
}

/// Represents the castling rights of a single player.
///
/// Rights only ever go from `true` to `false`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct CastlingRights {
    pub(crate) kingside: bool,
    pub(crate) queenside: bool,
}

impl CastlingRights {
    /// Both sides still available.
    pub const ALL: Self = Self::new(true, true);

    /// No castling at all.
    pub const NONE: Self = Self::new(false, false);

    /// Creates a new [`CastlingRights`] that permits castling to the provided sides.
    #[inline(always)]
    pub const fn new(kingside: bool, queenside: bool) -> Self {
        Self {
            kingside,
            queenside,
        }
    }

    #[inline(always)]
    pub const fn kingside(&self) -> bool {
        self.kingside
    }

    #[inline(always)]
    pub const fn queenside(&self) -> bool {
        self.queenside
    }

    /// Returns `true` if castling toward `side` is still permitted.
    #[inline(always)]
    pub const fn allows(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }

    /// Permanently revokes castling toward `side`.
    #[inline(always)]
    pub fn revoke(&mut self, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.kingside = false,
            CastleSide::Queenside => self.queenside = false,
        }
    }

    /// Permanently revokes castling toward both sides.
    #[inline(always)]
    pub fn revoke_all(&mut self) {
        *self = Self::NONE;
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of castling rights, en passant, or move counters. If you need those, see [`Position`].
///
/// Internally an `8x8` grid, indexed by `(row, col)` through [`Square`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    mailbox: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use chessmate::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Constructs a [`Board`] from the placement field of a FEN string, ignoring everything after it.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Board, Piece, Square};
    /// let board = Board::from_fen("4k3/8/8/8/8/8/P7/4K3").unwrap();
    /// assert_eq!(board.piece_at(Square::A2), Some(Piece::WHITE_PAWN));
    /// assert_eq!(board.piece_at(Square::E8), Some(Piece::BLACK_KING));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        let placements = fen.split(' ').next().unwrap_or_default();

        if placements.matches('/').count() != 7 {
            bail!("Missing placements for all 8 ranks in {placements:?}");
        }

        // FEN lists rank 8 first, which is row 0
        for (row, rank) in placements.split('/').enumerate() {
            let mut col: u8 = 0;

            for piece_char in rank.chars() {
                if let Some(empty) = piece_char.to_digit(10) {
                    col = match col.checked_add(empty as u8) {
                        Some(col) if col <= BOARD_SIZE => col,
                        _ => bail!("Rank {rank:?} in FEN overflows the board"),
                    };
                    continue;
                }

                let piece = Piece::from_uci(piece_char).map_err(|_| {
                    anyhow!("Found non-piece, non-numeric char {piece_char:?} when parsing FEN")
                })?;
                let square = Square::new(row as u8, col)
                    .ok_or_else(|| anyhow!("Rank {rank:?} in FEN overflows the board"))?;
                board.place(piece, square);
                col += 1;
            }

            if col != BOARD_SIZE {
                bail!("Rank {rank:?} in FEN must describe exactly 8 squares");
            }
        }

        Ok(board)
    }

    /// Generates the placement field of a [FEN](https://www.chess.com/terms/fen-chess) string of this [`Board`].
    pub fn to_fen(&self) -> String {
        let ranks = self.mailbox.iter().map(|row| {
            let mut rank = String::with_capacity(8);
            let mut empty_spaces = 0;

            for square in row {
                match square {
                    Some(piece) => {
                        if empty_spaces != 0 {
                            rank += &empty_spaces.to_string();
                            empty_spaces = 0;
                        }
                        rank.push(piece.char());
                    }
                    None => empty_spaces += 1,
                }
            }

            if empty_spaces != 0 {
                rank += &empty_spaces.to_string();
            }
            rank
        });

        ranks.collect::<Vec<_>>().join("/")
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Board, Square};
    /// let board = Board::default();
    /// assert_eq!(board.has(Square::B1), true);
    /// assert_eq!(board.has(Square::B3), false);
    /// ```
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.row() as usize][square.col() as usize].is_some()
    }

    /// Places the provided [`Piece`] on the supplied [`Square`], replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.mailbox[square.row() as usize][square.col() as usize] = Some(piece);
    }

    /// Clears the supplied [`Square`] of any pieces.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.take(square);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Board, Piece, Square};
    /// let mut board = Board::from_fen("k7/8/8/8/2N5/8/8/7K").unwrap();
    /// let taken = board.take(Square::C4);
    /// assert_eq!(board.to_fen(), "k7/8/8/8/8/8/8/7K");
    /// assert_eq!(taken, Some(Piece::WHITE_KNIGHT));
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square.row() as usize][square.col() as usize].take()
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.row() as usize][square.col() as usize]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Board, Color, Square};
    /// let board = Board::default();
    /// assert_eq!(board.color_at(Square::A2), Some(Color::White));
    /// assert_eq!(board.color_at(Square::E8), Some(Color::Black));
    /// assert!(board.color_at(Square::E4).is_none());
    /// ```
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.piece_at(square).map(|piece| piece.kind())
    }

    /// Finds the King of `color`, if it is on the board.
    ///
    /// If a malformed board holds several, the first one in row order is returned.
    pub fn king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.iter()
            .find_map(|(square, piece)| (piece == king).then_some(square))
    }

    /// Creates a [`BoardIter`] to iterate over all occupied [`Square`]s in this [`Board`].
    #[inline(always)]
    pub const fn iter(&self) -> BoardIter<'_> {
        BoardIter {
            board: self,
            index: 0,
        }
    }

    /// Returns an iterator over the pieces of `color` along with their locations.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color() == color)
    }

    /// Moves the pieces involved in `mv`: the mover, an en passant victim, and a castling Rook.
    ///
    /// No enforcement of legality.
    pub fn apply(&mut self, mv: &Move) {
        let Some(piece) = self.take(mv.from()) else {
            return;
        };

        if mv.is_en_passant() {
            self.clear(mv.captured_square());
        }

        if let Some((rook_from, rook_to)) = mv.castling_rook_squares() {
            if let Some(rook) = self.take(rook_from) {
                self.place(rook, rook_to);
            }
        }

        self.place(piece, mv.to());
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index.row() as usize][index.col() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.mailbox.iter().enumerate() {
            write!(f, "{}| ", BOARD_SIZE as usize - row)?;
            for square in squares {
                let occupant = square.map(|p| p.char()).unwrap_or('.');
                write!(f, "{occupant} ")?;
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in 0..BOARD_SIZE {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in 'a'..='h' {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl<'a> IntoIterator for &'a Board {
    type IntoIter = BoardIter<'a>;
    type Item = <BoardIter<'a> as Iterator>::Item;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the occupied squares of a [`Board`], in row order from `a8`.
///
/// Calls to [`Iterator::next`] will yield a tuple of a [`Square`] and a [`Piece`].
pub struct BoardIter<'a> {
    board: &'a Board,
    index: usize,
}

impl<'a> Iterator for BoardIter<'a> {
    type Item = (Square, Piece);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(square) = Square::from_index(self.index) {
            self.index += 1;
            if let Some(piece) = self.board.piece_at(square) {
                return Some((square, piece));
            }
        }
        None
    }
}

/// Every field of a [`Position`], for building one by hand.
///
/// The [`Default`] is the standard starting position, so struct update syntax only needs the fields that differ.
/// Fields left as `None` are derived: the side to move from the parity of `move_number`,
/// and the check flags from the board.
///
/// # Example
/// ```
/// # use chessmate::{Board, Game, Snapshot, Color};
/// let game = Game::from_snapshot(Snapshot {
///     board: Board::from_fen("4k3/8/8/8/8/8/4q3/4K3").unwrap(),
///     ..Default::default()
/// });
/// assert!(game.check_status()[Color::White.index()]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub board: Board,
    pub move_number: usize,
    pub side_to_move: Option<Color>,
    pub in_check: Option<[bool; Color::COUNT]>,
    pub castling_rights: [CastlingRights; Color::COUNT],
    pub ep_targets: [Option<Square>; Color::COUNT],
    pub promotion_pending: Option<Square>,
    pub history: Vec<String>,
    pub allow_out_of_turn: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            board: Board::default(),
            move_number: 1,
            side_to_move: None,
            in_check: None,
            castling_rights: [CastlingRights::ALL; Color::COUNT],
            ep_targets: [None; Color::COUNT],
            promotion_pending: None,
            history: Vec::new(),
            allow_out_of_turn: false,
        }
    }
}

/// Represents the live state of a game: piece layout, turn, check flags, castling rights,
/// en passant targets, a pending promotion, and the move log.
///
/// A [`Position`] is only mutated by applying a move or resolving a promotion.
/// Everything a legality check needs is held in an embedded [`Scratch`], which checks copy.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// Piece placements plus castling rights and en passant targets.
    state: Scratch,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Starts at 1 and increases by one for every applied move.
    move_number: usize,

    /// Whether each color was in check after the last change to the board.
    in_check: [bool; Color::COUNT],

    /// A Pawn that reached its far row and awaits a piece choice.
    promotion_pending: Option<Square>,

    /// Notation of every applied move, oldest first.
    history: Vec<String>,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No en passant targets
    /// * Move number set to 1
    ///
    /// # Example
    /// ```
    /// # use chessmate::Position;
    /// let pos = Position::new();
    /// assert_eq!(pos.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    pub fn new() -> Self {
        Self {
            state: Scratch::new(
                Board::new(),
                [CastlingRights::NONE; Color::COUNT],
                [None; Color::COUNT],
            ),
            side_to_move: Color::White,
            move_number: 1,
            in_check: [false; Color::COUNT],
            promotion_pending: None,
            history: Vec::new(),
        }
    }

    /// Creates a [`Position`] from an explicit [`Snapshot`].
    ///
    /// The snapshot's `allow_out_of_turn` flag belongs to the [`Game`](crate::Game) and is ignored here.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let state = Scratch::new(
            snapshot.board,
            snapshot.castling_rights,
            snapshot.ep_targets,
        );

        let side_to_move = snapshot.side_to_move.unwrap_or(if snapshot.move_number % 2 == 1 {
            Color::White
        } else {
            Color::Black
        });

        let in_check = snapshot
            .in_check
            .unwrap_or_else(|| Color::ALL.map(|color| state.is_in_check(color)));

        Self {
            state,
            side_to_move,
            move_number: snapshot.move_number,
            in_check,
            promotion_pending: snapshot.promotion_pending,
            history: snapshot.history,
        }
    }

    /// Creates a new [`Position`] from the provided FEN string.
    ///
    /// The en passant field is stored as the target of the color that just moved.
    /// The halfmove clock is accepted but ignored; the fullmove counter sets the move number.
    ///
    /// # Example
    /// ```
    /// # use chessmate::{Color, Position, Square};
    /// let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
    /// assert_eq!(pos.side_to_move(), Color::Black);
    /// assert_eq!(pos.move_number(), 2);
    /// assert_eq!(pos.ep_target(Color::White), Some(Square::E3));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut split = fen.trim().split(' ');
        let placements = split.next().ok_or(anyhow!(
            "Invalid FEN string: FEN string must have piece placements."
        ))?;
        let board = Board::from_fen(placements)?;

        let active_color = split.next().unwrap_or("w");
        let side_to_move = Color::from_str(active_color)?;

        let castling = split.next().unwrap_or("KQkq");
        let castling_rights = [
            CastlingRights::new(castling.contains('K'), castling.contains('Q')),
            CastlingRights::new(castling.contains('k'), castling.contains('q')),
        ];

        let mut ep_targets = [None; Color::COUNT];
        let en_passant_target = split.next().unwrap_or("-");
        if en_passant_target != "-" {
            ep_targets[side_to_move.opponent().index()] = Some(Square::from_uci(en_passant_target)?);
        }

        let halfmove = split.next().unwrap_or("0");
        halfmove.parse::<usize>().or(Err(anyhow!(
            "Invalid FEN string: FEN string must have valid halfmove counter. Got {halfmove}"
        )))?;

        let fullmove = split.next().unwrap_or("1");
        let fullmove: usize = fullmove.parse().or(Err(anyhow!(
            "Invalid FEN string: FEN string must have valid fullmove counter. Got {fullmove}"
        )))?;
        if fullmove == 0 {
            bail!("Invalid FEN string: fullmove counter starts at 1");
        }

        let move_number = (fullmove - 1)
            .checked_mul(2)
            .and_then(|n| n.checked_add(1 + side_to_move.index()))
            .ok_or(anyhow!("Invalid FEN string: fullmove counter too large. Got {fullmove}"))?;

        Ok(Self::from_snapshot(Snapshot {
            board,
            move_number,
            side_to_move: Some(side_to_move),
            in_check: None,
            castling_rights,
            ep_targets,
            promotion_pending: None,
            history: Vec::new(),
            allow_out_of_turn: false,
        }))
    }

    /// Generates a FEN string from this [`Position`].
    ///
    /// The halfmove clock is not tracked and is always written as `0`.
    pub fn to_fen(&self) -> String {
        let placements = self.board().to_fen();
        let active_color = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };

        let castling = self.castling_rights_uci();

        let en_passant_target = self
            .ep_target(self.side_to_move.opponent())
            .map(|square| square.to_string())
            .unwrap_or(String::from("-"));

        let fullmove = self.move_number.div_ceil(2);

        format!("{placements} {active_color} {castling} {en_passant_target} 0 {fullmove}")
    }

    /// Returns a copy of everything a legality check needs.
    ///
    /// Mutating the returned [`Scratch`] never affects this position.
    #[inline(always)]
    pub const fn scratch(&self) -> Scratch {
        self.state
    }

    /// Fetches this position's [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        self.state.board()
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Number of the next move to be applied, starting at 1.
    #[inline(always)]
    pub const fn move_number(&self) -> usize {
        self.move_number
    }

    /// Check flags for both colors as of the last change to the board, indexed by [`Color::index`].
    #[inline(always)]
    pub const fn in_check(&self) -> [bool; Color::COUNT] {
        self.in_check
    }

    /// Returns the [`CastlingRights`] for `color`.
    #[inline(always)]
    pub const fn castling_rights_for(&self, color: Color) -> CastlingRights {
        self.state.castling_rights_for(color)
    }

    /// Returns the castling rights in FEN form, like `KQkq`.
    pub fn castling_rights_uci(&self) -> String {
        let mut castling = String::with_capacity(4);

        let white = self.castling_rights_for(Color::White);
        let black = self.castling_rights_for(Color::Black);
        for (allowed, c) in [
            (white.kingside, 'K'),
            (white.queenside, 'Q'),
            (black.kingside, 'k'),
            (black.queenside, 'q'),
        ] {
            if allowed {
                castling.push(c);
            }
        }

        // If no side can castle, use a hyphen
        if castling.is_empty() {
            castling = String::from("-");
        }
        castling
    }

    /// The square a pawn of `color`'s opponent may capture onto en passant, if any.
    #[inline(always)]
    pub const fn ep_target(&self, color: Color) -> Option<Square> {
        self.state.ep_target(color)
    }

    /// The square of a Pawn awaiting promotion, if any.
    #[inline(always)]
    pub const fn promotion_pending(&self) -> Option<Square> {
        self.promotion_pending
    }

    /// Notation of every applied move, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Applies the move. No enforcement of legality.
    ///
    /// Updates piece placement, castling rights, en passant targets, the promotion marker,
    /// both check flags, the move number, and the side to move. The history is left to the caller,
    /// since logging needs the position from before the move.
    pub fn make_move(&mut self, mv: &Move) {
        self.state.make_move(mv);

        if mv.promotes() {
            self.promotion_pending = Some(mv.to());
        }

        self.recompute_check();
        self.move_number = self.move_number.saturating_add(1);
        self.side_to_move = mv.color().opponent();
    }

    /// Replaces the Pawn on `square` with a `kind` of the same color and clears the pending promotion.
    ///
    /// No validation; returns the new piece, or `None` if the square was empty.
    pub(crate) fn promote(&mut self, square: Square, kind: PieceKind) -> Option<Piece> {
        let promoted = self.state.board_mut().take(square)?.promoted(kind);
        self.state.board_mut().place(promoted, square);
        self.promotion_pending = None;
        self.recompute_check();
        Some(promoted)
    }

    /// Appends a move to the history.
    pub(crate) fn record(&mut self, notation: String) {
        self.history.push(notation);
    }

    /// Appends `suffix` to the most recent history entry, if there is one.
    pub(crate) fn annotate_last(&mut self, suffix: &str) {
        if let Some(last) = self.history.last_mut() {
            last.push_str(suffix);
        }
    }

    #[inline(always)]
    fn recompute_check(&mut self) {
        self.in_check = Color::ALL.map(|color| self.state.is_in_check(color));
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        Self::from_snapshot(Snapshot::default())
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Deref for Position {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board()
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board().to_string();
        for (row, line) in board.lines().enumerate() {
            write!(f, "{line}")?;
            match row {
                1 => write!(f, "           FEN: {}", self.to_fen())?,
                2 => write!(f, "          Side: {}", self.side_to_move())?,
                3 => write!(f, "      Castling: {}", self.castling_rights_uci())?,
                4 => write!(
                    f,
                    "      In check: {:?}",
                    Color::ALL
                        .iter()
                        .filter(|c| self.in_check[c.index()])
                        .collect::<Vec<_>>()
                )?,
                5 => write!(
                    f,
                    "     Promotion: {}",
                    self.promotion_pending
                        .map(|sq| sq.to_string())
                        .unwrap_or(String::from("-"))
                )?,
                6 => write!(f, "          Move: {}", self.move_number())?,
                _ => {}
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
