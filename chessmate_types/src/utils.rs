/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Number of rows (ranks) and columns (files) on the board.
pub const BOARD_SIZE: u8 = 8;

/// Column the King starts on (the e-file).
pub const KING_HOME_COL: u8 = 4;

/// Column of the Rook a King castles with on the kingside (the h-file).
pub const KINGSIDE_ROOK_COL: u8 = 7;

/// Column of the Rook a King castles with on the queenside (the a-file).
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// Token logged for a kingside castle.
pub const KINGSIDE_CASTLE_TOKEN: &str = "0-0";

/// Token logged for a queenside castle.
pub const QUEENSIDE_CASTLE_TOKEN: &str = "0-0-0";
