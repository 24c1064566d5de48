/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use chessmate_types::*;

/// High-level abstraction of the game of chess: turn order, promotion gating, check and mate queries.
mod game;
/// Enums and structs for modeling the movement of a piece on a chessboard, and why a move was refused.
mod moves;
/// Algebraic notation for applied moves.
mod notation;
/// A chessboard, complete with piece placements, turn counters, and game state information.
mod position;
/// Movement rules for every piece kind, plus obstruction and attack detection.
mod rules;
/// The disposable state that legality checks run on.
mod scratch;

pub use game::*;
pub use moves::*;
pub use notation::*;
pub use position::*;
pub use rules::*;
pub use scratch::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::game::*;
    pub use crate::moves::*;
    pub use crate::notation::*;
    pub use crate::position::*;
    pub use crate::rules::*;
    pub use crate::scratch::*;
    pub use chessmate_types::*;
}
