/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;

use chessmate::{Color, Game, PieceKind, Square};

/// Apply a sequence of moves to a position and report the result.
///
/// Run with `RUST_LOG=chessmate=debug` to see why moves are rejected.
#[derive(Debug, Parser)]
struct Cli {
    /// Moves to apply, written as `e2e4` or `e2-e4`.
    moves: Vec<String>,

    /// The FEN string of the starting position.
    #[arg(short, long)]
    fen: Option<String>,

    /// Piece chosen whenever a Pawn promotes.
    #[arg(short, long, default_value = "queen")]
    promote: String,

    /// If set, either color may move at any time.
    #[arg(short, long, default_value = "false")]
    out_of_turn: bool,

    /// If set, stop at the first rejected move instead of skipping it.
    #[arg(short, long, default_value = "false")]
    strict: bool,
}

fn parse_move(text: &str) -> anyhow::Result<(Square, Square)> {
    let squares = text.replace('-', "");
    if squares.len() != 4 || !squares.is_ascii() {
        bail!("Moves look like \"e2e4\" or \"e2-e4\". Got {text:?}");
    }
    let (from, to) = squares.split_at(2);
    Ok((from.parse()?, to.parse()?))
}

fn print_board(game: &Game) {
    for row in 0..8u8 {
        print!("{} ", 8 - row);
        for col in 0..8u8 {
            // Loop bounds keep these on the board
            let Some(square) = Square::new(row, col) else {
                continue;
            };
            let cell = match game.piece_at(square) {
                Some(piece) => format!(" {} ", piece.char()),
                None => String::from("   "),
            };
            let cell = match game.color_at(square) {
                Some(Color::White) => cell.bold().white(),
                Some(Color::Black) => cell.bold().black(),
                None => cell.normal(),
            };
            if (row + col) % 2 == 0 {
                print!("{}", cell.on_bright_black());
            } else {
                print!("{}", cell.on_blue());
            }
        }
        println!();
    }
    println!("   a  b  c  d  e  f  g  h");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let promotion: PieceKind = args.promote.parse()?;
    if !promotion.is_promotion_target() {
        bail!("Cannot promote to a {promotion}");
    }

    let game = if let Some(fen) = &args.fen {
        Game::from_fen(fen)?
    } else {
        Game::default()
    };
    let mut game = game.with_out_of_turn(args.out_of_turn);

    for mv_str in &args.moves {
        let (from, to) = parse_move(mv_str)?;

        match game.try_move(from, to) {
            Ok(_) => {
                if let Some(square) = game.promotion_pending() {
                    game.resolve_promotion(square, promotion)
                        .context(format!("Failed to promote on {square}"))?;
                }
            }
            Err(reason) if args.strict => return Err(reason.context(format!("Rejected {mv_str}"))),
            Err(reason) => println!("{} {mv_str}: {reason}", "Rejected".red()),
        }
    }

    print_board(&game);
    println!("\n{}", game.to_fen());
    println!("History: {}", game.history().join(" "));

    for color in Color::ALL {
        let status = if game.is_checkmate(color) {
            "checkmated".red().bold()
        } else if game.is_stalemate(color) {
            "stalemated".yellow()
        } else if game.is_in_check(color) {
            "in check".yellow()
        } else {
            "fine".green()
        };
        println!("{:>6}: {status}", color.name());
    }

    Ok(())
}
