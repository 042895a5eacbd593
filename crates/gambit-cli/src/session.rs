//! Interactive turn loop.

use std::io::{self, BufRead, Write};

use gambit_core::PieceKind;
use gambit_engine::{AppliedMove, Game};

use crate::command::Command;
use crate::config::CliConfig;
use crate::render;
use crate::save;

/// Runs the turn loop until the game ends or the player quits. Rejected
/// moves and malformed input re-prompt without touching game state.
pub fn run(mut game: Game, config: &CliConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("At any time, enter \"help\" for a list of commands.");
    loop {
        println!();
        print!(
            "{}",
            render::render_board(&game.pieces_snapshot(), config.ascii_pieces)
        );
        if let Some(result) = game.result() {
            println!("{}", result);
            tracing::info!("Game over after {} moves", game.history().len());
            break;
        }

        let color = game.current_color();
        println!("It's {}'s turn.", color);
        if game.is_in_check(color) {
            println!("Check!");
        }
        print!("Enter your move (e.g. e2 e4): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match Command::parse(&line?) {
            Ok(Command::Help) => print_help(),
            Ok(Command::Save) => save_flow(&mut lines, &game, config)?,
            Ok(Command::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(Command::Move(from, to)) => {
                let outcome = if game.would_promote(from, to) {
                    let kind = prompt_promotion(&mut lines)?;
                    game.attempt_move_with_promotion(from, to, kind)
                } else {
                    game.attempt_move(from, to)
                };
                match outcome {
                    Ok(applied) => announce(applied),
                    Err(err) => println!("{}. Please try again.", err),
                }
            }
            Err(err) => println!("{}. Please try again.", err),
        }
    }
    Ok(())
}

fn announce(applied: AppliedMove) {
    match applied {
        AppliedMove::Moved { capture: false } => {}
        AppliedMove::Moved { capture: true } => println!("Capture!"),
        AppliedMove::EnPassant => println!("En passant!"),
        AppliedMove::Castled { kingside: true } => println!("Castled kingside."),
        AppliedMove::Castled { kingside: false } => println!("Castled queenside."),
        AppliedMove::Promoted { kind, .. } => println!("Promoted to {}.", kind),
    }
}

fn print_help() {
    println!("Commands:");
    println!("Enter a move as two cells, e.g. \"e2 e4\".");
    println!("To castle, move the king onto its own rook, e.g. \"e1 h1\".");
    println!("Enter \"save\" to save the game.");
    println!("Enter \"exit\" to quit the game.");
}

fn save_flow(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    game: &Game,
    config: &CliConfig,
) -> io::Result<()> {
    loop {
        print!("Enter a file name to save to (blank to cancel): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let name = line?.trim().to_string();
        if name.is_empty() {
            println!("Save cancelled.");
            return Ok(());
        }
        std::fs::create_dir_all(&config.save_dir).ok();
        let path = config.save_dir.join(name);
        match save::save_game(&path, game) {
            Ok(()) => {
                println!("Game saved!");
                return Ok(());
            }
            Err(err) => println!("Could not save ({}). Please try again.", err),
        }
    }
}

fn prompt_promotion(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<PieceKind> {
    println!("Promote to:");
    println!("1. Queen");
    println!("2. Rook");
    println!("3. Bishop");
    println!("4. Knight");
    print!("> ");
    io::stdout().flush()?;
    let choice = match lines.next() {
        Some(line) => line?,
        None => String::new(),
    };
    Ok(promotion_choice(&choice).unwrap_or_else(|| {
        println!("Invalid choice. Promoting to Queen.");
        PieceKind::Queen
    }))
}

/// Maps a promotion menu answer to a piece kind. Accepts the menu number
/// or the piece name.
fn promotion_choice(input: &str) -> Option<PieceKind> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "queen" => Some(PieceKind::Queen),
        "2" | "rook" => Some(PieceKind::Rook),
        "3" | "bishop" => Some(PieceKind::Bishop),
        "4" | "knight" => Some(PieceKind::Knight),
        _ => None,
    }
}
