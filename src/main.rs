//! `reversi` - play Reversi in the terminal.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use reversi_rules::board::parse_size;
use reversi_rules::config::{DEFAULT_SIZE, TEXT_CLIENT_MOVE_BUDGET};
use reversi_rules::{GameConfig, GameSession, text};

/// Two-player Reversi on a square board
#[derive(Parser, Debug)]
#[command(name = "reversi")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board width and height: an even number from 4 to 16
    #[arg(short, long, default_value_t = DEFAULT_SIZE, value_parser = parse_size)]
    size: usize,

    /// Moves allowed before the game ends
    #[arg(
        short,
        long,
        default_value_t = TEXT_CLIENT_MOVE_BUDGET,
        value_parser = clap::value_parser!(u32).range(1..),
        conflicts_with = "no_move_limit"
    )]
    max_moves: u32,

    /// Play until neither side can move
    #[arg(long)]
    no_move_limit: bool,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = GameConfig::text_client()
        .with_size(args.size)
        .with_move_budget((!args.no_move_limit).then_some(args.max_moves));

    let mut session = match GameSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    match text::run(&mut session, &mut input, &mut output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
