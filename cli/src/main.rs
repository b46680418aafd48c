use clap::Parser;
use sweeper_core::{GameService, MemoryGameStore};

use crate::session::{Output, Session};

mod command;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper games against an in-memory game store", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print games as JSON instead of a board
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    let store = MemoryGameStore::new();
    let service = match args.seed {
        Some(seed) => GameService::with_seed(store, seed),
        None => GameService::new(store),
    };
    let output = if args.json { Output::Json } else { Output::Board };

    let stdin = std::io::stdin();
    Session::new(service, output).run(stdin.lock(), std::io::stdout().lock())
}
