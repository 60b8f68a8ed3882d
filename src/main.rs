use std::path::PathBuf;

use anyhow::{Context, Result};
use bloxorz::{Action, Codec, Game};
use clap::Parser;
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Load a block-sliding puzzle map, list the legal moves and replay a move
/// sequence from the initial placement.
#[derive(Parser)]
#[command(name = "bloxorz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Map file to load.
    map: PathBuf,
    /// Moves to replay, e.g. `R+2 P+1`.
    moves: Vec<Action>,
    /// Symbol of empty tiles.
    #[arg(long, default_value_t = 'X')]
    empty: char,
    /// Symbol of safe tiles.
    #[arg(long, default_value_t = 'O')]
    safe: char,
    /// Symbol of the tile(s) the block starts on.
    #[arg(long, default_value_t = 'S')]
    block: char,
    /// Symbol of goal tiles.
    #[arg(long, default_value_t = 'G')]
    goal: char,
    /// Separator between tiles of a row. Accepts `\t`, `\n` and `\r` escapes.
    #[arg(long, default_value = " ")]
    col_sep: String,
    /// Separator between rows. Accepts `\t`, `\n` and `\r` escapes.
    #[arg(long, default_value = "\\n")]
    row_sep: String,
}

fn unescape(s: &str) -> String {
    s.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\r", "\r")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_default();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let codec = Codec::new(
        cli.empty,
        cli.safe,
        cli.block,
        cli.goal,
        unescape(&cli.col_sep),
        unescape(&cli.row_sep),
    )
    .context("Invalid symbols")?;
    let map_data = std::fs::read_to_string(&cli.map).context("Failed to read the map")?;
    let map_data = map_data
        .strip_suffix(codec.row_sep())
        .unwrap_or(&map_data);
    let game = Game::parse_with(map_data, &codec).context("Failed to parse the map")?;

    let mut state = game.initial();
    println!("Initial: {state}");
    for goal in game.goals() {
        println!("Goal: {goal}");
    }
    let actions = game.actions(state);
    println!(
        "Actions: {}",
        actions
            .iter()
            .map(Action::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );

    for (&action, i) in cli.moves.iter().zip(1..) {
        state = game
            .apply(state, action)
            .with_context(|| format!("Step {i}: cannot apply {action} to {state}"))?;
        println!("\n{action} -> {state}");
        println!("{}", game.encode_state(&state, &codec));
    }

    if game.is_goal(&state) {
        println!("{}", style("Solved").green().bold());
    } else if !cli.moves.is_empty() {
        println!("{}", style("Not solved").yellow());
    }
    Ok(())
}
