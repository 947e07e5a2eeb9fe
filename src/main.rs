use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use std::io;
use termplay::config::{LifeConfig, DEFAULT_DELAY};
use termplay::life::{self, engine::Dimensions, init, render};
use termplay::settings::Settings;
use termplay::terminal::FrameMode;
use termplay::{logging, tictactoe};

#[derive(Parser)]
#[command(name = "termplay")]
#[command(version)]
#[command(about = "Terminal games: Conway's Game of Life and Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run Conway's Game of Life on a bounded grid
    Life {
        /// Number of grid rows
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        rows: u32,

        /// Number of grid columns
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        cols: u32,

        /// Maximum number of generations to compute
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        generations: u64,

        /// Fill randomly with this density (0.0-1.0) instead of asking
        #[arg(short, long, value_parser = parse_density)]
        density: Option<f64>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Delay between generations in seconds
        #[arg(short = 't', long)]
        delay: Option<f32>,

        /// Character to use for live cells
        #[arg(short, long)]
        char: Option<char>,

        /// Print frames one after another instead of redrawing the screen
        #[arg(short, long)]
        print: bool,
    },

    /// Play two-player Tic-Tac-Toe
    Tictactoe,
}

fn parse_density(s: &str) -> Result<f64, String> {
    init::parse_density(s).ok_or_else(|| format!("`{}` is not a number between 0.0 and 1.0", s))
}

fn main() {
    logging::init();

    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Life {
            rows,
            cols,
            generations,
            density,
            seed,
            delay,
            char: live_char,
            print,
        } => {
            let settings = Settings::load();
            let config = LifeConfig {
                dims: Dimensions::new(rows as usize, cols as usize),
                generations,
                density,
                seed,
                time_step: delay.or(settings.life.delay).unwrap_or(DEFAULT_DELAY),
                live_char: live_char
                    .or(settings.life.live_char)
                    .unwrap_or(render::LIVE_CHAR),
                frame_mode: FrameMode::select(print, io::stdout().is_tty()),
            };
            life::run(config).context("life simulation failed")?;
        }
        Commands::Tictactoe => {
            tictactoe::run().context("tic-tac-toe session failed")?;
        }
    }

    Ok(())
}
