//! Conway's Game of Life on a bounded grid
//!
//! `engine` holds the rules, `detector` the generation loop and its
//! stop conditions, `init` and `render` the console edges.

pub mod detector;
pub mod engine;
pub mod init;
pub mod render;

use crate::config::LifeConfig;
use crate::terminal::Terminal;
use detector::{SimState, Simulation};
use engine::Configuration;
use rand::prelude::*;
use std::io::{self, Write};
use tracing::info;

/// Run a simulation from the command line configuration
pub fn run(config: LifeConfig) -> io::Result<SimState> {
    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    });
    let mut rng = StdRng::seed_from_u64(seed);

    let initial = match config.density {
        Some(density) => init::random_configuration(config.dims, density, &mut rng),
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            init::prompt_initial(&mut input, &mut output, config.dims, &mut rng)?
        }
    };
    info!(
        rows = config.dims.rows,
        cols = config.dims.cols,
        seed,
        population = initial.population(),
        "starting simulation"
    );

    let mut term = Terminal::new(config.frame_mode)?;
    simulate(&mut term, initial, &config)
}

/// Render and advance generations until the simulation stops
pub fn simulate<W: Write>(
    term: &mut Terminal<W>,
    initial: Configuration,
    config: &LifeConfig,
) -> io::Result<SimState> {
    let mut sim = Simulation::new(initial, config.dims, config.generations);

    while !sim.state().is_terminal() {
        let frame =
            render::render_frame(sim.generation(), sim.current(), sim.dims(), config.live_char);
        term.present(&frame)?;
        if term.wait(config.time_step)? {
            info!(generation = sim.generation(), "interrupted");
            break;
        }
        sim.step();
    }

    term.println(sim.state().message())?;
    Ok(sim.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::FrameMode;
    use super::engine::{Cell, Dimensions};

    fn config(rows: usize, cols: usize, generations: u64) -> LifeConfig {
        LifeConfig {
            dims: Dimensions::new(rows, cols),
            generations,
            density: None,
            seed: Some(0),
            time_step: 0.0,
            live_char: '#',
            frame_mode: FrameMode::Print,
        }
    }

    fn drive(initial: Configuration, config: &LifeConfig) -> (SimState, String) {
        let mut buf = Vec::new();
        let state = {
            let mut term = Terminal::with_writer(&mut buf, config.frame_mode).unwrap();
            simulate(&mut term, initial, config).unwrap()
        };
        (state, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn blinker_reports_oscillation() {
        let blinker =
            Configuration::from_cells([Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)]);
        let (state, out) = drive(blinker, &config(3, 5, 10));
        assert_eq!(state, SimState::Oscillating);
        assert!(out.starts_with("Generation 1\n\n     \n###  \n     \n\n"));
        assert!(out.contains("Generation 2\n\n #   \n #   \n #   \n"));
        assert!(!out.contains("Generation 3"));
        assert!(out.ends_with("Oscillating configuration detected. Simulation ends.\n"));
    }

    #[test]
    fn empty_grid_reports_stable_immediately() {
        let (state, out) = drive(Configuration::new(), &config(2, 2, 10));
        assert_eq!(state, SimState::Stable);
        assert_eq!(out.matches("Generation").count(), 1);
        assert!(out.ends_with("Stable configuration reached. Simulation ends.\n"));
    }

    #[test]
    fn generation_cap_renders_each_generation_once() {
        let glider = Configuration::from_cells(
            [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)].map(Cell::from),
        );
        let (state, out) = drive(glider, &config(20, 20, 5));
        assert_eq!(state, SimState::Completed);
        assert!(out.contains("Generation 5\n"));
        assert!(!out.contains("Generation 6"));
        assert!(out.ends_with(
            "Simulation completed after reaching the specified number of generations.\n"
        ));
    }
}
