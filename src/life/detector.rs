//! Generation loop state machine with stability and cycle detection

use super::engine::{next_generation, Configuration, Dimensions};
use tracing::{debug, info};

/// Where a simulation stands after its latest transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    Running,
    /// The last transition reproduced the current configuration
    Stable,
    /// The last transition reproduced an earlier configuration
    Oscillating,
    /// The generation cap was reached
    Completed,
}

impl SimState {
    pub fn is_terminal(self) -> bool {
        self != SimState::Running
    }

    /// Closing line printed by the driver. A run left `Running` was
    /// stopped by the user before reaching a terminal state.
    pub fn message(self) -> &'static str {
        match self {
            SimState::Running => "Simulation interrupted.",
            SimState::Stable => "Stable configuration reached. Simulation ends.",
            SimState::Oscillating => "Oscillating configuration detected. Simulation ends.",
            SimState::Completed => {
                "Simulation completed after reaching the specified number of generations."
            }
        }
    }
}

/// A bounded Life run.
///
/// Every configuration that has been advanced past is kept in `history`,
/// so cycles of any period are caught. History is never truncated.
pub struct Simulation {
    dims: Dimensions,
    current: Configuration,
    history: Vec<Configuration>,
    transitions: u64,
    max_transitions: u64,
    state: SimState,
}

impl Simulation {
    pub fn new(initial: Configuration, dims: Dimensions, max_transitions: u64) -> Self {
        assert!(
            initial.fits(dims),
            "initial configuration exceeds {}x{} grid",
            dims.rows,
            dims.cols
        );
        let state = if max_transitions == 0 {
            SimState::Completed
        } else {
            SimState::Running
        };
        Self {
            dims,
            current: initial,
            history: Vec::new(),
            transitions: 0,
            max_transitions,
            state,
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn current(&self) -> &Configuration {
        &self.current
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// 1-based number of the generation held in `current`
    pub fn generation(&self) -> u64 {
        self.transitions + 1
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Compute one transition and classify it. No-op once terminal.
    pub fn step(&mut self) -> SimState {
        if self.state.is_terminal() {
            return self.state;
        }

        let next = next_generation(&self.current, self.dims);
        self.transitions += 1;
        debug!(
            transition = self.transitions,
            population = next.population(),
            "computed generation"
        );

        self.state = if next == self.current {
            SimState::Stable
        } else if self.history.contains(&next) {
            SimState::Oscillating
        } else {
            let previous = std::mem::replace(&mut self.current, next);
            self.history.push(previous);
            if self.transitions >= self.max_transitions {
                SimState::Completed
            } else {
                SimState::Running
            }
        };

        if self.state.is_terminal() {
            info!(
                state = ?self.state,
                generation = self.generation(),
                history = self.history.len(),
                "simulation ended"
            );
        }
        self.state
    }

    /// Step until a terminal state is reached
    pub fn run_to_end(&mut self) -> SimState {
        while !self.state.is_terminal() {
            self.step();
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::engine::Cell;

    fn config(cells: &[(usize, usize)]) -> Configuration {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn empty_is_stable_at_first_generation() {
        let mut sim = Simulation::new(Configuration::new(), Dimensions::new(4, 4), 10);
        assert_eq!(sim.step(), SimState::Stable);
        assert_eq!(sim.transitions(), 1);
        assert_eq!(sim.history_len(), 0);
    }

    #[test]
    fn block_is_stable() {
        let block = config(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let mut sim = Simulation::new(block.clone(), Dimensions::new(3, 3), 10);
        assert_eq!(sim.run_to_end(), SimState::Stable);
        assert_eq!(sim.current(), &block);
    }

    #[test]
    fn blinker_oscillates_by_third_generation() {
        let blinker = config(&[(1, 0), (1, 1), (1, 2)]);
        let mut sim = Simulation::new(blinker, Dimensions::new(3, 5), 100);
        assert_eq!(sim.step(), SimState::Running);
        assert_eq!(sim.current(), &config(&[(0, 1), (1, 1), (2, 1)]));
        assert_eq!(sim.step(), SimState::Oscillating);
        assert!(sim.transitions() <= 3);
        assert_eq!(sim.history_len(), 1);
    }

    #[test]
    fn isolated_cell_dies_then_settles() {
        let mut sim = Simulation::new(config(&[(2, 2)]), Dimensions::new(5, 5), 10);
        assert_eq!(sim.step(), SimState::Running);
        assert!(sim.current().is_empty());
        assert_eq!(sim.step(), SimState::Stable);
    }

    #[test]
    fn glider_runs_to_cap() {
        // A glider on a roomy grid never repeats within the cap
        let glider = config(&[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let mut sim = Simulation::new(glider, Dimensions::new(30, 30), 12);
        assert_eq!(sim.run_to_end(), SimState::Completed);
        assert_eq!(sim.transitions(), 12);
        assert_eq!(sim.generation(), 13);
        assert_eq!(sim.history_len(), 12);
    }

    #[test]
    fn cap_of_one_completes_after_single_transition() {
        let glider = config(&[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let mut sim = Simulation::new(glider, Dimensions::new(10, 10), 1);
        assert_eq!(sim.step(), SimState::Completed);
        assert_eq!(sim.transitions(), 1);
    }

    #[test]
    fn only_interrupted_runs_end_running() {
        assert_eq!(SimState::Running.message(), "Simulation interrupted.");
        assert!(SimState::Stable.message().starts_with("Stable"));
        assert!(SimState::Oscillating.message().starts_with("Oscillating"));
        assert!(SimState::Completed.message().starts_with("Simulation completed"));
    }

    #[test]
    fn zero_cap_starts_completed() {
        let sim = Simulation::new(config(&[(0, 0)]), Dimensions::new(2, 2), 0);
        assert_eq!(sim.state(), SimState::Completed);
    }

    #[test]
    fn terminal_step_is_noop() {
        let mut sim = Simulation::new(Configuration::new(), Dimensions::new(2, 2), 5);
        sim.run_to_end();
        let transitions = sim.transitions();
        assert_eq!(sim.step(), SimState::Stable);
        assert_eq!(sim.transitions(), transitions);
    }

    #[test]
    fn pulsar_caught_by_full_history() {
        // Period 3: the repeat matches two configurations back, not the last
        let mut cells = Vec::new();
        for &(r, c) in &[(0usize, 2usize), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10)] {
            for &dr in &[0usize, 5, 7, 12] {
                cells.push((r + dr, c));
            }
        }
        for &(r, c) in &[(2usize, 0usize), (3, 0), (4, 0)] {
            for &dc in &[0usize, 5, 7, 12] {
                for &dr in &[0usize, 6] {
                    cells.push((r + dr, c + dc));
                }
            }
        }
        let pulsar: Configuration = cells
            .into_iter()
            .map(|(r, c)| Cell::new(r + 2, c + 2))
            .collect();
        assert_eq!(pulsar.population(), 48);

        let mut sim = Simulation::new(pulsar, Dimensions::new(17, 17), 50);
        assert_eq!(sim.run_to_end(), SimState::Oscillating);
        assert_eq!(sim.transitions(), 3);
    }
}
