//! Terminal games: Conway's Game of Life and Tic-Tac-Toe.

pub mod config;
pub mod life;
pub mod logging;
pub mod settings;
pub mod terminal;
pub mod tictactoe;
