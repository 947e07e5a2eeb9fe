//! Two-player Tic-Tac-Toe on a shared terminal

use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Board side length
pub const SIZE: usize = 3;

/// Every row, column and diagonal
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Why a move was refused
#[derive(Debug, PartialEq, Eq)]
pub enum MoveError {
    Malformed,
    OutOfRange,
    Occupied,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Malformed => {
                write!(f, "Invalid input. Please enter two numbers separated by a space.")
            }
            MoveError::OutOfRange => write!(f, "Coordinates must be between 1 and {}.", SIZE),
            MoveError::Occupied => write!(f, "That cell is already occupied."),
        }
    }
}

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Player>; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Place `player` at a 0-based position
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), MoveError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(MoveError::OutOfRange)?;
        if cell.is_some() {
            return Err(MoveError::Occupied);
        }
        *cell = Some(player);
        Ok(())
    }

    pub fn has_won(&self, player: Player) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == Some(player)))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Outcome after `player` has just moved
    pub fn outcome(&self, player: Player) -> Option<Outcome> {
        if self.has_won(player) {
            Some(Outcome::Win(player))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n   1   2   3")?;
        for (i, row) in self.cells.iter().enumerate() {
            let marks: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or(' ', Player::mark).to_string())
                .collect();
            writeln!(f, "{}  {} ", i + 1, marks.join(" | "))?;
            if i < SIZE - 1 {
                writeln!(f, "  ---+---+---")?;
            }
        }
        Ok(())
    }
}

/// Parse a 1-based "row col" move into 0-based coordinates
pub fn parse_move(line: &str) -> Result<(usize, usize), MoveError> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MoveError::Malformed);
    };
    let row: i64 = row.parse().map_err(|_| MoveError::Malformed)?;
    let col: i64 = col.parse().map_err(|_| MoveError::Malformed)?;
    let in_range = |n: i64| (1..=SIZE as i64).contains(&n);
    if !in_range(row) || !in_range(col) {
        return Err(MoveError::OutOfRange);
    }
    Ok((row as usize - 1, col as usize - 1))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until `player` makes a legal move. `None` at end of input.
fn take_turn<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &mut Board,
    player: Player,
) -> io::Result<Option<(usize, usize)>> {
    loop {
        write!(output, "Player {}, enter your move (row and column): ", player)?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let placed = parse_move(&line)
            .and_then(|(r, c)| board.place(r, c, player).map(|_| (r, c)));
        match placed {
            Ok(pos) => return Ok(Some(pos)),
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
}

/// Play one game. `None` if input ran out before it finished.
pub fn play_game<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<Outcome>> {
    let mut board = Board::new();
    let mut player = Player::X;

    loop {
        writeln!(output, "{}", board)?;
        let Some((row, col)) = take_turn(input, output, &mut board, player)? else {
            return Ok(None);
        };
        debug!(%player, row, col, "move");

        if let Some(outcome) = board.outcome(player) {
            writeln!(output, "{}", board)?;
            match outcome {
                Outcome::Win(winner) => {
                    writeln!(output, "Congratulations! Player {} wins!", winner)?
                }
                Outcome::Draw => writeln!(output, "The game is a draw.")?,
            }
            info!(?outcome, "game over");
            return Ok(Some(outcome));
        }
        player = player.other();
    }
}

/// Play games until the players decline a rematch
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Vec<Outcome>> {
    writeln!(output, "Welcome to Tic-Tac-Toe!")?;
    let mut results = Vec::new();

    while let Some(outcome) = play_game(input, output)? {
        results.push(outcome);
        write!(output, "Would you like to play again? (y/n): ")?;
        output.flush()?;
        let again = read_line(input)?.unwrap_or_default().to_lowercase();
        if again != "y" {
            break;
        }
    }

    writeln!(output, "Thank you for playing!")?;
    Ok(results)
}

/// Run a session on stdin/stdout
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_session(&mut input, &mut output)?;
    Ok(())
}
