//! Initial configuration: random density fill or typed coordinates

use super::engine::{Cell, Configuration, Dimensions};
use rand::prelude::*;
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Density used when the typed value is unusable
pub const DEFAULT_DENSITY: f64 = 0.2;

/// Why a typed coordinate line was rejected
#[derive(Debug, PartialEq, Eq)]
pub enum CellInputError {
    Malformed,
    OutOfBounds,
}

impl fmt::Display for CellInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellInputError::Malformed => {
                write!(f, "Invalid input. Please enter two integers separated by a space.")
            }
            CellInputError::OutOfBounds => write!(f, "Coordinates out of bounds."),
        }
    }
}

/// Parse a density in `[0.0, 1.0]`
pub fn parse_density(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| (0.0..=1.0).contains(d))
}

/// Parse a "row col" line and check it against the grid
pub fn parse_cell(line: &str, dims: Dimensions) -> Result<Cell, CellInputError> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CellInputError::Malformed);
    };
    // Negative numbers parse fine but can never be in bounds
    let row: i64 = row.parse().map_err(|_| CellInputError::Malformed)?;
    let col: i64 = col.parse().map_err(|_| CellInputError::Malformed)?;
    let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
        return Err(CellInputError::OutOfBounds);
    };
    let cell = Cell::new(row, col);
    if dims.contains(cell) {
        Ok(cell)
    } else {
        Err(CellInputError::OutOfBounds)
    }
}

/// Fill each cell independently with probability `density`
pub fn random_configuration<R: Rng>(dims: Dimensions, density: f64, rng: &mut R) -> Configuration {
    let density = density.clamp(0.0, 1.0);
    let cells = (0..dims.rows)
        .flat_map(|row| (0..dims.cols).map(move |col| Cell::new(row, col)))
        .filter(|_| rng.gen_bool(density))
        .collect::<Vec<_>>();
    debug!(density, live = cells.len(), area = dims.area(), "random fill");
    Configuration::from_cells(cells)
}

/// Read one line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<W: Write>(output: &mut W, text: &str) -> io::Result<()> {
    write!(output, "{}", text)?;
    output.flush()
}

/// Read typed coordinates until an empty line or end of input.
/// Rejected lines are reported and skipped.
pub fn read_manual<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    dims: Dimensions,
) -> io::Result<Configuration> {
    writeln!(output, "Enter live cell coordinates (row and column), one per line.")?;
    writeln!(output, "When finished, enter an empty line.")?;

    let mut cells = Vec::new();
    loop {
        prompt(output, "Cell (row col): ")?;
        let Some(line) = read_line(input)? else {
            writeln!(output)?;
            break;
        };
        if line.is_empty() {
            break;
        }
        match parse_cell(&line, dims) {
            Ok(cell) => cells.push(cell),
            Err(err) => {
                debug!(input = %line, error = ?err, "rejected coordinate");
                writeln!(output, "{}", err)?;
            }
        }
    }
    Ok(Configuration::from_cells(cells))
}

/// Prompt for a density, falling back to `DEFAULT_DENSITY`
pub fn read_density<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<f64> {
    prompt(output, "Enter the density of live cells (0.0 to 1.0): ")?;
    let line = read_line(input)?.unwrap_or_default();
    match parse_density(&line) {
        Some(density) => Ok(density),
        None => {
            warn!(input = %line, "unusable density, using default");
            writeln!(
                output,
                "Invalid density value. Using default density of {}.",
                DEFAULT_DENSITY
            )?;
            Ok(DEFAULT_DENSITY)
        }
    }
}

/// Interactive menu: random fill or manual entry.
///
/// Any choice other than 1 or 2 is an `InvalidInput` error.
pub fn prompt_initial<R: BufRead, W: Write, G: Rng>(
    input: &mut R,
    output: &mut W,
    dims: Dimensions,
    rng: &mut G,
) -> io::Result<Configuration> {
    writeln!(output, "Initialize the grid:")?;
    writeln!(output, "1. Random configuration")?;
    writeln!(output, "2. Manual input")?;
    prompt(output, "Select an option (1 or 2): ")?;

    match read_line(input)?.as_deref() {
        Some("1") => {
            let density = read_density(input, output)?;
            Ok(random_configuration(dims, density, rng))
        }
        Some("2") => read_manual(input, output, dims),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid choice {:?}. Exiting.", other.unwrap_or("")),
        )),
    }
}
