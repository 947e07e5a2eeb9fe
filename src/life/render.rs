//! Text rendering of a configuration

use super::engine::{Cell, Configuration, Dimensions};

/// Default marker for a live cell
pub const LIVE_CHAR: char = '█';
/// Marker for a dead cell
pub const DEAD_CHAR: char = ' ';

/// Render `config` as `dims.rows` lines of `dims.cols` characters
pub fn render_grid(config: &Configuration, dims: Dimensions, live_char: char) -> Vec<String> {
    (0..dims.rows)
        .map(|row| {
            (0..dims.cols)
                .map(|col| {
                    if config.is_alive(Cell::new(row, col)) {
                        live_char
                    } else {
                        DEAD_CHAR
                    }
                })
                .collect::<String>()
        })
        .collect()
}

/// One frame: the generation header followed by the grid between blank lines
pub fn render_frame(
    generation: u64,
    config: &Configuration,
    dims: Dimensions,
    live_char: char,
) -> String {
    let mut frame = format!("Generation {}\n\n", generation);
    for line in render_grid(config, dims, live_char) {
        frame.push_str(&line);
        frame.push('\n');
    }
    frame.push('\n');
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_marks_live_cells() {
        let config = Configuration::from_cells([Cell::new(0, 0), Cell::new(1, 2)]);
        let lines = render_grid(&config, Dimensions::new(2, 3), '#');
        assert_eq!(lines, vec!["#  ".to_string(), "  #".to_string()]);
    }

    #[test]
    fn empty_grid_is_blank() {
        let lines = render_grid(&Configuration::new(), Dimensions::new(2, 4), LIVE_CHAR);
        assert!(lines.iter().all(|l| l == "    "));
    }

    #[test]
    fn frame_has_header_and_padding() {
        let config = Configuration::from_cells([Cell::new(0, 1)]);
        let frame = render_frame(3, &config, Dimensions::new(1, 2), LIVE_CHAR);
        assert_eq!(frame, "Generation 3\n\n █\n\n");
    }
}
