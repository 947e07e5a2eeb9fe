use crate::life::engine::Dimensions;
use crate::terminal::FrameMode;

/// Default pause between rendered generations, in seconds
pub const DEFAULT_DELAY: f32 = 0.5;

/// Configuration for a Game of Life run
#[derive(Clone, Debug)]
pub struct LifeConfig {
    pub dims: Dimensions,
    pub generations: u64,
    pub density: Option<f64>, // Skip the menu and fill randomly
    pub seed: Option<u64>,
    pub time_step: f32,
    pub live_char: char,
    pub frame_mode: FrameMode,
}
