use crate::fx::Fx;

pub const DEFAULT_SEED_LOW: u32 = 16_180;
pub const DEFAULT_SEED_HIGH: u32 = 31_415;

// 5 steps visibly in animation, 8 looks smooth.
pub const SQRT_ITERATIONS: u32 = 8;

/// Largest coordinate (2048.0) `snoise2` accepts without intermediate overflow.
pub const MAX_COORD: Fx = Fx::from_bits(1 << 21);

pub const PANEL_WIDTH: i32 = 600;
pub const PANEL_HEIGHT: i32 = 600;
pub const DEFAULT_CELL_PX: i32 = 64;
pub const DEFAULT_DRIFT_X: Fx = Fx::from_bits(64);
pub const DEFAULT_DRIFT_Y: Fx = Fx::from_bits(32);
pub const DRIFT_WRAP: Fx = Fx::from_int(128);
pub const DEFAULT_OCTAVES: u8 = 1;
pub const MAX_OCTAVES: u8 = 4;
pub const MAX_DITHER_WIDTH: usize = 600;
pub const DITHER_THRESHOLD: i16 = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
    /// Pixels per noise unit.
    pub cell_px: i32,
    /// Origin shift per frame.
    pub drift_x: Fx,
    pub drift_y: Fx,
    pub octaves: u8,
    /// Grain generator seed as `(low, high)`.
    pub seed: (u32, u32),
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            cell_px: DEFAULT_CELL_PX,
            drift_x: DEFAULT_DRIFT_X,
            drift_y: DEFAULT_DRIFT_Y,
            octaves: DEFAULT_OCTAVES,
            seed: (DEFAULT_SEED_LOW, DEFAULT_SEED_HIGH),
        }
    }
}
