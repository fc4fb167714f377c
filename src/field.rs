use log::{debug, warn};

use crate::{
    config::{FieldConfig, DITHER_THRESHOLD, DRIFT_WRAP, MAX_COORD, MAX_DITHER_WIDTH, MAX_OCTAVES},
    error::NoiseError,
    fx::{Fx, SCALE},
    rng::GameRand,
    simplex::snoise2,
};

// Integer translations decorrelate octaves without extra hashing.
const OCTAVE_SHIFT_X: Fx = Fx::from_int(17);
const OCTAVE_SHIFT_Y: Fx = Fx::from_int(29);

/// Animated noise field over a pixel panel.
///
/// Maps pixels and a frame counter onto noise coordinates that stay inside
/// [`MAX_COORD`] for every frame, so sampling never overflows.
pub struct NoiseField {
    cfg: FieldConfig,
    rng: GameRand,
}

impl NoiseField {
    pub fn new(cfg: FieldConfig) -> Result<Self, NoiseError> {
        if let Err(err) = validate(&cfg) {
            warn!("noise_field: config rejected reason={}", err.label());
            return Err(err);
        }
        Ok(Self {
            cfg,
            rng: GameRand::new(cfg.seed.0, cfg.seed.1),
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn reseed(&mut self, low: u32, high: u32) {
        self.rng = GameRand::new(low, high);
    }

    pub fn frame_origin(&self, frame: u32) -> (Fx, Fx) {
        let wrap = i64::from(DRIFT_WRAP.to_bits());
        let ox = (i64::from(frame) * i64::from(self.cfg.drift_x.to_bits())).rem_euclid(wrap);
        let oy = (i64::from(frame) * i64::from(self.cfg.drift_y.to_bits())).rem_euclid(wrap);
        (Fx::from_bits(ox as i32), Fx::from_bits(oy as i32))
    }

    /// Noise at pixel `(px, py)` of `frame`. With one octave this is exactly
    /// `snoise2` at the mapped coordinate.
    pub fn sample(&self, px: i32, py: i32, frame: u32) -> Fx {
        self.sample_from(self.frame_origin(frame), px, py)
    }

    /// Grain-dithered 1-bit rows: a pixel is black when a generator byte
    /// falls below its ink level. Advances the field's generator.
    pub fn render_rows_bw<F>(&mut self, y_start: i32, y_end: i32, frame: u32, mut put_black_pixel: F)
    where
        F: FnMut(i32, i32),
    {
        let width = self.cfg.width;
        let y0 = y_start.max(0);
        let y1 = y_end.min(self.cfg.height).max(y0);
        let origin = self.frame_origin(frame);
        debug!(
            "noise_field: rows frame={} y={}..{} origin=({}, {})",
            frame,
            y0,
            y1,
            origin.0.to_bits(),
            origin.1.to_bits()
        );

        for y in y0..y1 {
            for x in 0..width {
                let ink = ink_u8(self.sample_from(origin, x, y));
                let grain = (self.rng.next_u32() >> 24) as u8;
                if grain < ink {
                    put_black_pixel(x, y);
                }
            }
        }
    }

    /// Serpentine Atkinson dithering of the whole frame. Deterministic; panels
    /// wider than [`MAX_DITHER_WIDTH`] fall back to [`Self::render_rows_bw`].
    pub fn render_bw_atkinson<F>(&mut self, frame: u32, mut put_black_pixel: F)
    where
        F: FnMut(i32, i32),
    {
        let height = self.cfg.height;
        let w = self.cfg.width as usize;
        if w > MAX_DITHER_WIDTH {
            self.render_rows_bw(0, height, frame, put_black_pixel);
            return;
        }

        let origin = self.frame_origin(frame);
        debug!(
            "noise_field: atkinson frame={} origin=({}, {})",
            frame,
            origin.0.to_bits(),
            origin.1.to_bits()
        );

        let mut err_row0 = [0i16; MAX_DITHER_WIDTH + 4];
        let mut err_row1 = [0i16; MAX_DITHER_WIDTH + 4];
        let mut err_row2 = [0i16; MAX_DITHER_WIDTH + 4];

        for y in 0..height {
            let forward = (y & 1) == 0;
            for step in 0..w {
                let x = if forward { step } else { w - 1 - step };
                let xi = x + 2;
                let base = ink_u8(self.sample_from(origin, x as i32, y)) as i16;
                let ink = (base + err_row0[xi]).clamp(0, 255);
                let quantized = if ink >= DITHER_THRESHOLD { 255i16 } else { 0i16 };

                if quantized != 0 {
                    put_black_pixel(x as i32, y);
                }

                let error = ink - quantized;
                if error != 0 {
                    let e = error >> 3;
                    let (ahead, ahead2, behind) = if forward {
                        (xi + 1, xi + 2, xi - 1)
                    } else {
                        (xi - 1, xi - 2, xi + 1)
                    };
                    atkinson_add(&mut err_row0[ahead], e);
                    atkinson_add(&mut err_row0[ahead2], e);
                    atkinson_add(&mut err_row1[behind], e);
                    atkinson_add(&mut err_row1[xi], e);
                    atkinson_add(&mut err_row1[ahead], e);
                    atkinson_add(&mut err_row2[xi], e);
                }
            }

            let mut i = 0usize;
            let n = w + 4;
            while i < n {
                err_row0[i] = err_row1[i];
                err_row1[i] = err_row2[i];
                err_row2[i] = 0;
                i += 1;
            }
        }
    }

    #[inline]
    fn sample_from(&self, origin: (Fx, Fx), px: i32, py: i32) -> Fx {
        let x = origin.0 + Fx::from_int(px) / self.cfg.cell_px;
        let y = origin.1 + Fx::from_int(py) / self.cfg.cell_px;
        self.fractal(x, y)
    }

    fn fractal(&self, mut x: Fx, mut y: Fx) -> Fx {
        if self.cfg.octaves <= 1 {
            return snoise2(x, y);
        }

        let mut value = Fx::ZERO;
        let mut amp = Fx::ONE;
        let mut total = Fx::ZERO;
        for _ in 0..self.cfg.octaves {
            value += snoise2(x, y) * amp;
            total += amp;
            x = x * 2 + OCTAVE_SHIFT_X;
            y = y * 2 + OCTAVE_SHIFT_Y;
            amp = amp / 2;
        }
        value / total
    }
}

/// Maps `[-1, 1]` onto ink coverage `0..=255`.
#[inline]
pub fn ink_u8(value: Fx) -> u8 {
    (((value.to_bits() + SCALE) * 255) / (2 * SCALE)).clamp(0, 255) as u8
}

#[inline]
fn atkinson_add(cell: &mut i16, delta: i16) {
    *cell = cell.saturating_add(delta).clamp(-72, 72);
}

fn validate(cfg: &FieldConfig) -> Result<(), NoiseError> {
    if cfg.width <= 0 || cfg.height <= 0 {
        return Err(NoiseError::InvalidConfig("width/height must be > 0"));
    }
    if cfg.cell_px <= 0 {
        return Err(NoiseError::InvalidConfig("cell_px must be > 0"));
    }
    if cfg.octaves == 0 || cfg.octaves > MAX_OCTAVES {
        return Err(NoiseError::InvalidConfig("octaves out of range"));
    }

    let extent = i64::from(cfg.width.max(cfg.height)) * i64::from(SCALE) / i64::from(cfg.cell_px);
    let shift = i64::from(OCTAVE_SHIFT_X.to_bits().max(OCTAVE_SHIFT_Y.to_bits()));
    let mut reach = extent + i64::from(DRIFT_WRAP.to_bits());
    for _ in 1..cfg.octaves {
        reach = reach * 2 + shift;
    }
    if reach > i64::from(MAX_COORD.to_bits()) {
        return Err(NoiseError::InvalidConfig("field exceeds noise domain"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SEED_HIGH, DEFAULT_SEED_LOW};

    fn small_cfg(width: i32, height: i32) -> FieldConfig {
        FieldConfig {
            width,
            height,
            cell_px: 16,
            ..FieldConfig::default()
        }
    }

    fn collect_rows(field: &mut NoiseField, frame: u32) -> Vec<(i32, i32)> {
        let mut px = Vec::new();
        let height = field.config().height;
        field.render_rows_bw(0, height, frame, |x, y| px.push((x, y)));
        px
    }

    #[test]
    fn default_config_is_valid() {
        assert!(NoiseField::new(FieldConfig::default()).is_ok());
        let four = FieldConfig {
            octaves: MAX_OCTAVES,
            ..FieldConfig::default()
        };
        assert!(NoiseField::new(four).is_ok());
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let cases = [
            (
                FieldConfig {
                    cell_px: 0,
                    ..FieldConfig::default()
                },
                "cell_px must be > 0",
            ),
            (
                FieldConfig {
                    width: 0,
                    ..FieldConfig::default()
                },
                "width/height must be > 0",
            ),
            (
                FieldConfig {
                    octaves: 0,
                    ..FieldConfig::default()
                },
                "octaves out of range",
            ),
            (
                FieldConfig {
                    octaves: MAX_OCTAVES + 1,
                    ..FieldConfig::default()
                },
                "octaves out of range",
            ),
            (
                FieldConfig {
                    cell_px: 1,
                    octaves: MAX_OCTAVES,
                    ..FieldConfig::default()
                },
                "field exceeds noise domain",
            ),
        ];
        for (cfg, reason) in cases {
            match NoiseField::new(cfg) {
                Err(err) => assert_eq!(err, NoiseError::InvalidConfig(reason)),
                Ok(_) => panic!("accepted {cfg:?}"),
            }
        }
    }

    #[test]
    fn single_octave_sample_is_plain_simplex() {
        let field = NoiseField::new(FieldConfig::default()).unwrap();
        // 32 px and 16 px at 64 px per unit
        assert_eq!(field.sample(32, 16, 0), Fx::from_bits(-490));
        assert_eq!(
            field.sample(100, 200, 0),
            snoise2(Fx::from_bits(1600), Fx::from_bits(3200))
        );
    }

    #[test]
    fn origin_drifts_and_wraps() {
        let field = NoiseField::new(FieldConfig::default()).unwrap();
        assert_eq!(field.frame_origin(0), (Fx::ZERO, Fx::ZERO));
        assert_eq!(field.frame_origin(3), (Fx::from_bits(192), Fx::from_bits(96)));
        assert_eq!(field.frame_origin(2048), (Fx::ZERO, Fx::from_bits(65_536)));
        assert_eq!(field.frame_origin(4096), (Fx::ZERO, Fx::ZERO));
        let (ox, oy) = field.frame_origin(u32::MAX);
        assert!(ox >= Fx::ZERO && ox < DRIFT_WRAP);
        assert!(oy >= Fx::ZERO && oy < DRIFT_WRAP);
    }

    #[test]
    fn octaves_stay_in_range_and_differ_from_base() {
        let base = NoiseField::new(small_cfg(64, 64)).unwrap();
        let fbm = NoiseField::new(FieldConfig {
            octaves: 3,
            ..small_cfg(64, 64)
        })
        .unwrap();
        let mut differs = false;
        for y in (0..64).step_by(3) {
            for x in (0..64).step_by(3) {
                let v = fbm.sample(x, y, 7);
                assert!(v.abs() <= Fx::from_bits(1127), "{v:?}");
                differs |= v != base.sample(x, y, 7);
            }
        }
        assert!(differs);
    }

    #[test]
    fn ink_maps_unit_range() {
        assert_eq!(ink_u8(-Fx::ONE), 0);
        assert_eq!(ink_u8(Fx::ZERO), 127);
        assert_eq!(ink_u8(Fx::ONE), 255);
        assert_eq!(ink_u8(Fx::from_int(2)), 255);
        assert_eq!(ink_u8(Fx::from_int(-2)), 0);
    }

    #[test]
    fn grain_rows_repeat_after_reseed() {
        let mut field = NoiseField::new(small_cfg(48, 24)).unwrap();
        let first = collect_rows(&mut field, 5);
        let second = collect_rows(&mut field, 5);
        field.reseed(DEFAULT_SEED_LOW, DEFAULT_SEED_HIGH);
        let third = collect_rows(&mut field, 5);
        assert!(!first.is_empty());
        assert_eq!(first, third);
        assert_ne!(first, second);
    }

    #[test]
    fn row_window_is_clamped_to_panel() {
        let mut field = NoiseField::new(small_cfg(16, 8)).unwrap();
        let mut rows = Vec::new();
        field.render_rows_bw(-4, 100, 0, |x, y| {
            assert!((0..16).contains(&x));
            rows.push(y);
        });
        assert!(rows.iter().all(|y| (0..8).contains(y)));
    }

    #[test]
    fn atkinson_is_deterministic_and_mixed() {
        let mut a = NoiseField::new(small_cfg(64, 64)).unwrap();
        let mut b = NoiseField::new(small_cfg(64, 64)).unwrap();
        let mut pa = Vec::new();
        let mut pb = Vec::new();
        a.render_bw_atkinson(11, |x, y| pa.push((x, y)));
        b.render_bw_atkinson(11, |x, y| pb.push((x, y)));
        assert_eq!(pa, pb);
        assert!(!pa.is_empty() && pa.len() < 64 * 64);
    }

    #[test]
    fn wide_panels_fall_back_to_grain_rows() {
        let cfg = FieldConfig {
            width: MAX_DITHER_WIDTH as i32 + 8,
            height: 2,
            ..FieldConfig::default()
        };
        let mut dithered = NoiseField::new(cfg).unwrap();
        let mut rows = NoiseField::new(cfg).unwrap();
        let mut pa = Vec::new();
        dithered.render_bw_atkinson(1, |x, y| pa.push((x, y)));
        assert_eq!(pa, collect_rows(&mut rows, 1));
    }
}
