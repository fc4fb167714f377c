use crate::{
    config::{DEFAULT_SEED_HIGH, DEFAULT_SEED_LOW},
    fx::{Fx, FRAC_MASK, SCALE},
};

/// Two-word add-rotate generator for animation jitter.
///
/// Fast and deterministic, not statistically strong. Each owner keeps its
/// own instance; nothing here is shared between threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRand {
    low: u32,
    high: u32,
}

impl GameRand {
    #[inline]
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    #[inline]
    pub const fn state(&self) -> (u32, u32) {
        (self.low, self.high)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.high = self.high.rotate_left(16).wrapping_add(self.low);
        self.low = self.low.wrapping_add(self.high);
        self.high
    }

    /// `m * [0, 1)` built from the low 10 bits of one draw.
    ///
    /// For positive `m` the result lies in `[0, m)`; negative `m` mirrors it.
    #[inline]
    pub fn fraction(&mut self, m: Fx) -> Fx {
        let r = (self.next_u32() & FRAC_MASK as u32) as i32;
        // i64 product: `m * 1023` overflows i32 once `m` passes 2048.0.
        let scaled = i64::from(m.to_bits()) * i64::from(r) / i64::from(SCALE);
        Fx::from_bits(scaled as i32)
    }
}

impl Default for GameRand {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_LOW, DEFAULT_SEED_HIGH)
    }
}
