//! 2D simplex noise in Q10 integer arithmetic.
//!
//! Follows Gustavson's speed-improved formulation: skew onto the triangular
//! grid, pick the triangle, hash three corners into [`GRAD3`], and sum
//! quartic falloff contributions. Output is roughly `[-1, 1]` in 1/1024
//! units and always a multiple of [`OUTPUT_SCALE`].

use crate::{
    config::MAX_COORD,
    error::NoiseError,
    fx::Fx,
    lattice::{GRAD3, PERM, PERM_MOD12},
};

/// `0.5 * (sqrt(3) - 1)`, truncated to Q10.
pub const SKEW: Fx = Fx::from_bits(374);
/// `(3 - sqrt(3)) / 6`, truncated to Q10. Used for the corner offsets.
pub const UNSKEW: Fx = Fx::from_bits(216);
/// Cell-origin unskew in Q20, chosen as `SKEW / (1 + 2 * SKEW)` so that
/// skew and unskew stay inverse far from the origin. The Q10 [`UNSKEW`]
/// drifts by one cell width per ~1000 units of `i + j`.
pub const UNSKEW_Q20: i64 = 221_313;
/// Squared influence radius of a corner.
pub const RADIUS_SQ: Fx = Fx::HALF;
pub const OUTPUT_SCALE: i32 = 70;

#[inline]
pub fn in_domain(x: Fx, y: Fx) -> bool {
    x >= Fx::ZERO && y >= Fx::ZERO && x <= MAX_COORD && y <= MAX_COORD
}

/// Pure and deterministic. No range check: outside [`in_domain`] the
/// integer math wraps and the result is garbage, not a panic.
pub fn snoise2(x: Fx, y: Fx) -> Fx {
    let s = (x + y) * SKEW;
    // Truncation equals floor here because the skewed sum is non-negative.
    let i = (x + s).to_int();
    let j = (y + s).to_int();
    let t = Fx::from_bits(((i64::from(i.wrapping_add(j)) * UNSKEW_Q20) >> 10) as i32);
    let x0 = x - (Fx::from_int(i) - t);
    let y0 = y - (Fx::from_int(j) - t);

    let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

    let x1 = x0 - Fx::from_int(i1 as i32) + UNSKEW;
    let y1 = y0 - Fx::from_int(j1 as i32) + UNSKEW;
    let x2 = x0 - Fx::ONE + UNSKEW * 2;
    let y2 = y0 - Fx::ONE + UNSKEW * 2;

    let ii = (i & 255) as usize;
    let jj = (j & 255) as usize;
    let gi0 = PERM_MOD12[ii + PERM[jj] as usize];
    let gi1 = PERM_MOD12[ii + i1 + PERM[jj + j1] as usize];
    let gi2 = PERM_MOD12[ii + 1 + PERM[jj + 1] as usize];

    let n = corner(x0, y0, gi0) + corner(x1, y1, gi1) + corner(x2, y2, gi2);
    n * OUTPUT_SCALE
}

pub fn snoise2_checked(x: Fx, y: Fx) -> Result<Fx, NoiseError> {
    if !in_domain(x, y) {
        return Err(NoiseError::OutOfDomain { x, y });
    }
    Ok(snoise2(x, y))
}

#[inline]
fn corner(x: Fx, y: Fx, gi: u8) -> Fx {
    let t = RADIUS_SQ - x * x - y * y;
    if t < Fx::ZERO {
        return Fx::ZERO;
    }
    // t^4 rather than t^3: two squarings are cheaper and still smooth.
    let t2 = t * t;
    let t4 = t2 * t2;
    t4 * dot_grad2(gi, x, y)
}

#[inline]
fn dot_grad2(gi: u8, x: Fx, y: Fx) -> Fx {
    let g = &GRAD3[gi as usize];
    x * i32::from(g[0]) + y * i32::from(g[1])
}
