//! Random helpers with the ranges used by the game's tuning tables.

use rand::Rng;

/// Uniform integer in `[min, max]`. The bounds may be given in either order.
pub fn between<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Uniform float in `[min, max)`.
pub fn float_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

/// True with probability `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// +1.0 or -1.0 with equal odds.
pub fn sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if chance(rng, 0.5) {
        1.0
    } else {
        -1.0
    }
}
