//! Host-side sampling of hypervector elements.
//!
//! Elements are drawn on the host from a [`ChaCha8Rng`] and uploaded, so a
//! seed reproduces the same batch on every backend and device.

use std::f64::consts::PI;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::Result;

/// A generator seeded with `seed`, or with a random seed when `None`.
pub(crate) fn generator(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

/// `len` values, each `1.0` with probability one half and `0.0` otherwise.
pub(crate) fn bernoulli<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 }).collect()
}

/// `len` values, each `1.0` or `-1.0` with probability one half.
pub(crate) fn bipolar<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len).map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 }).collect()
}

/// `len` normally distributed values with mean zero.
///
/// # Errors
///
/// [`HypervectorError::Distribution`](crate::HypervectorError::Distribution)
/// when `std` is negative or NaN.
pub(crate) fn normal<R: Rng + ?Sized>(rng: &mut R, len: usize, std: f64) -> Result<Vec<f64>> {
    let normal = Normal::new(0.0, std)?;
    Ok(normal.sample_iter(rng).take(len).collect())
}

/// `len` unit phasors with uniform angle, interleaved as `(cos, sin)` pairs.
pub(crate) fn unit_phasors<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(len * 2);
    for _ in 0..len {
        let theta: f64 = rng.gen_range(-PI..PI);
        values.push(theta.cos());
        values.push(theta.sin());
    }
    values
}
