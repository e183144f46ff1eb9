//! Hypervector algebra: binding, bundling, permutation and their inverses.
//!
//! Binary operations require both operands to share architecture and shape.
//! The result keeps the left operand's element type and tracks gradients when
//! either operand does.

use rand::Rng;

use crate::backend::Backend;
use crate::dtype::DType;
use crate::error::{HypervectorError, Result};
use crate::hypervector::{join_parts, split_parts, Hypervectors, BATCH_DIM, ELEMENT_DIM};
use crate::vsa::Vsa;

use super::sample;

/// The right operand's tensor, converted to the left operand's storage type.
fn aligned<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>) -> Result<B> {
    b.tensor().cast(a.dtype().component())
}

fn combined<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>, data: B) -> Hypervectors<B> {
    Hypervectors::from_parts(data, a.vsa(), a.dtype(), a.requires_grad() || b.requires_grad())
}

/// Binds two batches row by row.
///
/// The result is dissimilar to both inputs and `unbind(bind(a, b), b)`
/// recovers `a` (approximately, for HRR).
///
/// * BSC - exclusive or
/// * MAP - element-wise product
/// * HRR - circular convolution along the element dimension
/// * FHRR - element-wise complex product
///
/// # Errors
///
/// [`HypervectorError::VsaMismatch`] or [`HypervectorError::ShapeMismatch`]
/// when the operands disagree.
pub fn bind<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>) -> Result<Hypervectors<B>> {
    a.check_same_shape(b)?;
    tracing::trace!(vsa = %a.vsa(), shape = ?a.shape(), "bind");

    let lhs = a.tensor();
    let rhs = aligned(a, b)?;
    let data = match a.vsa() {
        Vsa::Bsc => lhs.not_equal(&rhs)?,
        Vsa::Map => lhs.mul(&rhs)?,
        Vsa::Hrr => circular_convolution(lhs, &rhs)?,
        Vsa::Fhrr => complex_product(lhs, &rhs)?,
    };
    Ok(combined(a, b, data))
}

/// Unbinds `b` from `a`, i.e. `bind(a, inverse(b))`.
pub fn unbind<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>) -> Result<Hypervectors<B>> {
    bind(a, &inverse(b)?)
}

/// The inverse of each hypervector with respect to binding.
///
/// BSC and MAP hypervectors are their own inverse. HRR uses the involution
/// `x[0], x[d-1], ..., x[1]`, which is exact for unitary vectors and a close
/// approximation for random ones. FHRR takes the complex conjugate.
pub fn inverse<B: Backend>(a: &Hypervectors<B>) -> Result<Hypervectors<B>> {
    let data = match a.vsa() {
        Vsa::Bsc | Vsa::Map => a.tensor().clone(),
        Vsa::Hrr => {
            let d = a.dimensions();
            let indices: Vec<usize> = (0..d).map(|i| (d - i) % d).collect();
            a.tensor().index_select(&indices, ELEMENT_DIM)?
        }
        Vsa::Fhrr => {
            let (re, im) = split_parts(a.tensor())?;
            join_parts(&re, &im.affine(-1.0, 0.0)?)?
        }
    };
    Ok(a.with_data(data))
}

/// The negation of each hypervector with respect to bundling.
///
/// BSC flips every bit, the other architectures negate every element.
pub fn negative<B: Backend>(a: &Hypervectors<B>) -> Result<Hypervectors<B>> {
    let data = match a.vsa() {
        Vsa::Bsc => {
            let ones = B::ones(&a.tensor().shape(), a.dtype().component(), &a.device())?;
            a.tensor().not_equal(&ones)?
        }
        Vsa::Map | Vsa::Hrr | Vsa::Fhrr => a.tensor().affine(-1.0, 0.0)?,
    };
    Ok(a.with_data(data))
}

/// Bundles two batches row by row.
///
/// The result is similar to both inputs. BSC takes the element-wise majority
/// of `a`, `b` and a random tie-breaker drawn from `rng`; the other
/// architectures add.
///
/// # Errors
///
/// [`HypervectorError::VsaMismatch`] or [`HypervectorError::ShapeMismatch`]
/// when the operands disagree.
pub fn bundle<B, R>(a: &Hypervectors<B>, b: &Hypervectors<B>, rng: &mut R) -> Result<Hypervectors<B>>
where
    B: Backend,
    R: Rng + ?Sized,
{
    a.check_same_shape(b)?;
    tracing::trace!(vsa = %a.vsa(), shape = ?a.shape(), "bundle");

    let rhs = aligned(a, b)?;
    let data = match a.vsa() {
        Vsa::Bsc => {
            let shape = a.tensor().shape();
            let tiebreak = sample::bernoulli(rng, shape.iter().product());
            let tiebreak = B::from_values(tiebreak, &shape, DType::F64, &a.device())?;
            let votes = a.tensor().cast(DType::F64)?.add(&rhs.cast(DType::F64)?)?.add(&tiebreak)?;
            votes.greater_than(1.0)?.cast(a.dtype().component())?
        }
        Vsa::Map | Vsa::Hrr | Vsa::Fhrr => a.tensor().add(&rhs)?,
    };
    Ok(combined(a, b, data))
}

/// Bundles all `n` hypervectors of a batch into a single `(1, d)` hypervector.
///
/// BSC takes a majority vote over the rows, adding one random tie-breaker row
/// from `rng` when `n` is even. The other architectures sum the rows.
///
/// # Errors
///
/// [`HypervectorError::ShapeMismatch`] when the batch is empty.
pub fn multiset<B, R>(a: &Hypervectors<B>, rng: &mut R) -> Result<Hypervectors<B>>
where
    B: Backend,
    R: Rng + ?Sized,
{
    if a.is_empty() {
        return Err(HypervectorError::ShapeMismatch {
            expected: vec![1, a.dimensions()],
            actual: a.shape(),
        });
    }
    tracing::trace!(vsa = %a.vsa(), shape = ?a.shape(), "multiset");

    let data = match a.vsa() {
        Vsa::Bsc => {
            let d = a.dimensions();
            let mut votes = a.tensor().cast(DType::F64)?.sum_dim(BATCH_DIM)?;
            let mut voters = a.len();
            if voters % 2 == 0 {
                let tiebreak = B::from_values(sample::bernoulli(rng, d), &[d], DType::F64, &a.device())?;
                votes = votes.add(&tiebreak)?;
                voters += 1;
            }
            votes
                .greater_than((voters / 2) as f64)?
                .cast(a.dtype().component())?
                .unsqueeze(BATCH_DIM)?
        }
        Vsa::Map | Vsa::Hrr | Vsa::Fhrr => a.tensor().sum_dim(BATCH_DIM)?.unsqueeze(BATCH_DIM)?,
    };
    Ok(a.with_data(data))
}

/// Cyclically shifts every hypervector by `shifts` positions.
///
/// `result[i] = a[(i - shifts) mod d]`, so negative shifts rotate the other
/// way and a shift of `d` is the identity.
pub fn permute<B: Backend>(a: &Hypervectors<B>, shifts: i64) -> Result<Hypervectors<B>> {
    let d = a.dimensions();
    if d == 0 {
        return Ok(a.clone());
    }
    let shift = shifts.rem_euclid(d as i64) as usize;
    if shift == 0 {
        return Ok(a.clone());
    }

    let head = a.tensor().narrow(ELEMENT_DIM, d - shift, shift)?;
    let tail = a.tensor().narrow(ELEMENT_DIM, 0, d - shift)?;
    Ok(a.with_data(B::cat(&[head, tail], ELEMENT_DIM)?))
}

/// Shifted copies of the right operand materialised per matrix product.
const CONVOLUTION_BLOCK: usize = 64;

/// Circular convolution of two `(n, d)` tensors along `d`.
///
/// `result[k] = sum_j lhs[j] * rhs[(k - j) mod d]`. The rotations of `rhs`
/// are taken as windows of `rhs` concatenated with itself and multiplied in
/// blocks of [`CONVOLUTION_BLOCK`] rows, so at most `n * d * CONVOLUTION_BLOCK`
/// elements are live at once.
fn circular_convolution<B: Backend>(lhs: &B, rhs: &B) -> Result<B> {
    let d = lhs.shape()[ELEMENT_DIM];
    if d == 0 {
        return Ok(lhs.clone());
    }

    let doubled = B::cat(&[rhs.clone(), rhs.clone()], ELEMENT_DIM)?;
    let mut sum = convolution_block(lhs, &doubled, d, 0)?;
    for start in (CONVOLUTION_BLOCK..d).step_by(CONVOLUTION_BLOCK) {
        sum = sum.add(&convolution_block(lhs, &doubled, d, start)?)?;
    }
    Ok(sum)
}

/// Contribution of `lhs[start..start + CONVOLUTION_BLOCK]` to the convolution.
fn convolution_block<B: Backend>(lhs: &B, doubled: &B, d: usize, start: usize) -> Result<B> {
    let len = CONVOLUTION_BLOCK.min(d - start);
    // doubled[d - j .. 2d - j] is rhs rotated right by j
    let rotations = (start..start + len)
        .map(|j| doubled.narrow(ELEMENT_DIM, d - j, d)?.unsqueeze(1))
        .collect::<Result<Vec<_>>>()?;
    let rotations = B::cat(&rotations, 1)?;
    let weights = lhs.narrow(ELEMENT_DIM, start, len)?.unsqueeze(1)?;
    weights.matmul(&rotations)?.squeeze(1)
}

fn complex_product<B: Backend>(lhs: &B, rhs: &B) -> Result<B> {
    let (ar, ai) = split_parts(lhs)?;
    let (br, bi) = split_parts(rhs)?;
    let re = ar.mul(&br)?.sub(&ai.mul(&bi)?)?;
    let im = ar.mul(&bi)?.add(&ai.mul(&br)?)?;
    join_parts(&re, &im)
}
