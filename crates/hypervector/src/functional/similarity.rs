//! Similarity kernels between two batches.
//!
//! Each kernel compares every hypervector of `a` `(n, d)` with every
//! hypervector of `b` `(m, d)` and returns an `(n, m)` real backend tensor.
//! Floating point inputs keep their type, complex inputs use the type of their
//! components, and boolean or integer inputs are computed in the process-wide
//! default float type.

use crate::backend::Backend;
use crate::dtype::{default_dtype, DType};
use crate::error::{HypervectorError, Result};
use crate::hypervector::{split_parts, Hypervectors, COMPLEX_DIM, ELEMENT_DIM};
use crate::vsa::Vsa;

const MIN_MAGNITUDE: f64 = 1e-12;

/// The float type similarities between batches of `dtype` are computed in.
pub fn similarity_dtype(dtype: DType) -> DType {
    if dtype.is_floating_point() {
        dtype
    } else if dtype.is_complex() {
        dtype.component()
    } else {
        default_dtype()
    }
}

fn check_comparable<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>) -> Result<()> {
    a.check_vsa(b)?;
    if a.dimensions() != b.dimensions() {
        return Err(HypervectorError::ShapeMismatch {
            expected: vec![b.len(), a.dimensions()],
            actual: b.shape(),
        });
    }
    Ok(())
}

/// Real-valued view of a batch in `dtype`; BSC bits become `-1`/`+1`.
fn real_view<B: Backend>(hv: &Hypervectors<B>, dtype: DType) -> Result<B> {
    let data = hv.tensor().cast(dtype)?;
    match hv.vsa() {
        Vsa::Bsc => data.affine(2.0, -1.0),
        _ => Ok(data),
    }
}

/// Dot product similarity.
///
/// BSC bits are mapped to `-1`/`+1` first. FHRR returns the real part of
/// `a . conj(b)`.
///
/// # Errors
///
/// [`HypervectorError::VsaMismatch`] when the architectures differ and
/// [`HypervectorError::ShapeMismatch`] when the dimensionalities differ.
pub fn dot_similarity<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>) -> Result<B> {
    check_comparable(a, b)?;
    let dtype = similarity_dtype(a.dtype());
    tracing::trace!(vsa = %a.vsa(), lhs = ?a.shape(), rhs = ?b.shape(), %dtype, "dot similarity");

    match a.vsa() {
        Vsa::Fhrr => {
            let (ar, ai) = split_parts(&a.tensor().cast(dtype)?)?;
            let (br, bi) = split_parts(&b.tensor().cast(dtype)?)?;
            ar.matmul(&br.transpose()?)?.add(&ai.matmul(&bi.transpose()?)?)
        }
        Vsa::Bsc | Vsa::Map | Vsa::Hrr => {
            let lhs = real_view(a, dtype)?;
            let rhs = real_view(b, dtype)?;
            lhs.matmul(&rhs.transpose()?)
        }
    }
}

/// Cosine similarity: dot similarity divided by the product of magnitudes.
///
/// Magnitudes are clamped away from zero, so an all-zero hypervector has
/// similarity `0` with everything.
///
/// # Errors
///
/// Same as [`dot_similarity`].
pub fn cosine_similarity<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>) -> Result<B> {
    let dot = dot_similarity(a, b)?;
    let dtype = similarity_dtype(a.dtype());

    let lhs = magnitude(a, dtype)?.unsqueeze(1)?;
    let rhs = magnitude(b, dtype)?.unsqueeze(0)?;
    let scale = lhs.matmul(&rhs)?.clamp_min(MIN_MAGNITUDE)?;
    dot.div(&scale)
}

/// Hamming similarity: the number of equal elements.
///
/// Complex elements are equal when both their parts are.
///
/// # Errors
///
/// Same as [`dot_similarity`].
pub fn hamming_similarity<B: Backend>(a: &Hypervectors<B>, b: &Hypervectors<B>) -> Result<B> {
    check_comparable(a, b)?;
    let dtype = similarity_dtype(a.dtype());
    tracing::trace!(vsa = %a.vsa(), lhs = ?a.shape(), rhs = ?b.shape(), %dtype, "hamming similarity");

    let (n, m, d) = (a.len(), b.len(), a.dimensions());
    let mut shape = vec![n, m, d];
    if a.dtype().is_complex() {
        shape.push(2);
    }

    let lhs = a.tensor().cast(dtype)?.unsqueeze(1)?.broadcast_as(&shape)?;
    let rhs = b.tensor().cast(dtype)?.unsqueeze(0)?.broadcast_as(&shape)?;
    let mut differs = lhs.not_equal(&rhs)?;
    if a.dtype().is_complex() {
        differs = differs.sum_dim(COMPLEX_DIM + 1)?.greater_than(0.0)?;
    }
    differs.sum_dim(ELEMENT_DIM + 1)?.affine(-1.0, d as f64)
}

/// Euclidean magnitude of each hypervector, shape `(n)`.
fn magnitude<B: Backend>(hv: &Hypervectors<B>, dtype: DType) -> Result<B> {
    let squared = if hv.dtype().is_complex() {
        let (re, im) = split_parts(&hv.tensor().cast(dtype)?)?;
        re.mul(&re)?.add(&im.mul(&im)?)?
    } else {
        let data = real_view(hv, dtype)?;
        data.mul(&data)?
    };
    squared.sum_dim(ELEMENT_DIM)?.sqrt()
}

#[cfg(all(test, feature = "candle"))]
mod tests {
    use super::*;
    use crate::functional::{random, BasisOptions};
    use candle_core::{Device, Tensor};
    use serial_test::serial;

    fn batch(values: Vec<f64>, shape: &[usize], vsa: Vsa, dtype: DType) -> Hypervectors<Tensor> {
        let data = <Tensor as Backend>::from_values(values, shape, dtype.component(), &Device::Cpu).unwrap();
        Hypervectors::from_tensor(data, vsa, dtype, false).unwrap()
    }

    fn values(t: &Tensor) -> Vec<f64> {
        <Tensor as Backend>::to_values(t).unwrap()
    }

    #[test]
    fn test_dot_similarity_shape_and_values() {
        let a = batch(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], Vsa::Hrr, DType::F64);
        let b = batch(vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0], &[3, 2], Vsa::Hrr, DType::F64);
        let dot = dot_similarity(&a, &b).unwrap();
        assert_eq!(dot.dims(), &[2, 3]);
        assert_eq!(values(&dot), vec![1.0, 2.0, 3.0, 3.0, 4.0, 7.0]);
    }

    #[test]
    #[serial]
    fn test_bsc_dot_similarity_is_bipolar() {
        let a = batch(vec![1.0, 0.0, 1.0, 1.0], &[1, 4], Vsa::Bsc, DType::Bool);
        let b = batch(vec![1.0, 1.0, 1.0, 0.0], &[1, 4], Vsa::Bsc, DType::Bool);
        let dot = dot_similarity(&a, &b).unwrap();
        assert_eq!(dot.dtype(), crate::backend::candle::storage_dtype(default_dtype()));
        assert_eq!(values(&dot), vec![0.0]);
        assert_eq!(values(&dot_similarity(&a, &a).unwrap()), vec![4.0]);
    }

    #[test]
    fn test_fhrr_dot_similarity_is_real_part() {
        let a = batch(vec![0.0, 1.0], &[1, 1, 2], Vsa::Fhrr, DType::Complex64);
        let b = batch(vec![0.0, 1.0, 1.0, 0.0], &[2, 1, 2], Vsa::Fhrr, DType::Complex64);
        assert_eq!(values(&dot_similarity(&a, &b).unwrap()), vec![1.0, 0.0]);
    }

    #[test]
    #[serial]
    fn test_cosine_similarity_of_random_batches() {
        let options = BasisOptions::<Device>::new();
        for vsa in [Vsa::Bsc, Vsa::Map, Vsa::Hrr, Vsa::Fhrr] {
            let a = random::<Tensor>(3, 4096, vsa, &options.clone().seed(1)).unwrap();
            let b = random::<Tensor>(3, 4096, vsa, &options.clone().seed(2)).unwrap();

            let own = values(&cosine_similarity(&a, &a).unwrap());
            let cross = values(&cosine_similarity(&a, &b).unwrap());
            for i in 0..3 {
                assert!((own[i * 3 + i] - 1.0).abs() < 1e-4, "{vsa}: self similarity {}", own[i * 3 + i]);
            }
            assert!(cross.iter().all(|c| c.abs() < 0.1), "{vsa}: {cross:?}");
        }
    }

    #[test]
    fn test_cosine_similarity_of_zero_vector() {
        let zero = batch(vec![0.0; 3], &[1, 3], Vsa::Map, DType::F32);
        let other = batch(vec![1.0, -1.0, 1.0], &[1, 3], Vsa::Map, DType::F32);
        assert_eq!(values(&cosine_similarity(&zero, &other).unwrap()), vec![0.0]);
    }

    #[test]
    #[serial]
    fn test_hamming_similarity_counts_equal_elements() {
        let a = batch(vec![1.0, 0.0, 1.0, 1.0], &[1, 4], Vsa::Bsc, DType::Bool);
        let b = batch(vec![1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0], &[2, 4], Vsa::Bsc, DType::Bool);
        assert_eq!(values(&hamming_similarity(&a, &b).unwrap()), vec![2.0, 4.0]);

        let c = batch(vec![1.0, 0.0, 1.0, 1.0], &[1, 2, 2], Vsa::Fhrr, DType::Complex64);
        let d = batch(vec![1.0, 0.0, 1.0, 0.0], &[1, 2, 2], Vsa::Fhrr, DType::Complex64);
        assert_eq!(values(&hamming_similarity(&c, &d).unwrap()), vec![1.0]);
    }

    #[test]
    fn test_similarity_rejects_mismatched_dimensions() {
        let a = batch(vec![0.0; 4], &[1, 4], Vsa::Map, DType::F32);
        let b = batch(vec![0.0; 6], &[2, 3], Vsa::Map, DType::F32);
        assert!(matches!(
            dot_similarity(&a, &b),
            Err(HypervectorError::ShapeMismatch { .. })
        ));
    }
}
