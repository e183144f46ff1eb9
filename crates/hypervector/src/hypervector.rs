//! # Hypervector batches
//!
//! [`Hypervectors`] is an `(n, d)` batch of hypervectors of a single
//! architecture. It owns the backend tensor holding the elements and
//! remembers what the backend cannot: the architecture, the logical element
//! type and whether gradients are tracked.
//!
//! ## Layout
//!
//! Real element types are stored as a rank 2 tensor `(n, d)`. Complex element
//! types are stored as a rank 3 tensor `(n, d, 2)` whose last axis holds the
//! real and imaginary parts. [`Hypervectors::shape`] always reports `(n, d)`.

use std::fmt;

use crate::backend::Backend;
use crate::dtype::DType;
use crate::error::{HypervectorError, Result};
use crate::vsa::Vsa;

/// In a batch, the `0th` dimension indexes hypervectors
pub const BATCH_DIM: usize = 0;

/// In a batch, the `1st` dimension indexes hypervector elements
pub const ELEMENT_DIM: usize = 1;

/// For complex batches, the trailing axis holding `(real, imaginary)`
pub const COMPLEX_DIM: usize = 2;

/// A batch of `n` hypervectors of dimensionality `d`.
#[derive(Debug, Clone)]
pub struct Hypervectors<B: Backend> {
    data: B,
    vsa: Vsa,
    dtype: DType,
    requires_grad: bool,
}

impl<B: Backend> Hypervectors<B> {
    /// Wrap an existing backend tensor.
    ///
    /// # Parameters
    ///
    /// * `data` - Tensor of shape `(n, d)`, or `(n, d, 2)` for complex types
    /// * `vsa` - Architecture the elements belong to
    /// * `dtype` - Logical element type, which must be supported by `vsa`
    /// * `requires_grad` - Whether `data` takes part in differentiation; when set,
    ///   `data` is handed to [`Backend::track_gradients`]
    ///
    /// # Errors
    ///
    /// * [`HypervectorError::UnsupportedDType`] when `dtype` is not supported by `vsa`
    /// * [`HypervectorError::NonDifferentiable`] when gradients are requested for a boolean or integer type
    /// * [`HypervectorError::ShapeMismatch`] when `data` does not have the layout `dtype` requires
    pub fn from_tensor(data: B, vsa: Vsa, dtype: DType, requires_grad: bool) -> Result<Self> {
        vsa.resolve_dtype(Some(dtype))?;
        if requires_grad && !dtype.is_differentiable() {
            return Err(HypervectorError::NonDifferentiable(dtype));
        }

        let shape = data.shape();
        let layout_ok = if dtype.is_complex() {
            shape.len() == 3 && shape[COMPLEX_DIM] == 2
        } else {
            shape.len() == 2
        };
        if !layout_ok {
            let mut expected = shape.iter().take(2).copied().collect::<Vec<_>>();
            if dtype.is_complex() {
                expected.push(2);
            }
            return Err(HypervectorError::ShapeMismatch { expected, actual: shape });
        }

        let data = if requires_grad {
            data.track_gradients()?
        } else {
            data
        };
        Ok(Self::from_parts(data, vsa, dtype, requires_grad))
    }

    pub(crate) fn from_parts(data: B, vsa: Vsa, dtype: DType, requires_grad: bool) -> Self {
        Self { data, vsa, dtype, requires_grad }
    }

    /// The architecture of this batch.
    pub fn vsa(&self) -> Vsa {
        self.vsa
    }

    /// The logical element type of this batch.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Whether this batch takes part in differentiation.
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// The logical shape `(n, d)`.
    pub fn shape(&self) -> Vec<usize> {
        self.data.shape().into_iter().take(2).collect()
    }

    /// Number of dimensions of the logical shape, always `2`.
    pub fn dim(&self) -> usize {
        2
    }

    /// Number of hypervectors `n`.
    pub fn len(&self) -> usize {
        self.data.shape()[BATCH_DIM]
    }

    /// Whether the batch holds no hypervectors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality `d` of each hypervector.
    pub fn dimensions(&self) -> usize {
        self.data.shape()[ELEMENT_DIM]
    }

    /// The device the elements live on.
    pub fn device(&self) -> B::Device {
        self.data.device()
    }

    /// The backend tensor holding the elements.
    pub fn tensor(&self) -> &B {
        &self.data
    }

    /// Consume the batch, returning the backend tensor.
    pub fn into_tensor(self) -> B {
        self.data
    }

    /// The hypervectors at rows `start..start + len`.
    pub fn narrow(&self, start: usize, len: usize) -> Result<Self> {
        let data = self.data.narrow(BATCH_DIM, start, len)?;
        Ok(self.with_data(data))
    }

    /// The single hypervector at row `index`, as a batch of one.
    pub fn get(&self, index: usize) -> Result<Self> {
        self.narrow(index, 1)
    }

    /// Stack batches of the same architecture and dimensionality along the batch dimension.
    ///
    /// # Errors
    ///
    /// [`HypervectorError::VsaMismatch`] or [`HypervectorError::ShapeMismatch`]
    /// if the batches disagree on architecture or dimensionality.
    pub fn cat(batches: &[Self]) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(HypervectorError::ShapeMismatch { expected: vec![1], actual: vec![0] });
        };
        for other in &batches[1..] {
            first.check_vsa(other)?;
            if other.dimensions() != first.dimensions() {
                return Err(HypervectorError::ShapeMismatch {
                    expected: vec![other.len(), first.dimensions()],
                    actual: other.shape(),
                });
            }
        }

        let tensors: Vec<B> = batches.iter().map(|b| b.data.clone()).collect();
        let data = B::cat(&tensors, BATCH_DIM)?;
        let requires_grad = batches.iter().any(|b| b.requires_grad);
        Ok(Self::from_parts(data, first.vsa, first.dtype, requires_grad))
    }

    /// Download the elements as rows of real values.
    ///
    /// Booleans are reported as `0.0`/`1.0`.
    ///
    /// # Errors
    ///
    /// [`HypervectorError::UnsupportedDType`] for complex batches, use
    /// [`Hypervectors::to_complex_vec2`] instead.
    pub fn to_vec2(&self) -> Result<Vec<Vec<f64>>> {
        if self.dtype.is_complex() {
            return Err(HypervectorError::UnsupportedDType { vsa: self.vsa, dtype: self.dtype });
        }
        if self.dimensions() == 0 {
            return Ok(vec![Vec::new(); self.len()]);
        }
        let values = self.data.to_values()?;
        Ok(rows(values, self.dimensions()))
    }

    /// Download the elements as rows of `(real, imaginary)` pairs.
    ///
    /// Real batches report an imaginary part of zero.
    pub fn to_complex_vec2(&self) -> Result<Vec<Vec<(f64, f64)>>> {
        if self.dimensions() == 0 {
            return Ok(vec![Vec::new(); self.len()]);
        }
        let values = self.data.to_values()?;
        let pairs: Vec<(f64, f64)> = if self.dtype.is_complex() {
            values.chunks_exact(2).map(|c| (c[0], c[1])).collect()
        } else {
            values.into_iter().map(|v| (v, 0.0)).collect()
        };
        Ok(rows(pairs, self.dimensions()))
    }

    pub(crate) fn with_data(&self, data: B) -> Self {
        Self::from_parts(data, self.vsa, self.dtype, self.requires_grad)
    }

    pub(crate) fn check_vsa(&self, other: &Self) -> Result<()> {
        if self.vsa != other.vsa {
            return Err(HypervectorError::VsaMismatch { left: self.vsa, right: other.vsa });
        }
        Ok(())
    }

    pub(crate) fn check_same_shape(&self, other: &Self) -> Result<()> {
        self.check_vsa(other)?;
        if self.shape() != other.shape() {
            return Err(HypervectorError::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }
}

impl<B: Backend> fmt::Display for Hypervectors<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hypervectors({}, {:?}, {}, requires_grad={})",
            self.vsa,
            self.shape(),
            self.dtype,
            self.requires_grad
        )
    }
}

/// Split an `(n, d, 2)` complex layout into its `(n, d)` real and imaginary parts.
pub(crate) fn split_parts<B: Backend>(data: &B) -> Result<(B, B)> {
    let re = data.narrow(COMPLEX_DIM, 0, 1)?.squeeze(COMPLEX_DIM)?;
    let im = data.narrow(COMPLEX_DIM, 1, 1)?.squeeze(COMPLEX_DIM)?;
    Ok((re, im))
}

/// Join `(n, d)` real and imaginary parts into the `(n, d, 2)` complex layout.
pub(crate) fn join_parts<B: Backend>(re: &B, im: &B) -> Result<B> {
    B::cat(&[re.unsqueeze(COMPLEX_DIM)?, im.unsqueeze(COMPLEX_DIM)?], COMPLEX_DIM)
}

/// Storage shape of an `(n, d)` batch of `dtype`.
pub(crate) fn storage_shape(n: usize, d: usize, dtype: DType) -> Vec<usize> {
    if dtype.is_complex() {
        vec![n, d, 2]
    } else {
        vec![n, d]
    }
}

fn rows<T>(values: Vec<T>, width: usize) -> Vec<Vec<T>> {
    let mut out = Vec::with_capacity(values.len() / width);
    let mut iter = values.into_iter().peekable();
    while iter.peek().is_some() {
        out.push(iter.by_ref().take(width).collect());
    }
    out
}
