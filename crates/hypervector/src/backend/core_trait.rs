use std::fmt::{Debug, Display};

use crate::dtype::DType;
use crate::error::Result;

/// The backend trait that must be fulfilled by a tensor substrate to hold hypervectors.
///
/// Every `dtype` argument names a *real* storage type: complex batches are
/// laid out by the caller as a trailing axis of two real components, so a
/// backend never sees [`DType::Complex64`] or [`DType::Complex128`] directly.
/// Backends are free to widen a type they cannot represent natively.
pub trait Backend: Debug + Display + Clone + Send + Sync + 'static {
    /// Where a tensor lives.
    type Device: Debug + Clone + Send + Sync;

    /// The local compute device used when the caller does not choose one.
    fn default_device() -> Self::Device;

    /// Allocate a tensor of `shape` filled with zeros.
    fn zeros(shape: &[usize], dtype: DType, device: &Self::Device) -> Result<Self>;

    /// Allocate a tensor of `shape` filled with ones.
    fn ones(shape: &[usize], dtype: DType, device: &Self::Device) -> Result<Self>;

    /// Upload row-major host values into a tensor of `shape`.
    fn from_values(values: Vec<f64>, shape: &[usize], dtype: DType, device: &Self::Device) -> Result<Self>;

    /// Download the tensor as row-major host values.
    fn to_values(&self) -> Result<Vec<f64>>;

    /// Return the shape of this tensor
    fn shape(&self) -> Vec<usize>;

    /// Return the device this tensor lives on
    fn device(&self) -> Self::Device;

    /// Convert to another storage type
    fn cast(&self, dtype: DType) -> Result<Self>;

    /// Return a copy of this tensor that takes part in differentiation
    fn track_gradients(&self) -> Result<Self>;

    /// Element-wise sum with a tensor of equal shape
    fn add(&self, rhs: &Self) -> Result<Self>;

    /// Element-wise difference with a tensor of equal shape
    fn sub(&self, rhs: &Self) -> Result<Self>;

    /// Element-wise product with a tensor of equal shape
    fn mul(&self, rhs: &Self) -> Result<Self>;

    /// Element-wise quotient with a tensor of equal shape
    fn div(&self, rhs: &Self) -> Result<Self>;

    /// Compute `self * mul + add` element-wise
    fn affine(&self, mul: f64, add: f64) -> Result<Self>;

    /// Element-wise square root
    fn sqrt(&self) -> Result<Self>;

    /// Element-wise `max(self, min)`
    fn clamp_min(&self, min: f64) -> Result<Self>;

    /// Element-wise inequality against a tensor of equal shape, as `0`/`1` in this tensor's type
    fn not_equal(&self, rhs: &Self) -> Result<Self>;

    /// Element-wise `self > value`, as `0`/`1` in this tensor's type
    fn greater_than(&self, value: f64) -> Result<Self>;

    /// Sum over `dim`, removing it
    fn sum_dim(&self, dim: usize) -> Result<Self>;

    /// Matrix product over the last two dimensions, batched over the leading ones
    fn matmul(&self, rhs: &Self) -> Result<Self>;

    /// Swap the last two dimensions
    fn transpose(&self) -> Result<Self>;

    /// View the same elements under a new shape
    fn reshape(&self, shape: &[usize]) -> Result<Self>;

    /// Insert a dimension of size `1` at `dim`
    fn unsqueeze(&self, dim: usize) -> Result<Self>;

    /// Remove the size `1` dimension at `dim`
    fn squeeze(&self, dim: usize) -> Result<Self>;

    /// Broadcast size `1` dimensions up to `shape`
    fn broadcast_as(&self, shape: &[usize]) -> Result<Self>;

    /// Slice a given `dim` from `start` to `start + len`
    fn narrow(&self, dim: usize, start: usize, len: usize) -> Result<Self>;

    /// Concatenate several tensors along dimension `dim`, in the order supplied
    fn cat(tensors: &[Self], dim: usize) -> Result<Self>;

    /// Gather the slices at `indices` along `dim`, in the order supplied
    fn index_select(&self, indices: &[usize], dim: usize) -> Result<Self>;
}
