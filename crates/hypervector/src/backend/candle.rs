use candle_core::{Device, Tensor, Var};

use super::Backend;
use crate::dtype::DType;
use crate::error::Result;

/// Map a logical element type onto the candle type it is stored as.
///
/// Candle has no boolean, narrow signed integer or complex storage, so those
/// are widened: `bool` to `u8`, `int8`/`int16`/`int32` to `i64`, and complex
/// types to the float type of their components.
pub fn storage_dtype(dtype: DType) -> candle_core::DType {
    match dtype {
        DType::Bool | DType::U8 => candle_core::DType::U8,
        DType::I8 | DType::I16 | DType::I32 | DType::I64 => candle_core::DType::I64,
        DType::F16 => candle_core::DType::F16,
        DType::BF16 => candle_core::DType::BF16,
        DType::F32 | DType::Complex64 => candle_core::DType::F32,
        DType::F64 | DType::Complex128 => candle_core::DType::F64,
    }
}

impl Backend for Tensor {
    type Device = Device;

    fn default_device() -> Self::Device {
        Device::Cpu
    }

    fn zeros(shape: &[usize], dtype: DType, device: &Self::Device) -> Result<Self> {
        tracing::trace!(?shape, %dtype, storage = ?storage_dtype(dtype), "candle zeros");
        Ok(Tensor::zeros(shape, storage_dtype(dtype), device)?)
    }

    fn ones(shape: &[usize], dtype: DType, device: &Self::Device) -> Result<Self> {
        tracing::trace!(?shape, %dtype, storage = ?storage_dtype(dtype), "candle ones");
        Ok(Tensor::ones(shape, storage_dtype(dtype), device)?)
    }

    fn from_values(values: Vec<f64>, shape: &[usize], dtype: DType, device: &Self::Device) -> Result<Self> {
        let tensor = Tensor::from_vec(values, shape, device)?;
        Ok(tensor.to_dtype(storage_dtype(dtype))?)
    }

    fn to_values(&self) -> Result<Vec<f64>> {
        Ok(self.flatten_all()?.to_dtype(candle_core::DType::F64)?.to_vec1::<f64>()?)
    }

    fn shape(&self) -> Vec<usize> {
        self.dims().to_vec()
    }

    fn device(&self) -> Self::Device {
        Tensor::device(self).clone()
    }

    fn cast(&self, dtype: DType) -> Result<Self> {
        Ok(self.to_dtype(storage_dtype(dtype))?)
    }

    fn track_gradients(&self) -> Result<Self> {
        Ok(Var::from_tensor(self)?.as_tensor().clone())
    }

    fn add(&self, rhs: &Self) -> Result<Self> {
        Ok(Tensor::add(self, rhs)?)
    }

    fn sub(&self, rhs: &Self) -> Result<Self> {
        Ok(Tensor::sub(self, rhs)?)
    }

    fn mul(&self, rhs: &Self) -> Result<Self> {
        Ok(Tensor::mul(self, rhs)?)
    }

    fn div(&self, rhs: &Self) -> Result<Self> {
        Ok(Tensor::div(self, rhs)?)
    }

    fn affine(&self, mul: f64, add: f64) -> Result<Self> {
        Ok(Tensor::affine(self, mul, add)?)
    }

    fn sqrt(&self) -> Result<Self> {
        Ok(Tensor::sqrt(self)?)
    }

    fn clamp_min(&self, min: f64) -> Result<Self> {
        Ok(Tensor::maximum(self, min)?)
    }

    fn not_equal(&self, rhs: &Self) -> Result<Self> {
        Ok(Tensor::ne(self, rhs)?.to_dtype(self.dtype())?)
    }

    fn greater_than(&self, value: f64) -> Result<Self> {
        Ok(Tensor::gt(self, value)?.to_dtype(self.dtype())?)
    }

    fn sum_dim(&self, dim: usize) -> Result<Self> {
        Ok(Tensor::sum(self, dim)?)
    }

    fn matmul(&self, rhs: &Self) -> Result<Self> {
        Ok(self.contiguous()?.matmul(&rhs.contiguous()?)?)
    }

    fn transpose(&self) -> Result<Self> {
        Ok(self.t()?)
    }

    fn reshape(&self, shape: &[usize]) -> Result<Self> {
        Ok(Tensor::reshape(self, shape)?)
    }

    fn unsqueeze(&self, dim: usize) -> Result<Self> {
        Ok(Tensor::unsqueeze(self, dim)?)
    }

    fn squeeze(&self, dim: usize) -> Result<Self> {
        Ok(Tensor::squeeze(self, dim)?)
    }

    fn broadcast_as(&self, shape: &[usize]) -> Result<Self> {
        Ok(Tensor::broadcast_as(self, shape)?)
    }

    fn narrow(&self, dim: usize, start: usize, len: usize) -> Result<Self> {
        Ok(Tensor::narrow(self, dim, start, len)?)
    }

    fn cat(tensors: &[Self], dim: usize) -> Result<Self> {
        Ok(Tensor::cat(tensors, dim)?)
    }

    fn index_select(&self, indices: &[usize], dim: usize) -> Result<Self> {
        let ids: Vec<u32> = indices.iter().map(|&i| i as u32).collect();
        let ids = Tensor::from_vec(ids, indices.len(), Tensor::device(self))?;
        Ok(Tensor::index_select(self, &ids, dim)?)
    }
}
