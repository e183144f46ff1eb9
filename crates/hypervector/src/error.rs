//! Error types for hypervector operations.

use thiserror::Error;

use crate::dtype::DType;
use crate::vsa::Vsa;

/// Result type alias for hypervector operations.
pub type Result<T> = std::result::Result<T, HypervectorError>;

/// Errors that can occur while building or combining hypervectors.
#[derive(Debug, Error)]
pub enum HypervectorError {
    /// The element type is not one the architecture can represent.
    #[error("{vsa} hypervectors do not support dtype {dtype}")]
    UnsupportedDType {
        /// Architecture the allocation was requested for.
        vsa: Vsa,
        /// Rejected element type.
        dtype: DType,
    },

    /// Gradient tracking was requested for an element type without gradients.
    #[error("only floating point and complex dtypes can require gradients, got {0}")]
    NonDifferentiable(DType),

    /// Unrecognised architecture name.
    #[error("unknown vector-symbolic architecture: {0}")]
    UnknownVsa(String),

    /// Unrecognised element type name.
    #[error("unknown dtype: {0}")]
    UnknownDType(String),

    /// The process-wide default must be a real floating point type.
    #[error("default dtype must be a floating point type, got {0}")]
    InvalidDefaultDType(DType),

    /// Operands belong to different architectures.
    #[error("architecture mismatch: {left} and {right}")]
    VsaMismatch {
        /// Architecture of the left operand.
        left: Vsa,
        /// Architecture of the right operand.
        right: Vsa,
    },

    /// Operands have incompatible shapes.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        actual: Vec<usize>,
    },

    /// Invalid sampling distribution parameters.
    #[error("invalid distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    /// Candle tensor operation error.
    #[cfg(feature = "candle")]
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),
}
