//! # Element types
//!
//! The closed menu of element types a hypervector batch can carry, and the
//! process-wide default floating point type used when an architecture defers
//! to it (MAP and HRR).
//!
//! The default starts out as `float32`. It can be overridden for the whole
//! process by setting the `HYPERVECTOR_DEFAULT_DTYPE` environment variable to
//! a floating point name (`float16`, `bfloat16`, `float32`, `float64`) before
//! the first read, or at runtime with [`set_default_dtype`].

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{HypervectorError, Result};

/// Environment variable consulted once for the initial default float type.
pub const DEFAULT_DTYPE_ENV: &str = "HYPERVECTOR_DEFAULT_DTYPE";

const UNSET: u8 = u8::MAX;

static DEFAULT_DTYPE: AtomicU8 = AtomicU8::new(UNSET);

/// Logical element type of a hypervector batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// Boolean.
    Bool,
    /// Unsigned 8 bit integer.
    U8,
    /// Signed 8 bit integer.
    I8,
    /// Signed 16 bit integer.
    I16,
    /// Signed 32 bit integer.
    I32,
    /// Signed 64 bit integer.
    I64,
    /// IEEE half precision float.
    F16,
    /// Brain float.
    BF16,
    /// Single precision float.
    F32,
    /// Double precision float.
    F64,
    /// Complex number with `f32` parts.
    Complex64,
    /// Complex number with `f64` parts.
    Complex128,
}

impl DType {
    /// Every element type, in declaration order.
    pub const ALL: [DType; 12] = [
        DType::Bool,
        DType::U8,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::F16,
        DType::BF16,
        DType::F32,
        DType::F64,
        DType::Complex64,
        DType::Complex128,
    ];

    /// Canonical lowercase name, e.g. `"float32"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::U8 => "uint8",
            DType::I8 => "int8",
            DType::I16 => "int16",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::F16 => "float16",
            DType::BF16 => "bfloat16",
            DType::F32 => "float32",
            DType::F64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        }
    }

    /// Whether this is a real floating point type.
    pub fn is_floating_point(&self) -> bool {
        matches!(self, DType::F16 | DType::BF16 | DType::F32 | DType::F64)
    }

    /// Whether this is a complex type.
    pub fn is_complex(&self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }

    /// Whether tensors of this type can take part in differentiation.
    pub fn is_differentiable(&self) -> bool {
        self.is_floating_point() || self.is_complex()
    }

    /// The real type each component is stored as.
    ///
    /// Complex types map to the float type of their parts, every other type
    /// maps to itself.
    pub fn component(&self) -> DType {
        match self {
            DType::Complex64 => DType::F32,
            DType::Complex128 => DType::F64,
            other => *other,
        }
    }

    fn from_index(raw: u8) -> DType {
        Self::ALL
            .get(raw as usize)
            .copied()
            .unwrap_or(DType::F32)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = HypervectorError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("torch.").unwrap_or(&name);
        let dtype = match name {
            "bool" => DType::Bool,
            "uint8" | "u8" => DType::U8,
            "int8" | "i8" => DType::I8,
            "int16" | "i16" | "short" => DType::I16,
            "int32" | "i32" | "int" => DType::I32,
            "int64" | "i64" | "long" => DType::I64,
            "float16" | "f16" | "half" => DType::F16,
            "bfloat16" | "bf16" => DType::BF16,
            "float32" | "f32" | "float" => DType::F32,
            "float64" | "f64" | "double" => DType::F64,
            "complex64" | "cfloat" => DType::Complex64,
            "complex128" | "cdouble" => DType::Complex128,
            _ => return Err(HypervectorError::UnknownDType(s.to_string())),
        };
        Ok(dtype)
    }
}

/// The process-wide default floating point type.
///
/// Read by architectures that defer their element type to it (MAP, HRR) and
/// by similarity kernels working on integer inputs.
pub fn default_dtype() -> DType {
    let raw = DEFAULT_DTYPE.load(Ordering::Acquire);
    if raw != UNSET {
        return DType::from_index(raw);
    }

    let initial = initial_default_dtype();
    match DEFAULT_DTYPE.compare_exchange(UNSET, initial as u8, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => initial,
        Err(current) => DType::from_index(current),
    }
}

/// Replace the process-wide default floating point type.
///
/// # Errors
///
/// Returns [`HypervectorError::InvalidDefaultDType`] if `dtype` is not a real
/// floating point type. The current default is left untouched in that case.
pub fn set_default_dtype(dtype: DType) -> Result<()> {
    if !dtype.is_floating_point() {
        return Err(HypervectorError::InvalidDefaultDType(dtype));
    }
    tracing::debug!(%dtype, "setting default dtype");
    DEFAULT_DTYPE.store(dtype as u8, Ordering::Release);
    Ok(())
}

fn initial_default_dtype() -> DType {
    parse_default_dtype(std::env::var(DEFAULT_DTYPE_ENV).ok().as_deref())
}

/// Interprets a value of [`DEFAULT_DTYPE_ENV`]; anything but a real floating
/// point type name falls back to float32.
fn parse_default_dtype(value: Option<&str>) -> DType {
    let Some(value) = value else {
        return DType::F32;
    };

    match value.parse::<DType>() {
        Ok(dtype) if dtype.is_floating_point() => dtype,
        Ok(dtype) => {
            tracing::warn!(%dtype, "{DEFAULT_DTYPE_ENV} is not a floating point type, using float32");
            DType::F32
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring {DEFAULT_DTYPE_ENV}");
            DType::F32
        }
    }
}
