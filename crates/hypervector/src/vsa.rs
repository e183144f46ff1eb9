//! # Architectures
//!
//! The four vector-symbolic architectures and the element type policy each
//! one enforces. Every constructor in [`crate::functional`] validates its
//! element type here before anything is allocated.

use std::fmt;
use std::str::FromStr;

use crate::dtype::{default_dtype, DType};
use crate::error::{HypervectorError, Result};

/// A vector-symbolic architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vsa {
    /// Binary Spatter Codes: boolean elements, XOR binding, majority bundling.
    Bsc,
    /// Multiply-Add-Permute: bipolar elements, element-wise product binding.
    Map,
    /// Holographic Reduced Representations: real elements, circular convolution binding.
    Hrr,
    /// Fourier HRR: unit phasors, element-wise complex product binding.
    Fhrr,
}

impl Vsa {
    /// Every architecture.
    pub const ALL: [Vsa; 4] = [Vsa::Bsc, Vsa::Map, Vsa::Hrr, Vsa::Fhrr];

    /// Canonical upper case name, e.g. `"BSC"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Vsa::Bsc => "BSC",
            Vsa::Map => "MAP",
            Vsa::Hrr => "HRR",
            Vsa::Fhrr => "FHRR",
        }
    }

    /// Element types this architecture can be allocated with.
    pub fn supported_dtypes(&self) -> &'static [DType] {
        match self {
            Vsa::Bsc => &[
                DType::Bool,
                DType::U8,
                DType::I16,
                DType::I32,
                DType::I64,
                DType::F32,
                DType::F64,
            ],
            Vsa::Map => &[
                DType::I8,
                DType::I16,
                DType::I32,
                DType::I64,
                DType::F32,
                DType::F64,
            ],
            Vsa::Hrr => &[DType::F32, DType::F64],
            Vsa::Fhrr => &[DType::Complex64, DType::Complex128],
        }
    }

    /// Whether `dtype` is in [`Vsa::supported_dtypes`].
    pub fn supports(&self, dtype: DType) -> bool {
        self.supported_dtypes().contains(&dtype)
    }

    /// Element type used when the caller does not pick one.
    ///
    /// MAP and HRR follow the process-wide default float type at call time.
    pub fn default_dtype(&self) -> DType {
        match self {
            Vsa::Bsc => DType::Bool,
            Vsa::Map | Vsa::Hrr => default_dtype(),
            Vsa::Fhrr => DType::Complex64,
        }
    }

    /// Resolve an optional override to a concrete, supported element type.
    ///
    /// # Errors
    ///
    /// [`HypervectorError::UnsupportedDType`] if the resolved type is not
    /// supported by this architecture.
    pub fn resolve_dtype(&self, dtype: Option<DType>) -> Result<DType> {
        let dtype = dtype.unwrap_or_else(|| self.default_dtype());
        if !self.supports(dtype) {
            return Err(HypervectorError::UnsupportedDType { vsa: *self, dtype });
        }
        Ok(dtype)
    }
}

impl fmt::Display for Vsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vsa {
    type Err = HypervectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BSC" => Ok(Vsa::Bsc),
            "MAP" => Ok(Vsa::Map),
            "HRR" => Ok(Vsa::Hrr),
            "FHRR" => Ok(Vsa::Fhrr),
            _ => Err(HypervectorError::UnknownVsa(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::set_default_dtype;
    use serial_test::serial;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("bsc".parse::<Vsa>().unwrap(), Vsa::Bsc);
        assert_eq!("Map".parse::<Vsa>().unwrap(), Vsa::Map);
        assert_eq!(" HRR ".parse::<Vsa>().unwrap(), Vsa::Hrr);
        assert_eq!("FHRR".parse::<Vsa>().unwrap(), Vsa::Fhrr);
        assert!(matches!("VTB".parse::<Vsa>(), Err(HypervectorError::UnknownVsa(_))));
    }

    #[test]
    fn test_complex_types_only_for_fhrr() {
        for vsa in Vsa::ALL {
            for dtype in [DType::Complex64, DType::Complex128] {
                assert_eq!(vsa.supports(dtype), vsa == Vsa::Fhrr, "{vsa} {dtype}");
            }
        }
    }

    #[test]
    fn test_half_precision_is_never_supported() {
        for vsa in Vsa::ALL {
            assert!(!vsa.supports(DType::F16));
            assert!(!vsa.supports(DType::BF16));
        }
    }

    #[test]
    fn test_resolve_rejects_unsupported() {
        let err = Vsa::Hrr.resolve_dtype(Some(DType::I32)).unwrap_err();
        assert!(matches!(
            err,
            HypervectorError::UnsupportedDType { vsa: Vsa::Hrr, dtype: DType::I32 }
        ));
    }

    #[test]
    #[serial]
    fn test_default_dtype_follows_process_default() {
        let previous = crate::dtype::default_dtype();

        set_default_dtype(DType::F64).unwrap();
        assert_eq!(Vsa::Map.default_dtype(), DType::F64);
        assert_eq!(Vsa::Hrr.default_dtype(), DType::F64);
        assert_eq!(Vsa::Bsc.default_dtype(), DType::Bool);
        assert_eq!(Vsa::Fhrr.default_dtype(), DType::Complex64);

        set_default_dtype(DType::F16).unwrap();
        assert!(Vsa::Hrr.resolve_dtype(None).is_err());

        set_default_dtype(previous).unwrap();
    }
}
