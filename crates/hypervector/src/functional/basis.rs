//! Basis hypervector constructors: `empty`, `identity` and `random`.
//!
//! All three share the same validation: the element type is resolved against
//! the architecture and gradient tracking is checked against it before the
//! backend is asked for any memory.

use crate::backend::Backend;
use crate::dtype::DType;
use crate::error::{HypervectorError, Result};
use crate::hypervector::{storage_shape, Hypervectors};
use crate::vsa::Vsa;

use super::sample;

/// Optional inputs shared by the basis constructors.
///
/// # Examples
///
/// ```
/// use hypervector::{BasisOptions, DType};
///
/// let options = BasisOptions::<()>::new()
///     .dtype(DType::F64)
///     .requires_grad(true)
///     .seed(42);
/// assert_eq!(options.dtype, Some(DType::F64));
/// ```
#[derive(Debug, Clone)]
pub struct BasisOptions<D> {
    /// Element type, or the architecture default when `None`.
    pub dtype: Option<DType>,
    /// Placement, or the backend's default device when `None`.
    pub device: Option<D>,
    /// Whether the returned batch takes part in differentiation.
    pub requires_grad: bool,
    /// Seed for `random`; ignored by the other constructors.
    pub seed: Option<u64>,
}

impl<D> Default for BasisOptions<D> {
    fn default() -> Self {
        Self {
            dtype: None,
            device: None,
            requires_grad: false,
            seed: None,
        }
    }
}

impl<D> BasisOptions<D> {
    /// Options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the element type.
    pub fn dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    /// Place the batch on `device`.
    pub fn device(mut self, device: D) -> Self {
        self.device = Some(device);
        self
    }

    /// Track gradients for the returned batch.
    pub fn requires_grad(mut self, requires_grad: bool) -> Self {
        self.requires_grad = requires_grad;
        self
    }

    /// Seed the generator used by `random`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Validated allocation request.
struct Request<D> {
    dtype: DType,
    device: D,
    shape: Vec<usize>,
    requires_grad: bool,
}

fn request<B: Backend>(
    n: usize,
    d: usize,
    vsa: Vsa,
    options: &BasisOptions<B::Device>,
) -> Result<Request<B::Device>> {
    let dtype = vsa.resolve_dtype(options.dtype)?;
    if options.requires_grad && !dtype.is_differentiable() {
        return Err(HypervectorError::NonDifferentiable(dtype));
    }

    Ok(Request {
        dtype,
        device: options.device.clone().unwrap_or_else(B::default_device),
        shape: storage_shape(n, d, dtype),
        requires_grad: options.requires_grad,
    })
}

fn finish<B: Backend>(data: B, vsa: Vsa, request: &Request<B::Device>) -> Result<Hypervectors<B>> {
    let data = if request.requires_grad {
        data.track_gradients()?
    } else {
        data
    };
    Ok(Hypervectors::from_parts(data, vsa, request.dtype, request.requires_grad))
}

/// Creates a batch of `n` hypervectors of dimensionality `d` without meaningful values.
///
/// BSC batches hold arbitrary booleans, every other architecture is
/// zero-filled.
///
/// # Parameters
///
/// * `n` - Number of hypervectors
/// * `d` - Dimensionality of each hypervector
/// * `vsa` - Architecture of the batch
/// * `options` - Element type, device and gradient tracking
///
/// # Errors
///
/// * [`HypervectorError::UnsupportedDType`] if the element type is not supported by `vsa`
/// * [`HypervectorError::NonDifferentiable`] if gradients are requested for a boolean or integer type
///
/// Both are raised before anything is allocated. Backend failures are passed
/// through unchanged.
///
/// # Examples
///
/// ```
/// use candle_core::Tensor;
/// use hypervector::{functional, BasisOptions, DType, Vsa};
///
/// let hv = functional::empty::<Tensor>(8, 26, Vsa::Bsc, &BasisOptions::new()).unwrap();
/// assert_eq!(hv.shape(), vec![8, 26]);
/// assert_eq!(hv.dtype(), DType::Bool);
/// assert!(!hv.requires_grad());
/// ```
pub fn empty<B: Backend>(
    n: usize,
    d: usize,
    vsa: Vsa,
    options: &BasisOptions<B::Device>,
) -> Result<Hypervectors<B>> {
    let request = request::<B>(n, d, vsa, options)?;
    tracing::debug!(n, d, %vsa, dtype = %request.dtype, requires_grad = request.requires_grad, "allocating empty hypervectors");

    let data = B::zeros(&request.shape, request.dtype.component(), &request.device)?;
    finish(data, vsa, &request)
}

/// Creates a batch of `n` binding identity hypervectors.
///
/// Binding any hypervector with the identity leaves it unchanged: all false
/// for BSC, all one for MAP, the unit impulse `[1, 0, ..., 0]` for HRR and
/// all `1 + 0i` for FHRR.
///
/// # Errors
///
/// Same as [`empty`].
pub fn identity<B: Backend>(
    n: usize,
    d: usize,
    vsa: Vsa,
    options: &BasisOptions<B::Device>,
) -> Result<Hypervectors<B>> {
    let request = request::<B>(n, d, vsa, options)?;
    tracing::debug!(n, d, %vsa, dtype = %request.dtype, "allocating identity hypervectors");

    let component = request.dtype.component();
    let data = match vsa {
        Vsa::Bsc => B::zeros(&request.shape, component, &request.device)?,
        Vsa::Map => B::ones(&request.shape, component, &request.device)?,
        Vsa::Hrr => {
            let values = (0..n * d)
                .map(|i| if i % d == 0 { 1.0 } else { 0.0 })
                .collect();
            B::from_values(values, &request.shape, component, &request.device)?
        }
        Vsa::Fhrr => {
            let values = (0..n * d).flat_map(|_| [1.0, 0.0]).collect();
            B::from_values(values, &request.shape, component, &request.device)?
        }
    };
    finish(data, vsa, &request)
}

/// Creates a batch of `n` random hypervectors.
///
/// Random hypervectors of the same architecture are quasi-orthogonal:
///
/// * BSC - each element true with probability one half
/// * MAP - each element `-1` or `+1` with probability one half
/// * HRR - each element normal with mean `0` and standard deviation `1/d`
/// * FHRR - each element a unit phasor `exp(i theta)` with `theta` uniform on `[-pi, pi)`
///
/// Sampling uses `options.seed` when set, so equal seeds give equal batches.
///
/// # Errors
///
/// Same as [`empty`].
pub fn random<B: Backend>(
    n: usize,
    d: usize,
    vsa: Vsa,
    options: &BasisOptions<B::Device>,
) -> Result<Hypervectors<B>> {
    let request = request::<B>(n, d, vsa, options)?;
    tracing::debug!(n, d, %vsa, dtype = %request.dtype, seed = ?options.seed, "sampling random hypervectors");

    let mut rng = sample::generator(options.seed);
    let values = match vsa {
        Vsa::Bsc => sample::bernoulli(&mut rng, n * d),
        Vsa::Map => sample::bipolar(&mut rng, n * d),
        Vsa::Hrr => sample::normal(&mut rng, n * d, 1.0 / d.max(1) as f64)?,
        Vsa::Fhrr => sample::unit_phasors(&mut rng, n * d),
    };
    let data = B::from_values(values, &request.shape, request.dtype.component(), &request.device)?;
    finish(data, vsa, &request)
}

#[cfg(all(test, feature = "candle"))]
mod tests {
    use super::*;
    use crate::dtype::set_default_dtype;
    use candle_core::{Device, Tensor};
    use serial_test::serial;

    fn options() -> BasisOptions<Device> {
        BasisOptions::new()
    }

    #[test]
    #[serial]
    fn test_empty_shape() {
        for vsa in Vsa::ALL {
            for n in [1, 3, 55] {
                for d in [84, 10] {
                    let hv = empty::<Tensor>(n, d, vsa, &options()).unwrap();
                    assert_eq!(hv.dim(), 2);
                    assert_eq!(hv.shape(), vec![n, d]);
                    assert_eq!(hv.len(), n);
                    assert_eq!(hv.dimensions(), d);
                }
            }
        }
    }

    #[test]
    fn test_empty_values_for_every_dtype() {
        for vsa in Vsa::ALL {
            for dtype in DType::ALL {
                let result = empty::<Tensor>(8, 26, vsa, &options().dtype(dtype));
                if !vsa.supports(dtype) {
                    assert!(
                        matches!(result, Err(HypervectorError::UnsupportedDType { .. })),
                        "{vsa} {dtype} should be rejected"
                    );
                    continue;
                }

                let hv = result.unwrap();
                assert!(!hv.requires_grad());
                assert_eq!(hv.dtype(), dtype);
                assert_eq!(hv.shape(), vec![8, 26]);

                let values = hv.to_complex_vec2().unwrap();
                if vsa == Vsa::Bsc {
                    assert!(values.iter().flatten().all(|&(re, _)| re == 0.0 || re == 1.0));
                } else {
                    assert!(values.iter().flatten().all(|&v| v == (0.0, 0.0)));
                }
            }
        }
    }

    #[test]
    fn test_empty_device() {
        for vsa in Vsa::ALL {
            for &dtype in vsa.supported_dtypes() {
                let hv = empty::<Tensor>(3, 52, vsa, &options().dtype(dtype).device(Device::Cpu)).unwrap();
                assert!(hv.device().same_device(&Device::Cpu));
            }
        }
    }

    #[test]
    #[serial]
    fn test_empty_uses_default_dtype() {
        let previous = crate::dtype::default_dtype();

        let hv = empty::<Tensor>(3, 52, Vsa::Bsc, &options()).unwrap();
        assert_eq!(hv.dtype(), DType::Bool);

        set_default_dtype(DType::F32).unwrap();
        assert_eq!(empty::<Tensor>(3, 52, Vsa::Map, &options()).unwrap().dtype(), DType::F32);
        assert_eq!(empty::<Tensor>(3, 52, Vsa::Hrr, &options()).unwrap().dtype(), DType::F32);

        set_default_dtype(DType::F64).unwrap();
        let map = empty::<Tensor>(3, 52, Vsa::Map, &options()).unwrap();
        assert_eq!(map.dtype(), DType::F64);
        assert_eq!(map.tensor().dtype(), candle_core::DType::F64);
        assert_eq!(empty::<Tensor>(3, 52, Vsa::Hrr, &options()).unwrap().dtype(), DType::F64);

        assert_eq!(empty::<Tensor>(3, 52, Vsa::Fhrr, &options()).unwrap().dtype(), DType::Complex64);

        set_default_dtype(previous).unwrap();
    }

    #[test]
    fn test_empty_requires_grad() {
        for (vsa, dtype) in [(Vsa::Map, DType::F32), (Vsa::Hrr, DType::F32), (Vsa::Fhrr, DType::Complex64)] {
            let hv = empty::<Tensor>(3, 52, vsa, &options().dtype(dtype).requires_grad(true)).unwrap();
            assert!(hv.requires_grad());
            assert!(hv.tensor().is_variable());
        }
    }

    #[test]
    fn test_requires_grad_rejected_for_discrete_types() {
        let err = empty::<Tensor>(3, 52, Vsa::Bsc, &options().requires_grad(true)).unwrap_err();
        assert!(matches!(err, HypervectorError::NonDifferentiable(DType::Bool)));

        let err = empty::<Tensor>(3, 52, Vsa::Map, &options().dtype(DType::I32).requires_grad(true)).unwrap_err();
        assert!(matches!(err, HypervectorError::NonDifferentiable(DType::I32)));
    }

    #[test]
    fn test_identity_values() {
        let bsc = identity::<Tensor>(2, 4, Vsa::Bsc, &options()).unwrap();
        assert_eq!(bsc.to_vec2().unwrap(), vec![vec![0.0; 4]; 2]);

        let map = identity::<Tensor>(2, 4, Vsa::Map, &options().dtype(DType::F32)).unwrap();
        assert_eq!(map.to_vec2().unwrap(), vec![vec![1.0; 4]; 2]);

        let hrr = identity::<Tensor>(2, 4, Vsa::Hrr, &options().dtype(DType::F64)).unwrap();
        assert_eq!(hrr.to_vec2().unwrap(), vec![vec![1.0, 0.0, 0.0, 0.0]; 2]);

        let fhrr = identity::<Tensor>(2, 4, Vsa::Fhrr, &options()).unwrap();
        assert_eq!(fhrr.to_complex_vec2().unwrap(), vec![vec![(1.0, 0.0); 4]; 2]);
    }

    #[test]
    fn test_random_is_seeded() {
        for vsa in Vsa::ALL {
            let dtype = vsa.supported_dtypes()[0];
            let a = random::<Tensor>(4, 32, vsa, &options().dtype(dtype).seed(11)).unwrap();
            let b = random::<Tensor>(4, 32, vsa, &options().dtype(dtype).seed(11)).unwrap();
            let c = random::<Tensor>(4, 32, vsa, &options().dtype(dtype).seed(12)).unwrap();
            assert_eq!(a.to_complex_vec2().unwrap(), b.to_complex_vec2().unwrap());
            assert_ne!(a.to_complex_vec2().unwrap(), c.to_complex_vec2().unwrap());
        }
    }

    #[test]
    fn test_random_element_domains() {
        let bsc = random::<Tensor>(4, 100, Vsa::Bsc, &options().seed(1)).unwrap();
        assert!(bsc.to_vec2().unwrap().iter().flatten().all(|&v| v == 0.0 || v == 1.0));

        let map = random::<Tensor>(4, 100, Vsa::Map, &options().dtype(DType::I64).seed(1)).unwrap();
        assert!(map.to_vec2().unwrap().iter().flatten().all(|&v| v == 1.0 || v == -1.0));

        let fhrr = random::<Tensor>(4, 100, Vsa::Fhrr, &options().dtype(DType::Complex128).seed(1)).unwrap();
        for (re, im) in fhrr.to_complex_vec2().unwrap().into_iter().flatten() {
            assert!(((re * re + im * im).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_requires_grad() {
        let hv = random::<Tensor>(2, 16, Vsa::Hrr, &options().dtype(DType::F32).requires_grad(true).seed(5)).unwrap();
        assert!(hv.requires_grad());
        assert!(hv.tensor().is_variable());
    }
}
