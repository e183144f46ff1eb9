//! # Hypervector
//!
//! Hyperdimensional computing primitives layered on a tensor library.
//!
//! ## Overview
//!
//! Vector-symbolic architectures represent symbols as very wide random
//! vectors and compose them with a small algebra: binding associates two
//! hypervectors, bundling superimposes them and permutation encodes order.
//! Similarity between hypervectors reveals what a composite contains.
//!
//! Key components include:
//!
//! - A closed set of architectures with per-architecture element type policy
//! - A tensor abstraction layer supporting various backends
//! - Basis constructors, binding, bundling and similarity kernels
//!
//! ## Architecture
//!
//! ### Assumptions
//! Regardless of backend used, a batch of hypervectors reserves two dimensions:
//!  - The `0th` dimension is reserved as the batch dimension
//!  - The `1st` dimension is reserved as the element dimension
//!  - Complex batches add a trailing dimension of size `2` for `(real, imaginary)`
//!
//! ### Architectures
//!
//! [`Vsa`] names the four supported architectures, BSC, MAP, HRR and FHRR.
//! Each restricts the element types a batch may be allocated with and picks a
//! default: `bool` for BSC, the process-wide default float type for MAP and
//! HRR (see [`set_default_dtype`]) and `complex64` for FHRR.
//!
//! ### Backend Trait
//!
//! The [`backend::Backend`] trait defines the interface that any tensor
//! implementation must satisfy. Allocation, device placement and automatic
//! differentiation are all delegated to it.
//!
//! ## Features
//!
//! - **candle** - Enables the candle backend (default)
//!
//! ## Example
//!
//! ```
//! use candle_core::Tensor;
//! use hypervector::{functional, BasisOptions, Vsa};
//!
//! let options = BasisOptions::new().seed(7);
//! let keys = functional::random::<Tensor>(2, 1024, Vsa::Map, &options).unwrap();
//! let key = keys.get(0).unwrap();
//! let value = keys.get(1).unwrap();
//!
//! let pair = functional::bind(&key, &value).unwrap();
//! let recovered = functional::unbind(&pair, &key).unwrap();
//! assert_eq!(recovered.to_vec2().unwrap(), value.to_vec2().unwrap());
//! ```

mod dtype;
mod error;
mod hypervector;
mod vsa;

pub mod backend;
pub mod functional;

pub use dtype::{default_dtype, set_default_dtype, DType, DEFAULT_DTYPE_ENV};
pub use error::{HypervectorError, Result};
pub use functional::BasisOptions;
pub use hypervector::{Hypervectors, BATCH_DIM, COMPLEX_DIM, ELEMENT_DIM};
pub use vsa::Vsa;
