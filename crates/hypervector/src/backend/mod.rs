//! # Tensor Backend
//!
//! This module provides a unified interface for tensor substrates,
//! allowing hypervector construction and algebra to work in a backend-agnostic manner.
//!
//! ## Feature Flags
//!
//! The module uses feature flags to conditionally compile support for different backends:
//!
//! - `candle`: Enables support for the Candle tensor library (on by default)
//!
//! ## Usage
//!
//! Users of this crate can work with hypervectors in a backend-agnostic way by:
//!
//! 1. Importing the [`Backend`] trait
//! 2. Writing code generic over `B: Backend`
//! 3. Enabling the appropriate feature flag for their desired backend
//!
//! Element types are always named with the crate's own [`DType`](crate::DType).
//! Each backend maps them onto the closest storage type it has and the
//! [`Hypervectors`](crate::Hypervectors) wrapper keeps track of the logical type.

mod core_trait;

#[cfg_attr(docsrs, doc(cfg(feature = "candle")))]
#[cfg(feature = "candle")]
/// Candle tensor backend implementation.
///
/// This module is only available when the `candle` feature flag is enabled.
/// It provides an implementation of the [`Backend`] trait for Candle's `Tensor` type.
///
/// Gradient tracking is provided through `candle_core::Var`, so a tracked
/// batch takes part in `Tensor::backward`.
pub mod candle;

// Re-export the core trait for convenient imports
pub use core_trait::*;
