//! # Functional API
//!
//! Free functions over [`Hypervectors`](crate::Hypervectors), generic over the
//! tensor [`Backend`](crate::backend::Backend).
//!
//! ## Module Structure
//!
//! * [`basis`] - Basis constructors. [`empty`] allocates without meaningful
//!   values, [`identity`] returns the binding identity and [`random`] samples
//!   quasi-orthogonal hypervectors.
//!
//! * [`algebra`] - Binding ([`bind`], [`unbind`], [`inverse`]), bundling
//!   ([`bundle`], [`multiset`], [`negative`]) and [`permute`].
//!
//! * [`similarity`] - Pairwise [`dot_similarity`], [`cosine_similarity`] and
//!   [`hamming_similarity`].

pub mod algebra;
pub mod basis;
pub mod similarity;

mod sample;

pub use algebra::{bind, bundle, inverse, multiset, negative, permute, unbind};
pub use basis::{empty, identity, random, BasisOptions};
pub use similarity::{cosine_similarity, dot_similarity, hamming_similarity, similarity_dtype};
