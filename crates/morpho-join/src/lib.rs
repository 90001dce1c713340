//! # morpho-join
//!
//! Orthographic join conventions for base + suffix combinations.
//!
//! - [`conventions`]: the closed set of convention kinds with their labels
//!   and explanations (reference data only)
//! - [`resolver`]: [`resolve_join`], a total, deterministic function that
//!   applies the first matching convention
//! - [`inference`]: best-effort recovery of which affixes built a word

#![deny(unsafe_code)]

pub mod conventions;
pub mod inference;
pub mod resolver;

pub use conventions::{JOIN_CONVENTIONS, JoinConvention, JoinConventionKind};
pub use inference::{AffixInference, infer_affixes};
pub use resolver::{JoinResolution, is_vowel, resolve_join, resolve_join_with_prefix};
