//! # morpho-guidance
//!
//! Evidence validator for learner explanations.
//!
//! The validator never decides whether an answer is right. It decides
//! whether each required field shows enough structural evidence, and returns
//! a [`SupportStatus`](morpho_core::SupportStatus) with the dimensions still
//! lacking support and a list of scaffold prompts that name what to look at
//! without revealing an answer.
//!
//! - [`rules`]: versioned thresholds and vocabularies ([`GuidanceRules`])
//! - [`validator`]: [`evaluate`] / [`evaluate_with`]
//! - [`matrix`]: the base x affix grid and the matrix proof checks
//! - [`prompts`]: scaffold prompt text

#![deny(unsafe_code)]

pub mod matrix;
pub mod prompts;
pub mod rules;
pub mod validator;

pub use matrix::{MatrixCell, MatrixGrid, MatrixProofCheck, check_matrix_proof};
pub use rules::{GuidanceRules, GuidanceVersion};
pub use validator::{evaluate, evaluate_with};
