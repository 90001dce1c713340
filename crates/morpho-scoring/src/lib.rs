//! # morpho-scoring
//!
//! Legacy mastery scorer.
//!
//! Where the evidence validator only asks whether a field shows enough
//! evidence, the scorer produces error tags: a required field with too
//! little text gets the matching `*_error` tag, and the join field also runs
//! [`detect_join_error`], which catches two specific mistaken claims about
//! the final-`e` and no-change joins. A task is mastered iff no tag fired.
//!
//! The validator gates continuation; the score is a secondary signal.

#![deny(unsafe_code)]

pub mod join_check;
pub mod rules;
pub mod scorer;

pub use join_check::detect_join_error;
pub use rules::{ScoringRules, ScoringVersion};
pub use scorer::{score, score_with};
