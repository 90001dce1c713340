//! # morpho-lab
//!
//! Driving surface for the morphology engines.
//!
//! - [`content`]: loads the task catalog and route table and checks that
//!   they agree
//! - [`session`]: [`LabSession`], the explicit learner state machine that
//!   owns the responses and calls the engines as pure transitions
//! - [`report`]: JSON reports for the one-shot CLI commands
//! - [`repl`]: the line-oriented interactive session

#![deny(unsafe_code)]

pub mod content;
pub mod repl;
pub mod report;
pub mod session;

pub use content::{Content, load_responses};
pub use session::{Advance, LabSession, Mediator, SessionError, SessionState};
