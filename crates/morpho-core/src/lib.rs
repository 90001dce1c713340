//! # morpho-core
//!
//! Shared vocabulary for the morphology engines.
//!
//! - **Tasks**: [`Task`] with its [`Targets`], [`ResponseSpec`] and [`TaskContext`],
//!   authored externally and only ever read by the engines
//! - **Responses**: [`ResponseMap`] of raw learner text keyed by field id
//! - **Results**: [`SupportStatus`] (evidence validator) and [`ScoreSummary`]
//!   (mastery scorer)
//! - **Lookup**: [`TaskCatalog`] keyed by [`TaskId`]
//! - **Logging**: `tracing` subscriber setup and a capture layer for tests

#![deny(unsafe_code)]

pub mod catalog;
pub mod errors;
pub mod ids;
pub mod logging;
pub mod response;
pub mod status;
pub mod task;
pub mod text;

pub use catalog::TaskCatalog;
pub use errors::{CoreError, Result};
pub use ids::{SessionId, TaskId};
pub use response::ResponseMap;
pub use status::{ErrorTag, FocusArea, ScoreSummary, SupportStatus};
pub use task::{FieldSpec, ResponseMode, ResponseSpec, Targets, Task, TaskContext, TaskPrompts};
