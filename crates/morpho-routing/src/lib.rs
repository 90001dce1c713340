//! # morpho-routing
//!
//! Task router.
//!
//! A [`RouteTable`] is an ordered list of [`RouteRule`]s authored with the
//! content. [`next_task_id`] picks the next task for a finished task given
//! a [`RouteSignal`]:
//!
//! 1. for each error tag, in signal order, the first rule for the task's
//!    category with that `if_error_tag`
//! 2. otherwise the first rule for the category whose `if_mastered` equals
//!    the signal's mastery flag
//! 3. otherwise `None` (end of sequence)

#![deny(unsafe_code)]

pub mod errors;
pub mod router;
pub mod table;

pub use errors::{Result, RoutingError};
pub use router::{RouteSignal, next_task_id};
pub use table::{RouteRule, RouteTable};
