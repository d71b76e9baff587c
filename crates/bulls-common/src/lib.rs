//! # Bulls Common
//!
//! Shared types, errors, and logging for Bulls Analytics.
//!
//! This crate provides the record types produced by the fetch layer, the
//! [`Tabular`] view used by the rendering layer, and the error and logging
//! plumbing used by every other crate in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod metric;
pub mod records;
pub mod table;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{BullsError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use metric::Metric;
pub use records::*;
pub use table::{FieldValue, Tabular};
pub use types::*;
