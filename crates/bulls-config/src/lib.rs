//! # Bulls Config
//!
//! Type-safe configuration for Bulls Analytics.
//!
//! Configuration is read from TOML, overlaid with `BULLS_*` environment
//! variables, and validated before use. Every section has defaults, so an
//! empty file (or no file at all) yields a working Chicago Bulls setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::*;
pub use validator::ConfigValidator;
