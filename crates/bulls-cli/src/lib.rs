//! # Bulls CLI
//!
//! The `bulls` command line front end.
//!
//! [`cli`] holds the clap argument definitions, [`commands`] runs each
//! subcommand against a [`bulls_data::DataService`], and [`report`] formats
//! the results as plain text.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod report;

pub use cli::{Cli, Command};
pub use commands::App;
pub use error::{CliError, CliResult};
