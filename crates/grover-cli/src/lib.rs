//! Library half of the `grover-sim` command-line tool.
//!
//! The binary parses a [`cli::Cli`] and hands it to
//! [`commands::dispatch`]. Everything it prints or writes lives here so the
//! commands can be driven from tests.
//!
//! Output files, all placed in `--out-dir`:
//!
//! | File | Written by |
//! |------|------------|
//! | `oscillations.svg` | `oscillations`, `all` |
//! | `scaling.svg` | `scaling`, `all` |
//! | `circuit_demo.txt`, `circuit_demo.svg` | `diagram`, `all` |
//! | `grover_report.json` | `all` |

pub mod cli;
pub mod commands;
pub mod output;
pub mod plot;
pub mod report;

pub use cli::{Cli, Commands, GlobalOptions, StrategyArg};
pub use report::Report;
