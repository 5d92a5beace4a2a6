//! # CLI Module
//!
//! Command-line interface for running the verification suite outside of
//! `cargo test`.
//!
//! ## Commands
//!
//! ### `run`
//!
//! Run every scenario, or only the named ones, against the configured target:
//!
//! ```bash
//! restverify run --base-url https://reqres.in --base-path /api
//! restverify run --config config/config.yaml --scenario get_user_by_id
//! ```
//!
//! Prints one `PASS`/`FAIL` line per scenario and a summary. Exit status is
//! `0` when everything passed, `1` when a scenario failed and `2` when the
//! suite could not be set up (bad configuration, unloadable schema).
//!
//! ### `list`
//!
//! Print the scenario names and what each one checks.
//!
//! ### `validate`
//!
//! Check a JSON file against a bundled or on-disk schema:
//!
//! ```bash
//! restverify validate \
//!     --schema single-resource-byid-response-scheme.json \
//!     --payload response.json
//! ```
//!
//! Exit status is `1` when the payload does not conform.

mod commands;


pub use commands::{run_cli, Cli, Commands, TargetArgs, EXIT_FAILED, EXIT_OK, EXIT_SETUP};
