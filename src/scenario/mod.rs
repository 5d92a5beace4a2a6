//! # Scenario Module
//!
//! End-to-end checks: build a request, execute it, hold the response against
//! a [`ResponseSpec`](crate::response::ResponseSpec), then assert on fields or
//! schema conformance.
//!
//! Each [`Scenario`] is a linear, blocking request/assert sequence with no
//! retries. Scenarios share nothing mutable: the [`SuiteContext`] they receive
//! holds an immutable request context and a cache of compiled schemas, so
//! they can run on separate threads.
//!
//! A [`Suite`] runs scenarios in order and collects a [`SuiteReport`]. A fatal
//! error (schema load, configuration) stops the run; any other failure is
//! recorded against its scenario and the run moves on.
//!
//! The checks against the reqres.in API live in [`reqres`].

mod core;
pub mod reqres;

pub use core::{step, Scenario, ScenarioFn, ScenarioOutcome, Suite, SuiteContext, SuiteReport};
