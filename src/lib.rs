//! # restverify
//!
//! **restverify** is a typed verification layer for black-box REST API suites. It
//! sends requests with consistent defaults, decodes JSON responses into typed
//! models, and asserts status codes, field values and JSON Schema conformance.
//!
//! ## Architecture
//!
//! - **[`runtime_config`]** - Process-wide target settings, installed once
//! - **[`request`]** - Immutable [`RequestContext`](request::RequestContext) and
//!   [`execute`](request::execute)
//! - **[`response`]** - [`ApiResponse`](response::ApiResponse), reusable
//!   [`ResponseSpec`](response::ResponseSpec)s and typed decoding
//! - **[`models`]** - Payload shapes of the target API
//! - **[`schema`]** / **[`validator`]** - Loading, caching and applying JSON Schemas
//! - **[`assertion`]** - Field, JSON-path and schema assertions with precise failures
//! - **[`scenario`]** - Scenario/suite runner and the concrete API checks
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `restverify` binary
//!
//! ### Scenario Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Suite
//!     participant Scenario
//!     participant Request as request::execute
//!     participant API as Target API
//!     participant Spec as ResponseSpec
//!     participant Check as assertion / validator
//!
//!     Suite->>Scenario: run(&SuiteContext)
//!     Scenario->>Request: GET /users/2
//!     Request->>API: HTTP request (logged URI)
//!     API-->>Request: status, headers, body
//!     Request-->>Scenario: ApiResponse
//!     Scenario->>Spec: verify(status, content type)
//!     alt Unmet expectation
//!         Spec-->>Suite: AssertionFailure
//!     end
//!     Scenario->>Check: decode model / validate schema
//!     Check-->>Scenario: Ok or AssertionFailure
//!     Scenario-->>Suite: ScenarioOutcome
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use restverify::runtime_config::{install, RuntimeConfig};
//! use restverify::scenario::{reqres, SuiteContext};
//!
//! install(RuntimeConfig::from_env())?;
//! let ctx = SuiteContext::from_installed(reqres::REQUIRED_SCHEMAS)?;
//! let report = reqres::suite().run(&ctx);
//! for outcome in &report.outcomes {
//!     println!("{outcome}");
//! }
//! # Ok::<(), restverify::VerifyError>(())
//! ```
//!
//! ## Errors
//!
//! Everything fallible returns [`VerifyError`]. Transport, decode and assertion
//! errors fail a single scenario; schema-load and configuration errors abort
//! the suite. Nothing is retried.

pub mod assertion;
pub mod cli;
pub mod error;
pub mod logging;
pub mod models;
pub mod request;
pub mod response;
pub mod runtime_config;
pub mod scenario;
pub mod schema;
pub mod validator;

pub use error::{Result, VerifyError};
pub use request::{execute, new_request, RequestBody, RequestContext};
pub use response::{decode, ApiResponse, ResponseSpec};
pub use schema::SchemaDocument;
pub use validator::{validate, ValidationResult, Violation};
