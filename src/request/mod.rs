//! # Request Module
//!
//! Building and sending requests against the target API.
//!
//! A [`RequestContext`] is an immutable bundle of everything every request
//! shares: the root URI (base URL joined with the base path), default headers,
//! the content type used for bodies, and the HTTP client with its timeout.
//! [`execute`] is a plain function over a context, a method, a path and an
//! optional body; there is no hidden per-request state.
//!
//! ```rust,no_run
//! use restverify::request::{execute, new_request, RequestBody};
//! use restverify::runtime_config::{install, RuntimeConfig};
//! use http::Method;
//!
//! install(RuntimeConfig::default())?;
//! let ctx = new_request()?;
//! let response = execute(&ctx, Method::GET, "/users/2", None)?;
//! assert_eq!(response.status(), 200);
//! # Ok::<(), restverify::VerifyError>(())
//! ```

mod context;
mod execute;

pub use context::{new_request, RequestContext, DEFAULT_CONTENT_TYPE};
pub use execute::{execute, RequestBody};
