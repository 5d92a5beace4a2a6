//! # Response Module
//!
//! What comes back from [`execute`](crate::request::execute): the raw
//! [`ApiResponse`], the reusable expectations applied to it
//! ([`ResponseSpec`]), and decoding of its body into typed models
//! ([`decode`]).

mod core;
mod decode;
mod spec;

pub use core::ApiResponse;
pub use decode::decode;
pub use spec::ResponseSpec;
