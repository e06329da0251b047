//! Request building and reply normalization for remote lock/unlock actions.
//!
//! # Overview
//! Builds the backend's `HttpRequest` and normalizes its `HttpResponse`
//! without touching the network (host-does-IO pattern). The caller executes
//! the actual HTTP round-trip, which keeps the core deterministic and
//! testable.
//!
//! # Design
//! - `RemoteActionClient` is stateless; it holds only a `BackendConfig`.
//! - `build_toggle_lock` produces the request, `parse_toggle_lock` (or the
//!   free function `normalize`) consumes the reply.
//! - The backend's `responseString` is modelled as `ResponseDetail`, resolved
//!   by ordered decoding rather than runtime type checks.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod types;

pub use client::RemoteActionClient;
pub use config::BackendConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::normalize;
pub use types::{ActionOutcome, AuthContext, ErrorDetail, LockDirective, ResponseDetail, VehicleRef};
