//! Remote bookshop API access.
//!
//! All business logic lives behind the HTTP API; this module only knows how to
//! reach it.
//!
//! # Architecture
//!
//! - `endpoints`: Route table (method, path, auth requirement)
//! - `transport`: [`Transport`] trait and the `reqwest` implementation
//! - `envelope`: `{ data, success, message }` decoding and error mapping
//! - `client`: Typed operations over a transport
//! - `cancel`: Cancellation tokens tied to list state lifetimes

pub mod cancel;
pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod transport;

pub use cancel::CancellationToken;
pub use client::ApiClient;
pub use endpoints::{Endpoint, Method};
pub use envelope::Envelope;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
