//! Synchronous API client core for the Telegraph publishing service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A caller either executes the
//! round-trip itself between `build_*` and `parse_*`, or hands a `Transport`
//! to the call methods and gets typed results back.
//!
//! # Design
//! - `TelegraphClient` is stateless; it holds only `base_url`.
//! - Parameter inclusion rules live in `params`, URL templates in `endpoint`,
//!   envelope handling in `envelope`. The client only wires them together.
//! - `ShortName` can only exist with a valid length.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod http;
pub mod params;
pub mod short_name;
pub mod types;

pub use client::TelegraphClient;
pub use endpoint::{Method, DEFAULT_BASE_URL};
pub use error::{ShortNameError, TelegraphError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use params::Params;
pub use short_name::ShortName;
pub use types::{Account, AccountField, Node, NodeElement, Page, PageList, PageViews, ViewsQuery};
