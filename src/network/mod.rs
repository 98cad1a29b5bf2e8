//! Network layer for outbound HTTP and public IP resolution.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`]) and reading responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`]) with a reqwest implementation ([`ReqwestClient`])
//! - Resolving the current public IP ([`IpResolver`], [`HttpResolver`])

mod client;
mod error;
mod request;
mod resolver;


pub use client::ReqwestClient;
pub use error::{HttpError, ResolveError};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use resolver::{HttpResolver, IpResolver};
