//! # Hub Client
//!
//! Thin shared HTTP transport to the hub.
//!
//! Responsibilities:
//! - URL construction with path-segment percent-encoding
//! - `Authorization` header injection
//! - The four wire operations: upsert dataset, upsert metrics, list
//!   identifiers, delete dataset
//!
//! Outcome mapping stays with the handlers; this crate only surfaces
//! `{status, status_text, body}` and turns no-response conditions into
//! transport errors. One client instance is shared across all work units;
//! it holds no per-request state beyond reqwest's own connection pool.

mod client;
mod url;

pub use client::{HubClient, HubResponse, UpsertRequest};
