// src/api/mod.rs
//! GTA API interaction — the ability to retrieve intervention records.
//!
//! I/O lives in `client`, decoding in `parser`.

pub mod client;
pub mod parser;

// Re-export the public interface
pub use client::GtaHttpClient;
pub use parser::parse_interventions_response;
