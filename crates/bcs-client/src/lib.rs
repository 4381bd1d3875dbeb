//! BCS Client Library
//!
//! Client for the Cisco BCS (Business Critical Services) API bulk endpoint.
//!
//! The bulk endpoint returns a newline-delimited stream of heterogeneous JSON
//! records: devices, software tracks, EoX bulletins, field notices and PSIRT
//! advisories. This crate fetches that stream and sorts it into typed
//! buckets while counting what it saw, or scans a previously saved copy.
//!
//! # Example
//!
//! ```no_run
//! use bcs_client::{Client, ClientConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> bcs_client::Result<()> {
//!     let client = Client::new(ClientConfig::new("my-api-key"))?;
//!     let results = client
//!         .bulk()
//!         .retrieve("280987866", &CancellationToken::new())
//!         .await?;
//!
//!     println!("{} lines, {} devices", results.line_count, results.devices.len());
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod bulk;
pub mod client;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod rate_limit;

pub use bulk::{parse_bulk_file, scan_bulk, BulkResults, RecordDecodeError, ScanOptions};
pub use client::{BulkService, Client, ClientConfig};
pub use error::{BcsError, Result, StatusError};
pub use models::RecordKind;
