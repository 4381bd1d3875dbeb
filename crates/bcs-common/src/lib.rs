//! BCS Common Library
//!
//! Shared building blocks for the BCS workspace members.
//!
//! # Overview
//!
//! - **Logging**: Centralized `tracing` subscriber setup for the CLI and any
//!   library consumer that wants the same conventions
//! - **Dates**: Codecs for the vendor's timezone-less date and date-time
//!   formats, reusable by any record type
//!
//! # Example
//!
//! ```
//! use bcs_common::dates::{Date, DateTime};
//!
//! let date: Date = "2020-12-31".parse().unwrap();
//! let stamp: DateTime = "2020-12-31T23:59:01".parse().unwrap();
//! assert_eq!(date.to_string(), "2020-12-31");
//! assert_eq!(stamp.to_string(), "2020-12-31T23:59:01");
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod dates;
pub mod logging;

// Re-export commonly used types
pub use dates::{Date, DateParseError, DateTime};
