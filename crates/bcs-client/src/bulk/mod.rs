//! Bulk endpoint ingestion
//!
//! The bulk endpoint returns one JSON object per line, with a `type` field
//! naming the record kind. Scanning a stream:
//!
//! 1. reads it line by line ([`reader`]), bounded by [`ScanOptions::max_line_bytes`]
//! 2. decodes only the discriminator of each line ([`discriminator`])
//! 3. decodes the full record for known kinds and appends it to its bucket
//!
//! A line that is not a JSON object, a line that is too long, or a read
//! failure aborts the whole scan: the stream is assumed to be truncated or
//! not a bulk file at all. A record whose fields do not all decode is kept
//! (partially filled) and the failure is listed in
//! [`BulkResults::decode_errors`]. Unknown kinds are only counted.
//!
//! # Example
//!
//! ```no_run
//! use bcs_client::bulk::{parse_bulk_file, ScanOptions};
//!
//! # async fn run() -> bcs_client::Result<()> {
//! let results = parse_bulk_file("bcs_bulk.jsonl", ScanOptions::default()).await?;
//! println!("{} lines, {} devices", results.line_count, results.devices.len());
//! # Ok(())
//! # }
//! ```

pub mod discriminator;
mod reader;
mod scanner;

pub use scanner::{parse_bulk_file, scan_bulk, ScanOptions, DEFAULT_MAX_LINE_BYTES};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::decode::FieldDecodeError;
use crate::models::{
    Device, FieldNoticeBulletin, HwEoxBulletin, PsirtBulletin, RecordKind, SwEoxBulletin,
    TrackSmupieRecommendation, TrackSummary,
};

/// A known-kind record that did not decode cleanly. Never fatal.
///
/// One entry per record, listing every field that failed.
#[derive(Debug, Error)]
#[error("{kind}: line {line}: {}", join_causes(.causes))]
pub struct RecordDecodeError {
    /// 1-based line number in the scanned stream
    pub line: usize,
    pub kind: RecordKind,
    /// Field failures in field order; never empty
    pub causes: Vec<FieldDecodeError>,
}

fn join_causes(causes: &[FieldDecodeError]) -> String {
    causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl RecordDecodeError {
    /// Wire names of the failing fields
    pub fn fields(&self) -> Vec<&'static str> {
        self.causes.iter().filter_map(FieldDecodeError::field).collect()
    }
}

impl Serialize for RecordDecodeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RecordDecodeError", 4)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("fields", &self.fields())?;
        state.serialize_field("message", &join_causes(&self.causes))?;
        state.end()
    }
}

/// Everything gathered from one bulk stream.
///
/// Built up append-only during a scan and handed back once the stream is
/// exhausted. `line_count` always equals the sum of `count_of_types` and
/// `unrecognised_types`.
#[derive(Debug, Default, Serialize)]
pub struct BulkResults {
    /// Lines scanned, known and unknown kinds alike
    pub line_count: usize,
    /// Lines seen per known kind
    pub count_of_types: BTreeMap<RecordKind, usize>,
    /// Lines seen per discriminator outside the known set (`""` if absent)
    pub unrecognised_types: BTreeMap<String, usize>,
    pub devices: Vec<Device>,
    pub track_summaries: Vec<TrackSummary>,
    pub track_smupie_recommendations: Vec<TrackSmupieRecommendation>,
    pub sw_eox_bulletins: Vec<SwEoxBulletin>,
    pub hw_eox_bulletins: Vec<HwEoxBulletin>,
    pub fn_bulletins: Vec<FieldNoticeBulletin>,
    pub psirt_bulletins: Vec<PsirtBulletin>,
    /// Non-fatal decode failures, one per affected record, in stream order
    pub decode_errors: Vec<RecordDecodeError>,
}

impl BulkResults {
    /// Number of lines seen for `kind`
    pub fn count(&self, kind: RecordKind) -> usize {
        self.count_of_types.get(&kind).copied().unwrap_or(0)
    }

    /// Total lines routed to a known kind
    pub fn recognised_total(&self) -> usize {
        self.count_of_types.values().sum()
    }

    /// Total lines with an unknown discriminator
    pub fn unrecognised_total(&self) -> usize {
        self.unrecognised_types.values().sum()
    }

    /// Length of the bucket holding `kind`
    pub fn bucket_len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Device => self.devices.len(),
            RecordKind::TrackSummary => self.track_summaries.len(),
            RecordKind::TrackSmupieRecommendation => self.track_smupie_recommendations.len(),
            RecordKind::SwEoxBulletin => self.sw_eox_bulletins.len(),
            RecordKind::HwEoxBulletin => self.hw_eox_bulletins.len(),
            RecordKind::FieldNoticeBulletin => self.fn_bulletins.len(),
            RecordKind::PsirtBulletin => self.psirt_bulletins.len(),
        }
    }
}
