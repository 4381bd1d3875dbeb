//! Bulk stream scanner

use std::path::Path;
use std::str::FromStr;
use tokio::io::AsyncRead;
use tracing::{debug, trace};

use super::discriminator::decode_kind;
use super::reader::BoundedLineReader;
use super::{BulkResults, RecordDecodeError};
use crate::decode::{decode_record, BulkRecord};
use crate::error::{BcsError, Result};
use crate::models::RecordKind;

/// Default longest accepted line, in bytes (128 KiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 128 * 1024;

/// Tunables for a single scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Longest accepted line, excluding the terminator
    pub max_line_bytes: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl ScanOptions {
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }
}

/// Scan a JSON lines stream into [`BulkResults`].
///
/// Records keep their input order within each bucket. Any `Err` means the
/// whole scan failed and nothing gathered so far is returned.
pub async fn scan_bulk<R>(reader: R, options: ScanOptions) -> Result<BulkResults>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BoundedLineReader::new(reader, options.max_line_bytes);
    let mut results = BulkResults::default();

    while let Some((line_number, line)) = lines.next_line().await? {
        results.line_count += 1;

        let kind = decode_kind(line).map_err(|source| BcsError::MalformedLine {
            line: line_number,
            source,
        })?;

        match RecordKind::from_str(&kind) {
            Ok(RecordKind::Device) => push(&mut results, line_number, line, |r| &mut r.devices),
            Ok(RecordKind::TrackSummary) => {
                push(&mut results, line_number, line, |r| &mut r.track_summaries)
            },
            Ok(RecordKind::TrackSmupieRecommendation) => push(&mut results, line_number, line, |r| {
                &mut r.track_smupie_recommendations
            }),
            Ok(RecordKind::SwEoxBulletin) => {
                push(&mut results, line_number, line, |r| &mut r.sw_eox_bulletins)
            },
            Ok(RecordKind::HwEoxBulletin) => {
                push(&mut results, line_number, line, |r| &mut r.hw_eox_bulletins)
            },
            Ok(RecordKind::FieldNoticeBulletin) => {
                push(&mut results, line_number, line, |r| &mut r.fn_bulletins)
            },
            Ok(RecordKind::PsirtBulletin) => {
                push(&mut results, line_number, line, |r| &mut r.psirt_bulletins)
            },
            Err(_) => {
                trace!(line = line_number, kind = %kind, "Unrecognised record kind");
                *results.unrecognised_types.entry(kind).or_default() += 1;
            },
        }
    }

    debug!(
        lines = results.line_count,
        unrecognised = results.unrecognised_total(),
        decode_errors = results.decode_errors.len(),
        "Bulk scan complete"
    );

    Ok(results)
}

/// Count, decode and append one known-kind line.
fn push<T: BulkRecord>(
    results: &mut BulkResults,
    line_number: usize,
    line: &[u8],
    bucket: impl FnOnce(&mut BulkResults) -> &mut Vec<T>,
) {
    *results.count_of_types.entry(T::KIND).or_default() += 1;

    let (record, causes) = decode_record::<T>(line);
    if !causes.is_empty() {
        results.decode_errors.push(RecordDecodeError {
            line: line_number,
            kind: T::KIND,
            causes,
        });
    }
    bucket(results).push(record);
}

/// Open a saved bulk file and scan it.
pub async fn parse_bulk_file(path: impl AsRef<Path>, options: ScanOptions) -> Result<BulkResults> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Parsing bulk file");
    let file = tokio::fs::File::open(path).await?;
    scan_bulk(file, options).await
}
