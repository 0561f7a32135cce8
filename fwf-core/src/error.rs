use thiserror::Error;

/// Errors raised while extracting full waveforms.
///
/// Extraction is fail-fast: any of these aborts the whole call and no
/// partial result is returned.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A waveform packet descriptor payload was shorter than its fixed
    /// 26-byte layout.
    #[error(
        "waveform packet descriptor (record id {record_id}) is {actual} bytes, expected {expected}"
    )]
    ShortDescriptor {
        record_id: u16,
        actual: usize,
        expected: usize,
    },

    /// A point references a descriptor id with no entry in the table.
    #[error("waveform record {record} references unknown packet descriptor {descriptor}")]
    UnknownDescriptor { record: usize, descriptor: usize },

    /// The data file ended before a record's full sample run.
    #[error(
        "truncated waveform data: record {record} at byte offset {offset} needs {expected} bytes, found {actual}"
    )]
    TruncatedData {
        record: usize,
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// A per-point attribute array does not match the point count.
    #[error("attribute array `{field}` has {found} entries for {expected} points")]
    MismatchedLengths {
        field: &'static str,
        found: usize,
        expected: usize,
    },

    /// The exclusion mask does not match the point count.
    #[error("exclusion mask has {found} entries for {expected} points")]
    MaskLengthMismatch { found: usize, expected: usize },

    #[error("failed to read waveform data file: {0}")]
    Io(#[from] std::io::Error),
}
