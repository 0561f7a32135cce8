use std::io::{Read, Seek, SeekFrom};

use crate::error::ExtractError;
use crate::waveform::descriptor::PacketDescriptor;
use crate::waveform::record::WaveformRecord;

/// The data file stores two bytes per sample regardless of the
/// descriptor's nominal bits-per-sample field.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Weight of the second byte in a sample pair. The source format combines
/// the pair as `b0 + b1 * 255`, not base-256; reproduced as observed.
const HIGH_BYTE_WEIGHT: u32 = 255;

/// Reads one record's amplitude run from the data file and applies the
/// descriptor's gain and offset.
///
/// `record_index` only labels the error when the file is truncated.
pub fn decode<R>(
    reader: &mut R,
    record_index: usize,
    record: &WaveformRecord,
    descriptor: &PacketDescriptor,
) -> Result<Vec<f64>, ExtractError>
where
    R: Read + Seek,
{
    let expected = descriptor.sample_count * BYTES_PER_SAMPLE;
    reader.seek(SeekFrom::Start(record.byte_offset))?;

    let mut buf = vec![0u8; expected];
    let actual = read_fully(reader, &mut buf)?;
    if actual < expected {
        return Err(ExtractError::TruncatedData {
            record: record_index,
            offset: record.byte_offset,
            expected,
            actual,
        });
    }

    Ok(buf
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| {
            let raw = pair[0] as u32 + pair[1] as u32 * HIGH_BYTE_WEIGHT;
            raw as f64 * descriptor.gain + descriptor.offset
        })
        .collect())
}

/// Reads until the buffer is full or the stream ends, so a truncated file
/// reports how many bytes were actually there.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
