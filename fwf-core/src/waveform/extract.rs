use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use crate::error::ExtractError;
use crate::waveform::decoder::decode;
use crate::waveform::descriptor::PacketDescriptorTable;
use crate::waveform::geometry::{reconstruct, Sample};
use crate::waveform::record::{select_records, PointTable};

/// Raw metadata record from the point-cloud container.
#[derive(Debug, Clone)]
pub struct MetadataRecord {
    pub record_id: u16,
    pub data: Vec<u8>,
}

/// Everything the extractor consumes from the point-cloud container.
#[derive(Debug, Clone, Default)]
pub struct PointSource {
    pub points: PointTable,
    pub metadata: Vec<MetadataRecord>,
}

/// Start indices plus the flat sample buffer for one extraction.
///
/// `start_indices` has one entry per record plus a trailing total, so
/// `samples[start_indices[i]..start_indices[i + 1]]` is record i's
/// waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub start_indices: Vec<usize>,
    pub samples: Vec<Sample>,
}

impl Extraction {
    pub fn record_count(&self) -> usize {
        self.start_indices.len() - 1
    }

    /// The contiguous sample run of one record.
    pub fn record(&self, index: usize) -> &[Sample] {
        &self.samples[self.start_indices[index]..self.start_indices[index + 1]]
    }
}

/// Extracts every unique waveform referenced by the point source.
///
/// Parses the packet descriptors out of the source's metadata, selects and
/// deduplicates the points that carry a waveform, then decodes each
/// record's amplitude run from the data file and reconstructs its sample
/// positions. Fail-fast: the first malformed record aborts the call and
/// nothing partial is returned.
pub fn extract(
    source: &PointSource,
    data_file: &Path,
    mask: Option<&[bool]>,
) -> Result<Extraction, ExtractError> {
    let table = PacketDescriptorTable::parse(
        source
            .metadata
            .iter()
            .map(|m| (m.record_id, m.data.as_slice())),
    )?;
    let records = select_records(&source.points, mask)?;
    debug!(
        "{} descriptors, {} unique waveform records from {} points",
        table.len(),
        records.len(),
        source.points.len()
    );

    // Resolve every record's descriptor up front so the sample buffer can
    // be allocated once at its final size.
    let mut descriptors = Vec::with_capacity(records.len());
    let mut total = 0usize;
    for (i, record) in records.iter().enumerate() {
        let descriptor =
            table
                .get(record.descriptor)
                .ok_or(ExtractError::UnknownDescriptor {
                    record: i,
                    descriptor: record.descriptor,
                })?;
        total += descriptor.sample_count;
        descriptors.push(descriptor);
    }

    let file = File::open(data_file)?;
    let mut reader = BufReader::new(file);

    let mut start_indices = Vec::with_capacity(records.len() + 1);
    start_indices.push(0);
    let mut samples = Vec::with_capacity(total);

    for (i, (record, descriptor)) in records.iter().zip(&descriptors).enumerate() {
        let amplitudes = decode(&mut reader, i, record, descriptor)?;
        reconstruct(record, descriptor, &amplitudes, &mut samples);
        start_indices.push(samples.len());
    }
    debug!("extracted {} samples", samples.len());

    Ok(Extraction {
        start_indices,
        samples,
    })
}
