use std::{error::Error, path::PathBuf};

use las::Reader;
use log::info;

use fwf_core::{MetadataRecord, PointSource, PointTable};

use super::SourceReader;

/// Reads a LAS/LAZ file into the extractor's point source form.
///
/// Points without a waveform packet get a descriptor reference of 0, the
/// source format's "no waveform" marker, so selection drops them later.
pub struct LasSourceReader {
    pub filename: PathBuf,
}

impl LasSourceReader {
    pub fn new(filename: PathBuf) -> Self {
        Self { filename }
    }
}

impl SourceReader for LasSourceReader {
    fn read_source(&self) -> Result<PointSource, Box<dyn Error>> {
        let start = std::time::Instant::now();
        let mut reader = Reader::from_path(&self.filename)?;

        // VLRs and EVLRs both may carry waveform packet descriptors; the
        // extractor selects by record id, so pass everything through.
        let metadata: Vec<MetadataRecord> = reader
            .header()
            .vlrs()
            .iter()
            .chain(reader.header().evlrs())
            .map(|vlr| MetadataRecord {
                record_id: vlr.record_id,
                data: vlr.data.clone(),
            })
            .collect();

        let point_count = reader.header().number_of_points() as usize;
        let mut points = PointTable {
            x: Vec::with_capacity(point_count),
            y: Vec::with_capacity(point_count),
            z: Vec::with_capacity(point_count),
            x_t: Vec::with_capacity(point_count),
            y_t: Vec::with_capacity(point_count),
            z_t: Vec::with_capacity(point_count),
            descriptor_ref: Vec::with_capacity(point_count),
            byte_offset: Vec::with_capacity(point_count),
            return_location: Vec::with_capacity(point_count),
        };

        for point in reader.points() {
            let point = point?;
            points.x.push(point.x);
            points.y.push(point.y);
            points.z.push(point.z);
            match point.waveform {
                Some(waveform) => {
                    points
                        .descriptor_ref
                        .push(waveform.wave_packet_descriptor_index as i32);
                    points.x_t.push(waveform.x_t as f64);
                    points.y_t.push(waveform.y_t as f64);
                    points.z_t.push(waveform.z_t as f64);
                    points
                        .byte_offset
                        .push(waveform.byte_offset_to_waveform_data);
                    points
                        .return_location
                        .push(waveform.return_point_waveform_location as f64);
                }
                None => {
                    points.descriptor_ref.push(0);
                    points.x_t.push(0.0);
                    points.y_t.push(0.0);
                    points.z_t.push(0.0);
                    points.byte_offset.push(0);
                    points.return_location.push(0.0);
                }
            }
        }

        info!(
            "read {} points and {} metadata records from {} in {:?}",
            points.len(),
            metadata.len(),
            self.filename.display(),
            start.elapsed()
        );

        Ok(PointSource { points, metadata })
    }
}
