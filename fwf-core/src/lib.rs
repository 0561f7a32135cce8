pub mod error;
pub mod waveform;

pub use error::ExtractError;
pub use waveform::extract::{extract, Extraction, MetadataRecord, PointSource};
pub use waveform::geometry::Sample;
pub use waveform::record::{PointTable, WaveformRecord};
