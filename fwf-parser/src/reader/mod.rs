pub mod las;

use std::error::Error;

use fwf_core::PointSource;

/// Reads a point-cloud container into the typed arrays and raw metadata
/// records the extractor consumes.
pub trait SourceReader {
    fn read_source(&self) -> Result<PointSource, Box<dyn Error>>;
}
