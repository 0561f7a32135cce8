use std::{error::Error, path::Path};

use las::{point::Format, Builder, Color, Point, Transform, Vector, Writer};
use rayon::prelude::*;

use fwf_core::Sample;

use crate::colormap;

/// LAS coordinate resolution for exported waveform samples.
const EXPORT_SCALE: f64 = 0.01;

/// Writes reconstructed samples to a colorized LAS file.
///
/// Amplitudes are min-max normalized and mapped through the reversed magma
/// ramp into 16-bit RGB (point format 2); the unnormalized amplitude also
/// lands in the intensity field. Header offsets sit at the per-axis
/// coordinate minimum.
pub fn write_colorized_las(path: &Path, samples: &[Sample]) -> Result<(), Box<dyn Error>> {
    let mut min = [0.0f64; 3];
    if let Some(first) = samples.first() {
        min = [first.x, first.y, first.z];
    }
    for sample in samples {
        min[0] = min[0].min(sample.x);
        min[1] = min[1].min(sample.y);
        min[2] = min[2].min(sample.z);
    }

    let amplitudes: Vec<f64> = samples.iter().map(|s| s.amplitude).collect();
    let colors: Vec<Color> = colormap::normalize(&amplitudes)
        .par_iter()
        .map(|&t| {
            let rgb = colormap::magma_r(t);
            Color::new(
                (rgb[0] * 65535.0) as u16,
                (rgb[1] * 65535.0) as u16,
                (rgb[2] * 65535.0) as u16,
            )
        })
        .collect();

    let mut builder = Builder::from((1, 2));
    builder.point_format = Format::new(2)?;
    builder.transforms = Vector {
        x: Transform {
            scale: EXPORT_SCALE,
            offset: min[0],
        },
        y: Transform {
            scale: EXPORT_SCALE,
            offset: min[1],
        },
        z: Transform {
            scale: EXPORT_SCALE,
            offset: min[2],
        },
    };
    let header = builder.into_header()?;

    let mut writer = Writer::from_path(path, header)?;
    for (sample, color) in samples.iter().zip(colors) {
        writer.write(Point {
            x: sample.x,
            y: sample.y,
            z: sample.z,
            intensity: sample.amplitude as u16,
            color: Some(color),
            ..Default::default()
        })?;
    }

    Ok(())
}
