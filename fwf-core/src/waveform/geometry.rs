use crate::waveform::descriptor::PacketDescriptor;
use crate::waveform::record::WaveformRecord;

/// One reconstructed waveform sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub amplitude: f64,
}

/// Places each decoded amplitude on the pulse's straight-line path.
///
/// Sample k sits at `anchor + (return_location - k * interval) * direction`,
/// so increasing k walks backward along the ray from the recorded return.
/// Positions are emitted as computed; corrupt input yields implausible
/// coordinates rather than an error.
pub fn reconstruct(
    record: &WaveformRecord,
    descriptor: &PacketDescriptor,
    amplitudes: &[f64],
    out: &mut Vec<Sample>,
) {
    for (k, &amplitude) in amplitudes.iter().enumerate() {
        let t = record.return_location - k as f64 * descriptor.sampling_interval;
        out.push(Sample {
            x: record.anchor[0] + t * record.direction[0],
            y: record.anchor[1] + t * record.direction[1],
            z: record.anchor[2] + t * record.direction[2],
            amplitude,
        });
    }
}
