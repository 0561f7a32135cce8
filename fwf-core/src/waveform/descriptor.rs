use byteorder::{ByteOrder as _, LittleEndian};

use crate::error::ExtractError;

/// Record ids designating waveform packet descriptors occupy the open
/// interval (99, 355): descriptor n is stored under record id 99 + n for
/// n in 1..=255, per the LAS waveform packet descriptor convention.
pub const DESCRIPTOR_RECORD_ID_LOWER: u16 = 99;
pub const DESCRIPTOR_RECORD_ID_UPPER: u16 = 355;

/// Fixed size of a waveform packet descriptor payload.
const DESCRIPTOR_PAYLOAD_LEN: usize = 26;

/// Decoding parameters for one class of waveform packets.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketDescriptor {
    /// 0-based descriptor id (`record_id - 100`). Points reference the
    /// table with 1-based ids where 0 means "no waveform".
    pub index: usize,
    /// Nominal sample width. The data file stores two bytes per sample
    /// regardless of this value.
    pub bits_per_sample: u8,
    /// Samples per waveform packet.
    pub sample_count: usize,
    /// Temporal sample spacing, in the time units of the return location.
    pub sampling_interval: f64,
    /// Digitizer gain; `amplitude = raw * gain + offset`.
    pub gain: f64,
    /// Digitizer offset.
    pub offset: f64,
}

/// All waveform packet descriptors found in one file's metadata records.
#[derive(Debug, Clone, Default)]
pub struct PacketDescriptorTable {
    descriptors: Vec<PacketDescriptor>,
}

impl PacketDescriptorTable {
    /// Parses descriptors out of a raw metadata record sequence.
    ///
    /// Records whose id falls outside the reserved interval are ignored.
    /// A selected record with a short payload is an error.
    ///
    /// Payload layout (all little-endian): bits per sample u8, compression
    /// type u8 (unused, waveforms are stored uncompressed), sample count
    /// u32, temporal sample spacing u32, digitizer gain f64, digitizer
    /// offset f64.
    pub fn parse<'a, I>(records: I) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = (u16, &'a [u8])>,
    {
        let mut descriptors = Vec::new();
        for (record_id, payload) in records {
            if !(DESCRIPTOR_RECORD_ID_LOWER < record_id && record_id < DESCRIPTOR_RECORD_ID_UPPER)
            {
                continue;
            }
            if payload.len() < DESCRIPTOR_PAYLOAD_LEN {
                return Err(ExtractError::ShortDescriptor {
                    record_id,
                    actual: payload.len(),
                    expected: DESCRIPTOR_PAYLOAD_LEN,
                });
            }
            descriptors.push(PacketDescriptor {
                index: (record_id - DESCRIPTOR_RECORD_ID_LOWER - 1) as usize,
                bits_per_sample: payload[0],
                sample_count: LittleEndian::read_u32(&payload[2..6]) as usize,
                sampling_interval: LittleEndian::read_u32(&payload[6..10]) as f64,
                gain: LittleEndian::read_f64(&payload[10..18]),
                offset: LittleEndian::read_f64(&payload[18..26]),
            });
        }
        Ok(Self { descriptors })
    }

    /// Looks up a descriptor by its 0-based id.
    pub fn get(&self, index: usize) -> Option<&PacketDescriptor> {
        self.descriptors.iter().find(|d| d.index == index)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Builds a well-formed descriptor payload for tests.
#[cfg(test)]
pub(crate) fn descriptor_payload(
    bits: u8,
    sample_count: u32,
    interval: u32,
    gain: f64,
    offset: f64,
) -> Vec<u8> {
    let mut payload = vec![0u8; DESCRIPTOR_PAYLOAD_LEN];
    payload[0] = bits;
    LittleEndian::write_u32(&mut payload[2..6], sample_count);
    LittleEndian::write_u32(&mut payload[6..10], interval);
    LittleEndian::write_f64(&mut payload[10..18], gain);
    LittleEndian::write_f64(&mut payload[18..26], offset);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_at_fixed_offsets() {
        let payload = descriptor_payload(16, 120, 1000, 0.5, -2.0);
        let table = PacketDescriptorTable::parse([(100, payload.as_slice())]).unwrap();

        assert_eq!(table.len(), 1);
        let descriptor = table.get(0).unwrap();
        assert_eq!(descriptor.bits_per_sample, 16);
        assert_eq!(descriptor.sample_count, 120);
        assert_eq!(descriptor.sampling_interval, 1000.0);
        assert_eq!(descriptor.gain, 0.5);
        assert_eq!(descriptor.offset, -2.0);
    }

    #[test]
    fn ignores_records_outside_reserved_interval() {
        let payload = descriptor_payload(8, 60, 500, 1.0, 0.0);
        let table = PacketDescriptorTable::parse([
            (99, payload.as_slice()),
            (100, payload.as_slice()),
            (354, payload.as_slice()),
            (355, payload.as_slice()),
            (2112, b"projection metadata".as_slice()),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().index, 0);
        assert_eq!(table.get(254).unwrap().index, 254);
        assert!(table.get(255).is_none());
    }

    #[test]
    fn short_payload_is_an_error() {
        let err = PacketDescriptorTable::parse([(101, [0u8; 25].as_slice())]).unwrap_err();
        match err {
            crate::error::ExtractError::ShortDescriptor {
                record_id, actual, ..
            } => {
                assert_eq!(record_id, 101);
                assert_eq!(actual, 25);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lookup_matches_record_id_not_selection_position() {
        let payload = descriptor_payload(16, 30, 1000, 1.0, 0.0);
        // descriptor ids 2 and 0, out of order
        let table = PacketDescriptorTable::parse([
            (102, payload.as_slice()),
            (100, payload.as_slice()),
        ])
        .unwrap();

        assert_eq!(table.get(2).unwrap().index, 2);
        assert_eq!(table.get(0).unwrap().index, 0);
        assert!(table.get(1).is_none());
    }
}
