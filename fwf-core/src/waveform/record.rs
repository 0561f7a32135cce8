use std::collections::HashSet;

use crate::error::ExtractError;

/// A point's descriptor reference is valid when it lies strictly inside
/// (0, 256): the source format stores the reference in a single byte where
/// 0 means "no waveform".
pub const DESCRIPTOR_REF_LIMIT: i32 = 256;

/// Per-point attributes from the point source, as parallel arrays.
#[derive(Debug, Clone, Default)]
pub struct PointTable {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Direction vector components of the pulse ray.
    pub x_t: Vec<f64>,
    pub y_t: Vec<f64>,
    pub z_t: Vec<f64>,
    /// 1-based reference into the packet descriptor table, 0 = none.
    pub descriptor_ref: Vec<i32>,
    /// Absolute byte offset of the point's waveform in the data file.
    pub byte_offset: Vec<u64>,
    /// Signed time offset of the recorded return along the ray.
    pub return_location: Vec<f64>,
}

impl PointTable {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn check_lengths(&self) -> Result<(), ExtractError> {
        let expected = self.x.len();
        let fields: [(&'static str, usize); 8] = [
            ("y", self.y.len()),
            ("z", self.z.len()),
            ("x_t", self.x_t.len()),
            ("y_t", self.y_t.len()),
            ("z_t", self.z_t.len()),
            ("descriptor_ref", self.descriptor_ref.len()),
            ("byte_offset", self.byte_offset.len()),
            ("return_location", self.return_location.len()),
        ];
        for (field, found) in fields {
            if found != expected {
                return Err(ExtractError::MismatchedLengths {
                    field,
                    found,
                    expected,
                });
            }
        }
        Ok(())
    }
}

/// One deduplicated waveform to pull out of the data file.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformRecord {
    /// 0-based index into the packet descriptor table.
    pub descriptor: usize,
    pub anchor: [f64; 3],
    pub direction: [f64; 3],
    pub byte_offset: u64,
    pub return_location: f64,
}

/// Selects the points that carry a waveform and deduplicates them by data
/// file byte offset.
///
/// A point survives when its descriptor reference is valid and the mask,
/// if given, does not flag it. Several points may share one byte offset
/// (overlapping returns digitized into the same packet); only the
/// first-encountered point's attributes are kept, in order of first
/// occurrence. A file with no valid point yields an empty result.
pub fn select_records(
    points: &PointTable,
    mask: Option<&[bool]>,
) -> Result<Vec<WaveformRecord>, ExtractError> {
    points.check_lengths()?;
    if let Some(mask) = mask {
        if mask.len() != points.len() {
            return Err(ExtractError::MaskLengthMismatch {
                found: mask.len(),
                expected: points.len(),
            });
        }
    }

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for i in 0..points.len() {
        let reference = points.descriptor_ref[i];
        if !(0 < reference && reference < DESCRIPTOR_REF_LIMIT) {
            continue;
        }
        if mask.is_some_and(|m| m[i]) {
            continue;
        }
        if !seen.insert(points.byte_offset[i]) {
            continue;
        }
        records.push(WaveformRecord {
            descriptor: (reference - 1) as usize,
            anchor: [points.x[i], points.y[i], points.z[i]],
            direction: [points.x_t[i], points.y_t[i], points.z_t[i]],
            byte_offset: points.byte_offset[i],
            return_location: points.return_location[i],
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(refs: &[i32], offsets: &[u64]) -> PointTable {
        let n = refs.len();
        PointTable {
            x: (0..n).map(|i| i as f64).collect(),
            y: vec![0.0; n],
            z: vec![0.0; n],
            x_t: vec![0.0; n],
            y_t: vec![0.0; n],
            z_t: vec![1.0; n],
            descriptor_ref: refs.to_vec(),
            byte_offset: offsets.to_vec(),
            return_location: vec![0.0; n],
        }
    }

    #[test]
    fn reference_validity_bounds() {
        let points = table(&[0, 1, 255, 256, -3], &[0, 60, 120, 180, 240]);
        let records = select_records(&points, None).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].descriptor, 0);
        assert_eq!(records[1].descriptor, 254);
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_point_order() {
        let points = table(&[1, 1, 1, 1], &[120, 60, 120, 60]);
        let records = select_records(&points, None).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].byte_offset, 120);
        assert_eq!(records[0].anchor[0], 0.0);
        assert_eq!(records[1].byte_offset, 60);
        assert_eq!(records[1].anchor[0], 1.0);
    }

    #[test]
    fn mask_drops_points_with_valid_references() {
        let points = table(&[1, 1, 1], &[0, 60, 120]);
        let records = select_records(&points, Some(&[false, true, false])).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].byte_offset, 0);
        assert_eq!(records[1].byte_offset, 120);
    }

    #[test]
    fn no_valid_points_is_empty_not_an_error() {
        let points = table(&[0, 0], &[0, 60]);
        assert!(select_records(&points, None).unwrap().is_empty());
    }

    #[test]
    fn mismatched_array_lengths_are_rejected() {
        let mut points = table(&[1, 1], &[0, 60]);
        points.z_t.pop();
        let err = select_records(&points, None).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MismatchedLengths { field: "z_t", .. }
        ));
    }

    #[test]
    fn mismatched_mask_length_is_rejected() {
        let points = table(&[1, 1], &[0, 60]);
        let err = select_records(&points, Some(&[false])).unwrap_err();
        assert!(matches!(err, ExtractError::MaskLengthMismatch { .. }));
    }
}
