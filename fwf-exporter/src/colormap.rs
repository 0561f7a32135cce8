/// Magma colormap anchors sampled at even intervals over [0, 1].
const MAGMA_ANCHORS: [[f64; 3]; 9] = [
    [0.001462, 0.000466, 0.013866],
    [0.078815, 0.054184, 0.211667],
    [0.232077, 0.059889, 0.437695],
    [0.390384, 0.100379, 0.501864],
    [0.550287, 0.161158, 0.505719],
    [0.716387, 0.214982, 0.475290],
    [0.868793, 0.287728, 0.409303],
    [0.967671, 0.439703, 0.359810],
    [0.987053, 0.991438, 0.749504],
];

/// Maps t in [0, 1] to an RGB triple in [0, 1] by linear interpolation
/// between the magma anchors. Out-of-range inputs are clamped.
pub fn magma(t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (MAGMA_ANCHORS.len() - 1) as f64;
    let low = scaled.floor() as usize;
    let high = (low + 1).min(MAGMA_ANCHORS.len() - 1);
    let frac = scaled - low as f64;

    let a = MAGMA_ANCHORS[low];
    let b = MAGMA_ANCHORS[high];
    [
        a[0] + (b[0] - a[0]) * frac,
        a[1] + (b[1] - a[1]) * frac,
        a[2] + (b[2] - a[2]) * frac,
    ]
}

/// Reversed magma, the default ramp for amplitude coloring: low amplitude
/// light, high amplitude dark.
pub fn magma_r(t: f64) -> [f64; 3] {
    magma(1.0 - t)
}

/// Min-max normalizes values to [0, 1]. A constant input maps to all
/// zeros rather than dividing by a zero span.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if !span.is_finite() || span == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_the_anchor_table() {
        assert_eq!(magma(0.0), MAGMA_ANCHORS[0]);
        assert_eq!(magma(1.0), MAGMA_ANCHORS[8]);
        assert_eq!(magma_r(0.0), MAGMA_ANCHORS[8]);
    }

    #[test]
    fn interpolates_between_anchors() {
        // halfway between anchors 4 and 5
        let rgb = magma(0.5625);
        let expected = [
            (MAGMA_ANCHORS[4][0] + MAGMA_ANCHORS[5][0]) / 2.0,
            (MAGMA_ANCHORS[4][1] + MAGMA_ANCHORS[5][1]) / 2.0,
            (MAGMA_ANCHORS[4][2] + MAGMA_ANCHORS[5][2]) / 2.0,
        ];
        for (got, want) in rgb.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(magma(-1.0), magma(0.0));
        assert_eq!(magma(2.0), magma(1.0));
    }

    #[test]
    fn normalize_spans_the_value_range() {
        assert_eq!(normalize(&[2.0, 4.0, 6.0]), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn constant_values_normalize_to_zero() {
        assert_eq!(normalize(&[3.0, 3.0]), vec![0.0, 0.0]);
        assert!(normalize(&[]).is_empty());
    }
}
