//! Direct/indirect blending.
//!
//! `C = A * DIRECT_WEIGHT`, `D = B * INDIRECT_WEIGHT`, `total = C + D`,
//! `percentage = total / FULL_SCALE * 100`.

use serde::Serialize;

use crate::FULL_SCALE;

/// Share of total attainment taken from direct (assessment) attainment.
pub const DIRECT_WEIGHT: f64 = 0.8;
/// Share of total attainment taken from indirect (survey) attainment.
pub const INDIRECT_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Blend {
    /// A.
    pub direct: f64,
    /// B.
    pub indirect: f64,
    /// C.
    pub weighted_direct: f64,
    /// D.
    pub weighted_indirect: f64,
    pub total: f64,
    pub percentage: f64,
}

#[must_use]
pub fn blend(direct: f64, indirect: f64) -> Blend {
    let weighted_direct = direct * DIRECT_WEIGHT;
    let weighted_indirect = indirect * INDIRECT_WEIGHT;
    let total = weighted_direct + weighted_indirect;
    Blend {
        direct,
        indirect,
        weighted_direct,
        weighted_indirect,
        total,
        percentage: total / FULL_SCALE * 100.0,
    }
}

/// Blend only when both sides are defined.
#[must_use]
pub fn blend_defined(direct: Option<f64>, indirect: Option<f64>) -> Option<Blend> {
    Some(blend(direct?, indirect?))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn full_scale_is_one_hundred_percent() {
        let result = blend(3.0, 3.0);
        assert!(approx(result.total, 3.0));
        assert!(approx(result.percentage, 100.0));
    }

    #[test]
    fn weights_sum_to_one() {
        assert!(approx(DIRECT_WEIGHT + INDIRECT_WEIGHT, 1.0));
    }

    #[rstest]
    #[case(2.0, 1.0, 1.0, 2.5)]
    #[case(0.5, 3.0, 1.5, 0.0)]
    #[case(1.2, 2.7, 0.3, 1.1)]
    fn linear_in_both_arguments(
        #[case] a1: f64,
        #[case] b1: f64,
        #[case] a2: f64,
        #[case] b2: f64,
    ) {
        let sum = blend(a1 + a2, b1 + b2);
        let parts = (blend(a1, b1), blend(a2, b2));
        assert!(approx(sum.total, parts.0.total + parts.1.total));
        assert!(approx(sum.percentage, parts.0.percentage + parts.1.percentage));

        let scaled = blend(2.0 * a1, 2.0 * b1);
        assert!(approx(scaled.total, 2.0 * parts.0.total));
    }

    #[test]
    fn components_follow_weights() {
        let result = blend(3.0, 2.6);
        assert!(approx(result.weighted_direct, 2.4));
        assert!(approx(result.weighted_indirect, 0.52));
        assert!(approx(result.total, 2.92));
    }

    #[test]
    fn undefined_side_gives_no_blend() {
        assert!(blend_defined(None, Some(2.0)).is_none());
        assert!(blend_defined(Some(2.0), None).is_none());
        assert!(blend_defined(Some(2.0), Some(2.0)).is_some());
    }
}
