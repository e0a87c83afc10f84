use serde::{Deserialize, Serialize};

/// A single key of a [`CoefficientCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub x: f64,
    pub y: f64,
}

/// Piecewise-linear scalar function used for lift, drag and steering tables.
///
/// Keys are kept sorted by `x`. Sampling outside the key range clamps to the
/// first or last value. An empty curve evaluates to `0.0`, so a craft with a
/// missing table simply gets no contribution from it.
///
/// Serialized as a list of `[x, y]` pairs:
///
/// ```yaml
/// lift_aoa: [[-90, 0], [0, 0.25], [15, 1.2], [90, 0]]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct CoefficientCurve {
    keys: Vec<CurveKey>,
}

impl CoefficientCurve {
    pub fn new(points: &[(f64, f64)]) -> Self {
        let mut keys: Vec<CurveKey> = points.iter().map(|&(x, y)| CurveKey { x, y }).collect();
        keys.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { keys }
    }

    /// A curve returning `value` everywhere.
    pub fn constant(value: f64) -> Self {
        Self::new(&[(0.0, value)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys are finite numbers
    pub fn is_finite(&self) -> bool {
        self.keys.iter().all(|k| k.x.is_finite() && k.y.is_finite())
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if x.is_nan() {
            return 0.0;
        }
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // First key strictly greater than x; guaranteed in 1..len by the checks above.
        let upper = self.keys.partition_point(|k| k.x <= x);
        let a = &self.keys[upper - 1];
        let b = &self.keys[upper];
        let span = b.x - a.x;
        if span <= 0.0 {
            return b.y;
        }
        a.y + (b.y - a.y) * (x - a.x) / span
    }
}

impl From<Vec<(f64, f64)>> for CoefficientCurve {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(&points)
    }
}

impl From<CoefficientCurve> for Vec<(f64, f64)> {
    fn from(curve: CoefficientCurve) -> Self {
        curve.keys.into_iter().map(|k| (k.x, k.y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_curve_is_zero() {
        let curve = CoefficientCurve::default();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(1e6), 0.0);
    }

    #[test]
    fn test_interpolates_between_keys() {
        let curve = CoefficientCurve::new(&[(0.0, 0.0), (10.0, 1.0), (20.0, 0.0)]);
        assert_relative_eq!(curve.evaluate(5.0), 0.5);
        assert_relative_eq!(curve.evaluate(10.0), 1.0);
        assert_relative_eq!(curve.evaluate(15.0), 0.5);
    }

    #[test]
    fn test_clamps_outside_range() {
        let curve = CoefficientCurve::new(&[(-10.0, -1.0), (10.0, 2.0)]);
        assert_eq!(curve.evaluate(-100.0), -1.0);
        assert_eq!(curve.evaluate(100.0), 2.0);
    }

    #[test]
    fn test_unsorted_keys_are_sorted() {
        let curve = CoefficientCurve::new(&[(10.0, 1.0), (0.0, 0.0)]);
        assert_eq!(curve.keys()[0].x, 0.0);
        assert_relative_eq!(curve.evaluate(2.5), 0.25);
    }

    #[test]
    fn test_nan_samples_to_zero() {
        let curve = CoefficientCurve::constant(3.0);
        assert_eq!(curve.evaluate(f64::NAN), 0.0);
        assert_eq!(curve.evaluate(42.0), 3.0);
    }

    #[test]
    fn test_yaml_round_trip_shape() {
        let curve: CoefficientCurve = serde_yaml::from_str("[[0, 0.5], [30, 1.0]]").unwrap();
        assert_relative_eq!(curve.evaluate(15.0), 0.75);
    }
}
