use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::components::CoefficientCurve;

/// Signed principal axis of the body frame (X right, Y up, Z forward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    Right,
    Left,
    Up,
    Down,
    Forward,
    Back,
}

impl AxisDirection {
    pub const ALL: [AxisDirection; 6] = [
        AxisDirection::Right,
        AxisDirection::Left,
        AxisDirection::Up,
        AxisDirection::Down,
        AxisDirection::Forward,
        AxisDirection::Back,
    ];

    fn index(self) -> usize {
        match self {
            AxisDirection::Right => 0,
            AxisDirection::Left => 1,
            AxisDirection::Up => 2,
            AxisDirection::Down => 3,
            AxisDirection::Forward => 4,
            AxisDirection::Back => 5,
        }
    }

    /// Direction a body-frame component with the given sign points along.
    pub fn from_component(axis: usize, value: f64) -> Option<Self> {
        let positive = value > 0.0;
        match (axis, value != 0.0) {
            (_, false) => None,
            (0, true) => Some(if positive { Self::Right } else { Self::Left }),
            (1, true) => Some(if positive { Self::Up } else { Self::Down }),
            (2, true) => Some(if positive { Self::Forward } else { Self::Back }),
            _ => None,
        }
    }

    pub fn unit(self) -> Vector3<f64> {
        match self {
            AxisDirection::Right => Vector3::x(),
            AxisDirection::Left => -Vector3::x(),
            AxisDirection::Up => Vector3::y(),
            AxisDirection::Down => -Vector3::y(),
            AxisDirection::Forward => Vector3::z(),
            AxisDirection::Back => -Vector3::z(),
        }
    }
}

/// Parasitic drag curves, one per signed body axis. Each curve maps the speed
/// along its axis (m/s) to a drag coefficient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "NamedDragCurves", into = "NamedDragCurves")]
pub struct DragTable {
    curves: [CoefficientCurve; 6],
}

impl DragTable {
    pub fn uniform(curve: CoefficientCurve) -> Self {
        Self {
            curves: std::array::from_fn(|_| curve.clone()),
        }
    }

    pub fn with(mut self, direction: AxisDirection, curve: CoefficientCurve) -> Self {
        self[direction] = curve;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (AxisDirection, &CoefficientCurve)> {
        AxisDirection::ALL.into_iter().zip(self.curves.iter())
    }

    /// Drag coefficient vector for a body-frame velocity.
    ///
    /// Each component of the normalized velocity is scaled by the curve of the
    /// direction it points along, sampled at the absolute speed on that axis.
    pub fn coefficient(&self, local_velocity: &Vector3<f64>) -> Vector3<f64> {
        let dir = match local_velocity.try_normalize(1e-12) {
            Some(dir) => dir,
            None => return Vector3::zeros(),
        };

        let mut result = dir;
        for axis in 0..3 {
            if let Some(direction) = AxisDirection::from_component(axis, dir[axis]) {
                result[axis] *= self[direction].evaluate(local_velocity[axis].abs());
            }
        }
        result
    }
}

impl Index<AxisDirection> for DragTable {
    type Output = CoefficientCurve;

    fn index(&self, direction: AxisDirection) -> &Self::Output {
        &self.curves[direction.index()]
    }
}

impl IndexMut<AxisDirection> for DragTable {
    fn index_mut(&mut self, direction: AxisDirection) -> &mut Self::Output {
        &mut self.curves[direction.index()]
    }
}

/// On-disk layout of [`DragTable`]: one named field per direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct NamedDragCurves {
    right: CoefficientCurve,
    left: CoefficientCurve,
    up: CoefficientCurve,
    down: CoefficientCurve,
    forward: CoefficientCurve,
    back: CoefficientCurve,
}

impl From<NamedDragCurves> for DragTable {
    fn from(named: NamedDragCurves) -> Self {
        Self {
            curves: [
                named.right,
                named.left,
                named.up,
                named.down,
                named.forward,
                named.back,
            ],
        }
    }
}

impl From<DragTable> for NamedDragCurves {
    fn from(table: DragTable) -> Self {
        let [right, left, up, down, forward, back] = table.curves;
        Self {
            right,
            left,
            up,
            down,
            forward,
            back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn distinct_table() -> DragTable {
        DragTable::default()
            .with(AxisDirection::Right, CoefficientCurve::constant(1.0))
            .with(AxisDirection::Left, CoefficientCurve::constant(2.0))
            .with(AxisDirection::Up, CoefficientCurve::constant(3.0))
            .with(AxisDirection::Down, CoefficientCurve::constant(4.0))
            .with(AxisDirection::Forward, CoefficientCurve::constant(5.0))
            .with(AxisDirection::Back, CoefficientCurve::constant(6.0))
    }

    #[test]
    fn test_each_direction_selects_its_curve() {
        let table = distinct_table();
        for (i, direction) in AxisDirection::ALL.iter().enumerate() {
            let c = table.coefficient(&(direction.unit() * 10.0));
            assert_relative_eq!(c.norm(), (i + 1) as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_mixed_direction_scales_components() {
        let table = distinct_table();
        let v = Vector3::new(-1.0, 0.0, 1.0);
        let c = table.coefficient(&v);
        let s = 1.0 / 2f64.sqrt();
        assert_relative_eq!(c, Vector3::new(-2.0 * s, 0.0, 5.0 * s), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_velocity_has_no_drag() {
        let table = distinct_table();
        assert_eq!(table.coefficient(&Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn test_named_yaml_layout() {
        let yaml = "forward: [[0, 0.02]]\nback: [[0, 0.1]]\n";
        let table: DragTable = serde_yaml::from_str(yaml).unwrap();
        assert_relative_eq!(table[AxisDirection::Forward].evaluate(30.0), 0.02);
        assert_relative_eq!(table[AxisDirection::Back].evaluate(30.0), 0.1);
        assert!(table[AxisDirection::Up].is_empty());
    }
}
