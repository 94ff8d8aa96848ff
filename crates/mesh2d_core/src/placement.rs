//! Coordinate algebra
//!
//! A position is never stored in pixels. It is the affine combination
//!
//! ```text
//! x = measure_x * measure + x_pixels
//! y = measure_y * measure + y_pixels
//! ```
//!
//! evaluated against the current value of a shared measure on every read, so
//! positions can never go stale when a measure changes.

use std::ops::{Add, Neg};

use crate::measure::{MeasureGraph, MeasureId};
use crate::{ensure_finite, Result};

/// A delta (or absolute offset) split into measure units and pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    /// Offset along X in units of the measure
    pub measure_x: f32,
    /// Offset along Y in units of the measure
    pub measure_y: f32,
    /// Raw pixel offset along X
    pub x: f32,
    /// Raw pixel offset along Y
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(measure_x: f32, measure_y: f32, x: f32, y: f32) -> Self {
        Self {
            measure_x,
            measure_y,
            x,
            y,
        }
    }

    /// A pure pixel delta
    pub const fn pixels(x: f32, y: f32) -> Self {
        Self::new(0.0, 0.0, x, y)
    }

    /// A pure measure-unit delta
    pub const fn measure(measure_x: f32, measure_y: f32) -> Self {
        Self::new(measure_x, measure_y, 0.0, 0.0)
    }

    pub fn validate(self) -> Result<Self> {
        ensure_finite("measure_x offset", self.measure_x)?;
        ensure_finite("measure_y offset", self.measure_y)?;
        ensure_finite("x offset", self.x)?;
        ensure_finite("y offset", self.y)?;
        Ok(self)
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(
            self.measure_x + rhs.measure_x,
            self.measure_y + rhs.measure_y,
            self.x + rhs.x,
            self.y + rhs.y,
        )
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.measure_x, -self.measure_y, -self.x, -self.y)
    }
}

/// Where a node sits: a measure plus an accumulated [`Offset`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    measure: MeasureId,
    offset: Offset,
}

impl Placement {
    pub fn new(measure: MeasureId) -> Self {
        Self {
            measure,
            offset: Offset::ZERO,
        }
    }

    /// A placement starting at `offset`
    pub fn at(measure: MeasureId, offset: Offset) -> Result<Self> {
        Ok(Self {
            measure,
            offset: offset.validate()?,
        })
    }

    pub fn measure(&self) -> MeasureId {
        self.measure
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Add `delta` to the stored offsets.
    ///
    /// This is the only way to change a placement. A delta with a non-finite
    /// component is rejected as a whole and nothing changes.
    pub fn translate(&mut self, delta: Offset) -> Result<()> {
        let delta = delta.validate()?;
        self.offset = self.offset + delta;
        Ok(())
    }

    /// Absolute X in pixels
    pub fn x(&self, graph: &MeasureGraph) -> Result<f32> {
        let unit = graph.value(self.measure)?;
        Ok(self.offset.measure_x * unit + self.offset.x)
    }

    /// Absolute Y in pixels
    pub fn y(&self, graph: &MeasureGraph) -> Result<f32> {
        let unit = graph.value(self.measure)?;
        Ok(self.offset.measure_y * unit + self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeasureError;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_affine_coordinates_follow_measure() {
        let mut graph = MeasureGraph::new();
        let unit = graph.create_unit();
        let placement = Placement::at(unit, Offset::new(2.0, 3.0, 5.0, -1.0)).unwrap();

        assert_eq!(placement.x(&graph).unwrap(), 7.0);
        assert_eq!(placement.y(&graph).unwrap(), 2.0);

        graph.set(unit, 10.0).unwrap();
        assert_eq!(placement.x(&graph).unwrap(), 25.0);
        assert_eq!(placement.y(&graph).unwrap(), 29.0);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut graph = MeasureGraph::new();
        let unit = graph.create(4.0).unwrap();
        let mut placement = Placement::new(unit);

        placement.translate(Offset::pixels(1.0, 2.0)).unwrap();
        placement.translate(Offset::pixels(1.0, 2.0)).unwrap();
        placement.translate(Offset::measure(0.5, 0.0)).unwrap();

        assert_eq!(placement.offset(), Offset::new(0.5, 0.0, 2.0, 4.0));
        assert_eq!(placement.x(&graph).unwrap(), 4.0);
    }

    #[test]
    fn test_translate_then_negation_round_trips() {
        let mut graph = MeasureGraph::new();
        let unit = graph.create(3.3).unwrap();
        let mut placement = Placement::at(unit, Offset::new(1.1, 2.2, 3.3, 4.4)).unwrap();
        let (x0, y0) = (placement.x(&graph).unwrap(), placement.y(&graph).unwrap());

        let delta = Offset::new(0.7, -12.25, 101.9, -0.003);
        placement.translate(delta).unwrap();
        placement.translate(-delta).unwrap();

        assert!((placement.x(&graph).unwrap() - x0).abs() < EPS);
        assert!((placement.y(&graph).unwrap() - y0).abs() < EPS);
    }

    #[test]
    fn test_non_finite_delta_is_rejected_whole() {
        let mut graph = MeasureGraph::new();
        let unit = graph.create_unit();
        let mut placement = Placement::at(unit, Offset::pixels(1.0, 1.0)).unwrap();

        let err = placement
            .translate(Offset::new(1.0, 0.0, f32::NAN, 0.0))
            .unwrap_err();
        assert!(matches!(err, MeasureError::NonFinite { what: "x offset", .. }));
        assert_eq!(placement.offset(), Offset::pixels(1.0, 1.0));
    }
}
