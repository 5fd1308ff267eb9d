//! Catmull-Rom spline segments with arc-length parametrization.
//!
//! Every moving leg of a transport path owns one [`SplineSegment`]: the curve between `p1`
//! and `p2`, shaped by the neighbouring control points `p0` and `p3`. Transport kinematics are
//! expressed in *distance along the leg*, so segments are evaluated by arc-length percentage
//! rather than by the raw curve parameter. A cumulative length table
//! (`SPLINE_LENGTH_SAMPLES` chords) maps one to the other.

use crate::{constants::SPLINE_LENGTH_SAMPLES, pose::Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct SplineSegment {
    points: [Vec3; 4],
    /// Cumulative chord length at each sample; `lengths[0] == 0`, last entry is the total.
    lengths: [f32; SPLINE_LENGTH_SAMPLES + 1],
}

impl SplineSegment {
    /// Build the segment from `p1` to `p2`.
    ///
    /// Pass `None` for a missing neighbour (first/last leg of a map run); the missing control
    /// point is mirrored across the segment end so the curve leaves/enters along the chord.
    pub fn new(p0: Option<Vec3>, p1: Vec3, p2: Vec3, p3: Option<Vec3>) -> Self {
        let p0 = p0.unwrap_or(p1 * 2.0 - p2);
        let p3 = p3.unwrap_or(p2 * 2.0 - p1);

        let mut segment = Self {
            points: [p0, p1, p2, p3],
            lengths: [0.0; SPLINE_LENGTH_SAMPLES + 1],
        };

        let mut prev = segment.evaluate(0.0);
        let mut total = 0.0;
        for i in 1..=SPLINE_LENGTH_SAMPLES {
            let u = i as f32 / SPLINE_LENGTH_SAMPLES as f32;
            let next = segment.evaluate(u);
            total += (next - prev).norm();
            segment.lengths[i] = total;
            prev = next;
        }

        segment
    }

    /// Arc length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.lengths[SPLINE_LENGTH_SAMPLES]
    }

    /// Start point (`p1`).
    #[inline]
    pub fn start(&self) -> Vec3 {
        self.points[1]
    }

    /// End point (`p2`).
    #[inline]
    pub fn end(&self) -> Vec3 {
        self.points[2]
    }

    /// Position at a fraction `percent` of the arc length.
    pub fn evaluate_percent(&self, percent: f32) -> Vec3 {
        self.evaluate(self.param_for_percent(percent))
    }

    /// Tangent (not normalized) at a fraction `percent` of the arc length.
    pub fn evaluate_derivative(&self, percent: f32) -> Vec3 {
        self.derivative(self.param_for_percent(percent))
    }

    /// Map an arc-length fraction to the curve parameter `u ∈ [0, 1]`.
    fn param_for_percent(&self, percent: f32) -> f32 {
        let total = self.length();
        if total <= 0.0 {
            return percent.clamp(0.0, 1.0);
        }

        let target = percent.clamp(0.0, 1.0) * total;
        // First sample whose cumulative length reaches the target.
        let i = self
            .lengths
            .partition_point(|&l| l < target)
            .clamp(1, SPLINE_LENGTH_SAMPLES);
        let (l0, l1) = (self.lengths[i - 1], self.lengths[i]);
        let frac = if l1 > l0 { (target - l0) / (l1 - l0) } else { 0.0 };

        ((i - 1) as f32 + frac) / SPLINE_LENGTH_SAMPLES as f32
    }

    fn evaluate(&self, u: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.points;
        let u2 = u * u;
        let u3 = u2 * u;
        (p1 * 2.0
            + (p2 - p0) * u
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * u2
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * u3)
            * 0.5
    }

    fn derivative(&self, u: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.points;
        ((p2 - p0)
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * (2.0 * u)
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * (3.0 * u * u))
            * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> SplineSegment {
        SplineSegment::new(
            Some(Vec3::new(-100.0, 0.0, 0.0)),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            Some(Vec3::new(200.0, 0.0, 0.0)),
        )
    }

    #[test]
    fn straight_segment_length_matches_chord() {
        assert!((straight().length() - 100.0).abs() < 1.0e-3);
    }

    #[test]
    fn endpoints_are_hit_exactly() {
        let s = straight();
        assert!((s.evaluate_percent(0.0) - s.start()).norm() < 1.0e-4);
        assert!((s.evaluate_percent(1.0) - s.end()).norm() < 1.0e-4);
    }

    #[test]
    fn percent_is_arc_length_uniform_on_a_line() {
        let s = straight();
        let mid = s.evaluate_percent(0.25);
        assert!((mid.x - 25.0).abs() < 1.0e-2);
    }

    #[test]
    fn missing_neighbours_are_mirrored() {
        let s = SplineSegment::new(None, Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 50.0, 0.0), None);
        assert!((s.length() - 50.0).abs() < 1.0e-3);
        let tangent = s.evaluate_derivative(0.5);
        assert!(tangent.x.abs() < 1.0e-4 && tangent.y > 0.0);
    }

    #[test]
    fn curved_segment_is_longer_than_its_chord() {
        let s = SplineSegment::new(
            Some(Vec3::new(0.0, -100.0, 0.0)),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            Some(Vec3::new(100.0, 100.0, 0.0)),
        );
        assert!(s.length() > 100.0);
        assert!((s.evaluate_percent(1.0) - s.end()).norm() < 1.0e-3);
    }
}
