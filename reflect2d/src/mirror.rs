use super::*;

/// A flat, reflective line segment.
///
/// The order of the endpoints only affects the orientation of [`Self::normal`],
/// reflections across `(a, b)` and `(b, a)` are the same.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mirror {
    pub start: Point,
    pub end: Point,
}

impl Mirror {
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// `end - start`
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        self.direction().norm()
    }

    /// A (non-normalized) normal of this mirror: [`perp`]`(end - start)`
    #[inline]
    #[must_use]
    pub fn normal(&self) -> Vector {
        perp(&self.direction())
    }

    /// Zero if this mirror is degenerate (`start == end`).
    #[inline]
    #[must_use]
    pub fn unit_normal(&self) -> Vector {
        normalize(&self.normal())
    }

    /// The same segment, with its endpoints swapped.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// The 2x2 orthogonal map reflecting vectors across this mirror's direction.
    ///
    /// Identity if this mirror is degenerate.
    #[inline]
    #[must_use]
    pub fn reflection_matrix(&self) -> Matrix2<Float> {
        let n = self.unit_normal();
        Matrix2::identity() - (n * n.transpose()) * 2.0
    }

    /// Where the segment `[from, to]` crosses this mirror, if it does.
    #[inline]
    #[must_use]
    pub fn intersect_segment(&self, from: &Point, to: &Point) -> Option<Point> {
        segment_intersection(from, to, &self.start, &self.end)
    }
}

impl<P: Into<Point>> From<(P, P)> for Mirror {
    #[inline]
    fn from((start, end): (P, P)) -> Self {
        Self::new(start, end)
    }
}
