use super::*;

/// Determinants with an absolute value below this are treated as zero:
/// the two segments are considered parallel (or degenerate).
pub const PARALLEL_EPSILON: Float = 1e-10;

/// Where two segments cross.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentHit {
    pub point: Point,
    /// Position of `point` along the first segment, in `[0, 1]`
    pub t: Float,
    /// Position of `point` along the second segment, in `[0, 1]`
    pub u: Float,
}

/// Intersects the finite segments `[p1, p2]` and `[p3, p4]`.
///
/// Returns `None` if they don't cross, or if they are parallel. Collinear,
/// overlapping segments are parallel too, and are _not_ reported as intersecting.
#[inline]
#[must_use]
pub fn segment_intersection_params(
    p1: &Point,
    p2: &Point,
    p3: &Point,
    p4: &Point,
) -> Option<SegmentHit> {
    let d12 = p1 - p2;
    let d34 = p3 - p4;
    let d13 = p1 - p3;

    let denom = d12.x * d34.y - d12.y * d34.x;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (d13.x * d34.y - d13.y * d34.x) / denom;
    let u = -(d12.x * d13.y - d12.y * d13.x) / denom;

    let unit = 0.0..=1.0;

    (unit.contains(&t) && unit.contains(&u)).then(|| SegmentHit {
        point: p1 + (p2 - p1) * t,
        t,
        u,
    })
}

/// Like [`segment_intersection_params`], without the parameters.
#[inline]
#[must_use]
pub fn segment_intersection(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> Option<Point> {
    segment_intersection_params(p1, p2, p3, p4).map(|hit| hit.point)
}
