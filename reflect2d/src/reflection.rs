use super::*;

/// Reflects `incident` w.r.t. the line orthogonal to `normal`, following the
/// law of specular reflection.
///
/// `normal` needn't be normalized, and either of its two orientations gives the
/// same result. If `normal` is zero, `incident` is returned unchanged.
#[inline]
#[must_use]
pub fn reflect_vector(incident: &Vector, normal: &Vector) -> Vector {
    let n = normalize(normal);
    let p = incident.dot(&n);
    incident - n * (p + p)
}

/// Returns the mirror image of `point` w.r.t. the infinite line containing `mirror`.
///
/// The extent of the segment is irrelevant here. Reflecting twice across the same
/// mirror gives back the original point (up to roundoff errors).
#[inline]
#[must_use]
pub fn reflect_point(point: &Point, mirror: &Mirror) -> Point {
    let n = mirror.unit_normal();
    let d = (point - mirror.start).dot(&n);
    point - n * (d + d)
}
