use super::*;

/// The straight line an observer looks along to see a virtual image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SightLine {
    pub from: Point,
    pub to: Point,
    /// See [`angle_of`].
    pub angle: Float,
    pub distance: Float,
}

impl SightLine {
    #[inline]
    #[must_use]
    pub fn new(observer: &Point, target: &Point) -> Self {
        let v = target - observer;
        Self {
            from: *observer,
            to: *target,
            angle: angle_of(&v),
            distance: v.norm(),
        }
    }

    /// The ray leaving the observer along this line, allowed to travel exactly as far
    /// as the target.
    ///
    /// Traced through the mirrors that produced the target, it follows the path light
    /// takes (backwards) from the real object to the observer's eye.
    #[inline]
    #[must_use]
    pub fn to_ray(&self, max_reflections: usize) -> Ray {
        Ray {
            origin: self.from,
            dir: from_angle(self.angle),
            max_reflections,
            max_distance: self.distance,
        }
    }
}

/// A sight line from `observer` to every image in `images`.
#[inline]
#[must_use]
pub fn sight_lines(observer: &Point, images: &[VirtualImage]) -> Vec<SightLine> {
    images
        .iter()
        .map(|image| SightLine::new(observer, &image.point))
        .collect()
}
