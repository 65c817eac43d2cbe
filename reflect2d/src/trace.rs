use super::*;

/// The two ways of specifying where a ray is headed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    /// Needn't be normalized.
    Vector(Vector),
    /// In radians, counter-clockwise from the `x` axis.
    Angle(Float),
}

impl Direction {
    /// The unit vector pointing in this direction.
    ///
    /// A zero [`Direction::Vector`] stays zero.
    #[inline]
    #[must_use]
    pub fn to_unit(&self) -> Vector {
        match self {
            Self::Vector(v) => normalize(v),
            Self::Angle(theta) => from_angle(*theta),
        }
    }
}

impl From<Vector> for Direction {
    #[inline]
    fn from(v: Vector) -> Self {
        Self::Vector(v)
    }
}

impl From<[Float; 2]> for Direction {
    #[inline]
    fn from(v: [Float; 2]) -> Self {
        Self::Vector(v.into())
    }
}

impl From<Float> for Direction {
    #[inline]
    fn from(theta: Float) -> Self {
        Self::Angle(theta)
    }
}

/// A light ray, along with its bounce and travel budgets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point,
    /// Unit length, or zero.
    pub(crate) dir: Vector,
    pub max_reflections: usize,
    pub(crate) max_distance: Float,
}

impl Ray {
    /// Fails if `max_distance` is negative, infinite or NaN.
    #[inline]
    pub fn new(
        origin: impl Into<Point>,
        direction: impl Into<Direction>,
        max_reflections: usize,
        max_distance: Float,
    ) -> Result<Self> {
        let max_distance = crate::config::check_distance(max_distance).map_err(|d| {
            log::warn!("rejecting ray with a travel budget of {d}");
            Error::InvalidMaxDistance(d)
        })?;

        Ok(Self {
            origin: origin.into(),
            dir: direction.into().to_unit(),
            max_reflections,
            max_distance,
        })
    }

    /// A ray using the budgets found in `config`.
    #[inline]
    pub fn with_config(
        origin: impl Into<Point>,
        direction: impl Into<Direction>,
        config: &Config,
    ) -> Result<Self> {
        Self::new(origin, direction, config.max_reflections, config.max_distance)
    }

    #[inline]
    #[must_use]
    pub const fn dir(&self) -> &Vector {
        &self.dir
    }

    #[inline]
    #[must_use]
    pub const fn max_distance(&self) -> Float {
        self.max_distance
    }

    /// Returns `origin + dir * t`
    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Point {
        self.origin + self.dir * t
    }

    /// Reflect this ray's direction w.r.t. `mirror`.
    #[inline]
    pub fn reflect_dir(&mut self, mirror: &Mirror) {
        self.dir = reflect_vector(&self.dir, &mirror.normal());
    }

    /// Translates [`self.origin`](Self::origin) by `dir * t`.
    #[inline]
    pub fn advance(&mut self, t: Float) {
        self.origin = self.at(t);
    }
}

/// One straight leg of a traced light path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySegment {
    pub from: Point,
    pub to: Point,
    /// How many times the ray was reflected before travelling this leg.
    pub bounce: usize,
}

impl RaySegment {
    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        (self.to - self.from).norm()
    }
}

/// Keeps track of the closest mirror hit by a probe segment.
pub(crate) struct SimulationCtx<'a> {
    from: &'a Point,
    to: &'a Point,
    closest: Option<(Float, Point, Mirror)>,
    // garanteed to be non-negative
    epsilon: Float,
}

impl<'a> SimulationCtx<'a> {
    #[inline]
    #[must_use]
    fn new(from: &'a Point, to: &'a Point, epsilon: Float) -> Self {
        Self {
            from,
            to,
            closest: None,
            epsilon: epsilon.abs(),
        }
    }

    /// Intersects the probe segment with `mirror`, and stores the hit if it is
    /// further than the minimum distance, and closer than the one stored internally.
    pub fn add_mirror(&mut self, mirror: &Mirror) {
        let Some(hit) = mirror.intersect_segment(self.from, self.to) else {
            return;
        };

        let d = (hit - self.from).norm();

        if d > self.epsilon && self.closest.as_ref().map_or(true, |(t, _, _)| *t > d) {
            self.closest = Some((d, hit, *mirror));
        }
    }

    #[inline]
    fn take_closest(&mut self) -> Option<(Float, Point, Mirror)> {
        self.closest.take()
    }
}

/// The closest intersection between `[from, to]` and `mirrors`, further than `eps`
/// from `from`, along with its distance to `from`, and the mirror hit.
#[inline]
#[must_use]
pub fn closest_hit(
    from: &Point,
    to: &Point,
    mirrors: &(impl MirrorSet + ?Sized),
    eps: Float,
) -> Option<(Float, Point, Mirror)> {
    let mut ctx = SimulationCtx::new(from, to, eps);
    mirrors.visit_mirrors(&mut |mirror: &Mirror| ctx.add_mirror(mirror));
    ctx.take_closest()
}

/// Lazily marches a ray through a set of mirrors, one [`RaySegment`] at a time.
#[derive(Debug, Clone)]
pub struct RayPath<'a, M: ?Sized> {
    ray: Ray,
    /// Hits closer than this to the ray's current position are ignored, so that it
    /// doesn't bump into the mirror it was just reflected off, due to roundoff errors.
    pub min_hit_distance: Float,
    mirrors: &'a M,
    traveled: Float,
    bounces: usize,
    done: bool,
}

impl<'a, M: MirrorSet + ?Sized> RayPath<'a, M> {
    #[inline]
    #[must_use]
    pub fn new(mirrors: &'a M, ray: Ray) -> Self {
        Self {
            ray,
            min_hit_distance: DEFAULT_MIN_HIT_DISTANCE,
            mirrors,
            traveled: 0.0,
            bounces: 0,
            done: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_min_hit_distance(self, min_hit_distance: Float) -> Self {
        Self {
            min_hit_distance,
            ..self
        }
    }

    /// The ray, as it is after the segments yielded so far.
    #[inline]
    #[must_use]
    pub const fn current_ray(&self) -> &Ray {
        &self.ray
    }

    /// Total length of the segments yielded so far.
    #[inline]
    #[must_use]
    pub const fn traveled(&self) -> Float {
        self.traveled
    }
}

impl<M: MirrorSet + ?Sized> Iterator for RayPath<'_, M> {
    type Item = RaySegment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.bounces >= self.ray.max_reflections {
            return None;
        }

        let remaining = self.ray.max_distance - self.traveled;
        if remaining <= 0.0 {
            self.done = true;
            return None;
        }

        let from = self.ray.origin;
        let probe = self.ray.at(remaining);
        let bounce = self.bounces;

        match closest_hit(&from, &probe, self.mirrors, self.min_hit_distance) {
            Some((dist, hit, mirror)) if dist <= remaining => {
                log::trace!("bounce {bounce}: hit {mirror:?} at {hit:?}, {dist} away");

                self.traveled += dist;
                self.ray.origin = hit;
                self.ray.reflect_dir(&mirror);
                self.bounces += 1;

                Some(RaySegment {
                    from,
                    to: hit,
                    bounce,
                })
            }
            _ => {
                self.traveled += remaining;
                self.ray.advance(remaining);
                self.done = true;

                Some(RaySegment {
                    from,
                    to: probe,
                    bounce,
                })
            }
        }
    }
}

/// Traces `ray` through `mirrors`, reflecting it off the nearest mirror each time,
/// until it has bounced [`ray.max_reflections`](Ray::max_reflections) times, or traveled
/// [`ray.max_distance()`](Ray::max_distance).
///
/// The last segment runs unobstructed for whatever is left of the travel budget,
/// unless the bounce budget ran out first.
#[must_use]
pub fn trace_ray(ray: &Ray, mirrors: &(impl MirrorSet + ?Sized)) -> Vec<RaySegment> {
    let path: Vec<_> = RayPath::new(mirrors, *ray).collect();
    log::debug!(
        "traced ray from {:?}: {} segments",
        ray.origin,
        path.len()
    );
    path
}
