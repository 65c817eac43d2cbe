use super::*;

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_PRECISION: u32 = 3;
pub const DEFAULT_MAX_REFLECTIONS: usize = 10;
pub const DEFAULT_MAX_DISTANCE: Float = 50.0;
/// See [`RayPath::min_hit_distance`].
pub const DEFAULT_MIN_HIT_DISTANCE: Float = 1e-3;

/// Digits beyond this are roundoff noise for coordinates of ordinary scenes.
pub const MAX_PRECISION: u32 = 12;

/// Tunables shared by every computation on a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// How many reflections may be composed to produce a virtual image.
    pub max_depth: usize,
    /// Virtual images whose coordinates agree up to this many decimal
    /// digits are considered the same.
    pub precision: u32,
    /// Default bounce budget of rays that don't specify one.
    pub max_reflections: usize,
    /// Default travel budget of rays that don't specify one.
    pub max_distance: Float,
    pub min_hit_distance: Float,
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            precision: DEFAULT_PRECISION,
            max_reflections: DEFAULT_MAX_REFLECTIONS,
            max_distance: DEFAULT_MAX_DISTANCE,
            min_hit_distance: DEFAULT_MIN_HIT_DISTANCE,
        }
    }
}

impl Config {
    #[inline]
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    #[inline]
    #[must_use]
    pub fn with_precision(self, precision: u32) -> Self {
        Self { precision, ..self }
    }

    #[inline]
    #[must_use]
    pub fn with_max_reflections(self, max_reflections: usize) -> Self {
        Self {
            max_reflections,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn with_max_distance(self, max_distance: Float) -> Self {
        Self {
            max_distance,
            ..self
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

    /// Checks every field, returning the first violation found.
    pub fn validate(&self) -> Result<()> {
        check_distance(self.max_distance).map_err(Error::InvalidMaxDistance)?;
        check_distance(self.min_hit_distance).map_err(Error::InvalidMinHitDistance)?;
        check_precision(self.precision)
    }

    /// Fails if `self.precision` is out of range.
    #[inline]
    pub fn image_generator(&self) -> Result<ImageGenerator> {
        ImageGenerator::new(self.max_depth, self.precision)
    }
}

pub(crate) fn check_distance(d: Float) -> core::result::Result<Float, Float> {
    if d.is_finite() && d >= 0.0 {
        Ok(d)
    } else {
        Err(d)
    }
}

pub(crate) fn check_precision(digits: u32) -> Result<()> {
    if digits > MAX_PRECISION {
        return Err(Error::PrecisionTooHigh {
            digits,
            max: MAX_PRECISION,
        });
    }
    Ok(())
}
