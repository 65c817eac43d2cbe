use reflect2d::*;

use core::iter;
pub use rand;

/// Half the side of the square random scenes are drawn in, centered on the origin.
pub const SCENE_HALF_SIZE: Float = 15.0;

/// Mirrors shorter than this are discarded when generating random ones.
pub const MIN_MIRROR_LENGTH: Float = 1.0;

pub const MIN_TRAVEL: Float = 10.0;
pub const MAX_TRAVEL: Float = 100.0;

pub trait Random: Sized {
    /// Generate a random value of this type using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

impl Random for Point {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        rand_vect(rng, SCENE_HALF_SIZE).into()
    }
}

impl Random for Mirror {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let mirror = Self::new(Point::random(rng), Point::random(rng));
            if mirror.length() >= MIN_MIRROR_LENGTH {
                break mirror;
            }
        }
    }
}

impl Random for Ray {
    /// A ray with a uniformly distributed heading, and a travel budget between
    /// [`MIN_TRAVEL`] and [`MAX_TRAVEL`].
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let origin = Point::random(rng);

        loop {
            let angle = rng.gen_range(-core::f64::consts::PI..core::f64::consts::PI);
            let max_distance = rng.gen_range(MIN_TRAVEL..MAX_TRAVEL);

            if let Ok(ray) = Self::new(origin, angle, DEFAULT_MAX_REFLECTIONS, max_distance) {
                break ray;
            }
        }
    }
}

impl Random for LightRay {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const COLORS: [&str; 6] = ["red", "green", "blue", "orange", "purple", "black"];

        Self {
            ray: Ray::random(rng),
            color: Some(COLORS[rng.gen_range(0..COLORS.len())].into()),
        }
    }
}

pub fn gen_random<T: Random>(n: usize, rng: &mut (impl rand::Rng + ?Sized)) -> Vec<T> {
    iter::repeat_with(|| T::random(rng)).take(n).collect()
}

/// A scene with the given number of random mirrors, rays and objects, and a random observer.
pub fn random_scene(
    rng: &mut (impl rand::Rng + ?Sized),
    num_mirrors: usize,
    num_rays: usize,
    num_objects: usize,
) -> Scene {
    Scene {
        objects: gen_random(num_objects, rng),
        observer: Some(Point::random(rng)),
        mirrors: gen_random(num_mirrors, rng),
        rays: gen_random(num_rays, rng),
        config: Config::default(),
    }
}

pub fn rand_vect(rng: &mut (impl rand::Rng + ?Sized), max_coord_mag: Float) -> Vector {
    // the rng generates floats in 0.0..1.0, scale and translate the range accordingly

    Vector::from_fn(|_, _| (rng.gen::<Float>() - 0.5) * (max_coord_mag.abs() * 2.0))
}
