use reflect2d::*;
use std::error::Error;

use std::{rc::Rc, sync::Arc};
use core::ops::Deref;

pub use serde_json;

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_float_array<const D: usize>(
    json_array: &[serde_json::Value],
) -> Option<[Float; D]> {
    let array: &[serde_json::Value; D] = json_array.try_into().ok()?;

    let mut coords = [0.; D];
    for (coord, value) in coords.iter_mut().zip(array) {
        *coord = value.as_f64()? as Float;
    }
    Some(coords)
}

/// Parses `[x, y]`
pub fn json_to_point(json: &serde_json::Value) -> Option<Point> {
    json.as_array()
        .map(Vec::as_slice)
        .and_then(json_array_to_float_array::<2>)
        .map(Point::from)
}

/// Parses `[x, y]`
pub fn json_to_vector(json: &serde_json::Value) -> Option<Vector> {
    json_to_point(json).map(|p| p.coords)
}

pub fn point_to_json(p: &Point) -> serde_json::Value {
    serde_json::json!(p.coords.as_slice())
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &serde_json::Value,
    map: impl FnMut(&serde_json::Value) -> Result<T, Box<dyn Error>>,
) -> Result<C, Box<dyn Error>> {
    json.as_array()
        .ok_or("json value must be an array")?
        .iter()
        .map(map)
        .collect()
}

fn optional_field<T>(
    json: &serde_json::Value,
    field: &str,
    parse: impl FnOnce(&serde_json::Value) -> Option<T>,
) -> Result<Option<T>, Box<dyn Error>> {
    match json.get(field) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| format!("invalid value for \"{field}\": {value}").into()),
    }
}

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> serde_json::Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<const N: usize, T: JsonSer> JsonSer for [T; N] {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all
// types implementing `Deref` makes the trait unusable downstream

impl<T: JsonSer + ?Sized> JsonSer for Box<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Arc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Rc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> serde_json::Value {
        (*self).to_json()
    }
}

impl JsonSer for Point {
    fn to_json(&self) -> serde_json::Value {
        point_to_json(self)
    }
}

impl JsonSer for Mirror {
    /// Serialize a mirror into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": point_to_json(&self.start),
            "end": point_to_json(&self.end),
        })
    }
}

impl JsonSer for Ray {
    /// Serialize a ray into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "origin": point_to_json(&self.origin),
            "direction": self.dir().as_slice(),
            "max_reflections": self.max_reflections,
            "max_distance": self.max_distance(),
        })
    }
}

impl JsonSer for LightRay {
    fn to_json(&self) -> serde_json::Value {
        let mut json = self.ray.to_json();
        if let (Some(color), Some(object)) = (&self.color, json.as_object_mut()) {
            object.insert("color".into(), color.as_str().into());
        }
        json
    }
}

impl JsonSer for Config {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_depth": self.max_depth,
            "precision": self.precision,
            "max_reflections": self.max_reflections,
            "max_distance": self.max_distance,
            "min_hit_distance": self.min_hit_distance,
        })
    }
}

impl JsonSer for Scene {
    /// Serialize a scene into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "config": self.config.to_json(),
            "objects": self.objects.to_json(),
            "observer": self.observer.as_ref().map(point_to_json),
            "mirrors": self.mirrors.to_json(),
            "rays": self.rays.to_json(),
        })
    }
}

impl JsonSer for VirtualImage {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "point": point_to_json(&self.point),
            "depth": self.depth(),
            "mirrored": self.is_mirrored(),
            "axes": self.axes.to_json(),
        })
    }
}

impl JsonSer for RaySegment {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "from": point_to_json(&self.from),
            "to": point_to_json(&self.to),
            "bounce": self.bounce,
        })
    }
}

impl JsonSer for SightLine {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "from": point_to_json(&self.from),
            "to": point_to_json(&self.to),
            "angle": self.angle,
            "distance": self.distance,
        })
    }
}

impl JsonSer for ObjectImages {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "source": point_to_json(&self.source),
            "images": self.images.to_json(),
        })
    }
}

impl JsonSer for TracedRay {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "color": self.color,
            "segments": self.segments.to_json(),
        })
    }
}

impl JsonSer for ObservedImage {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "object": self.object,
            "image": self.image,
            "line": self.line.to_json(),
            "path": self.path.to_json(),
        })
    }
}

impl JsonSer for SceneReport {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "objects": self.objects.to_json(),
            "rays": self.rays.to_json(),
            "sight_lines": self.sight_lines.to_json(),
        })
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array(json, T::from_json)
    }
}

impl JsonDes for Point {
    /// `[x, y]`
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        json_to_point(json).ok_or_else(|| format!("invalid point: {json}").into())
    }
}

impl JsonDes for Mirror {
    /// Deserialize a new mirror from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "start": [1., 2.],
    ///     "end": [3., 4.],
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let start = json
            .get("start")
            .and_then(json_to_point)
            .ok_or("Failed to parse mirror start")?;

        let end = json
            .get("end")
            .and_then(json_to_point)
            .ok_or("Failed to parse mirror end")?;

        Ok(Self { start, end })
    }
}

impl JsonDes for Config {
    /// Deserialize a configuration from a JSON object. Every field is optional,
    /// missing fields take their default value.
    ///
    /// ```json
    /// {
    ///     "max_depth": 3,
    ///     "precision": 3,
    ///     "max_reflections": 10,
    ///     "max_distance": 50.,
    ///     "min_hit_distance": 0.001,
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let as_usize = |v: &serde_json::Value| v.as_u64().and_then(|n| usize::try_from(n).ok());

        let mut config = Self::default();

        if let Some(max_depth) = optional_field(json, "max_depth", as_usize)? {
            config.max_depth = max_depth;
        }
        if let Some(precision) = optional_field(json, "precision", |v| {
            v.as_u64().and_then(|n| u32::try_from(n).ok())
        })? {
            config.precision = precision;
        }
        if let Some(max_reflections) = optional_field(json, "max_reflections", as_usize)? {
            config.max_reflections = max_reflections;
        }
        if let Some(max_distance) = optional_field(json, "max_distance", serde_json::Value::as_f64)? {
            config.max_distance = max_distance;
        }
        if let Some(eps) = optional_field(json, "min_hit_distance", serde_json::Value::as_f64)? {
            config.min_hit_distance = eps;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Deserialize a new ray from a JSON object, with its budgets defaulting to those in `config`.
///
/// The JSON object must follow the following format:
///
/// ```json
/// {
///     "origin": [9., 8.],
///     "direction": [9., 8.], // or "angle": 0.5 (radians)
///     "max_reflections": 10, // optional
///     "max_distance": 50., // optional
/// }
/// ```
pub fn ray_from_json(json: &serde_json::Value, config: &Config) -> Result<Ray, Box<dyn Error>> {
    let origin = json
        .get("origin")
        .and_then(json_to_point)
        .ok_or("Missing or invalid ray origin")?;

    let direction = match (json.get("direction"), json.get("angle")) {
        (Some(v), None) => Direction::Vector(json_to_vector(v).ok_or("Invalid ray direction")?),
        (None, Some(a)) => Direction::Angle(a.as_f64().ok_or("Invalid ray angle")?),
        (Some(_), Some(_)) => return Err("a ray takes either a direction or an angle, not both".into()),
        (None, None) => return Err("Missing ray direction".into()),
    };

    let max_reflections = optional_field(json, "max_reflections", |v| {
        v.as_u64().and_then(|n| usize::try_from(n).ok())
    })?
    .unwrap_or(config.max_reflections);

    let max_distance = optional_field(json, "max_distance", serde_json::Value::as_f64)?
        .unwrap_or(config.max_distance);

    Ok(Ray::new(origin, direction, max_reflections, max_distance)?)
}

impl JsonDes for Ray {
    /// See [`ray_from_json`], budgets default to those of [`Config::default`].
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        ray_from_json(json, &Config::default())
    }
}

/// Like [`ray_from_json`], with an optional `"color": "string"` field.
pub fn light_ray_from_json(
    json: &serde_json::Value,
    config: &Config,
) -> Result<LightRay, Box<dyn Error>> {
    let color = optional_field(json, "color", |v| v.as_str().map(String::from))?;

    Ok(LightRay {
        ray: ray_from_json(json, config)?,
        color,
    })
}

impl JsonDes for Scene {
    /// Deserialize a new scene from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "config": { ... }, // optional, see `Config::from_json`
    ///     "objects": [[10., 15.], ...], // optional
    ///     "observer": [10., 10.], // optional
    ///     "mirrors": [{ "start": [15., 0.], "end": [15., 30.] }, ...],
    ///     "rays": [{ "origin": [10., 10.], "angle": 0.5, "color": "blue" }, ...], // optional
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let config = match json.get("config") {
            Some(config) => Config::from_json(config)?,
            None => Config::default(),
        };

        let objects = match json.get("objects") {
            Some(objects) => Vec::<Point>::from_json(objects)?,
            None => Vec::new(),
        };

        let observer = optional_field(json, "observer", json_to_point)?;

        let mirrors = Vec::<Mirror>::from_json(json.get("mirrors").ok_or("mirrors field expected")?)?;

        let rays = match json.get("rays") {
            Some(rays) => map_json_array(rays, |ray| light_ray_from_json(ray, &config))?,
            None => Vec::new(),
        };

        log::debug!(
            "parsed scene: {} objects, {} mirrors, {} rays",
            objects.len(),
            mirrors.len(),
            rays.len()
        );

        Ok(Self {
            objects,
            observer,
            mirrors,
            rays,
            config,
        })
    }
}

pub fn serialize_scene(scene: &Scene) -> serde_json::Value {
    scene.to_json()
}

pub fn deserialize_scene(json: &serde_json::Value) -> Result<Scene, Box<dyn Error>> {
    Scene::from_json(json)
}

/// Evaluates the scene described by `json`, and serializes the resulting report.
pub fn evaluate_scene_json(json: &serde_json::Value) -> Result<serde_json::Value, Box<dyn Error>> {
    let scene = deserialize_scene(json)?;
    Ok(scene.evaluate()?.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn lesson() -> serde_json::Value {
        json!({
            "config": { "max_depth": 2 },
            "objects": [[10, 15]],
            "observer": [10, 10],
            "mirrors": [
                { "start": [15, 0], "end": [15, 30] },
                { "start": [5, 0], "end": [5, 30] },
            ],
            "rays": [
                { "origin": [10, 10], "angle": 0.0, "color": "blue" },
                { "origin": [10, 10], "direction": [0, 1], "max_distance": 5 },
            ],
        })
    }

    #[test]
    fn parse_scene() {
        let scene = deserialize_scene(&lesson()).unwrap();

        assert_eq!(scene.config, Config::default().with_max_depth(2));
        assert_eq!(scene.objects, vec![Point::new(10., 15.)]);
        assert_eq!(scene.observer, Some(Point::new(10., 10.)));
        assert_eq!(scene.mirrors.len(), 2);
        assert_eq!(scene.mirrors[1], Mirror::new([5., 0.], [5., 30.]));

        assert_eq!(scene.rays.len(), 2);
        assert_eq!(scene.rays[0].color.as_deref(), Some("blue"));
        assert_relative_eq!(*scene.rays[0].ray.dir(), Vector::new(1., 0.));
        assert_eq!(scene.rays[0].ray.max_reflections, DEFAULT_MAX_REFLECTIONS);
        assert_eq!(scene.rays[1].color, None);
        assert_eq!(scene.rays[1].ray.max_distance(), 5.);
    }

    #[test]
    fn scene_round_trip() {
        let scene = deserialize_scene(&lesson()).unwrap();
        let again = deserialize_scene(&serialize_scene(&scene)).unwrap();
        assert_eq!(scene, again);
    }

    #[test]
    fn report() {
        let report = evaluate_scene_json(&lesson()).unwrap();

        let images = report["objects"][0]["images"].as_array().unwrap();
        assert_eq!(images.len(), 4);
        assert_eq!(images[0]["point"], json!([20., 15.]));
        assert_eq!(images[0]["depth"], json!(1));
        assert_eq!(images[0]["mirrored"], json!(true));
        assert_eq!(images[2]["mirrored"], json!(false));
        assert_eq!(images[2]["axes"].as_array().unwrap().len(), 2);

        assert_eq!(report["rays"][0]["color"], json!("blue"));
        assert_eq!(report["rays"][1]["color"], json!(null));
        assert_eq!(report["rays"][1]["segments"].as_array().unwrap().len(), 1);

        assert_eq!(report["sight_lines"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn direction_and_angle_are_exclusive() {
        let json = json!({ "origin": [0, 0], "direction": [1, 0], "angle": 0.0 });
        assert!(Ray::from_json(&json).is_err());
    }

    #[test]
    fn missing_direction() {
        assert!(Ray::from_json(&json!({ "origin": [0, 0] })).is_err());
    }

    #[test]
    fn negative_distance_is_rejected() {
        let json = json!({ "origin": [0, 0], "angle": 1.0, "max_distance": -3 });
        assert!(Ray::from_json(&json).is_err());

        let json = json!({ "mirrors": [], "config": { "max_distance": -3 } });
        assert!(deserialize_scene(&json).is_err());
    }

    #[test]
    fn mirrors_are_required() {
        assert!(deserialize_scene(&json!({ "objects": [] })).is_err());
    }

    #[test]
    fn bad_point() {
        assert!(Point::from_json(&json!([1, 2, 3])).is_err());
        assert!(Point::from_json(&json!(["a", 2])).is_err());
        assert_eq!(Point::from_json(&json!([1, 2.5])).unwrap(), Point::new(1., 2.5));
    }
}
