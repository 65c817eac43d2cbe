use super::*;

/// A ray to trace through a scene, with an optional colour the renderer may use.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRay {
    pub ray: Ray,
    pub color: Option<String>,
}

impl From<Ray> for LightRay {
    #[inline]
    fn from(ray: Ray) -> Self {
        Self { ray, color: None }
    }
}

/// Everything needed to compute what a scene looks like.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Points whose virtual images are computed.
    pub objects: Vec<Point>,
    /// If present, sight lines are drawn from here to every virtual image.
    pub observer: Option<Point>,
    pub mirrors: Vec<Mirror>,
    pub rays: Vec<LightRay>,
    pub config: Config,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectImages {
    pub source: Point,
    pub images: Vec<VirtualImage>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TracedRay {
    pub color: Option<String>,
    pub segments: Vec<RaySegment>,
}

/// A sight line to a virtual image, and the light path behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservedImage {
    /// Index into [`SceneReport::objects`].
    pub object: usize,
    /// Index into the [`ObjectImages::images`] of that object.
    pub image: usize,
    pub line: SightLine,
    pub path: Vec<RaySegment>,
}

/// The result of [`Scene::evaluate`], ready to be handed to a renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneReport {
    pub objects: Vec<ObjectImages>,
    pub rays: Vec<TracedRay>,
    pub sight_lines: Vec<ObservedImage>,
}

impl Scene {
    #[inline]
    #[must_use]
    pub fn new(mirrors: Vec<Mirror>) -> Self {
        Self {
            mirrors,
            ..Default::default()
        }
    }

    /// Computes the virtual images of every object, the paths of every ray and, if
    /// there is an observer, the sight line to, and light path of, every image.
    ///
    /// Fails if `self.config` is invalid.
    pub fn evaluate(&self) -> Result<SceneReport> {
        self.config.validate()?;

        let generator = self.config.image_generator()?;
        let mirrors = self.mirrors.as_slice();
        let eps = self.config.min_hit_distance;

        let trace = |ray: &Ray| -> Vec<RaySegment> {
            RayPath::new(mirrors, *ray)
                .with_min_hit_distance(eps)
                .collect()
        };

        let objects: Vec<_> = self
            .objects
            .iter()
            .map(|source| ObjectImages {
                source: *source,
                images: generator.generate(source, mirrors),
            })
            .collect();

        let rays = self
            .rays
            .iter()
            .map(|light| TracedRay {
                color: light.color.clone(),
                segments: trace(&light.ray),
            })
            .collect();

        let sight_lines = self
            .observer
            .iter()
            .flat_map(|observer| {
                objects.iter().enumerate().flat_map(move |(object, obj)| {
                    obj.images.iter().enumerate().map(move |(image, virt)| {
                        (object, image, SightLine::new(observer, &virt.point))
                    })
                })
            })
            .map(|(object, image, line)| ObservedImage {
                object,
                image,
                path: trace(&line.to_ray(self.config.max_reflections)),
                line,
            })
            .collect();

        log::debug!(
            "evaluated scene: {} objects, {} mirrors, {} rays",
            self.objects.len(),
            self.mirrors.len(),
            self.rays.len(),
        );

        Ok(SceneReport {
            objects,
            rays,
            sight_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corridor() -> Scene {
        Scene {
            objects: vec![Point::new(10.0, 15.0)],
            observer: Some(Point::new(10.0, 10.0)),
            mirrors: vec![
                Mirror::new([15.0, 0.0], [15.0, 30.0]),
                Mirror::new([5.0, 0.0], [5.0, 30.0]),
            ],
            rays: vec![LightRay {
                ray: Ray::new([10.0, 10.0], [1.0, 0.0], 10, 50.0).unwrap(),
                color: Some("blue".into()),
            }],
            config: Config::default().with_max_depth(2),
        }
    }

    #[test]
    fn evaluate_corridor() {
        let report = corridor().evaluate().unwrap();

        assert_eq!(report.objects.len(), 1);
        assert_eq!(report.objects[0].images.len(), 4);

        assert_eq!(report.rays.len(), 1);
        assert_eq!(report.rays[0].color.as_deref(), Some("blue"));
        let total: Float = report.rays[0].segments.iter().map(RaySegment::length).sum();
        assert_relative_eq!(total, 50.0, epsilon = 1e-9);

        assert_eq!(report.sight_lines.len(), 4);
        for observed in &report.sight_lines {
            let image = &report.objects[0].images[observed.image];
            assert_eq!(observed.line.to, image.point);
            // one leg per reflection, plus the last one reaching the object
            assert_eq!(observed.path.len(), image.depth() + 1);
            assert_relative_eq!(
                observed.path.last().unwrap().to,
                Point::new(10.0, 15.0),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn no_observer_no_sight_lines() {
        let scene = Scene {
            observer: None,
            ..corridor()
        };
        assert!(scene.evaluate().unwrap().sight_lines.is_empty());
    }

    #[test]
    fn invalid_config() {
        let scene = Scene {
            config: Config::default().with_min_hit_distance(-1.0),
            ..corridor()
        };
        assert_eq!(
            scene.evaluate(),
            Err(Error::InvalidMinHitDistance(-1.0))
        );
    }

    #[test]
    fn empty_scene() {
        let report = Scene::new(vec![]).evaluate().unwrap();
        assert_eq!(report, SceneReport::default());
    }
}
