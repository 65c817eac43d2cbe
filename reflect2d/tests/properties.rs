//! Property-based tests for the reflection engine's invariants.

use proptest::prelude::*;
use std::collections::HashSet;

use reflect2d::*;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_point() -> impl Strategy<Value = Point> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point::new(x, y))
}

/// Mirrors that are long enough for their normal to be well defined.
fn arb_mirror() -> impl Strategy<Value = Mirror> {
    (arb_point(), arb_point())
        .prop_filter("degenerate mirror", |(a, b)| (b - a).norm() > 1e-3)
        .prop_map(|(a, b)| Mirror::new(a, b))
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -std::f64::consts::PI..std::f64::consts::PI
}

const TOL: f64 = 1e-9;

fn close(a: &Point, b: &Point, tol: f64) -> bool {
    (a - b).norm() <= tol
}

// ---------------------------------------------------------------------------
// Reflection
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn double_reflection_is_identity(p in arb_point(), m in arb_mirror()) {
        let back = reflect_point(&reflect_point(&p, &m), &m);
        prop_assert!(close(&back, &p, TOL), "{back:?} != {p:?}");
    }

    #[test]
    fn reflection_ignores_endpoint_order(p in arb_point(), m in arb_mirror()) {
        let a = reflect_point(&p, &m);
        let b = reflect_point(&p, &m.reversed());
        prop_assert!(close(&a, &b, TOL), "{a:?} != {b:?}");
    }

    #[test]
    fn reflected_direction_ignores_endpoint_order(theta in arb_angle(), m in arb_mirror()) {
        let v = from_angle(theta);
        let a = reflect_vector(&v, &m.normal());
        let b = reflect_vector(&v, &m.reversed().normal());
        prop_assert!((a - b).norm() <= TOL);
        prop_assert!((a.norm() - 1.0).abs() <= TOL);
    }

    #[test]
    fn image_is_equidistant_from_mirror_line(p in arb_point(), m in arb_mirror()) {
        let image = reflect_point(&p, &m);
        // every point of the mirror's line is as far from `p` as from its image
        for q in [m.start, m.end, nalgebra::center(&m.start, &m.end)] {
            prop_assert!(((p - q).norm() - (image - q).norm()).abs() <= 1e-7);
        }
    }
}

// ---------------------------------------------------------------------------
// Intersection
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn intersection_is_symmetric(
        p1 in arb_point(),
        p2 in arb_point(),
        p3 in arb_point(),
        p4 in arb_point(),
    ) {
        let d1 = p2 - p1;
        let d2 = p4 - p3;
        // keep well-conditioned configurations only
        prop_assume!((d1.x * d2.y - d1.y * d2.x).abs() > 1e-2);

        if let (Some(a), Some(b)) = (
            segment_intersection(&p1, &p2, &p3, &p4),
            segment_intersection(&p3, &p4, &p1, &p2),
        ) {
            prop_assert!(close(&a, &b, 1e-6), "{a:?} != {b:?}");
        }
    }

    #[test]
    fn intersection_lies_on_both_segments(
        p1 in arb_point(),
        p2 in arb_point(),
        p3 in arb_point(),
        p4 in arb_point(),
    ) {
        if let Some(hit) = segment_intersection_params(&p1, &p2, &p3, &p4) {
            prop_assert!((0.0..=1.0).contains(&hit.t));
            prop_assert!((0.0..=1.0).contains(&hit.u));

            let on_first = p1 + (p2 - p1) * hit.t;
            prop_assert!(close(&on_first, &hit.point, 1e-9));
        }
    }
}

// ---------------------------------------------------------------------------
// Virtual images
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn single_mirror_single_image(p in arb_point(), m in arb_mirror(), depth in 1usize..6) {
        // points lying on the mirror's line are their own image
        prop_assume!(!close(&reflect_point(&p, &m), &p, 1e-2));

        let images = generate_virtual_images(&p, &m, depth);
        prop_assert_eq!(images.len(), 1);
        prop_assert_eq!(&images[0].axes, &vec![m]);
    }

    #[test]
    fn images_are_distinct_and_bounded(
        p in arb_point(),
        mirrors in prop::collection::vec(arb_mirror(), 0..4),
        depth in 0usize..4,
    ) {
        let images = generate_virtual_images(&p, &mirrors, depth);

        let keys: HashSet<_> = images
            .iter()
            .map(|image| &image.point)
            .chain([&p])
            .map(|q| ImageKey::new(q, DEFAULT_PRECISION))
            .collect();
        prop_assert_eq!(keys.len(), images.len() + 1);

        for image in &images {
            prop_assert!((1..=depth).contains(&image.depth()));

            // replaying the chain gives back the image
            let replayed = image.axes.iter().fold(p, |q, m| reflect_point(&q, m));
            prop_assert!(close(&replayed, &image.point, 1e-6));
        }
    }
}

// ---------------------------------------------------------------------------
// Ray tracing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn distance_budget_is_respected(
        origin in arb_point(),
        theta in arb_angle(),
        mirrors in prop::collection::vec(arb_mirror(), 0..8),
        max_reflections in 0usize..20,
        max_distance in 0.0f64..500.0,
    ) {
        let ray = Ray::new(origin, theta, max_reflections, max_distance).unwrap();
        let path = trace_ray(&ray, &mirrors);

        let total: f64 = path.iter().map(RaySegment::length).sum();
        prop_assert!(total <= max_distance + 1e-6, "{total} > {max_distance}");
        prop_assert!(path.len() <= max_reflections);
    }

    #[test]
    fn path_is_connected(
        origin in arb_point(),
        theta in arb_angle(),
        mirrors in prop::collection::vec(arb_mirror(), 1..8),
    ) {
        let ray = Ray::new(origin, theta, 10, 300.0).unwrap();
        let path = trace_ray(&ray, &mirrors);

        if let Some(first) = path.first() {
            prop_assert_eq!(first.from, origin);
        }
        for (i, pair) in path.windows(2).enumerate() {
            prop_assert_eq!(pair[0].to, pair[1].from);
            prop_assert_eq!(pair[0].bounce, i);
        }
    }

    #[test]
    fn unobstructed_ray_travels_its_full_budget(
        origin in arb_point(),
        theta in arb_angle(),
        max_distance in 1e-3f64..500.0,
    ) {
        let ray = Ray::new(origin, theta, 1, max_distance).unwrap();
        let path = trace_ray(&ray, &[] as &[Mirror]);

        prop_assert_eq!(path.len(), 1);
        prop_assert!((path[0].length() - max_distance).abs() <= 1e-9 * max_distance.max(1.0));
    }
}
