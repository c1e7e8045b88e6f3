//! Proptest strategies for oriented point samples.
use ::proptest::prelude::*;
use nalgebra::{Point3, UnitVector3, Vector3};
use std::f64::consts::PI;

use crate::util::compute_orthonormal_vectors_3d;

pub fn point3() -> impl Strategy<Value = Point3<f64>> {
    // Pick a reasonably small range to pick coordinates from,
    // otherwise we can easily get floating point numbers that are
    // so ridiculously large as to break anything we might want to do with them
    let range = -10.0..10.0;
    [range.clone(), range.clone(), range.clone()].prop_map(|[x, y, z]| Point3::new(x, y, z))
}

pub fn unit_vector3() -> impl Strategy<Value = UnitVector3<f64>> {
    // Spherical coordinates on the unit sphere
    (0.0..PI, 0.0..2.0 * PI).prop_map(|(theta, phi)| {
        let x = phi.cos() * theta.sin();
        let y = phi.sin() * theta.sin();
        let z = theta.cos();
        UnitVector3::new_normalize(Vector3::new(x, y, z))
    })
}

/// A minimal plane sample: three well-separated, non-collinear points on a random plane,
/// along with the (exact) plane normal.
///
/// The in-plane coordinates of the points are chosen such that the triangle they span
/// has an area bounded away from zero.
pub fn planar_triangle() -> impl Strategy<Value = ([Point3<f64>; 3], UnitVector3<f64>)> {
    let coord = -5.0..5.0;
    (
        point3(),
        unit_vector3(),
        [coord.clone(), coord.clone(), coord.clone(), coord.clone(), coord.clone(), coord],
    )
        .prop_filter("Triangle must not be close to degenerate", |(_, _, [a, b, c, d, e, f])| {
            let area2: f64 = (c - a) * (f - b) - (d - b) * (e - a);
            area2.abs() > 1.0
        })
        .prop_map(|(origin, normal, [a, b, c, d, e, f])| {
            let [u, v] = compute_orthonormal_vectors_3d(&normal);
            let point = |s: f64, t: f64| origin + u.as_ref() * s + v.as_ref() * t;
            ([point(a, b), point(c, d), point(e, f)], normal)
        })
}
