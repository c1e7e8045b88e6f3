use crate::geometry::proptest::planar_triangle;
use crate::InlierThresholds;
use ::proptest::prelude::*;
use nalgebra::{Point3, Vector3};

/// A minimal plane sample whose measured normals all coincide with the plane normal.
pub fn plane_sample() -> impl Strategy<Value = ([Point3<f64>; 3], [Vector3<f64>; 3])> {
    planar_triangle().prop_map(|(points, normal)| (points, [normal.into_inner(); 3]))
}

/// A plane sample together with a point on the plane and the plane normal.
pub fn plane_sample_with_point() -> impl Strategy<Value = ([Point3<f64>; 3], [Vector3<f64>; 3], Point3<f64>)> {
    (plane_sample(), -5.0..5.0, -5.0..5.0).prop_map(|((points, normals), s, t)| {
        let point = points[0] + (points[1] - points[0]) * s + (points[2] - points[0]) * t;
        (points, normals, point)
    })
}

impl Arbitrary for InlierThresholds<f64> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (1e-3..1.0, 1e-2..1.5)
            .prop_map(|(distance, angle)| InlierThresholds::new(distance, angle))
            .boxed()
    }
}
