use crate::Real;
use nalgebra::{Point3, Scalar, Unit, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::iter::once;

/// A plane in Hessian normal form.
///
/// A point `x` lies on the plane if and only if `n · x + d = 0`, where `n` is the unit normal
/// and `d` the signed offset of the plane.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, Unit<Vector3<T>>: Serialize",
    deserialize = "T: Deserialize<'de>, Unit<Vector3<T>>: Deserialize<'de>"
))]
pub struct Plane<T: Scalar> {
    normal: Unit<Vector3<T>>,
    offset: T,
}

impl<T> Plane<T>
where
    T: Real,
{
    pub fn from_normal_and_offset(normal: Unit<Vector3<T>>, offset: T) -> Self {
        Self { normal, offset }
    }

    pub fn from_point_and_normal(point: &Point3<T>, normal: Unit<Vector3<T>>) -> Self {
        let offset = -normal.dot(&point.coords);
        Self { normal, offset }
    }

    /// Constructs the plane passing through the three given points.
    ///
    /// The normal is the normalized cross product `(p1 - p0) x (p2 - p0)`, flipped if necessary
    /// so that it points into the same half space as `reference_normal`.
    ///
    /// Returns `None` if the resulting equation is not finite, which happens when the points
    /// are collinear or coincide.
    pub fn from_oriented_triangle(points: &[Point3<T>; 3], reference_normal: &Vector3<T>) -> Option<Self> {
        let first = points[1] - points[0];
        let second = points[2] - points[0];
        let mut normal = first.cross(&second).normalize();
        if normal.dot(reference_normal) < T::zero() {
            normal = -normal;
        }
        let offset = -normal.dot(&points[0].coords);

        let finite = normal.iter().chain(once(&offset)).all(|x| x.is_finite());
        finite.then(|| Self {
            normal: Unit::new_unchecked(normal),
            offset,
        })
    }

    pub fn normal(&self) -> &Unit<Vector3<T>> {
        &self.normal
    }

    pub fn offset(&self) -> T {
        self.offset
    }

    /// The plane coefficients `(n_x, n_y, n_z, d)`.
    pub fn coefficients(&self) -> Vector4<T> {
        Vector4::new(self.normal.x, self.normal.y, self.normal.z, self.offset)
    }

    pub fn signed_distance(&self, point: &Point3<T>) -> T {
        self.normal.dot(&point.coords) + self.offset
    }

    pub fn distance(&self, point: &Point3<T>) -> T {
        self.signed_distance(point).abs()
    }

    /// Orthogonal projection of the point onto the plane.
    pub fn project_point(&self, point: &Point3<T>) -> Point3<T> {
        point - self.normal.as_ref() * self.signed_distance(point)
    }

    pub fn flipped(&self) -> Self {
        Self {
            normal: Unit::new_unchecked(-self.normal.into_inner()),
            offset: -self.offset,
        }
    }
}
