//! The contract shared by all shape primitives consumed by a RANSAC driver.
use crate::error::ConstructionError;
use crate::plane::PlanePrimitive;
use nalgebra::{Point3, Scalar, Vector3};
use ransac_geometry::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Discriminant of the shape family.
///
/// Only planes are implemented in this crate; the remaining variants identify primitives
/// implemented elsewhere against the same contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Plane,
    Sphere,
    Cylinder,
}

/// Thresholds used to decide whether an oriented point is consistent with a shape.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlierThresholds<T> {
    /// Maximum (exclusive) distance from the point to the shape surface.
    pub distance: T,
    /// Maximum angle in radians between the measured normal and the shape normal.
    pub angle: T,
}

impl<T: Real> InlierThresholds<T> {
    pub fn new(distance: T, angle: T) -> Self {
        Self { distance, angle }
    }

    pub fn with_distance(self, distance: T) -> Self {
        Self { distance, ..self }
    }

    pub fn with_angle(self, angle: T) -> Self {
        Self { angle, ..self }
    }
}

impl<T: Real> Default for InlierThresholds<T> {
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn default() -> Self {
        Self::new(0.02, 0.3)
    }
}

/// Receives the geometry of a primitive for visualization.
pub trait ShapeRenderer<T: Scalar> {
    /// Draws a closed, planar polygon with the given color.
    fn draw_polygon(&mut self, vertices: &[Point3<T>], color: [u8; 3]);
}

/// Capabilities any shape primitive provides to a RANSAC driver.
///
/// Point and normal arrays are borrowed for the duration of each call and indexed by the
/// point indices handed to the primitive.
pub trait ShapePrimitive<T: Real> {
    /// Size of a minimal sample.
    fn points_required(&self) -> usize;

    /// Constructs the shape from a minimal sample of points and their measured normals.
    ///
    /// On failure the primitive is left unchanged.
    fn construct(
        &mut self,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        thresholds: &InlierThresholds<T>,
    ) -> Result<(), ConstructionError>;

    /// Appends to `inliers` the indices in `candidates` whose points are consistent with the
    /// shape, preserving their order.
    fn compute_inliers(
        &self,
        inliers: &mut Vec<usize>,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        candidates: &[usize],
        thresholds: &InlierThresholds<T>,
    );

    fn shape(&self) -> ShapeKind;

    /// Creates a new, empty primitive of the same kind.
    fn instantiate(&self) -> Self
    where
        Self: Sized;

    fn distance_to_pt(&self, point: &Point3<T>) -> T;

    /// Scalar size used to rank primitives.
    fn shape_size(&self) -> T;

    /// Writes the flat numeric descriptor of the shape into `data`, replacing its contents.
    fn shape_data(&self, data: &mut Vec<T>);

    /// Writes the boundary points of the shape into `points`, replacing its contents.
    fn shape_points(&self, points: &mut Vec<Point3<T>>);

    /// Hands the shape geometry to a renderer. Does nothing by default.
    fn draw(&self, _renderer: &mut dyn ShapeRenderer<T>) {}
}

/// The closed set of primitives known to this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<T: Real> {
    Plane(PlanePrimitive<T>),
}

impl<T: Real> Primitive<T> {
    /// Creates an empty primitive of the given kind, or `None` if the kind is not
    /// implemented by this crate.
    pub fn new(kind: ShapeKind) -> Option<Self> {
        match kind {
            ShapeKind::Plane => Some(Primitive::Plane(PlanePrimitive::new())),
            ShapeKind::Sphere | ShapeKind::Cylinder => None,
        }
    }

    pub fn as_plane(&self) -> Option<&PlanePrimitive<T>> {
        match self {
            Primitive::Plane(plane) => Some(plane),
        }
    }

    pub fn as_plane_mut(&mut self) -> Option<&mut PlanePrimitive<T>> {
        match self {
            Primitive::Plane(plane) => Some(plane),
        }
    }
}

impl<T: Real> From<PlanePrimitive<T>> for Primitive<T> {
    fn from(plane: PlanePrimitive<T>) -> Self {
        Primitive::Plane(plane)
    }
}

impl<T: Real> ShapePrimitive<T> for Primitive<T> {
    fn points_required(&self) -> usize {
        match self {
            Primitive::Plane(plane) => plane.points_required(),
        }
    }

    fn construct(
        &mut self,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        thresholds: &InlierThresholds<T>,
    ) -> Result<(), ConstructionError> {
        match self {
            Primitive::Plane(plane) => plane.construct(points, normals, thresholds),
        }
    }

    fn compute_inliers(
        &self,
        inliers: &mut Vec<usize>,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        candidates: &[usize],
        thresholds: &InlierThresholds<T>,
    ) {
        match self {
            Primitive::Plane(plane) => plane.compute_inliers(inliers, points, normals, candidates, thresholds),
        }
    }

    fn shape(&self) -> ShapeKind {
        match self {
            Primitive::Plane(plane) => plane.shape(),
        }
    }

    fn instantiate(&self) -> Self {
        match self {
            Primitive::Plane(plane) => Primitive::Plane(plane.instantiate()),
        }
    }

    fn distance_to_pt(&self, point: &Point3<T>) -> T {
        match self {
            Primitive::Plane(plane) => plane.distance_to_pt(point),
        }
    }

    fn shape_size(&self) -> T {
        match self {
            Primitive::Plane(plane) => plane.shape_size(),
        }
    }

    fn shape_data(&self, data: &mut Vec<T>) {
        match self {
            Primitive::Plane(plane) => plane.shape_data(data),
        }
    }

    fn shape_points(&self, points: &mut Vec<Point3<T>>) {
        match self {
            Primitive::Plane(plane) => plane.shape_points(points),
        }
    }

    fn draw(&self, renderer: &mut dyn ShapeRenderer<T>) {
        match self {
            Primitive::Plane(plane) => plane.draw(renderer),
        }
    }
}
