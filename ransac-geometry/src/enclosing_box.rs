use itertools::Itertools;
use crate::Real;
use nalgebra::{Matrix2, Point2, Scalar, Vector2};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// An oriented rectangle in 2D, as produced by [`find_smallest_enclosing_box`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Point2<T>: Serialize, Matrix2<T>: Serialize, Vector2<T>: Serialize",
    deserialize = "Point2<T>: Deserialize<'de>, Matrix2<T>: Deserialize<'de>, Vector2<T>: Deserialize<'de>"
))]
pub struct EnclosingRectangle<T: Scalar> {
    pub center: Point2<T>,
    /// Unit axes of the rectangle, stored as columns. The second axis is the first axis
    /// rotated by 90 degrees counter-clockwise.
    pub axes: Matrix2<T>,
    /// The width along the first axis and the *signed* height along the second axis.
    pub lengths: Vector2<T>,
}

impl<T: Real> EnclosingRectangle<T> {
    pub fn area(&self) -> T {
        (self.lengths.x * self.lengths.y).abs()
    }

    fn degenerate(center: Point2<T>) -> Self {
        Self {
            center,
            axes: Matrix2::identity(),
            lengths: Vector2::zeros(),
        }
    }
}

/// Finds the smallest-area rectangle enclosing the given polygon, with one side aligned
/// with an edge of the polygon.
///
/// The polygon is treated cyclically. For every edge `i -> i + 1`, the points are projected
/// onto the edge direction and its counter-clockwise perpendicular, relative to vertex `i`.
/// The width is the span of the projections along the edge, while the height is the signed
/// perpendicular projection of largest magnitude. For a convex polygon all perpendicular
/// projections have the same sign, so this is the height of the enclosing box.
/// The first edge attaining the minimal area wins.
///
/// Edges of zero length are skipped. If no edge has positive length, a zero-sized rectangle
/// located at the first point (or the origin, for an empty polygon) is returned.
///
/// The cost is quadratic in the number of vertices, which is fine for convex hulls of
/// rasterized footprints.
#[replace_float_literals(T::from_f64(literal).unwrap())]
pub fn find_smallest_enclosing_box<T: Real>(polygon: &[Point2<T>]) -> EnclosingRectangle<T> {
    let mut best = EnclosingRectangle::degenerate(polygon.first().cloned().unwrap_or_else(Point2::origin));
    let mut min_area = T::zero();
    let mut found = false;

    for (origin, next) in polygon.iter().circular_tuple_windows() {
        let edge = next - origin;
        let edge_length = edge.norm();
        if !(edge_length > T::zero()) {
            continue;
        }
        let vec = edge / edge_length;
        let ovec = Vector2::new(-vec.y, vec.x);

        let mut width_min = T::zero();
        let mut width_max = T::zero();
        let mut height_max = T::zero();
        for (j, point) in polygon.iter().enumerate() {
            let d = point - origin;
            let proj = vec.dot(&d);
            let oproj = ovec.dot(&d);
            if j == 0 || proj < width_min {
                width_min = proj;
            }
            if j == 0 || proj > width_max {
                width_max = proj;
            }
            if oproj.abs() > height_max.abs() {
                height_max = oproj;
            }
        }

        let width = width_max - width_min;
        let area = height_max.abs() * width;
        if !found || area < min_area {
            found = true;
            min_area = area;
            best = EnclosingRectangle {
                center: origin + (vec * (width_min + width_max) + ovec * height_max) * 0.5,
                axes: Matrix2::from_columns(&[vec, ovec]),
                lengths: Vector2::new(width, height_max),
            };
        }
    }

    best
}
