use crate::util::compute_orthonormal_vectors_3d;
use crate::Real;
use nalgebra::{Matrix3, Point2, Point3, Unit};
use std::cmp::Ordering;

fn cross_2d<T: Real>(o: &Point2<T>, a: &Point2<T>, b: &Point2<T>) -> T {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Computes the indices of the vertices of the convex hull of the given points.
///
/// Uses Andrew's monotone chain algorithm. The hull is returned in counter-clockwise order,
/// starting with the lexicographically smallest point. Collinear points on the hull boundary
/// and duplicate points are discarded. Fewer than three distinct points are returned as-is
/// (deduplicated).
pub fn convex_hull_2d_indices<T: Real>(points: &[Point2<T>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (&points[i], &points[j]);
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    order.dedup_by(|i, j| points[*i] == points[*j]);

    if order.len() < 3 {
        return order;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(2 * order.len());
    // Lower chain
    for &i in &order {
        while hull.len() >= 2
            && cross_2d(&points[hull[hull.len() - 2]], &points[hull[hull.len() - 1]], &points[i]) <= T::zero()
        {
            hull.pop();
        }
        hull.push(i);
    }
    // Upper chain
    let lower_len = hull.len() + 1;
    for &i in order.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross_2d(&points[hull[hull.len() - 2]], &points[hull[hull.len() - 1]], &points[i]) <= T::zero()
        {
            hull.pop();
        }
        hull.push(i);
    }
    // The last point equals the first one
    hull.pop();
    hull
}

/// Computes the convex hull of a 2D point set in counter-clockwise order.
///
/// See [`convex_hull_2d_indices`].
pub fn convex_hull_2d<T: Real>(points: &[Point2<T>]) -> Vec<Point2<T>> {
    convex_hull_2d_indices(points)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Computes the convex hull of a (near-)planar 3D point set, given a reference point in
/// the interior of the point set.
///
/// The supporting plane is estimated as the plane through `interior` whose normal is the
/// direction of least variance of the points around `interior`. The points are projected
/// onto this plane and their 2D hull is computed. The returned vertices are the original
/// (unprojected) points on the hull, ordered counter-clockwise around the estimated normal.
pub fn convex_hull_3d_about_point<T: Real>(interior: &Point3<T>, points: &[Point3<T>]) -> Vec<Point3<T>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut covariance = Matrix3::zeros();
    for point in points {
        let d = point - interior;
        covariance += &d * d.transpose();
    }

    let eigen = covariance.symmetric_eigen();
    let normal = Unit::new_normalize(eigen.eigenvectors.column(eigen.eigenvalues.imin()).into_owned());
    let [u, v] = compute_orthonormal_vectors_3d(&normal);

    let projected: Vec<_> = points
        .iter()
        .map(|point| {
            let d = point - interior;
            Point2::new(u.dot(&d), v.dot(&d))
        })
        .collect();

    convex_hull_2d_indices(&projected)
        .into_iter()
        .map(|i| points[i])
        .collect()
}
