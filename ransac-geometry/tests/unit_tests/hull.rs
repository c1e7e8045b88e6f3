use super::slices_are_equal_shift_invariant;
use matrixcompare::assert_scalar_eq;
use nalgebra::{point, Point2, Point3, Rotation3, Vector3};
use proptest::collection::vec;
use proptest::prelude::*;
use ransac_geometry::{convex_hull_2d, convex_hull_2d_indices, convex_hull_3d_about_point};

fn signed_area(polygon: &[Point2<f64>]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let a = &polygon[i];
            let b = &polygon[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

#[test]
fn convex_hull_2d_of_square_with_interior_and_edge_points() {
    let points = vec![
        point![1.0, 1.0],
        point![0.0, 0.0],
        point![2.0, 0.0],
        point![1.0, 0.0],
        point![2.0, 2.0],
        point![0.0, 2.0],
        point![0.0, 1.0],
        point![2.0, 2.0],
        point![0.5, 1.5],
    ];

    let hull = convex_hull_2d(&points);
    let expected = [point![0.0, 0.0], point![2.0, 0.0], point![2.0, 2.0], point![0.0, 2.0]];
    assert!(slices_are_equal_shift_invariant(&hull, &expected, |a, b| a == b));
    assert_scalar_eq!(signed_area(&hull), 4.0, comp = abs, tol = 1e-14);
}

#[test]
fn convex_hull_2d_degenerate_inputs() {
    let empty: Vec<Point2<f64>> = Vec::new();
    assert!(convex_hull_2d(&empty).is_empty());

    let duplicates = vec![point![1.0, 1.0], point![1.0, 1.0]];
    assert_eq!(convex_hull_2d_indices(&duplicates).len(), 1);

    let collinear = vec![point![0.0, 0.0], point![2.0, 2.0], point![1.0, 1.0], point![3.0, 3.0]];
    assert_eq!(convex_hull_2d(&collinear), vec![point![0.0, 0.0], point![3.0, 3.0]]);
}

#[test]
fn convex_hull_3d_about_point_recovers_tilted_square() {
    let rotation =
        Rotation3::from_axis_angle(&Vector3::y_axis(), 0.7) * Rotation3::from_axis_angle(&Vector3::x_axis(), -0.3);
    let offset = Vector3::new(1.0, -2.0, 0.5);
    let to_world = |x: f64, y: f64| rotation * Point3::new(x, y, 0.0) + offset;

    // Corners and strictly interior points only, so that no point lies on a hull edge
    let mut points = vec![to_world(0.0, 0.0), to_world(2.0, 0.0), to_world(2.0, 2.0), to_world(0.0, 2.0)];
    for i in 1..4 {
        for j in 1..4 {
            points.push(to_world(i as f64 * 0.5, j as f64 * 0.5));
        }
    }
    let interior = to_world(1.0, 1.0);

    let hull = convex_hull_3d_about_point(&interior, &points);
    assert_eq!(hull.len(), 4);
    let corners = [to_world(0.0, 0.0), to_world(2.0, 0.0), to_world(2.0, 2.0), to_world(0.0, 2.0)];
    for corner in &corners {
        assert!(hull.iter().any(|h| (h - corner).norm() < 1e-12));
    }
}

proptest! {
    #[test]
    fn convex_hull_2d_is_convex_and_contains_all_points(
        coords in vec((-10.0..10.0, -10.0..10.0), 3..40)
    ) {
        let points: Vec<_> = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let hull = convex_hull_2d(&points);
        prop_assume!(hull.len() >= 3);

        prop_assert!(signed_area(&hull) > 0.0);
        let n = hull.len();
        for i in 0..n {
            let a = &hull[i];
            let b = &hull[(i + 1) % n];
            let edge = b - a;
            for p in &points {
                let d = p - a;
                let cross = edge.x * d.y - edge.y * d.x;
                prop_assert!(cross >= -1e-9);
            }
        }
    }
}
