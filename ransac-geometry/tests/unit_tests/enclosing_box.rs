use matrixcompare::{assert_scalar_eq, prop_assert_scalar_eq};
use nalgebra::{point, Point2, Rotation2, Vector2};
use proptest::prelude::*;
use ransac_geometry::{convex_hull_2d, find_smallest_enclosing_box};
use util::assert_approx_matrix_eq;

#[test]
fn enclosing_box_of_axis_aligned_rectangle() {
    let rectangle = vec![point![0.0, 0.0], point![4.0, 0.0], point![4.0, 6.0], point![0.0, 6.0]];
    let rect = find_smallest_enclosing_box(&rectangle);

    // The first edge already attains the minimum
    assert_approx_matrix_eq!(rect.axes.column(0), Vector2::new(1.0, 0.0), abstol = 1e-14);
    assert_approx_matrix_eq!(rect.axes.column(1), Vector2::new(0.0, 1.0), abstol = 1e-14);
    assert_approx_matrix_eq!(rect.lengths, Vector2::new(4.0, 6.0), abstol = 1e-14);
    assert_approx_matrix_eq!(rect.center.coords, Vector2::new(2.0, 3.0), abstol = 1e-14);
    assert_scalar_eq!(rect.area(), 24.0, comp = abs, tol = 1e-12);
}

#[test]
fn enclosing_box_height_is_signed() {
    // Clockwise orientation makes the perpendicular projections negative
    let rectangle = vec![point![0.0, 0.0], point![0.0, 6.0], point![4.0, 6.0], point![4.0, 0.0]];
    let rect = find_smallest_enclosing_box(&rectangle);

    assert_scalar_eq!(rect.lengths.x, 6.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(rect.lengths.y, -4.0, comp = abs, tol = 1e-14);
    assert_approx_matrix_eq!(rect.center.coords, Vector2::new(2.0, 3.0), abstol = 1e-14);
}

#[test]
fn enclosing_box_prefers_the_minimal_edge_of_a_hexagon() {
    // Elongated hexagon: the bounding box aligned with the long edges is the smallest one
    let hexagon = vec![
        point![1.0, 0.0],
        point![9.0, 0.0],
        point![10.0, 1.0],
        point![9.0, 2.0],
        point![1.0, 2.0],
        point![0.0, 1.0],
    ];
    let rect = find_smallest_enclosing_box(&hexagon);
    assert_scalar_eq!(rect.area(), 20.0, comp = abs, tol = 1e-12);
    assert_approx_matrix_eq!(rect.center.coords, Vector2::new(5.0, 1.0), abstol = 1e-12);
}

#[test]
fn enclosing_box_degenerate_polygons() {
    let empty: Vec<Point2<f64>> = Vec::new();
    let rect = find_smallest_enclosing_box(&empty);
    assert_eq!(rect.lengths, Vector2::zeros());
    assert_eq!(rect.center, Point2::origin());

    let single = vec![point![3.0, -1.0]; 4];
    let rect = find_smallest_enclosing_box(&single);
    assert_eq!(rect.lengths, Vector2::zeros());
    assert_eq!(rect.center, point![3.0, -1.0]);

    // A segment has zero area, but well-defined axes and width
    let segment = vec![point![0.0, 0.0], point![0.0, 3.0]];
    let rect = find_smallest_enclosing_box(&segment);
    assert_scalar_eq!(rect.lengths.x, 3.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(rect.area(), 0.0, comp = abs, tol = 1e-14);
}

proptest! {
    #[test]
    fn enclosing_box_of_rotated_rectangle_recovers_area(
        angle in 0.0..std::f64::consts::PI,
        width in 0.5..10.0,
        height in 0.5..10.0,
        tx in -5.0..5.0,
        ty in -5.0..5.0
    ) {
        let rotation = Rotation2::new(angle);
        let translation = Vector2::new(tx, ty);
        let corners: Vec<_> = [(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)]
            .iter()
            .map(|&(x, y)| rotation * Point2::new(x, y) + translation)
            .collect();
        let hull = convex_hull_2d(&corners);
        let rect = find_smallest_enclosing_box(&hull);

        prop_assert_scalar_eq!(rect.area(), width * height, comp = abs, tol = 1e-9);
        let expected_center = rotation * Point2::new(0.5 * width, 0.5 * height) + translation;
        prop_assert!((rect.center - expected_center).norm() < 1e-9);
        prop_assert_scalar_eq!(rect.axes.determinant(), 1.0, comp = abs, tol = 1e-12);
    }
}
