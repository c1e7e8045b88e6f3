use crate::construct_xy_plane;
use nalgebra::{point, Vector3};
use ransac_primitives::RasterResolution;
use util::OrientedCloud;

#[test]
fn largest_connected_component_keeps_larger_cluster() {
    let mut cloud = OrientedCloud::default();
    let large = cloud.push_grid(
        point![0.0, 0.0, 0.0],
        [Vector3::x(), Vector3::y()],
        0.05,
        [30, 30],
        Vector3::z(),
    );
    // Separated from the large cluster by a gap of many raster cells
    let small = cloud.push_grid(
        point![3.0, 0.0, 0.0],
        [Vector3::x(), Vector3::y()],
        0.05,
        [10, 10],
        Vector3::z(),
    );

    let mut plane = construct_xy_plane().with_resolution(RasterResolution::new(0.01, 0.1));
    let mut conforming = small.clone();
    conforming.extend_from_slice(&large);
    plane.set_conforming_inds(conforming);

    let mut inliers = vec![usize::MAX];
    plane.largest_connected_component(&mut inliers, &cloud.points);
    assert_eq!(inliers, large);
}

#[test]
fn largest_connected_component_skips_small_rasters() {
    let mut cloud = OrientedCloud::default();
    let first = cloud.push_grid(
        point![0.0, 0.0, 0.0],
        [Vector3::x(), Vector3::y()],
        0.05,
        [3, 3],
        Vector3::z(),
    );
    let second = cloud.push_grid(
        point![0.0, 0.5, 0.0],
        [Vector3::x(), Vector3::y()],
        0.05,
        [5, 2],
        Vector3::z(),
    );

    // The two clusters are disconnected, but the raster is narrower than the minimum size
    let mut plane = construct_xy_plane().with_resolution(RasterResolution::new(0.01, 0.1));
    let conforming: Vec<_> = second.iter().chain(&first).rev().copied().collect();
    plane.set_conforming_inds(conforming.clone());

    let mut inliers = Vec::new();
    plane.largest_connected_component(&mut inliers, &cloud.points);
    assert_eq!(inliers, conforming);
}

#[test]
fn largest_connected_component_of_empty_conforming_set() {
    let cloud = OrientedCloud::default();
    let plane = construct_xy_plane();
    let mut inliers = vec![1, 2, 3];
    plane.largest_connected_component(&mut inliers, &cloud.points);
    assert!(inliers.is_empty());
}

#[test]
fn largest_connected_component_keeps_diagonally_connected_cells() {
    let mut cloud = OrientedCloud::default();
    // A staircase of single points, one per raster cell, touching only diagonally
    let diagonal: Vec<_> = (0..12)
        .map(|i| {
            let x = 0.05 + 0.1 * i as f64;
            cloud.push(point![x, x, 0.0], Vector3::z())
        })
        .collect();
    let isolated = cloud.push(point![0.05, 1.05, 0.0], Vector3::z());

    let mut plane = construct_xy_plane().with_resolution(RasterResolution::new(0.01, 0.1));
    let mut conforming = vec![isolated];
    conforming.extend_from_slice(&diagonal);
    plane.set_conforming_inds(conforming);

    let mut inliers = Vec::new();
    plane.largest_connected_component(&mut inliers, &cloud.points);
    assert_eq!(inliers, diagonal);
}

#[test]
fn largest_connected_component_skips_huge_rasters() {
    let mut cloud = OrientedCloud::default();
    let conforming = vec![
        cloud.push(point![0.0, 0.0, 0.0], Vector3::z()),
        cloud.push(point![0.04, 0.0, 0.0], Vector3::z()),
        cloud.push(point![1000.0, 1000.0, 0.0], Vector3::z()),
    ];

    // Far too many cells to rasterize, so every conforming point is kept
    let mut plane = construct_xy_plane().with_resolution(RasterResolution::new(0.01, 0.04));
    plane.set_conforming_inds(conforming.clone());

    let mut inliers = Vec::new();
    plane.largest_connected_component(&mut inliers, &cloud.points);
    assert_eq!(inliers, conforming);
}
