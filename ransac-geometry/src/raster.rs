//! Rasters over integer grid cells.
//!
//! Point sets projected onto a plane are discretized into integer cells and drawn into a
//! binary [`GrayImage`] by [`rasterize`]. Connected component labelling, border tracing
//! and convex hulls of cell sets are delegated to `imageproc`. Foreground connectivity is
//! 8-connectivity throughout.
use image::{GrayImage, ImageBuffer, Luma};
use imageproc::contours::find_contours;
use imageproc::geometry::convex_hull;
use imageproc::point::Point;
use imageproc::region_labelling::{connected_components, Connectivity};
use itertools::Itertools;
use nalgebra::{Point2, Vector2};
use std::collections::BTreeMap;

/// The largest number of cells [`rasterize`] allocates a raster for.
pub const MAX_RASTER_CELLS: usize = 1 << 24;

const OCCUPIED: Luma<u8> = Luma([255]);
const BACKGROUND: Luma<u8> = Luma([0]);

/// Inclusive bounds of a non-empty set of integer grid cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellBounds {
    min: Point2<i32>,
    max: Point2<i32>,
}

impl CellBounds {
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Point2<i32>>) -> Option<Self> {
        let mut cells = cells.into_iter();
        let first = *cells.next()?;
        Some(cells.fold(Self { min: first, max: first }, |bounds, cell| Self {
            min: Point2::new(bounds.min.x.min(cell.x), bounds.min.y.min(cell.y)),
            max: Point2::new(bounds.max.x.max(cell.x), bounds.max.y.max(cell.y)),
        }))
    }

    pub fn min(&self) -> &Point2<i32> {
        &self.min
    }

    pub fn max(&self) -> &Point2<i32> {
        &self.max
    }

    /// Number of cell columns covered by the bounds.
    pub fn width(&self) -> usize {
        (1 + i64::from(self.max.x) - i64::from(self.min.x)) as usize
    }

    /// Number of cell rows covered by the bounds.
    pub fn height(&self) -> usize {
        (1 + i64::from(self.max.y) - i64::from(self.min.y)) as usize
    }

    /// Number of cells covered by the bounds, saturating at `usize::MAX`.
    pub fn num_cells(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    /// Position of the cell relative to the minimum corner, as `(column, row)`.
    ///
    /// Cells below the minimum corner wrap around to large coordinates.
    pub fn local_coords(&self, cell: &Point2<i32>) -> (u32, u32) {
        (
            (i64::from(cell.x) - i64::from(self.min.x)) as u32,
            (i64::from(cell.y) - i64::from(self.min.y)) as u32,
        )
    }

    /// The four corner cells of the bounds relative to the minimum corner, in the order
    /// `(0, 0)`, `(0, h - 1)`, `(w - 1, h - 1)`, `(w - 1, 0)`.
    pub fn local_corners(&self) -> [Point2<i32>; 4] {
        let w = self.max.x - self.min.x;
        let h = self.max.y - self.min.y;
        [Point2::new(0, 0), Point2::new(0, h), Point2::new(w, h), Point2::new(w, 0)]
    }
}

/// Draws the cells into a binary image spanning `bounds`, with the minimum corner of the
/// bounds mapped to pixel `(0, 0)`. Cells outside the bounds are ignored.
///
/// Returns `None` if the bounds cover more than [`MAX_RASTER_CELLS`] cells.
pub fn rasterize<'a>(bounds: &CellBounds, cells: impl IntoIterator<Item = &'a Point2<i32>>) -> Option<GrayImage> {
    if bounds.num_cells() > MAX_RASTER_CELLS {
        return None;
    }
    let width = u32::try_from(bounds.width()).ok()?;
    let height = u32::try_from(bounds.height()).ok()?;

    let mut image = GrayImage::new(width, height);
    for cell in cells {
        let (x, y) = bounds.local_coords(cell);
        if x < width && y < height {
            image.put_pixel(x, y, OCCUPIED);
        }
    }
    Some(image)
}

/// Labels of the 8-connected foreground components of a binary image.
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    labels: ImageBuffer<Luma<u32>, Vec<u32>>,
    component_sizes: BTreeMap<u32, usize>,
}

impl ComponentLabels {
    /// The label of the given pixel, or `None` for background or out-of-bounds pixels.
    pub fn label(&self, x: u32, y: u32) -> Option<u32> {
        self.labels
            .get_pixel_checked(x, y)
            .map(|pixel| pixel[0])
            .filter(|&label| label != 0)
    }

    pub fn num_components(&self) -> usize {
        self.component_sizes.len()
    }

    /// The number of pixels in the component with the given label.
    pub fn component_size(&self, label: u32) -> usize {
        self.component_sizes.get(&label).copied().unwrap_or(0)
    }

    /// The label of the component with the most pixels.
    ///
    /// Ties are broken in favor of the smallest label. Returns `None` if the image has no
    /// foreground.
    pub fn largest_component(&self) -> Option<u32> {
        self.component_sizes
            .iter()
            .rev()
            .max_by_key(|&(_, &size)| size)
            .map(|(&label, _)| label)
    }
}

pub fn label_connected_components(image: &GrayImage) -> ComponentLabels {
    let labels = connected_components(image, Connectivity::Eight, BACKGROUND);
    let mut component_sizes = BTreeMap::new();
    for pixel in labels.pixels().filter(|pixel| pixel[0] != 0) {
        *component_sizes.entry(pixel[0]).or_insert(0) += 1;
    }
    ComponentLabels {
        labels,
        component_sizes,
    }
}

fn cross(a: &Vector2<i32>, b: &Vector2<i32>) -> i64 {
    i64::from(a.x) * i64::from(b.y) - i64::from(a.y) * i64::from(b.x)
}

/// Reduces a closed border to the end points of its horizontal, vertical and diagonal runs.
///
/// Borders with fewer than three points are returned as-is.
pub fn compress_straight_runs(border: &[Point2<i32>]) -> Vec<Point2<i32>> {
    if border.len() < 3 {
        return border.to_vec();
    }
    let n = border.len();
    (0..n)
        .filter(|&i| {
            let (prev, current, next) = (&border[(i + n - 1) % n], &border[i], &border[(i + 1) % n]);
            current - prev != next - current
        })
        .map(|i| border[i])
        .collect()
}

/// Traces all borders of the foreground of the image, outer borders and hole borders alike,
/// and returns the one with the most vertices after [`compress_straight_runs`].
///
/// Of several borders with the same number of vertices the first one traced wins. Returns
/// `None` if no border is found, i.e. the image has no foreground.
pub fn most_detailed_contour(image: &GrayImage) -> Option<Vec<Point2<i32>>> {
    find_contours::<i32>(image)
        .into_iter()
        .map(|contour| {
            let border: Vec<_> = contour
                .points
                .iter()
                .map(|point| Point2::new(point.x, point.y))
                .collect();
            compress_straight_runs(&border)
        })
        .rev()
        .max_by_key(Vec::len)
        .filter(|contour| !contour.is_empty())
}

/// Convex hull of a set of cells, counter-clockwise (with `y` pointing up) and starting
/// from the smallest cell in `(x, y)` order. Collinear vertices are dropped.
///
/// Sets of fewer than three distinct cells are returned deduplicated.
pub fn convex_hull_of_cells(cells: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let distinct: Vec<_> = cells.iter().copied().unique().collect();
    if distinct.len() < 3 {
        return distinct;
    }
    let points: Vec<Point<i32>> = distinct.iter().map(|cell| Point::new(cell.x, cell.y)).collect();
    let hull: Vec<_> = convex_hull(points.as_slice())
        .into_iter()
        .map(|point| Point2::new(point.x, point.y))
        .collect();
    let n = hull.len();
    let mut hull: Vec<_> = (0..n)
        .filter(|&i| {
            let (prev, current, next) = (&hull[(i + n - 1) % n], &hull[i], &hull[(i + 1) % n]);
            cross(&(current - prev), &(next - current)) != 0
        })
        .map(|i| hull[i])
        .collect();
    if hull.len() < 3 {
        // All cells are collinear, the hull is the segment between the extreme cells
        return distinct
            .iter()
            .copied()
            .minmax_by_key(|cell| (cell.x, cell.y))
            .into_option()
            .map_or_else(Vec::new, |(first, last)| vec![first, last]);
    }

    let twice_signed_area: i64 = hull
        .iter()
        .circular_tuple_windows::<(_, _)>()
        .map(|(a, b)| cross(&a.coords, &b.coords))
        .sum();
    if twice_signed_area < 0 {
        hull.reverse();
    }
    if let Some((start, _)) = hull.iter().enumerate().min_by_key(|(_, cell)| (cell.x, cell.y)) {
        hull.rotate_left(start);
    }
    hull
}
