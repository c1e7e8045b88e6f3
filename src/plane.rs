//! The plane primitive: minimal-sample construction, inlier classification, footprint
//! extraction, connectivity filtering and merging.
use crate::error::{ConstructionError, FootprintError};
use crate::primitive::{InlierThresholds, ShapeKind, ShapePrimitive, ShapeRenderer};
use crate::resolution::{RasterResolution, MIN_CONNECTIVITY_RASTER_CELLS};
use itertools::izip;
use log::{debug, warn};
use nalgebra::{
    convert, try_convert, Matrix3, Point2, Point3, Quaternion, Rotation3, UnitQuaternion, UnitVector3,
    Vector2, Vector3, Vector4,
};
use numeric_literals::replace_float_literals;
use ransac_geometry::raster::{
    convex_hull_of_cells, label_connected_components, most_detailed_contour, rasterize, CellBounds,
};
use ransac_geometry::util::{frame_from_normal_and_secondary, in_plane_basis};
use ransac_geometry::{convex_hull_3d_about_point, find_smallest_enclosing_box, Plane, Real};

/// Number of points in a minimal plane sample.
const POINTS_REQUIRED: usize = 3;

/// Length of the flat descriptor produced by [`PlanePrimitive::shape_data`].
pub const PLANE_SHAPE_DATA_LEN: usize = 13;

/// A planar shape primitive.
///
/// Holds the plane equation together with an in-plane basis and a footprint, i.e. the
/// convex hull and minimum-area enclosing rectangle of the supporting points projected
/// onto the plane. Point and normal data is never owned: each operation borrows the
/// arrays it needs and refers to points by index.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanePrimitive<T: Real> {
    plane: Plane<T>,
    basis: [UnitVector3<T>; 2],
    center: Point3<T>,
    extents: Vector2<T>,
    orientation: UnitQuaternion<T>,
    convex_hull: Vec<Point3<T>>,
    supporting_inds: Vec<usize>,
    conforming_inds: Vec<usize>,
    color: [u8; 3],
    object_id: Option<usize>,
    footprint_valid: bool,
    resolution: RasterResolution<T>,
}

impl<T: Real> Default for PlanePrimitive<T> {
    fn default() -> Self {
        Self {
            plane: Plane::from_normal_and_offset(Vector3::x_axis(), T::zero()),
            basis: [Vector3::y_axis(), Vector3::z_axis()],
            center: Point3::origin(),
            extents: Vector2::zeros(),
            orientation: UnitQuaternion::identity(),
            convex_hull: Vec::new(),
            supporting_inds: Vec::new(),
            conforming_inds: Vec::new(),
            color: [255, 255, 255],
            object_id: None,
            footprint_valid: false,
            resolution: RasterResolution::default(),
        }
    }
}

/// Rotation whose matrix has the given vectors as columns.
fn rotation_from_frame<T: Real>(frame: &[UnitVector3<T>; 3]) -> UnitQuaternion<T> {
    let matrix = Matrix3::from_columns(&frame.map(|axis| axis.into_inner()));
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(matrix))
}

/// The grid cell containing the given (scaled) plane coordinates.
///
/// Non-finite coordinates end up in cell 0, coordinates beyond the range of `i32` saturate.
fn to_cell<T: Real>(x: T, y: T) -> Point2<i32> {
    let to_i32 = |v: T| try_convert::<T, f64>(v.floor()).map_or(0, |v| v as i32);
    Point2::new(to_i32(x), to_i32(y))
}

fn cell_to_point<T: Real>(cell: &Point2<i32>) -> Point2<T> {
    Point2::new(convert(f64::from(cell.x)), convert(f64::from(cell.y)))
}

impl<T: Real> PlanePrimitive<T> {
    /// Creates an empty plane primitive with the default raster resolution.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(self, resolution: RasterResolution<T>) -> Self {
        Self { resolution, ..self }
    }

    pub fn resolution(&self) -> &RasterResolution<T> {
        &self.resolution
    }

    pub fn set_resolution(&mut self, resolution: RasterResolution<T>) {
        self.resolution = resolution;
    }

    /// Constructs the plane through three points, oriented along the first measured normal.
    ///
    /// The sample is rejected if the points do not span a plane, or if any measured normal
    /// deviates from the fitted normal by more than `thresholds.angle`. The distance threshold
    /// is not used. On success the equation and basis are replaced, the center is set to the
    /// centroid of the sample and the footprint and index sets are reset. On failure the
    /// primitive is left unchanged.
    pub fn construct(
        &mut self,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        thresholds: &InlierThresholds<T>,
    ) -> Result<(), ConstructionError> {
        let wrong_size = || ConstructionError::WrongSampleSize {
            required: POINTS_REQUIRED,
            points: points.len(),
            normals: normals.len(),
        };
        if normals.len() != POINTS_REQUIRED {
            return Err(wrong_size());
        }
        let sample: &[Point3<T>; POINTS_REQUIRED] = points.try_into().map_err(|_| wrong_size())?;

        let plane = Plane::from_oriented_triangle(sample, &normals[0]).ok_or_else(|| {
            debug!("Rejected plane sample: points are degenerate.");
            ConstructionError::DegenerateSample
        })?;

        let normal = plane.normal();
        for (sample_index, measured) in normals.iter().enumerate() {
            // Clamp so that round-off cannot push the cosine out of the domain of acos
            let cos_angle = normal.dot(measured).clamp(-T::one(), T::one());
            // NaN normals must be rejected as well, hence the negated comparison
            if !(cos_angle.acos() <= thresholds.angle) {
                debug!("Rejected plane sample: normal {} disagrees with the fitted plane.", sample_index);
                return Err(ConstructionError::NormalMismatch { sample_index });
            }
        }

        let basis = in_plane_basis(&(sample[1] - sample[0]), normal).ok_or(ConstructionError::DegenerateSample)?;
        let frame = [*normal, basis[0], basis[1]];
        let centroid = Point3::from((sample[0].coords + sample[1].coords + sample[2].coords) / convert::<f64, T>(3.0));

        self.orientation = rotation_from_frame(&frame);
        self.center = plane.project_point(&centroid);
        self.plane = plane;
        self.basis = basis;
        self.invalidate_footprint();
        self.supporting_inds.clear();
        self.conforming_inds.clear();
        Ok(())
    }

    /// Appends to `inliers` the candidates that lie within `thresholds.distance` of the plane
    /// and whose normals lie within `thresholds.angle` of the plane normal.
    ///
    /// The normal test is one-sided: normals pointing away from the plane normal are rejected.
    pub fn compute_inliers(
        &self,
        inliers: &mut Vec<usize>,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        candidates: &[usize],
        thresholds: &InlierThresholds<T>,
    ) {
        let cos_threshold = thresholds.angle.cos();
        let normal = self.plane.normal();
        inliers.extend(candidates.iter().copied().filter(|&i| {
            self.plane.distance(&points[i]) < thresholds.distance && normal.dot(&normals[i]) > cos_threshold
        }));
    }

    /// Coordinates of the point in the in-plane basis.
    fn plane_coords(&self, point: &Point3<T>) -> Vector2<T> {
        Vector2::new(self.basis[0].dot(&point.coords), self.basis[1].dot(&point.coords))
    }

    /// Maps raster coordinates back to a point on the plane.
    fn raster_to_world(&self, cell_size: T, raster_coords: &Point2<T>) -> Point3<T> {
        let p = Point3::from(
            (self.basis[0].as_ref() * raster_coords.x + self.basis[1].as_ref() * raster_coords.y) * cell_size,
        );
        self.plane.project_point(&p)
    }

    /// Writes into `inliers` the conforming indices that belong to the largest spatially
    /// connected cluster of points in the plane.
    ///
    /// The points are rasterized with cells of size
    /// [`RasterResolution::connectivity_cell_size`]. If the raster spans fewer than
    /// [`MIN_CONNECTIVITY_RASTER_CELLS`] cells in either direction, or more than
    /// [`MAX_RASTER_CELLS`](ransac_geometry::raster::MAX_RASTER_CELLS) cells in total,
    /// connectivity is not analyzed and all conforming indices are returned.
    pub fn largest_connected_component(&self, inliers: &mut Vec<usize>, points: &[Point3<T>]) {
        inliers.clear();
        let scale = T::one() / self.resolution.connectivity_cell_size();
        let cells: Vec<_> = self
            .conforming_inds
            .iter()
            .map(|&i| {
                let coords = self.plane_coords(&points[i]) * scale;
                to_cell(coords.x, coords.y)
            })
            .collect();

        let Some(bounds) = CellBounds::from_cells(&cells) else {
            return;
        };
        if bounds.width() < MIN_CONNECTIVITY_RASTER_CELLS || bounds.height() < MIN_CONNECTIVITY_RASTER_CELLS {
            debug!(
                "Connectivity raster of size {}x{} is too small, keeping all conforming points.",
                bounds.width(),
                bounds.height()
            );
            inliers.extend_from_slice(&self.conforming_inds);
            return;
        }

        let Some(image) = rasterize(&bounds, &cells) else {
            warn!(
                "Connectivity raster of size {}x{} is too large, keeping all conforming points.",
                bounds.width(),
                bounds.height()
            );
            inliers.extend_from_slice(&self.conforming_inds);
            return;
        };
        let labels = label_connected_components(&image);
        let Some(largest) = labels.largest_component() else {
            return;
        };

        inliers.reserve(cells.len());
        for (&index, cell) in izip!(&self.conforming_inds, &cells) {
            let (x, y) = bounds.local_coords(cell);
            if labels.label(x, y) == Some(largest) {
                inliers.push(index);
            }
        }
    }

    /// Computes the footprint of the supporting points: the convex hull of the rasterized
    /// points and its minimum-area enclosing rectangle.
    ///
    /// The points are rasterized with cells of size [`RasterResolution::footprint_cell_size`].
    /// The hull is taken of the raster border with the most vertices, where straight runs of
    /// border cells count as a single edge. Rasters of width or height at most two are
    /// replaced by their bounding box.
    ///
    /// On success the center, extents, orientation and convex hull are replaced. On failure
    /// the footprint is invalidated, see [`PlanePrimitive::has_footprint`].
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn compute_shape_size(&mut self, points: &[Point3<T>]) -> Result<(), FootprintError> {
        let cell_size = self.resolution.footprint_cell_size();
        let scale = 1.0 / cell_size;
        let cells: Vec<_> = self
            .supporting_inds
            .iter()
            .map(|&i| {
                let coords = self.plane_coords(&points[i]) * scale;
                to_cell(coords.x, coords.y)
            })
            .collect();

        let Some(bounds) = CellBounds::from_cells(&cells) else {
            self.invalidate_footprint();
            return Err(FootprintError::EmptySupport);
        };
        let (width, height) = (bounds.width(), bounds.height());

        let hull_cells = if width <= 2 || height <= 2 {
            debug!("Footprint raster of size {}x{} is degenerate, using its bounding box.", width, height);
            bounds.local_corners().to_vec()
        } else {
            let Some(image) = rasterize(&bounds, &cells) else {
                warn!("Footprint raster of size {}x{} is too large.", width, height);
                self.invalidate_footprint();
                return Err(FootprintError::RasterTooLarge { width, height });
            };
            let Some(contour) = most_detailed_contour(&image) else {
                warn!("No contours found in footprint raster. Height: {}, width: {}", height, width);
                self.invalidate_footprint();
                return Err(FootprintError::NoContour { width, height });
            };
            convex_hull_of_cells(&contour)
        };
        let hull: Vec<Point2<T>> = hull_cells.iter().map(cell_to_point).collect();

        let rectangle = find_smallest_enclosing_box(&hull);
        let min_corner: Point2<T> = cell_to_point(bounds.min());
        let to_world = |local: &Point2<T>| self.raster_to_world(cell_size, &(local + min_corner.coords));

        let center = to_world(&rectangle.center);
        let convex_hull: Vec<_> = hull.iter().map(to_world).collect();
        let axis = |column: usize| {
            let axis = rectangle.axes.column(column);
            UnitVector3::new_normalize(self.basis[0].as_ref() * axis[0] + self.basis[1].as_ref() * axis[1])
        };
        let frame = [*self.plane.normal(), axis(0), axis(1)];

        self.center = center;
        self.convex_hull = convex_hull;
        self.extents = rectangle.lengths.abs() * cell_size;
        self.orientation = rotation_from_frame(&frame);
        self.footprint_valid = true;
        Ok(())
    }

    /// Merges two sibling primitives into `self`.
    ///
    /// The merged normal is the normalized sum of the sibling normals (or their difference, if
    /// they point in opposite directions) and the merged plane passes through the average of
    /// the sibling centers. The secondary axis of the merged frame is taken from the frame of
    /// `first`. The convex hull is recomputed from both sibling hulls, and the extents are the
    /// spans of the merged hull along the secondary and tertiary frame axes. Supporting
    /// indices are the sorted union of the siblings' supporting indices, while color and
    /// object id are taken from `first`.
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn merge_planes(&mut self, first: &PlanePrimitive<T>, second: &PlanePrimitive<T>) {
        let (normal_p, center_p) = first.direction_and_center();
        let (normal_q, center_q) = second.direction_and_center();
        let center = Point3::from((center_p.coords + center_q.coords) * 0.5);
        let combined = if normal_p.dot(normal_q.as_ref()) > 0.0 {
            normal_p.as_ref() + normal_q.as_ref()
        } else {
            normal_p.as_ref() - normal_q.as_ref()
        };
        let normal = UnitVector3::try_new(combined, T::default_epsilon()).unwrap_or(*normal_p);
        let plane = Plane::from_point_and_normal(&center, normal);

        // Recover the frame of the first sibling from its flat descriptor
        let mut data = Vec::with_capacity(PLANE_SHAPE_DATA_LEN);
        first.shape_data(&mut data);
        let [x, y, z, w] = [9, 10, 11, 12].map(|i| data[i]);
        let first_orientation = UnitQuaternion::new_normalize(Quaternion::new(w, x, y, z));
        let secondary = first_orientation.transform_vector(&Vector3::y());

        let frame = frame_from_normal_and_secondary(&normal, &secondary);
        let orientation = rotation_from_frame(&frame);

        let local_points: Vec<_> = first
            .convex_hull
            .iter()
            .chain(&second.convex_hull)
            .map(|p| orientation.inverse_transform_point(p))
            .collect();
        let mut convex_hull = Vec::new();
        let mut extents = Vector2::zeros();
        if !local_points.is_empty() {
            let n = convert::<f64, T>(local_points.len() as f64);
            let mean = Point3::from(local_points.iter().fold(Vector3::zeros(), |sum, p| sum + p.coords) / n);
            let mut local_hull = convex_hull_3d_about_point(&mean, &local_points);

            let (mut min, mut max) = (local_hull[0].coords, local_hull[0].coords);
            for p in &mut local_hull {
                // The first frame axis is the merged normal
                let dist = plane.signed_distance(&orientation.transform_point(p));
                p.x -= dist;
                min = min.inf(&p.coords);
                max = max.sup(&p.coords);
            }
            extents = Vector2::new(max.y - min.y, max.z - min.z);
            convex_hull = local_hull.iter().map(|p| orientation.transform_point(p)).collect();
        }

        let mut supporting_inds = first.supporting_inds.clone();
        supporting_inds.extend_from_slice(&second.supporting_inds);
        supporting_inds.sort_unstable();
        supporting_inds.dedup();

        self.footprint_valid = !convex_hull.is_empty();
        self.plane = plane;
        self.center = center;
        self.orientation = orientation;
        self.basis = [frame[1], frame[2]];
        self.convex_hull = convex_hull;
        self.extents = extents;
        self.supporting_inds = supporting_inds;
        self.conforming_inds.clear();
        self.color = first.color;
        self.object_id = first.object_id;
    }

    /// Flips the plane equation, and rotates the frame and the basis by 180 degrees about the
    /// secondary frame axis.
    ///
    /// Applying it twice restores the original plane.
    pub fn switch_direction(&mut self) {
        self.plane = self.plane.flipped();
        let axis = UnitVector3::new_normalize(self.orientation.transform_vector(&Vector3::y()));
        let flip = UnitQuaternion::from_axis_angle(&axis, T::pi());
        self.orientation = &flip * &self.orientation;
        self.basis = self.basis.map(|b| flip * b);
    }

    /// The plane normal and the footprint center.
    pub fn direction_and_center(&self) -> (&UnitVector3<T>, &Point3<T>) {
        (self.plane.normal(), &self.center)
    }

    pub fn plane(&self) -> &Plane<T> {
        &self.plane
    }

    /// The plane coefficients `(n_x, n_y, n_z, d)`.
    pub fn equation(&self) -> Vector4<T> {
        self.plane.coefficients()
    }

    pub fn basis(&self) -> &[UnitVector3<T>; 2] {
        &self.basis
    }

    pub fn center(&self) -> &Point3<T> {
        &self.center
    }

    pub fn extents(&self) -> &Vector2<T> {
        &self.extents
    }

    /// Rotation whose matrix columns are the plane normal and the two footprint axes.
    pub fn orientation(&self) -> &UnitQuaternion<T> {
        &self.orientation
    }

    pub fn convex_hull(&self) -> &[Point3<T>] {
        &self.convex_hull
    }

    pub fn supporting_inds(&self) -> &[usize] {
        &self.supporting_inds
    }

    /// Replaces the supporting indices. They are stored sorted and without duplicates.
    pub fn set_supporting_inds(&mut self, mut inds: Vec<usize>) {
        inds.sort_unstable();
        inds.dedup();
        self.supporting_inds = inds;
    }

    pub fn conforming_inds(&self) -> &[usize] {
        &self.conforming_inds
    }

    pub fn set_conforming_inds(&mut self, inds: Vec<usize>) {
        self.conforming_inds = inds;
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn set_color(&mut self, color: [u8; 3]) {
        self.color = color;
    }

    pub fn object_id(&self) -> Option<usize> {
        self.object_id
    }

    pub fn set_object_id(&mut self, object_id: Option<usize>) {
        self.object_id = object_id;
    }

    /// Whether the extents and convex hull describe a successfully computed footprint.
    pub fn has_footprint(&self) -> bool {
        self.footprint_valid
    }

    fn invalidate_footprint(&mut self) {
        self.extents = Vector2::zeros();
        self.convex_hull.clear();
        self.footprint_valid = false;
    }
}

impl<T: Real> ShapePrimitive<T> for PlanePrimitive<T> {
    fn points_required(&self) -> usize {
        POINTS_REQUIRED
    }

    fn construct(
        &mut self,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        thresholds: &InlierThresholds<T>,
    ) -> Result<(), ConstructionError> {
        PlanePrimitive::construct(self, points, normals, thresholds)
    }

    fn compute_inliers(
        &self,
        inliers: &mut Vec<usize>,
        points: &[Point3<T>],
        normals: &[Vector3<T>],
        candidates: &[usize],
        thresholds: &InlierThresholds<T>,
    ) {
        PlanePrimitive::compute_inliers(self, inliers, points, normals, candidates, thresholds)
    }

    fn shape(&self) -> ShapeKind {
        ShapeKind::Plane
    }

    /// A new, empty plane sharing the raster resolution of `self`.
    fn instantiate(&self) -> Self {
        Self::new().with_resolution(self.resolution)
    }

    fn distance_to_pt(&self, point: &Point3<T>) -> T {
        self.plane.distance(point)
    }

    /// The second extent of the footprint.
    fn shape_size(&self) -> T {
        self.extents.y
    }

    /// Layout: the plane equation (4), the extents (2), the center (3) and the orientation
    /// quaternion in `x, y, z, w` order (4).
    fn shape_data(&self, data: &mut Vec<T>) {
        let q = self.orientation.quaternion();
        data.clear();
        data.extend(self.plane.coefficients().iter().copied());
        data.extend(self.extents.iter().copied());
        data.extend(self.center.coords.iter().copied());
        data.extend([q.i, q.j, q.k, q.w]);
    }

    fn shape_points(&self, points: &mut Vec<Point3<T>>) {
        points.clear();
        points.extend_from_slice(&self.convex_hull);
    }

    fn draw(&self, renderer: &mut dyn ShapeRenderer<T>) {
        if !self.convex_hull.is_empty() {
            renderer.draw_polygon(&self.convex_hull, self.color);
        }
    }
}
