use ransac_geometry::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Connectivity filtering is skipped for rasters with fewer cells than this in either
/// dimension, since the labelling is unreliable for such small footprints.
pub const MIN_CONNECTIVITY_RASTER_CELLS: usize = 10;

/// Resolutions of the rasters used to discretize supporting points in the plane.
///
/// Two passes rasterize the points of a plane, and they use *different* cell sizes:
///
/// - The footprint pass ([`PlanePrimitive::compute_shape_size`]) uses cells of size
///   `2 * connectedness_res`, from which it extracts the convex hull and the enclosing
///   rectangle of the footprint.
/// - The connectivity pass ([`PlanePrimitive::largest_connected_component`]) uses cells of
///   size `connectivity_res`. This is typically coarser, so that the largest component
///   survives occasional gaps between samples.
///
/// The two are not interchangeable: changing one of them changes the behavior of only
/// one of the passes.
///
/// [`PlanePrimitive::compute_shape_size`]: crate::plane::PlanePrimitive::compute_shape_size
/// [`PlanePrimitive::largest_connected_component`]: crate::plane::PlanePrimitive::largest_connected_component
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterResolution<T> {
    connectedness_res: T,
    connectivity_res: T,
}

impl<T> RasterResolution<T>
where
    T: Real,
{
    /// # Panics
    ///
    /// Panics if either resolution is not strictly positive.
    pub fn new(connectedness_res: T, connectivity_res: T) -> Self {
        assert!(connectedness_res > T::zero(), "Resolution must be positive.");
        assert!(connectivity_res > T::zero(), "Resolution must be positive.");
        Self {
            connectedness_res,
            connectivity_res,
        }
    }

    pub fn with_connectedness_res(self, connectedness_res: T) -> Self {
        Self::new(connectedness_res, self.connectivity_res)
    }

    pub fn with_connectivity_res(self, connectivity_res: T) -> Self {
        Self::new(self.connectedness_res, connectivity_res)
    }

    pub fn connectedness_res(&self) -> T {
        self.connectedness_res
    }

    pub fn connectivity_res(&self) -> T {
        self.connectivity_res
    }

    /// Cell size of the raster used for footprint extraction.
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn footprint_cell_size(&self) -> T {
        2.0 * self.connectedness_res
    }

    /// Cell size of the raster used for connectivity filtering.
    pub fn connectivity_cell_size(&self) -> T {
        self.connectivity_res
    }
}

impl<T> Default for RasterResolution<T>
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn default() -> Self {
        Self::new(0.01, 0.04)
    }
}
