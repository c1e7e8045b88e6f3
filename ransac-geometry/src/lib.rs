//! Geometric building blocks for fitting planar primitives to oriented point samples.
//!
//! This crate contains the pieces that do not depend on the primitive abstraction itself:
//! plane equations, in-plane bases, convex hulls in 2D and of planar point sets in 3D,
//! minimum-area enclosing rectangles and integer occupancy rasters.
use nalgebra::RealField;

mod enclosing_box;
mod hull;
mod primitives;
pub use enclosing_box::*;
pub use hull::*;
pub use primitives::*;

/// Scalar type used throughout the crate.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

pub mod raster;
pub mod util;

#[cfg(feature = "proptest-support")]
pub mod proptest;
