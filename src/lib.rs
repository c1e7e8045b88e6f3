//! Planar shape primitives for RANSAC-based shape detection in oriented point clouds.
//!
//! The central type is [`PlanePrimitive`], which a RANSAC driver constructs from minimal
//! samples of three oriented points, classifies inliers with, filters for spatial
//! connectivity and summarizes by a footprint. All primitives implement the
//! [`ShapePrimitive`] contract, and [`Primitive`] collects them into a closed set of variants.
pub mod error;
pub mod plane;
pub mod primitive;
pub mod resolution;

pub mod geometry {
    pub use ransac_geometry::*;
}

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub extern crate nalgebra;

pub use error::{ConstructionError, FootprintError};
pub use plane::PlanePrimitive;
pub use primitive::{InlierThresholds, Primitive, ShapeKind, ShapePrimitive, ShapeRenderer};
pub use ransac_geometry::Real;
pub use resolution::RasterResolution;
