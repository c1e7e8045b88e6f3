//! Error types for primitive construction and footprint computation.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Reasons for rejecting a minimal sample when constructing a primitive.
///
/// All variants mean the same thing to a RANSAC driver: discard the candidate and resample.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The sample does not consist of exactly the required number of points and normals.
    WrongSampleSize {
        required: usize,
        points: usize,
        normals: usize,
    },
    /// The sample points are (numerically) collinear or coincide, so that no finite plane
    /// equation exists.
    DegenerateSample,
    /// The measured normal of the sample point with the given index deviates from the
    /// fitted normal by more than the angle threshold.
    NormalMismatch { sample_index: usize },
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            &ConstructionError::WrongSampleSize {
                required,
                points,
                normals,
            } => {
                write!(
                    f,
                    "Sample must contain exactly {} points and normals, got {} points and {} normals.",
                    required, points, normals
                )
            }
            &ConstructionError::DegenerateSample => {
                write!(f, "Sample points are degenerate (collinear or coincident).")
            }
            &ConstructionError::NormalMismatch { sample_index } => {
                write!(
                    f,
                    "Normal of sample point {} disagrees with the fitted normal.",
                    sample_index
                )
            }
        }
    }
}

impl Error for ConstructionError {}

/// Reasons for failing to compute the footprint of a primitive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FootprintError {
    /// There are no supporting points to compute a footprint from.
    EmptySupport,
    /// Rasterizing the supporting points produced no extractable contour.
    NoContour { width: usize, height: usize },
    /// The supporting points are spread over more raster cells than can be allocated.
    RasterTooLarge { width: usize, height: usize },
}

impl Display for FootprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            &FootprintError::EmptySupport => write!(f, "Footprint requires at least one supporting point."),
            &FootprintError::NoContour { width, height } => {
                write!(f, "No contours found in footprint raster of size {}x{}.", width, height)
            }
            &FootprintError::RasterTooLarge { width, height } => {
                write!(f, "Footprint raster of size {}x{} is too large.", width, height)
            }
        }
    }
}

impl Error for FootprintError {}
