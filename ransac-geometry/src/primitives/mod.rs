mod plane;

pub use plane::*;
