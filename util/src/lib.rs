use nalgebra::{Point3, Vector3};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// An oriented point cloud, stored as separate point and normal arrays.
#[derive(Debug, Clone, Default)]
pub struct OrientedCloud {
    pub points: Vec<Point3<f64>>,
    pub normals: Vec<Vector3<f64>>,
}

impl OrientedCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point3<f64>, normal: Vector3<f64>) -> usize {
        self.points.push(point);
        self.normals.push(normal);
        self.points.len() - 1
    }

    /// Adds a regular grid of points `origin + i * spacing * u + j * spacing * v` for
    /// `i in 0..nu`, `j in 0..nv`, all with the given normal. Returns the indices of the new points.
    pub fn push_grid(
        &mut self,
        origin: Point3<f64>,
        [u, v]: [Vector3<f64>; 2],
        spacing: f64,
        [nu, nv]: [usize; 2],
        normal: Vector3<f64>,
    ) -> Vec<usize> {
        let mut indices = Vec::with_capacity(nu * nv);
        for i in 0..nu {
            for j in 0..nv {
                let point = origin + u * (i as f64 * spacing) + v * (j as f64 * spacing);
                indices.push(self.push(point, normal));
            }
        }
        indices
    }

    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }
}
