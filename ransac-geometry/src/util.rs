use crate::Real;
use nalgebra::{UnitVector3, Vector3};

pub fn compute_orthonormal_vectors_3d<T: Real>(vector: &UnitVector3<T>) -> [UnitVector3<T>; 2] {
    // Ported from
    // https://github.com/dimforge/parry/blob/ac8dcf0197066cd2413a20e4420961b4694996c0/src/utils/wops.rs#L120-L138
    // originally based on the Pixar paper "Building an Orthonormal Basis, Revisited",
    // https://graphics.pixar.com/library/OrthonormalB/paper.pdf
    let v = vector;
    let sign = T::copysign(T::one(), v.z);
    let a = -T::one() / (sign + v.z);
    let b = v.x * v.y * a;

    [
        Vector3::new(T::one() + sign * v.x * v.x * a, sign * b, -sign * v.x),
        Vector3::new(b, sign + v.y * v.y * a, -v.y),
    ]
    .map(UnitVector3::new_unchecked)
}

/// Removes the component of `vector` along `normal` and normalizes the remainder.
///
/// Returns `None` if `vector` is (numerically) parallel to `normal`.
pub fn orthogonalize_against<T: Real>(vector: &Vector3<T>, normal: &UnitVector3<T>) -> Option<UnitVector3<T>> {
    let tangential = vector - normal.as_ref() * normal.dot(vector);
    UnitVector3::try_new(tangential, T::default_epsilon().sqrt())
}

/// Builds a right-handed orthonormal basis `[t, n x t]` of the plane with the given normal,
/// where `t` is `direction` normalized.
///
/// `direction` is expected to lie in the plane. Returns `None` if it has zero length or
/// the result is not finite.
pub fn in_plane_basis<T: Real>(direction: &Vector3<T>, normal: &UnitVector3<T>) -> Option<[UnitVector3<T>; 2]> {
    let first = UnitVector3::try_new(direction.clone(), T::default_epsilon().sqrt())?;
    let second = UnitVector3::try_new(normal.cross(first.as_ref()), T::default_epsilon().sqrt())?;
    let finite = first.iter().chain(second.iter()).all(|x| x.is_finite());
    finite.then(|| [first, second])
}

/// Returns the columns of a rotation matrix whose first axis is `normal` and whose second
/// axis is `secondary` orthogonalized against the normal.
///
/// Falls back to an arbitrary orthonormal completion when `secondary` is parallel to
/// the normal.
pub fn frame_from_normal_and_secondary<T: Real>(
    normal: &UnitVector3<T>,
    secondary: &Vector3<T>,
) -> [UnitVector3<T>; 3] {
    let second = orthogonalize_against(secondary, normal).unwrap_or_else(|| compute_orthonormal_vectors_3d(normal)[0]);
    let third = UnitVector3::new_normalize(normal.cross(second.as_ref()));
    [normal.clone(), second, third]
}
