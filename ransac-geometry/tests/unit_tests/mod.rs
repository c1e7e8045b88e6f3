mod enclosing_box;
mod hull;

/// Compares two arrays for *shift-invariant* equality with the given comparator function.
///
/// If `X` and `Y` are the two arrays, then the two arrays are shift-invariant equal if X can be shifted/rotated
/// by some constant `n` such that `Shift(X) == Y`.
pub fn slices_are_equal_shift_invariant<T, C: Fn(&T, &T) -> bool>(x: &[T], y: &[T], comparator: C) -> bool {
    let n = x.len();
    if y.len() != n {
        return false;
    } else if n == 0 {
        return true;
    }

    (0..n).any(|i_start| {
        y.iter()
            .enumerate()
            .all(|(j, y_j)| comparator(&x[(j + i_start) % n], y_j))
    })
}

#[test]
fn slices_are_equal_shift_invariant_basic_examples() {
    let cmp = |a: &u32, b: &u32| a == b;

    assert!(slices_are_equal_shift_invariant(&[], &[], &cmp));
    assert!(slices_are_equal_shift_invariant(&[1, 2, 3], &[3, 1, 2], &cmp));
    assert!(slices_are_equal_shift_invariant(&[1, 2, 3], &[2, 3, 1], &cmp));
    assert!(!slices_are_equal_shift_invariant(&[1, 2, 3], &[2, 1, 3], &cmp));
    assert!(!slices_are_equal_shift_invariant(&[1, 2], &[1, 2, 3], &cmp));
}
