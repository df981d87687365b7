//! Index windows over a one-dimensional series.
//!
//! A window matrix `W` has one row per window; `series[W[[r, k]]]` is the
//! `k`-th element of window `r`. Two layouts are provided:
//!
//! - [`windowed`]: sliding windows with a configurable stride (distance
//!   between the starts of consecutive windows) and dilation (distance
//!   between elements inside a window).
//! - [`anchored`]: triples `(0, i, n − 1)` for every interior `i`.
use ndarray::Array2;

/// Sliding-window indices for a series of `length` elements.
///
/// Window `r` holds `r·stride + k·dilation` for `k = 0..window`. Only windows
/// that fit entirely inside `0..length` are produced, so the number of rows is
/// `(length − span) / stride + 1` with `span = dilation·(window − 1) + 1`, or
/// zero when `span > length`.
///
/// # Panics
/// - If `window`, `stride` or `dilation` is zero. These are programmer errors;
///   every caller in this crate passes compile-time constants.
///
/// # Examples
/// ```rust
/// # use rust_knee::geometry::windowed;
/// let w = windowed(7, 3, 2, 1);
/// assert_eq!(w.nrows(), 3);
/// assert_eq!(w.row(1).to_vec(), vec![2, 3, 4]);
/// ```
pub fn windowed(length: usize, window: usize, stride: usize, dilation: usize) -> Array2<usize> {
    assert!(window > 0 && stride > 0 && dilation > 0, "window, stride and dilation must be > 0");
    let span = dilation * (window - 1) + 1;
    let rows = if span > length { 0 } else { (length - span) / stride + 1 };
    Array2::from_shape_fn((rows, window), |(r, k)| r * stride + k * dilation)
}

/// Anchored index triples `(0, i, length − 1)` for `i = 1..length − 1`.
///
/// Returns an empty `0×3` matrix when `length < 3`.
pub fn anchored(length: usize) -> Array2<usize> {
    let rows = length.saturating_sub(2);
    Array2::from_shape_fn((rows, 3), |(r, k)| match k {
        0 => 0,
        1 => r + 1,
        _ => length - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The stride/dilation grid for a length-7 series, including the
    //   dilated layouts.
    // - Degenerate lengths (window larger than the series).
    // - Anchored triples.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check every stride/dilation combination on a length-7 series against
    // hand-written index matrices.
    //
    // Given
    // -----
    // - length = 7 and windows of size 3 or 4.
    //
    // Expect
    // ------
    // - Exact row-by-row equality with the expected grids.
    fn windowed_matches_hand_computed_grids() {
        assert_eq!(
            windowed(7, 3, 1, 1),
            array![[0usize, 1, 2], [1, 2, 3], [2, 3, 4], [3, 4, 5], [4, 5, 6]]
        );
        assert_eq!(
            windowed(7, 4, 1, 1),
            array![[0usize, 1, 2, 3], [1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]]
        );
        assert_eq!(windowed(7, 3, 2, 1), array![[0usize, 1, 2], [2, 3, 4], [4, 5, 6]]);
        assert_eq!(windowed(7, 4, 2, 1), array![[0usize, 1, 2, 3], [2, 3, 4, 5]]);
        assert_eq!(windowed(7, 3, 1, 2), array![[0usize, 2, 4], [1, 3, 5], [2, 4, 6]]);
        assert_eq!(windowed(7, 3, 2, 2), array![[0usize, 2, 4], [2, 4, 6]]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure dilated windows never index past the end of the series.
    //
    // Given
    // -----
    // - length = 7, window = 4, dilation = 2 (span 7).
    // - length = 2, window = 3 (span larger than the series).
    //
    // Expect
    // ------
    // - A single window `[0, 2, 4, 6]` for the first case.
    // - Zero rows for the second case.
    fn windowed_stays_in_bounds() {
        assert_eq!(windowed(7, 4, 1, 2), array![[0usize, 2, 4, 6]]);
        let empty = windowed(2, 3, 1, 1);
        assert_eq!(empty.nrows(), 0);
        assert_eq!(empty.ncols(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Verify the anchored layout pins the end points.
    //
    // Given
    // -----
    // - length = 5.
    //
    // Expect
    // ------
    // - Rows `(0, i, 4)` for `i = 1, 2, 3`; nothing for length < 3.
    fn anchored_pins_first_and_last() {
        assert_eq!(anchored(5), array![[0usize, 1, 4], [0, 2, 4], [0, 3, 4]]);
        assert_eq!(anchored(2).nrows(), 0);
    }
}
