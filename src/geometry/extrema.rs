//! First-occurrence extremum search over score vectors.
//!
//! Ties resolve to the lowest index, and `NaN` entries are skipped. Both
//! functions return `None` only when no comparable entry exists.
use ndarray::ArrayView1;

/// Index of the first maximum of `values`, ignoring `NaN`.
pub fn argmax(values: ArrayView1<f64>) -> Option<usize> {
    first_extremum(values, |candidate, best| candidate > best)
}

/// Index of the first minimum of `values`, ignoring `NaN`.
pub fn argmin(values: ArrayView1<f64>) -> Option<usize> {
    first_extremum(values, |candidate, best| candidate < best)
}

fn first_extremum<F>(values: ArrayView1<f64>, better: F) -> Option<usize>
where
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if !better(value, current) => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Ties must resolve to the earliest index and NaN must be skipped.
    //
    // Given
    // -----
    // - [NaN, 1, 3, 3, -2, -2].
    //
    // Expect
    // ------
    // - argmax = 2, argmin = 4.
    fn extrema_prefer_first_occurrence() {
        let values = array![f64::NAN, 1.0, 3.0, 3.0, -2.0, -2.0];
        assert_eq!(argmax(values.view()), Some(2));
        assert_eq!(argmin(values.view()), Some(4));
    }

    #[test]
    // Purpose
    // -------
    // Empty and all-NaN inputs have no extremum.
    //
    // Given
    // -----
    // - An empty vector and a vector of NaNs.
    //
    // Expect
    // ------
    // - `None` for both.
    fn extrema_of_empty_or_nan_is_none() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(argmax(empty.view()), None);
        assert_eq!(argmin(array![f64::NAN, f64::NAN].view()), None);
    }
}
