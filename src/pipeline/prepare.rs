//! pipeline::prepare — stage composition and the public entry points.
//!
//! Purpose
//! -------
//! Chain the independent stages (parse → order → normalize → smooth →
//! classify → canonicalize → detect → restore) into [`KneePipeline`], and
//! expose the one-call helpers [`find_knee`] and [`find_knee_consensus`].
//!
//! Key behaviors
//! -------------
//! - Ordering is a stable sort by x when `KneeOptions::sort` is set; the
//!   permutation is kept so the knee can be reported in the caller's order.
//! - Smoothing runs on the normalized series and is skipped when λ = 0. The
//!   smoothed curve is not rescaled.
//! - Orientation is classified on the (possibly smoothed) ordinates, the
//!   method runs on the canonical mirror, and its index is mapped back.
//!
//! Invariants & assumptions
//! ------------------------
//! - Reported indices refer to the sorted series; `source_index` refers to
//!   the caller's input order. Without sorting the two coincide.
//! - No stage mutates its input; each returns a fresh [`PointSeries`].
//!
//! Downstream usage
//! ----------------
//! - Rust callers use [`KneePipeline`] for the full [`KneeReport`], or
//!   [`find_knee`] for the bare index.
//! - The Python bridge calls [`find_knee`] and [`find_knee_consensus`].
use crate::{
    methods::{
        consensus::{cast_ballots, majority},
        registry::KneeMethod,
    },
    pipeline::{
        errors::{KneeError, KneeResult},
        input::PointInput,
        options::{KneeOptions, verify_smoothing},
        orientation::KneeType,
        series::{PointSeries, normalize, require_increasing_x, sort_by_x},
    },
    smoothing::cubic_spline_smoothing,
};

/// Series ready for detection, plus what is needed to map an index back.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSeries {
    /// Input in detection order (sorted if requested), original units.
    pub ordered: PointSeries,
    /// `ordered[i] = input[order[i]]`.
    pub order: Vec<usize>,
    /// Orientation of the normalized, smoothed curve.
    pub knee_type: KneeType,
    /// Increasing concave mirror handed to the methods.
    pub canonical: PointSeries,
}

impl PreparedSeries {
    /// Map a canonical index to `(sorted index, input index)`.
    pub fn restore(&self, canonical_index: usize) -> (usize, usize) {
        let index = self.knee_type.restore_index(canonical_index, self.ordered.len());
        (index, self.order[index])
    }
}

/// Knee located by a single method.
#[derive(Debug, Clone, PartialEq)]
pub struct KneeReport {
    pub method: KneeMethod,
    /// Index into the sorted series.
    pub index: usize,
    /// Index into the caller's input.
    pub source_index: usize,
    pub knee_type: KneeType,
    /// Knee abscissa in input units.
    pub x: f64,
    /// Knee ordinate in input units.
    pub y: f64,
}

/// Result of a majority vote across all methods.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusOutcome {
    /// Winning index into the sorted series.
    pub index: usize,
    pub source_index: usize,
    /// Number of methods that returned `index`.
    pub votes: usize,
    pub knee_type: KneeType,
    /// Every method's outcome, restored to sorted indices, in registry order.
    pub ballots: Vec<(KneeMethod, KneeResult<usize>)>,
}

/// Composed knee-detection pipeline for one method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneePipeline {
    pub method: KneeMethod,
    pub options: KneeOptions,
}

impl KneePipeline {
    pub fn new(method: KneeMethod, options: KneeOptions) -> Self {
        Self { method, options }
    }

    /// Build from a method name.
    ///
    /// # Errors
    /// - `KneeError::UnknownMethod` if `name` is not a registered method.
    pub fn from_name(name: &str, options: KneeOptions) -> KneeResult<Self> {
        let method: KneeMethod = name.parse()?;
        Ok(Self::new(method, options))
    }

    /// Run every stage and report the knee.
    ///
    /// # Errors
    /// Any stage error: input shape, degenerate input, numerical failure, or
    /// the method's own `NoKneeFound` / `TooFewPoints`.
    pub fn run(&self, input: impl Into<PointInput>) -> KneeResult<KneeReport> {
        let prepared = prepare(input, &self.options)?;
        let canonical = &prepared.canonical;
        let found = self.method.detect(canonical.x(), canonical.y(), &self.options.methods)?;
        let (index, source_index) = prepared.restore(found);
        let (x, y) = prepared.ordered.point(index);
        Ok(KneeReport {
            method: self.method,
            index,
            source_index,
            knee_type: prepared.knee_type,
            x,
            y,
        })
    }
}

// ---- Stages ----

/// Parse, order, normalize, smooth, classify and canonicalize.
///
/// # Errors
/// - Input-shape errors from parsing.
/// - `DuplicateX` / `XNotIncreasing` from ordering.
/// - `ConstantAxis` from normalization.
/// - `InvalidSmoothing` and the smoothing solver's numerical errors.
pub fn prepare(input: impl Into<PointInput>, options: &KneeOptions) -> KneeResult<PreparedSeries> {
    verify_smoothing(options.smoothing)?;
    let series = PointSeries::parse(input)?;
    let (ordered, order) = order_points(series, options.sort)?;
    let unit = smooth(normalize(&ordered)?, options.smoothing)?;
    let knee_type = KneeType::classify(unit.y());
    let canonical = knee_type.canonicalize(&unit);
    Ok(PreparedSeries { ordered, order, knee_type, canonical })
}

/// Sort by x when requested, then require strictly increasing x.
pub fn order_points(series: PointSeries, sort: bool) -> KneeResult<(PointSeries, Vec<usize>)> {
    let (ordered, order) = if sort {
        sort_by_x(&series)
    } else {
        let order = (0..series.len()).collect();
        (series, order)
    };
    require_increasing_x(&ordered, sort)?;
    Ok((ordered, order))
}

/// Apply the cubic smoothing spline when `lambda > 0`.
pub fn smooth(series: PointSeries, lambda: f64) -> KneeResult<PointSeries> {
    if lambda == 0.0 {
        return Ok(series);
    }
    let y = cubic_spline_smoothing(series.x(), series.y(), lambda)?;
    Ok(PointSeries::from_parts(series.x().to_owned(), y))
}

// ---- Entry points ----

/// Knee index (in sorted order) for the named method.
///
/// # Errors
/// - `KneeError::InvalidSmoothing` for a negative or non-finite `smoothing`.
/// - `KneeError::UnknownMethod` for an unregistered `method`.
/// - Anything [`KneePipeline::run`] reports.
pub fn find_knee(
    input: impl Into<PointInput>, method: &str, smoothing: f64, sort: bool,
) -> KneeResult<usize> {
    let options = KneeOptions::with_smoothing(smoothing, sort)?;
    Ok(KneePipeline::from_name(method, options)?.run(input)?.index)
}

/// Run every method and return the most frequent knee.
///
/// Failed methods cast no vote; ties go to the index voted for first in
/// [`KneeMethod::ALL`] order.
///
/// # Errors
/// - Any preparation error (shared by all methods).
/// - `KneeError::NoConsensus` if every method failed.
pub fn find_knee_consensus(
    input: impl Into<PointInput>, options: &KneeOptions,
) -> KneeResult<ConsensusOutcome> {
    let prepared = prepare(input, options)?;
    let canonical = &prepared.canonical;
    let ballots = cast_ballots(canonical.x(), canonical.y(), &options.methods);
    let (winner, votes) =
        majority(&ballots).ok_or(KneeError::NoConsensus { attempted: ballots.len() })?;
    let (index, source_index) = prepared.restore(winner);
    let ballots = ballots
        .into_iter()
        .map(|ballot| {
            let outcome = ballot.outcome.map(|found| prepared.restore(found).0);
            (ballot.method, outcome.map_err(KneeError::from))
        })
        .collect();
    Ok(ConsensusOutcome { index, source_index, votes, knee_type: prepared.knee_type, ballots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end runs on small curves with known knees.
    // - Index mapping back to the caller's order.
    // - Ordering failures with and without sorting.
    // - Consensus voting and its report.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A convex rising series reports its knee in input units.
    //
    // Given
    // -----
    // - y = [1, 2, 3, 4, 6] with implied x.
    //
    // Expect
    // ------
    // - Index 3, point (3, 4), orientation increasing convex.
    fn report_carries_point_and_orientation() {
        let pipeline = KneePipeline::new(KneeMethod::MengerSuccessive, KneeOptions::default());
        let report = pipeline.run(vec![1.0, 2.0, 3.0, 4.0, 6.0]).unwrap();
        assert_eq!((report.index, report.source_index), (3, 3));
        assert_eq!((report.x, report.y), (3.0, 4.0));
        assert_eq!(report.knee_type, KneeType::IncreasingConvex);
    }

    #[test]
    // Purpose
    // -------
    // Sorting is tracked so the knee can be located in the input.
    //
    // Given
    // -----
    // - The previous curve with its points shuffled.
    //
    // Expect
    // ------
    // - Sorted index 3; the sample x = 3 sits at input position 2.
    fn shuffled_input_reports_source_index() {
        let input = (vec![4.0, 0.0, 3.0, 1.0, 2.0], vec![6.0, 1.0, 4.0, 2.0, 3.0]);
        let report = KneePipeline::new(KneeMethod::Angle, KneeOptions::default())
            .run(input)
            .unwrap();
        assert_eq!((report.index, report.source_index), (3, 2));
        assert_eq!(report.x, 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Ordering failures depend on the sort flag.
    //
    // Given
    // -----
    // - Shuffled x with sorting off; a repeated x with sorting on.
    //
    // Expect
    // ------
    // - XNotIncreasing { 1 } and DuplicateX { 2 }.
    fn ordering_failures_follow_sort_flag() {
        let shuffled = (vec![4.0, 0.0, 3.0, 1.0, 2.0], vec![6.0, 1.0, 4.0, 2.0, 3.0]);
        assert_eq!(
            find_knee(shuffled, "angle", 0.0, false),
            Err(KneeError::XNotIncreasing { index: 1 })
        );
        let repeated = (vec![0.0, 1.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0, 3.0, 5.0]);
        assert_eq!(
            find_knee(repeated, "angle", 0.0, true),
            Err(KneeError::DuplicateX { index: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Smoothing is validated up front and otherwise runs through.
    //
    // Given
    // -----
    // - A noisy elbow; λ = −1 and λ = 0.05.
    //
    // Expect
    // ------
    // - InvalidSmoothing for λ < 0; an interior index for λ > 0.
    fn smoothing_is_validated_and_applied() {
        let y = vec![1.0, 1.05, 1.15, 1.28, 1.30, 2.5, 3.6, 4.9];
        assert_eq!(
            find_knee(y.clone(), "menger_successive", -1.0, true),
            Err(KneeError::InvalidSmoothing { value: -1.0 })
        );
        let index = find_knee(y, "menger_successive", 0.05, true).unwrap();
        assert!(index > 0 && index < 7, "unexpected knee {index}");
    }

    #[test]
    // Purpose
    // -------
    // Unregistered names are rejected before any work.
    //
    // Given
    // -----
    // - Method "curvature".
    //
    // Expect
    // ------
    // - UnknownMethod naming it.
    fn unknown_method_is_rejected() {
        assert_eq!(
            find_knee(vec![1.0, 2.0, 3.0, 4.0, 6.0], "curvature", 0.0, true),
            Err(KneeError::UnknownMethod { name: "curvature".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // The vote picks the index most methods agree on.
    //
    // Given
    // -----
    // - y = [1.0, 1.05, 1.15, 1.28, 1.30, 2.5, 3.6, 4.9].
    //
    // Expect
    // ------
    // - Index 4 with six votes; OLS swiping and the C-method vote 5.
    fn consensus_picks_majority_index() {
        let y = array![1.0, 1.05, 1.15, 1.28, 1.30, 2.5, 3.6, 4.9];
        let outcome = find_knee_consensus(y, &KneeOptions::default()).unwrap();
        assert_eq!((outcome.index, outcome.votes), (4, 6));
        assert_eq!(outcome.ballots.len(), KneeMethod::ALL.len());
        for (method, result) in &outcome.ballots {
            let expected = match method {
                KneeMethod::OlsSwiping | KneeMethod::CMethod => 5,
                _ => 4,
            };
            assert_eq!(result, &Ok(expected), "method {method}");
        }
    }
}
