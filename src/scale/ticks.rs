//! Tick planning for chart axes
//!
//! Given an axis value range and a desired tick-count range, derives a
//! human-friendly tick spacing (a power of ten, optionally subdivided by a
//! power of two) and the tick positions and label values that fall within
//! the range. The axis's own scale and the label spacing are independent
//! transforms: "niceness" of a spacing candidate is judged in label space,
//! while rendering positions live in axis-scaled space.

use crate::scale::transform::{descale_values, scale_values, TransformKind};
use crate::{PlotkitError, Result};

/// Absolute tolerance for recovering a boundary tick lost to floating-point
/// accumulation error.
const BOUNDARY_TOLERANCE: f64 = 1e-8;

/// An ordered set of planned ticks.
///
/// `positions` lie in axis-scaled space and `labels` are the corresponding
/// values in label (unscaled) space, so `position = scale(label)` holds for
/// every pair. Both sequences are parallel and ascend together; under a log
/// scale the positions appear compressed while the labels remain evenly
/// spaced in spacing space.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSet {
    /// Tick positions in axis-scaled space, strictly ascending
    pub positions: Vec<f64>,
    /// Tick label values in label space, parallel to `positions`
    pub labels: Vec<f64>,
}

impl TickSet {
    /// Number of ticks in the set
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the set contains no ticks
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Plan tick positions and labels for an axis.
///
/// `x0` and `x1` are the axis endpoints in *scaled* coordinate space (i.e.
/// already transformed if the axis itself is logarithmic) with `x0 < x1`.
/// `scale` is the axis's own coordinate transform and `spacing` the
/// transform deciding the increment between consecutive tick labels; the
/// two are independent.
///
/// The number of ticks produced usually falls within `[kmin, kmax]`, but
/// the underlying spacing search is greedy and does not re-verify the
/// final count; see [`tick_labels`].
///
/// # Panics
///
/// Panics if `kmin >= kmax` (contract violation).
pub fn compute_ticks(
    x0: f64,
    x1: f64,
    kmin: usize,
    kmax: usize,
    scale: TransformKind,
    spacing: TransformKind,
) -> Result<TickSet> {
    // Labels live in unscaled space, positions in scaled space.
    let unscaled = descale_values(&[x0, x1], scale)?;
    let labels = tick_labels(unscaled[0], unscaled[1], kmin, kmax, spacing)?;
    let positions = scale_values(&labels, scale)?;
    Ok(TickSet { positions, labels })
}

/// Generate tick label values for a range in label space.
///
/// The algorithm:
///
/// 1. Map the range into spacing space.
/// 2. Guess a base spacing `h = 10^spos` from the position of the range's
///    first significant digit (`spos = ceil(log10(range)) - 1`).
/// 3. For log10 spacing use `h` directly (log-spaced labels are never
///    subdivided below a power of ten); otherwise refine `h` through the
///    greedy `rational_interval` search.
/// 4. Floor the lower bound to a multiple of the chosen spacing, then bump
///    by `min(h, hopt)` until it re-enters the range.
/// 5. Step across the range with [`float_range`], round away
///    floating-point noise, and map back out of spacing space.
///
/// # Panics
///
/// Panics if `kmin >= kmax` (contract violation).
pub fn tick_labels(
    xmin: f64,
    xmax: f64,
    kmin: usize,
    kmax: usize,
    spacing: TransformKind,
) -> Result<Vec<f64>> {
    assert!(kmin < kmax, "kmin must be at least one less than kmax");

    let scaled = scale_values(&[xmin, xmax], spacing)?;
    let (smin, smax) = (scaled[0], scaled[1]);
    let range = smax - smin;
    if !range.is_finite() || range <= 0.0 {
        return Err(PlotkitError::DomainError(format!(
            "Tick range must be positive and finite, got {} under '{}' spacing",
            range,
            spacing.name()
        )));
    }

    // Position of the first significant digit of the range gives the crude
    // power-of-ten spacing guess.
    let spos = (range.log10().ceil() as i32) - 1;
    let h = 10f64.powi(spos);
    let hopt = if spacing == TransformKind::Log10 {
        h
    } else {
        rational_interval(range, h, kmin, kmax)
    };

    // Sanitized starting tick: floor to a multiple of hopt, then correct
    // for floor overshoot below the range.
    let mut tmin = (smin / hopt).floor() * hopt;
    let step = h.min(hopt);
    while tmin < smin {
        tmin += step;
    }

    let digits = spos.abs().max(8);
    let ticks: Vec<f64> = float_range(tmin, smax, hopt)
        .into_iter()
        .map(|t| round_to(t, digits))
        .collect();

    descale_values(&ticks, spacing)
}

/// Greedy search for a "nice" tick spacing.
///
/// `x` is the extent of the range, `h` the proposed spacing (an integral
/// power of ten) and `[kmin, kmax]` the target tick-count bounds. The
/// spacing `h / 2^m` remains convenient to mark on an axis, so when `h`
/// would yield too few ticks it is halved `m` times; when it is already
/// too fine it is coarsened to an integer multiple `h * m` instead.
///
/// Warning: this is greedy and non-backtracking. Once a spacing is chosen
/// the resulting tick count is not re-checked against `[kmin, kmax]`, so
/// the bounds are a best-effort target, not a guarantee.
fn rational_interval(x: f64, h: f64, kmin: usize, kmax: usize) -> f64 {
    let m = ((h * kmin as f64).log2() - x.log2()).ceil();
    if m < 0.0 {
        let m = (x / (h * kmax as f64)).ceil();
        h * m
    } else {
        h / 2f64.powf(m)
    }
}

/// Ascending sequence from `xmin` to `xmax` (exclusive) stepping by `sep`,
/// with boundary recovery.
///
/// Naive stepping sometimes drops a legitimate final value to accumulated
/// floating-point error; if the next step past the generated sequence lands
/// within `1e-8` of `xmax` it is appended.
pub fn float_range(xmin: f64, xmax: f64, sep: f64) -> Vec<f64> {
    let count = ((xmax - xmin) / sep).ceil();
    let count = if count > 0.0 { count as usize } else { 0 };
    let mut res: Vec<f64> = (0..count).map(|i| xmin + i as f64 * sep).collect();
    if let Some(&last) = res.last() {
        let next = last + sep;
        if (next - xmax).abs() < BOUNDARY_TOLERANCE {
            res.push(next);
        }
    }
    res
}

/// Insert caller-forced tick labels into an already sorted tick set.
///
/// Each forced label is mapped into position space under `scale` and
/// spliced into the sequences at its sorted index, unless that exact label
/// value is already present. Deduplication is by label equality only, not
/// by position. Returns a new `TickSet`; the input is untouched.
pub fn force_insert_ticks(
    ticks: &TickSet,
    marks: &[f64],
    scale: TransformKind,
) -> Result<TickSet> {
    let insert_positions = scale_values(marks, scale)?;
    let mut positions = ticks.positions.clone();
    let mut labels = ticks.labels.clone();
    for (&pos, &mark) in insert_positions.iter().zip(marks) {
        if !labels.contains(&mark) {
            let idx = positions.partition_point(|&p| p < pos);
            positions.insert(idx, pos);
            labels.insert(idx, mark);
        }
    }
    Ok(TickSet { positions, labels })
}

/// Round to a number of decimal places, suppressing floating-point noise.
fn round_to(x: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (x * factor).round() / factor
}
