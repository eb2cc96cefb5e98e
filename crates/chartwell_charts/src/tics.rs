//! Tic positions on a "nice" decimal grid.

use crate::range::Range;

/// Compute tic values for `range`.
///
/// Let `base = 10^floor(log10(span))`. Candidates are `(i + j/10) * base`
/// for `i` covering one base step beyond each end and `j` in `0..10`; the
/// ones inside the closed range are returned in ascending order.
///
/// On a log axis the range is already in log10 space and the same grid is
/// used. The log flag is accepted so callers pass the axis state through
/// unchanged.
///
/// A degenerate or non-finite range yields no tics.
pub fn compute_tics(range: Range, _logscale: bool) -> Vec<f64> {
    let delta = range.span().abs();
    if !delta.is_finite() || delta <= 0.0 || !range.min.is_finite() {
        return Vec::new();
    }

    let mut exp = delta.log10().floor() as i32;
    if delta / 10f64.powi(exp) < 1.0 {
        exp -= 1;
    }
    let base = 10f64.powi(exp);

    // Tenths of `base` as an exact integer step count. Dividing by a power
    // of ten (instead of multiplying by 0.1) keeps values like 0.3 exact.
    let step_exp = exp - 1;
    let value_of = |k: i64| -> f64 {
        if step_exp >= 0 {
            k as f64 * 10f64.powi(step_exp)
        } else {
            k as f64 / 10f64.powi(-step_exp)
        }
    };

    let first = (range.min / base).floor() as i64 - 1;
    let last = (range.max / base).floor() as i64 + 1;

    let mut tics = Vec::with_capacity(((last - first + 1) * 10) as usize);
    for i in first..=last {
        for j in 0..10 {
            let v = value_of(i * 10 + j);
            if range.contains(v) {
                tics.push(v);
            }
        }
    }
    tics
}
