use serde::{Deserialize, Serialize};

use crate::series::Series;

/// Half-width added around a degenerate (single-value) range.
pub const DEGENERATE_WIDENING: f64 = 0.1;

/// Substitute for a non-positive lower bound before taking log10.
pub const LOG_FLOOR: f64 = 0.001;

/// Which axis a range or value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisKind {
    X,
    Y,
}

/// Closed numeric interval `[min, max]` in data units.
///
/// Constructed values are normalized so that `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Inclusive on both ends.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn union(self, other: Range) -> Range {
        Range {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Turn `[v, v]` into `[v - 0.1, v + 0.1]`.
    pub fn widen_degenerate(self) -> Range {
        if self.min == self.max {
            Range {
                min: self.min - DEGENERATE_WIDENING,
                max: self.max + DEGENERATE_WIDENING,
            }
        } else {
            self
        }
    }

    /// Grow the range by fractions of its own span on each side.
    pub fn extend(self, extension: Extension) -> Range {
        let delta = self.span();
        Range {
            min: self.min - extension.lower * delta,
            max: self.max + extension.upper * delta,
        }
    }

    /// Map both bounds into log10 space.
    ///
    /// A non-positive `min` is replaced by [`LOG_FLOOR`] first. If `max` also
    /// lies at or below the floor the result is widened so it keeps a span.
    pub fn log10(self) -> Range {
        let min = if self.min <= 0.0 { LOG_FLOOR } else { self.min };
        let max = self.max.max(min);
        Range {
            min: min.log10(),
            max: max.log10(),
        }
        .widen_degenerate()
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Fractional padding added below and above a computed range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub lower: f64,
    pub upper: f64,
}

impl Extension {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

/// How an axis range is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RangeSpec {
    /// Union of all visible series, then extended (and log-transformed).
    #[default]
    Auto,
    /// Used as given. Not extended and not log-transformed.
    Fixed(Range),
}

impl RangeSpec {
    pub fn fixed(a: f64, b: f64) -> Self {
        Self::Fixed(Range::new(a, b))
    }
}

/// Compute the range displayed on one axis.
pub fn compute_range<'a, I>(
    spec: RangeSpec,
    series: I,
    axis: AxisKind,
    extension: Extension,
    logscale: bool,
) -> Range
where
    I: IntoIterator<Item = &'a Series>,
{
    match spec {
        RangeSpec::Fixed(range) => range.widen_degenerate(),
        RangeSpec::Auto => {
            let mut union: Option<Range> = None;
            for s in series {
                if !s.is_visible() {
                    continue;
                }
                let r = match axis {
                    AxisKind::X => s.x_range(),
                    AxisKind::Y => s.y_range(),
                };
                if let Some(r) = r {
                    union = Some(match union {
                        Some(u) => u.union(r),
                        None => r,
                    });
                }
            }

            let range = union.unwrap_or_default().extend(extension);
            if logscale {
                range.log10()
            } else {
                range
            }
        }
    }
}

/// Per-axis inputs to [`compute_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeSettings {
    pub spec: RangeSpec,
    pub extension: Extension,
    pub logscale: bool,
}

/// Ranges for both axes, in `(x, y)` order.
pub fn compute_ranges(series: &[&Series], x: RangeSettings, y: RangeSettings) -> (Range, Range) {
    (
        compute_range(
            x.spec,
            series.iter().copied(),
            AxisKind::X,
            x.extension,
            x.logscale,
        ),
        compute_range(
            y.spec,
            series.iter().copied(),
            AxisKind::Y,
            y.extension,
            y.logscale,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn new_normalizes_order() {
        let r = Range::new(5.0, -1.0);
        assert_eq!(r, Range { min: -1.0, max: 5.0 });
    }

    #[test]
    fn degenerate_range_is_widened() {
        let r = Range::new(5.0, 5.0).widen_degenerate();
        assert!(close(r.min, 4.9));
        assert!(close(r.max, 5.1));
    }

    #[test]
    fn extension_uses_fractions_of_span() {
        let r = Range::new(0.0, 10.0).extend(Extension::new(0.1, 0.2));
        assert!(close(r.min, -1.0));
        assert!(close(r.max, 12.0));
    }

    #[test]
    fn log_clamps_non_positive_min() {
        let r = Range::new(-5.0, 100.0).log10();
        assert!(close(r.min, -3.0));
        assert!(close(r.max, 2.0));
    }

    #[test]
    fn log_of_non_positive_range_keeps_a_span() {
        let r = Range::new(-5.0, -1.0).log10();
        assert!(r.is_valid());
    }

    #[test]
    fn no_series_falls_back_to_unit_range() {
        let r = compute_range(
            RangeSpec::Auto,
            std::iter::empty(),
            AxisKind::X,
            Extension::default(),
            false,
        );
        assert_eq!(r, Range::new(0.0, 1.0));
    }

    #[test]
    fn fixed_range_ignores_extension_and_log() {
        let r = compute_range(
            RangeSpec::fixed(2.0, 8.0),
            std::iter::empty(),
            AxisKind::Y,
            Extension::new(0.5, 0.5),
            true,
        );
        assert_eq!(r, Range::new(2.0, 8.0));
    }

    #[test]
    fn auto_range_unions_visible_series_only() {
        let a = Series::from_points("a", &[(0.0, 1.0), (4.0, 3.0)]);
        let b = Series::from_points("b", &[(-2.0, 10.0), (1.0, 2.0)]);
        let mut hidden = Series::from_points("hidden", &[(100.0, 100.0)]);
        hidden.set_visible(false);

        let all = [&a, &b, &hidden];
        let (x, y) = compute_ranges(&all, RangeSettings::default(), RangeSettings::default());
        assert_eq!(x, Range::new(-2.0, 4.0));
        assert_eq!(y, Range::new(1.0, 10.0));
    }

    #[test]
    fn empty_series_do_not_contribute() {
        let a = Series::from_points("a", &[(3.0, 3.0), (6.0, 4.0)]);
        let empty = Series::from_points("empty", &[]);
        let r = compute_range(
            RangeSpec::Auto,
            [&a, &empty],
            AxisKind::X,
            Extension::default(),
            false,
        );
        assert_eq!(r, Range::new(3.0, 6.0));
    }
}
