use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// How tic values are turned into label text.
#[derive(Clone, Default)]
pub enum TicFormat {
    /// Shortest decimal form, up to six fractional digits.
    #[default]
    Default,
    /// Fixed number of decimals.
    Fixed(usize),
    /// Thousands/millions/billions suffixes.
    Compact,
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl TicFormat {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            TicFormat::Default => format_tic(value),
            TicFormat::Fixed(decimals) => format_fixed(value, *decimals),
            TicFormat::Compact => format_compact(value),
            TicFormat::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for TicFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicFormat::Default => f.write_str("Default"),
            TicFormat::Fixed(d) => f.debug_tuple("Fixed").field(d).finish(),
            TicFormat::Compact => f.write_str("Compact"),
            TicFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Serializable subset of [`TicFormat`] used by chart configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicFormatKind {
    Default,
    Compact,
    Fixed(usize),
}

impl From<TicFormatKind> for TicFormat {
    fn from(kind: TicFormatKind) -> Self {
        match kind {
            TicFormatKind::Default => TicFormat::Default,
            TicFormatKind::Compact => TicFormat::Compact,
            TicFormatKind::Fixed(d) => TicFormat::Fixed(d),
        }
    }
}

/// Default tic label: `2`, `0.3`, `-1.25`.
pub fn format_tic(value: f64) -> String {
    if !value.is_finite() {
        return format_fixed(value, 0);
    }
    let s = trim_trailing_zeroes(format!("{value:.6}"));
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    format!("{value:.decimals$}")
}

pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return format_fixed(value, 0);
    }
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        return format_with_suffix(value / 1_000_000_000.0, "B");
    }
    if abs >= 1_000_000.0 {
        return format_with_suffix(value / 1_000_000.0, "M");
    }
    if abs >= 1_000.0 {
        return format_with_suffix(value / 1_000.0, "K");
    }

    trim_trailing_zeroes(format!("{value:.3}"))
}

fn format_with_suffix(value: f64, suffix: &str) -> String {
    format!("{}{}", trim_trailing_zeroes(format!("{value:.2}")), suffix)
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_shortest_decimal() {
        assert_eq!(format_tic(2.0), "2");
        assert_eq!(format_tic(0.3), "0.3");
        assert_eq!(format_tic(-1.25), "-1.25");
        assert_eq!(format_tic(-0.0), "0");
    }

    #[test]
    fn default_format_hides_float_noise() {
        assert_eq!(format_tic(0.1 + 0.2), "0.3");
    }

    #[test]
    fn compact_uses_suffixes() {
        assert_eq!(format_compact(12_400.0), "12.4K");
        assert_eq!(format_compact(2_000_000.0), "2M");
    }

    #[test]
    fn custom_formatter_is_called() {
        let f = TicFormat::custom(|v| format!("{v}%"));
        assert_eq!(f.format(50.0), "50%");
        assert_eq!(TicFormat::Fixed(2).format(1.0), "1.00");
    }
}
