//! Chart configuration files (TOML)
//!
//! Every field is optional; anything left out keeps the chart's current
//! setting. Unknown keys are rejected.

use std::fs;
use std::path::Path;

use chartwell_paint::Color;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::Result;
use crate::format::TicFormatKind;
use crate::legend::LegendPosition;
use crate::line_chart::LineChart;
use crate::object::Drawable;
use crate::palette::Palette;
use crate::range::{Extension, RangeSpec};
use crate::style::LineStyle;

/// Top-level chart configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(default)]
    pub title: Option<String>,
    /// Built-in palette name (`tango`, `simple`, `grayscale`)
    #[serde(default)]
    pub palette: Option<String>,
    #[serde(default)]
    pub padding: Option<f32>,
    /// Background color as `#rrggbb` or `#rrggbbaa`
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default)]
    pub y_axis: AxisConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub legend: LegendConfig,
}

/// `"auto"` or `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RangeConfig {
    Keyword(RangeKeyword),
    Fixed([f64; 2]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKeyword {
    Auto,
}

impl From<RangeConfig> for RangeSpec {
    fn from(config: RangeConfig) -> Self {
        match config {
            RangeConfig::Keyword(RangeKeyword::Auto) => RangeSpec::Auto,
            RangeConfig::Fixed([a, b]) => RangeSpec::fixed(a, b),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AxisConfig {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub show_label: Option<bool>,
    #[serde(default)]
    pub show_tics: Option<bool>,
    #[serde(default)]
    pub show_tic_labels: Option<bool>,
    #[serde(default)]
    pub show_on_both_sides: Option<bool>,
    #[serde(default)]
    pub tic_size: Option<f32>,
    #[serde(default)]
    pub min_tic_spacing: Option<f32>,
    #[serde(default)]
    pub tic_format: Option<TicFormatKind>,
    #[serde(default)]
    pub logscale: Option<bool>,
    #[serde(default)]
    pub range: Option<RangeConfig>,
    /// Fractions of the span added below and above an automatic range
    #[serde(default)]
    pub extend: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub show_horizontal: Option<bool>,
    #[serde(default)]
    pub show_vertical: Option<bool>,
    #[serde(default)]
    pub horizontal_style: Option<LineStyle>,
    #[serde(default)]
    pub vertical_style: Option<LineStyle>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LegendConfig {
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub position: Option<LegendPosition>,
}

impl ChartConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded chart config from {}", path.display());
        Ok(config)
    }
}

impl AxisConfig {
    /// Apply to `axis`; returns the range settings, which live on the chart.
    fn apply(&self, axis: &mut Axis) -> Result<(Option<RangeSpec>, Option<Extension>)> {
        if let Some(label) = &self.label {
            axis.set_label(label.clone());
        }
        if let Some(show) = self.show_label {
            axis.set_show_label(show);
        }
        if let Some(show) = self.show_tics {
            axis.set_show_tics(show);
        }
        if let Some(show) = self.show_tic_labels {
            axis.set_show_tic_labels(show);
        }
        if let Some(show) = self.show_on_both_sides {
            axis.set_show_on_both_sides(show);
        }
        if let Some(size) = self.tic_size {
            axis.set_tic_size(size)?;
        }
        if let Some(spacing) = self.min_tic_spacing {
            axis.set_min_tic_spacing(spacing)?;
        }
        if let Some(kind) = self.tic_format {
            axis.set_tic_format(kind.into());
        }
        if let Some(log) = self.logscale {
            axis.set_logscale(log);
        }
        Ok((
            self.range.map(RangeSpec::from),
            self.extend.map(|[lower, upper]| Extension::new(lower, upper)),
        ))
    }
}

impl LineChart {
    /// Apply every setting present in `config`.
    ///
    /// Values are validated before anything is changed where possible;
    /// an out-of-range axis value may leave earlier axis settings applied.
    pub fn apply_config(&mut self, config: &ChartConfig) -> Result<()> {
        let palette = config.palette.as_deref().map(Palette::by_name).transpose()?;
        let background = config
            .background
            .as_deref()
            .map(Color::parse_hex)
            .transpose()?;
        let grid_color = config
            .grid
            .color
            .as_deref()
            .map(Color::parse_hex)
            .transpose()?;

        if let Some(title) = &config.title {
            self.set_title(title.clone());
        }
        if let Some(palette) = palette {
            self.set_palette(palette);
        }
        if let Some(padding) = config.padding {
            self.set_padding(padding);
        }
        if let Some(color) = background {
            self.background.set_color(color);
        }

        let (x_range, x_ext) = config.x_axis.apply(&mut self.x_axis)?;
        let (y_range, y_ext) = config.y_axis.apply(&mut self.y_axis)?;
        if let Some(r) = x_range {
            self.set_x_range(r);
        }
        if let Some(e) = x_ext {
            self.set_x_extension(e);
        }
        if let Some(r) = y_range {
            self.set_y_range(r);
        }
        if let Some(e) = y_ext {
            self.set_y_extension(e);
        }

        let grid = &config.grid;
        if let Some(visible) = grid.visible {
            self.grid.object_mut().set_visible(visible);
        }
        if let Some(show) = grid.show_horizontal {
            self.grid.set_show_horizontal(show);
        }
        if let Some(show) = grid.show_vertical {
            self.grid.set_show_vertical(show);
        }
        if let Some(style) = grid.horizontal_style {
            self.grid.set_horizontal_style(style);
        }
        if let Some(style) = grid.vertical_style {
            self.grid.set_vertical_style(style);
        }
        if let Some(color) = grid_color {
            self.grid.set_color(color);
        }

        if let Some(visible) = config.legend.visible {
            self.legend.set_visible(visible);
        }
        if let Some(position) = config.legend.position {
            self.legend.set_position(position);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::range::Range;

    #[test]
    fn parses_full_config() {
        let config = ChartConfig::from_toml_str(
            r##"
            title = "Throughput"
            palette = "grayscale"
            padding = 8.0
            background = "#f0f0f0"

            [x_axis]
            label = "time"
            range = "auto"
            extend = [0.0, 0.1]

            [y_axis]
            range = [0.0, 100.0]
            logscale = false
            tic_format = { fixed = 1 }

            [grid]
            horizontal_style = "dashed"
            show_vertical = false

            [legend]
            visible = true
            position = "bottom_left"
            "##,
        )
        .unwrap();

        assert_eq!(config.title.as_deref(), Some("Throughput"));
        assert_eq!(config.x_axis.range, Some(RangeConfig::Keyword(RangeKeyword::Auto)));
        assert_eq!(config.y_axis.range, Some(RangeConfig::Fixed([0.0, 100.0])));
        assert_eq!(config.y_axis.tic_format, Some(TicFormatKind::Fixed(1)));
        assert_eq!(config.grid.horizontal_style, Some(LineStyle::Dashed));
        assert_eq!(config.legend.position, Some(LegendPosition::BottomLeft));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ChartConfig::from_toml_str("titel = \"typo\"").unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));

        let err = ChartConfig::from_toml_str("[x_axis]\nlabell = \"x\"").unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(ChartConfig::from_toml_str("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn apply_sets_chart_state() {
        let config = ChartConfig::from_toml_str(
            r#"
            title = "Load"
            palette = "simple"
            [y_axis]
            range = [10.0, 0.0]
            tic_size = 6.0
            "#,
        )
        .unwrap();
        let mut chart = LineChart::new();
        chart.apply_config(&config).unwrap();

        assert_eq!(chart.title.text(), "Load");
        assert_eq!(chart.palette().name(), "simple");
        assert_eq!(chart.y_range(), RangeSpec::Fixed(Range::new(0.0, 10.0)));
        assert_eq!(chart.y_axis.tic_size(), 6.0);
    }

    #[test]
    fn bad_values_are_errors() {
        let mut chart = LineChart::new();
        let config = ChartConfig::from_toml_str("palette = \"neon\"").unwrap();
        assert!(matches!(
            chart.apply_config(&config),
            Err(ChartError::UnknownPalette(_))
        ));

        let config = ChartConfig::from_toml_str("background = \"#zzz\"").unwrap();
        assert!(matches!(chart.apply_config(&config), Err(ChartError::Paint(_))));

        let config = ChartConfig::from_toml_str("[x_axis]\ntic_size = 500.0").unwrap();
        assert!(matches!(
            chart.apply_config(&config),
            Err(ChartError::OutOfRange { .. })
        ));
    }
}
