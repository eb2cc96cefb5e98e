//! Rendering of data series into the plot area.

use chartwell_paint::{DrawContext, Path, Point};

use crate::hit_test::HitTester;
use crate::interaction::PointHit;
use crate::mapping::CoordinateMapper;
use crate::palette::Palette;
use crate::range::LOG_FLOOR;
use crate::segments::finite_runs;
use crate::series::{FillTo, Series, SeriesStore};

/// Highlighted markers are drawn this much larger.
pub const HIGHLIGHT_SCALE: f32 = 1.5;

/// Extra pixels around a marker that still count as a hit.
pub const HIT_TOLERANCE: f32 = 2.0;

/// Axis-space value of a data value; non-positive values clamp to the log floor.
pub fn to_axis(value: f64, logscale: bool) -> f64 {
    if !logscale {
        value
    } else if value <= 0.0 {
        LOG_FLOOR.log10()
    } else {
        value.log10()
    }
}

/// Per-frame state shared by all series.
pub(crate) struct PlotFrame<'a> {
    pub mapper: &'a CoordinateMapper,
    pub x_log: bool,
    pub y_log: bool,
}

impl PlotFrame<'_> {
    /// Axis-space coordinates of a series. Points with a non-finite y get a
    /// NaN x so they break the line and are never in range.
    fn axis_coords(&self, series: &Series) -> (Vec<f64>, Vec<f64>) {
        let ys: Vec<f64> = series.y().iter().map(|&v| to_axis(v, self.y_log)).collect();
        let xs = series
            .x()
            .iter()
            .zip(&ys)
            .map(|(&x, y)| {
                if y.is_finite() {
                    to_axis(x, self.x_log)
                } else {
                    f64::NAN
                }
            })
            .collect();
        (xs, ys)
    }

    /// Pixel positions of the points whose x lies inside the x range.
    fn visible_points(&self, series: &Series) -> Vec<Point> {
        let (xs, ys) = self.axis_coords(series);
        xs.iter()
            .zip(&ys)
            .filter(|(x, _)| self.mapper.contains_x(**x))
            .map(|(&x, &y)| self.mapper.to_pixel(x, y))
            .collect()
    }
}

/// Draw every visible series, clipped to the plot rect, and register a hit
/// region for each marker drawn.
pub(crate) fn draw_series(
    ctx: &mut dyn DrawContext,
    store: &SeriesStore,
    palette: &Palette,
    frame: &PlotFrame<'_>,
    hits: &mut HitTester<PointHit>,
) {
    let plot = frame.mapper.rect();
    ctx.push_clip(plot);

    let mut runs = Vec::new();
    for (index, series) in store.iter().enumerate() {
        if !series.is_visible() || series.is_empty() {
            continue;
        }
        let color = series.effective_color(index, palette);
        let (xs, ys) = frame.axis_coords(series);

        draw_fill(ctx, store, series, frame, color);

        if let Some(stroke) = series.line_style().stroke(color, series.line_width()) {
            // Out-of-range points are skipped and their neighbours joined;
            // only missing samples break the line.
            finite_runs(&xs, &mut runs);
            for &(start, end) in &runs {
                let points: Vec<Point> = (start..end)
                    .filter(|&k| frame.mapper.contains_x(xs[k]))
                    .map(|k| frame.mapper.to_pixel(xs[k], ys[k]))
                    .collect();
                if points.len() < 2 {
                    continue;
                }
                ctx.stroke_path(Path::polyline(&points), stroke.clone());
            }
        }

        let style = series.point_style();
        if style.is_none() {
            continue;
        }
        let size = series.point_size();
        for (k, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
            if !frame.mapper.contains_x(x) {
                continue;
            }
            let center = frame.mapper.to_pixel(x, y);
            let drawn = if series.highlighted().contains(&k) {
                size * HIGHLIGHT_SCALE
            } else {
                size
            };
            crate::style::draw_marker(ctx, center, drawn, style, color);
            hits.add_region(
                style.hit_shape(center, size + HIT_TOLERANCE),
                PointHit {
                    series: series.id(),
                    index: k,
                    x: series.x()[k],
                    y: series.y()[k],
                },
            );
        }
    }

    ctx.pop_clip();
}

fn draw_fill(
    ctx: &mut dyn DrawContext,
    store: &SeriesStore,
    series: &Series,
    frame: &PlotFrame<'_>,
    color: chartwell_paint::Color,
) {
    let fill_to = series.fill_to();
    if fill_to == FillTo::None {
        return;
    }
    let mut outline = frame.visible_points(series);
    let (Some(&first), Some(&last)) = (outline.first(), outline.last()) else {
        return;
    };
    if outline.len() < 2 {
        return;
    }

    match fill_to {
        FillTo::None => {}
        FillTo::Constant(value) => {
            let base = frame.mapper.y_to_px(to_axis(value, frame.y_log));
            outline.push(Point::new(last.x, base));
            outline.push(Point::new(first.x, base));
        }
        FillTo::Series(id) => {
            let Some(other) = store.get(id).filter(|o| o.is_visible() && !o.is_empty()) else {
                tracing::trace!(series = %series.name(), "fill target missing or hidden");
                return;
            };
            outline.extend(frame.visible_points(other).into_iter().rev());
        }
    }

    let fill = color.with_alpha(color.a * series.fill_opacity());
    ctx.fill_path(Path::polygon(&outline), fill.into());
}

#[cfg(test)]
mod tests {
    use chartwell_paint::{PaintCommand, PaintContext, Rect};

    use super::*;
    use crate::range::Range;
    use crate::style::{LineStyle, PointStyle};

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            Range::new(0.0, 10.0),
            Range::new(0.0, 10.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
    }

    fn stroke_count(ctx: &PaintContext) -> usize {
        ctx.commands()
            .iter()
            .filter(|c| matches!(c, PaintCommand::StrokePath { .. }))
            .count()
    }

    fn strokes(ctx: &PaintContext) -> Vec<&Path> {
        ctx.commands()
            .iter()
            .filter_map(|c| match c {
                PaintCommand::StrokePath { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    fn draw_line_only(points: &[(f64, f64)]) -> (PaintContext, HitTester<PointHit>) {
        let mut store = SeriesStore::new();
        let mut s = Series::from_points("s", points);
        s.set_point_style(PointStyle::None);
        store.add(s);

        let m = mapper();
        let frame = PlotFrame {
            mapper: &m,
            x_log: false,
            y_log: false,
        };
        let mut ctx = PaintContext::new();
        let mut hits = HitTester::new();
        draw_series(&mut ctx, &store, &Palette::default(), &frame, &mut hits);
        (ctx, hits)
    }

    #[test]
    fn out_of_range_points_are_skipped_and_neighbours_joined() {
        let (ctx, hits) = draw_line_only(&[
            (1.0, 1.0),
            (2.0, 2.0),
            (20.0, 3.0),
            (3.0, 3.0),
            (4.0, 4.0),
        ]);

        let expected = Path::polyline(&[
            Point::new(10.0, 90.0),
            Point::new(20.0, 80.0),
            Point::new(30.0, 70.0),
            Point::new(40.0, 60.0),
        ]);
        assert_eq!(strokes(&ctx), vec![&expected]);
        assert!(hits.is_empty());
        assert_eq!(ctx.clip_depth(), 0);
    }

    #[test]
    fn lone_in_range_point_still_joins_its_neighbours() {
        let (ctx, _) = draw_line_only(&[(-5.0, 0.0), (1.0, 1.0), (15.0, 2.0), (2.0, 2.0)]);
        let expected = Path::polyline(&[Point::new(10.0, 90.0), Point::new(20.0, 80.0)]);
        assert_eq!(strokes(&ctx), vec![&expected]);
    }

    #[test]
    fn missing_samples_break_the_line() {
        let (ctx, _) = draw_line_only(&[
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, f64::NAN),
            (4.0, 4.0),
            (5.0, 5.0),
        ]);
        assert_eq!(stroke_count(&ctx), 2);
    }

    #[test]
    fn markers_register_hits_for_in_range_points_only() {
        let mut store = SeriesStore::new();
        let mut s = Series::from_points("s", &[(1.0, 1.0), (20.0, 2.0), (5.0, 5.0)]);
        s.set_line_style(LineStyle::None);
        let id = store.add(s);

        let m = mapper();
        let frame = PlotFrame {
            mapper: &m,
            x_log: false,
            y_log: false,
        };
        let mut ctx = PaintContext::new();
        let mut hits = HitTester::new();
        draw_series(&mut ctx, &store, &Palette::default(), &frame, &mut hits);

        assert_eq!(hits.len(), 2);
        let hit = hits.query(50.0, 50.0);
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].series, id);
        assert_eq!(hit[0].index, 2);
        assert_eq!((hit[0].x, hit[0].y), (5.0, 5.0));
    }

    #[test]
    fn fill_to_constant_closes_at_baseline() {
        let mut store = SeriesStore::new();
        let mut s = Series::from_points("s", &[(0.0, 5.0), (10.0, 5.0)]);
        s.set_fill_to(FillTo::Constant(0.0));
        s.set_point_style(PointStyle::None);
        store.add(s);

        let m = mapper();
        let frame = PlotFrame {
            mapper: &m,
            x_log: false,
            y_log: false,
        };
        let mut ctx = PaintContext::new();
        draw_series(&mut ctx, &store, &Palette::default(), &frame, &mut HitTester::new());

        let expected = Path::polygon(&[
            Point::new(0.0, 50.0),
            Point::new(100.0, 50.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]);
        assert!(ctx
            .commands()
            .iter()
            .any(|c| matches!(c, PaintCommand::FillPath { path, .. } if *path == expected)));
    }

    #[test]
    fn log_axis_clamps_non_positive_values() {
        assert_eq!(to_axis(100.0, true), 2.0);
        assert_eq!(to_axis(0.0, true), LOG_FLOOR.log10());
        assert_eq!(to_axis(-3.0, false), -3.0);
    }
}
