//! Margin reservation around the plot area.

use chartwell_paint::{DrawContext, Rect, Size, TextStyle};

use crate::axis::Axis;

/// Gap between tic labels and the things around them, in pixels.
pub const LABEL_SPACING: f32 = 3.0;

// Fallback sizes used only when the backend cannot measure text.
const AVG_CHAR_WIDTH_EM: f32 = 0.6;
const LINE_HEIGHT_EM: f32 = 1.2;

/// Measured size of `text`, estimated when the backend has no metrics.
pub fn text_size(ctx: &dyn DrawContext, text: &str, style: &TextStyle) -> Size {
    ctx.measure_text(text, style).unwrap_or_else(|| {
        Size::new(
            text.chars().count() as f32 * style.size * AVG_CHAR_WIDTH_EM,
            style.size * LINE_HEIGHT_EM,
        )
    })
}

/// Result of [`reserve_margins`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    /// Area left for the data after axis labels took their space.
    pub plot: Rect,
    /// Height reserved below the plot for x tic labels, spacing included.
    pub x_tic_label_offset: f32,
    /// Width reserved left of the plot for y tic labels, spacing included.
    pub y_tic_label_offset: f32,
}

/// Shrink `rect` so axis labels and tic labels fit around it.
///
/// The x axis is handled first and takes space from the bottom; the y axis
/// then takes space from the left of what remains. The y tic label width is
/// taken from the longest formatted label.
pub fn reserve_margins(
    rect: Rect,
    x_axis: &Axis,
    y_axis: &Axis,
    x_tics: &[f64],
    y_tics: &[f64],
    ctx: &dyn DrawContext,
) -> PlotLayout {
    let mut plot = rect;

    let mut bottom = 0.0;
    if x_axis.shows_label() {
        bottom += text_size(ctx, x_axis.label(), &x_axis.label_style()).height;
    }
    let mut x_tic_label_offset = 0.0;
    if x_axis.shows_tic_labels() {
        if let Some(&first) = x_tics.first() {
            let label = x_axis.format_tic(first);
            x_tic_label_offset =
                text_size(ctx, &label, &x_axis.tic_label_style()).height + LABEL_SPACING;
            bottom += x_tic_label_offset;
        }
    }
    plot.height = (plot.height - bottom).max(0.0);

    let mut left = 0.0;
    if y_axis.shows_label() {
        // Drawn rotated, so its height becomes horizontal extent.
        left += text_size(ctx, y_axis.label(), &y_axis.label_style()).height;
    }
    let mut y_tic_label_offset = 0.0;
    if y_axis.shows_tic_labels() {
        let widest = y_tics
            .iter()
            .map(|&v| y_axis.format_tic(v))
            .max_by_key(|s| s.chars().count());
        if let Some(widest) = widest {
            y_tic_label_offset =
                text_size(ctx, &widest, &y_axis.tic_label_style()).width + LABEL_SPACING;
            left += y_tic_label_offset;
        }
    }
    let left = left.min(plot.width);
    plot.x += left;
    plot.width -= left;

    tracing::trace!(
        bottom,
        left,
        width = plot.width,
        height = plot.height,
        "reserved axis margins"
    );

    PlotLayout {
        plot,
        x_tic_label_offset,
        y_tic_label_offset,
    }
}

#[cfg(test)]
mod tests {
    use chartwell_paint::PaintContext;

    use super::*;

    fn bare_axes() -> (Axis, Axis) {
        let mut x = Axis::x();
        let mut y = Axis::y();
        for a in [&mut x, &mut y] {
            a.set_show_label(false);
            a.set_show_tic_labels(false);
        }
        (x, y)
    }

    #[test]
    fn nothing_shown_reserves_nothing() {
        let (x, y) = bare_axes();
        let rect = Rect::new(10.0, 10.0, 200.0, 100.0);
        let layout = reserve_margins(rect, &x, &y, &[0.0, 1.0], &[0.0, 1.0], &PaintContext::new());
        assert_eq!(layout.plot, rect);
    }

    #[test]
    fn x_tic_labels_take_height_plus_spacing() {
        let (mut x, y) = bare_axes();
        x.set_show_tic_labels(true);
        let ctx = PaintContext::new();
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let layout = reserve_margins(rect, &x, &y, &[0.0, 0.5], &[], &ctx);

        let h = text_size(&ctx, "0", &x.tic_label_style()).height;
        assert_eq!(layout.plot.height, 100.0 - (h + LABEL_SPACING));
        assert_eq!(layout.x_tic_label_offset, h + LABEL_SPACING);
        assert_eq!(layout.plot.x, 0.0);
    }

    #[test]
    fn y_tic_labels_use_the_longest_label() {
        let (x, mut y) = bare_axes();
        y.set_show_tic_labels(true);
        let ctx = PaintContext::new();
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let layout = reserve_margins(rect, &x, &y, &[], &[0.0, 0.25, 1.0], &ctx);

        let w = text_size(&ctx, "0.25", &y.tic_label_style()).width;
        assert_eq!(layout.plot.x, w + LABEL_SPACING);
        assert_eq!(layout.plot.width, 200.0 - (w + LABEL_SPACING));
        assert_eq!(layout.plot.height, 100.0);
    }

    #[test]
    fn labels_are_reserved_on_both_axes() {
        let x = Axis::x();
        let y = Axis::y();
        let ctx = PaintContext::new();
        let rect = Rect::new(0.0, 0.0, 300.0, 200.0);
        let layout = reserve_margins(rect, &x, &y, &[0.0], &[0.0], &ctx);
        assert!(layout.plot.height < 200.0);
        assert!(layout.plot.x > 0.0);
        assert_eq!(layout.plot.right(), 300.0);
        assert_eq!(layout.plot.y, 0.0);
    }

    #[test]
    fn missing_metrics_fall_back_to_estimate() {
        let ctx = PaintContext::without_text_metrics();
        let style = TextStyle::new(10.0);
        let size = text_size(&ctx, "abcd", &style);
        assert!((size.width - 24.0).abs() < 1e-4);
        assert!((size.height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn tiny_rect_never_goes_negative() {
        let x = Axis::x();
        let y = Axis::y();
        let layout = reserve_margins(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            &x,
            &y,
            &[0.0],
            &[100000.0],
            &PaintContext::new(),
        );
        assert!(layout.plot.width >= 0.0);
        assert!(layout.plot.height >= 0.0);
    }
}
