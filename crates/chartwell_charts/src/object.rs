//! Shared state for everything a chart draws.

use std::fmt;
use std::sync::Arc;

use chartwell_paint::{
    Circle, DrawContext, FillStyle, ImageData, PaintCommand, PaintContext, Path, Point, Rect, Size,
    StrokeStyle, TextStyle, Transform2D,
};

/// Callback used to ask the host for a new frame.
pub type RedrawHandle = Arc<dyn Fn() + Send + Sync>;

struct CachedLayer {
    size: Size,
    commands: Vec<PaintCommand>,
}

/// Visibility, antialiasing, change tracking and an optional offscreen cache.
pub struct ChartObject {
    visible: bool,
    antialias: bool,
    dirty: bool,
    redraw: Option<RedrawHandle>,
    cache: Option<CachedLayer>,
}

impl ChartObject {
    pub fn new() -> Self {
        Self {
            visible: true,
            antialias: true,
            dirty: true,
            redraw: None,
            cache: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.mark_changed();
        }
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn set_antialias(&mut self, antialias: bool) {
        if self.antialias != antialias {
            self.antialias = antialias;
            self.mark_changed();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Invalidate the cache and ask the host to redraw.
    pub fn mark_changed(&mut self) {
        self.dirty = true;
        if let Some(redraw) = &self.redraw {
            redraw();
        }
    }

    pub fn set_redraw_handle(&mut self, redraw: Option<RedrawHandle>) {
        self.redraw = redraw;
    }

    /// Mark as drawn without touching the cache.
    pub(crate) fn mark_drawn(&mut self) {
        self.dirty = false;
    }

    /// Draw through an offscreen layer that is re-recorded only when the
    /// object changed or `rect` has a different size than last time.
    ///
    /// `paint` draws in layer coordinates with the origin at `rect`'s
    /// top-left corner. Returns `true` when the layer was re-recorded.
    pub fn draw_cached<F>(&mut self, ctx: &mut dyn DrawContext, rect: Rect, paint: F) -> bool
    where
        F: FnOnce(&mut dyn DrawContext, Rect),
    {
        let size = rect.size();
        let stale = self.dirty || self.cache.as_ref().map_or(true, |c| c.size != size);

        if stale {
            let mut layer = LayerRecorder::new(&*ctx);
            if !self.antialias {
                layer.set_antialias(false);
            }
            paint(&mut layer, rect.at_origin());
            if !self.antialias {
                layer.set_antialias(true);
            }
            let commands = layer.finish();
            tracing::trace!(
                commands = commands.len(),
                width = size.width,
                height = size.height,
                "re-recorded cached layer"
            );
            self.cache = Some(CachedLayer { size, commands });
            self.dirty = false;
        }

        if let Some(cache) = &self.cache {
            ctx.push_transform(Transform2D::translate(rect.x, rect.y));
            ctx.replay(&cache.commands);
            ctx.pop_transform();
        }
        stale
    }
}

impl Default for ChartObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChartObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartObject")
            .field("visible", &self.visible)
            .field("antialias", &self.antialias)
            .field("dirty", &self.dirty)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

/// Records into a [`PaintContext`] while measuring text with the target
/// context, so cached layout matches what the real backend would produce.
struct LayerRecorder<'a> {
    measurer: &'a dyn DrawContext,
    layer: PaintContext,
}

impl<'a> LayerRecorder<'a> {
    fn new(measurer: &'a dyn DrawContext) -> Self {
        Self {
            measurer,
            layer: PaintContext::new(),
        }
    }

    fn finish(mut self) -> Vec<PaintCommand> {
        self.layer.take_commands()
    }
}

impl DrawContext for LayerRecorder<'_> {
    fn fill_rect(&mut self, rect: Rect, style: FillStyle) {
        self.layer.fill_rect(rect, style);
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle) {
        self.layer.stroke_rect(rect, style);
    }

    fn fill_circle(&mut self, circle: Circle, style: FillStyle) {
        self.layer.fill_circle(circle, style);
    }

    fn fill_path(&mut self, path: Path, style: FillStyle) {
        self.layer.fill_path(path, style);
    }

    fn stroke_path(&mut self, path: Path, style: StrokeStyle) {
        self.layer.stroke_path(path, style);
    }

    fn draw_text_rotated(&mut self, text: &str, position: Point, rotation: f32, style: &TextStyle) {
        self.layer.draw_text_rotated(text, position, rotation, style);
    }

    fn draw_image(&mut self, image: &ImageData, rect: Rect) {
        self.layer.draw_image(image, rect);
    }

    fn push_clip(&mut self, rect: Rect) {
        self.layer.push_clip(rect);
    }

    fn pop_clip(&mut self) {
        self.layer.pop_clip();
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.layer.push_transform(transform);
    }

    fn pop_transform(&mut self) {
        self.layer.pop_transform();
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.layer.set_antialias(enabled);
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Option<Size> {
        self.measurer.measure_text(text, style)
    }
}

/// A chart element that renders into a rectangle.
///
/// `C` carries whatever per-frame information the element needs beyond the
/// rectangle (tic marks for axes, legend entries, ...).
pub trait Drawable<C: ?Sized = ()> {
    fn object(&self) -> &ChartObject;
    fn object_mut(&mut self) -> &mut ChartObject;

    fn render(&mut self, ctx: &mut dyn DrawContext, rect: Rect, context: &C);

    /// Render if visible.
    fn draw(&mut self, ctx: &mut dyn DrawContext, rect: Rect, context: &C) {
        if self.object().is_visible() {
            self.render(ctx, rect, context);
            self.object_mut().mark_drawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chartwell_paint::Color;

    use super::*;

    fn paint_square(ctx: &mut dyn DrawContext, rect: Rect) {
        ctx.fill_rect(rect, Color::BLACK.into());
    }

    #[test]
    fn cache_is_reused_until_changed_or_resized() {
        let mut obj = ChartObject::new();
        let mut ctx = PaintContext::new();
        let rect = Rect::new(5.0, 5.0, 50.0, 20.0);

        assert!(obj.draw_cached(&mut ctx, rect, paint_square));
        assert!(!obj.draw_cached(&mut ctx, rect, paint_square));

        obj.mark_changed();
        assert!(obj.draw_cached(&mut ctx, rect, paint_square));

        assert!(obj.draw_cached(&mut ctx, Rect::new(5.0, 5.0, 60.0, 20.0), paint_square));
        // Moving without resizing replays the same layer.
        assert!(!obj.draw_cached(&mut ctx, Rect::new(0.0, 0.0, 60.0, 20.0), paint_square));
    }

    #[test]
    fn cached_layer_is_replayed_with_translation() {
        let mut obj = ChartObject::new();
        let mut ctx = PaintContext::new();
        obj.draw_cached(&mut ctx, Rect::new(7.0, 9.0, 10.0, 10.0), paint_square);

        let cmds = ctx.commands();
        assert_eq!(
            cmds[0],
            PaintCommand::PushTransform {
                transform: Transform2D::translate(7.0, 9.0)
            }
        );
        assert_eq!(
            cmds[1],
            PaintCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                style: Color::BLACK.into()
            }
        );
        assert_eq!(cmds[2], PaintCommand::PopTransform);
    }

    #[test]
    fn antialias_off_is_recorded_around_layer() {
        let mut obj = ChartObject::new();
        obj.set_antialias(false);
        let mut ctx = PaintContext::new();
        obj.draw_cached(&mut ctx, Rect::new(0.0, 0.0, 10.0, 10.0), paint_square);
        assert_eq!(ctx.commands()[1], PaintCommand::SetAntialias(false));
        assert_eq!(ctx.commands()[3], PaintCommand::SetAntialias(true));
    }

    #[test]
    fn mark_changed_requests_redraw() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let mut obj = ChartObject::new();
        obj.set_redraw_handle(Some(Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })));

        obj.set_visible(false);
        obj.set_visible(false);
        obj.mark_changed();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
