use chartwell_paint::{Color, DrawContext, Point, Rect, TextStyle};

use crate::layout::text_size;
use crate::object::{ChartObject, Drawable};

const MIN_TITLE_SIZE: f32 = 8.0;

/// Bold text centered at the top of the chart. Cached between frames.
///
/// Font size scales with the chart height (`height / 50`, at least 8 px)
/// and the text sits `height / 80` below the top edge.
#[derive(Debug)]
pub struct Title {
    object: ChartObject,
    text: String,
    color: Color,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            object: ChartObject::new(),
            text: text.into(),
            color: Color::BLACK,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.object.mark_changed();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.object.mark_changed();
    }

    pub fn style_for(&self, rect: Rect) -> TextStyle {
        title_style(self.color, rect)
    }

    /// Vertical space taken from the top of `rect`: the text's bottom edge.
    /// Zero when hidden or empty.
    pub fn reserved_height(&self, ctx: &dyn DrawContext, rect: Rect) -> f32 {
        if !self.object.is_visible() || self.text.is_empty() {
            return 0.0;
        }
        text_size(ctx, &self.text, &self.style_for(rect)).height + rect.height / 80.0
    }

}

fn title_style(color: Color, rect: Rect) -> TextStyle {
    let size = (rect.height / 50.0).floor().max(MIN_TITLE_SIZE);
    TextStyle::new(size).with_color(color).bold()
}

fn paint(text: &str, color: Color, ctx: &mut dyn DrawContext, rect: Rect) {
    if text.is_empty() {
        return;
    }
    let style = title_style(color, rect);
    let size = text_size(ctx, text, &style);
    ctx.draw_text(
        text,
        Point::new(rect.x + (rect.width - size.width) / 2.0, rect.y + rect.height / 80.0),
        &style,
    );
}

impl Default for Title {
    fn default() -> Self {
        Self::new("")
    }
}

impl Drawable for Title {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, rect: Rect, _: &()) {
        let Self {
            object,
            text,
            color,
        } = self;
        let (text, color) = (text.as_str(), *color);
        object.draw_cached(ctx, rect, |layer, r| paint(text, color, layer, r));
    }
}
