use std::path::{Path, PathBuf};

use chartwell_paint::{Color, DrawContext, Gradient, ImageData, Rect};

use crate::object::{ChartObject, Drawable};

#[derive(Clone, Debug, PartialEq)]
pub enum BackgroundFill {
    Color(Color),
    /// Vertical gradient from `top` to `bottom`.
    Gradient { top: Color, bottom: Color },
    /// `image` is `None` when the file could not be loaded.
    Image {
        path: PathBuf,
        image: Option<ImageData>,
    },
}

/// Fills the whole chart area. Cached between frames.
#[derive(Debug)]
pub struct Background {
    object: ChartObject,
    fill: BackgroundFill,
}

impl Background {
    pub fn new() -> Self {
        Self {
            object: ChartObject::new(),
            fill: BackgroundFill::Color(Color::WHITE),
        }
    }

    pub fn fill(&self) -> &BackgroundFill {
        &self.fill
    }

    pub fn set_color(&mut self, color: Color) {
        self.fill = BackgroundFill::Color(color);
        self.object.mark_changed();
    }

    pub fn set_gradient(&mut self, top: Color, bottom: Color) {
        self.fill = BackgroundFill::Gradient { top, bottom };
        self.object.mark_changed();
    }

    /// Use an image file drawn at its natural size from the top-left corner.
    ///
    /// If the file cannot be loaded a warning is logged and the background
    /// is painted white.
    pub fn set_image(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let image = match ImageData::load(&path) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!("Background image unavailable, using white: {}", err);
                None
            }
        };
        self.fill = BackgroundFill::Image { path, image };
        self.object.mark_changed();
    }

    fn paint(fill: &BackgroundFill, ctx: &mut dyn DrawContext, rect: Rect) {
        match fill {
            BackgroundFill::Color(color) => ctx.fill_rect(rect, (*color).into()),
            BackgroundFill::Gradient { top, bottom } => ctx.fill_rect(
                rect,
                Gradient::vertical(rect.y, rect.bottom(), *top, *bottom).into(),
            ),
            BackgroundFill::Image {
                image: Some(image), ..
            } => {
                let size = image.size();
                ctx.push_clip(rect);
                ctx.draw_image(image, Rect::new(rect.x, rect.y, size.width, size.height));
                ctx.pop_clip();
            }
            BackgroundFill::Image { image: None, .. } => {
                ctx.fill_rect(rect, Color::WHITE.into())
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable for Background {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, rect: Rect, _: &()) {
        let Self { object, fill } = self;
        object.draw_cached(ctx, rect, |layer, r| Self::paint(fill, layer, r));
    }
}
