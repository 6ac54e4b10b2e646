use cairo::{Context, LinearGradient};
use util::{color::Color, draw::fill_rect, Z};

use foldable::Content;

const CARD: Color = Color::new(0.96, 0.95, 0.92, 1.);
const ACCENT: Color = Color::new(0.85, 0.33, 0.2, 1.);
const INK: Color = Color::new(0.2, 0.2, 0.24, 1.);

/// Small face: a title bar with an accent strip.
#[derive(Debug)]
pub struct CoverFace {
    size: (i32, i32),
}
impl CoverFace {
    pub fn new(width: i32, cover_height: i32) -> Self {
        Self {
            size: (width, cover_height),
        }
    }
}
impl Content for CoverFace {
    fn size(&self) -> (i32, i32) {
        self.size
    }
    fn measure(&mut self, width: i32, height: i32) {
        self.size = (width, height);
    }
    fn layout(&mut self) {}
    fn draw(&self, ctx: &Context) -> Result<(), cairo::Error> {
        let (w, h) = (self.size.0 as f64, self.size.1 as f64);
        CARD.set_source(ctx);
        fill_rect(ctx, (w, h))?;

        ACCENT.set_source(ctx);
        ctx.rectangle(Z, Z, w * 0.04, h);
        ctx.fill()?;

        INK.set_source(ctx);
        ctx.rectangle(w * 0.1, h * 0.3, w * 0.6, h * 0.14);
        ctx.rectangle(w * 0.1, h * 0.56, w * 0.35, h * 0.1);
        ctx.fill()
    }
}

/// Tall face: a "photo" on top, text lines below.
#[derive(Debug)]
pub struct DetailFace {
    size: (i32, i32),
}
impl DetailFace {
    pub fn new(width: i32, cover_height: i32) -> Self {
        Self {
            size: (width, cover_height * 2),
        }
    }
}
impl Content for DetailFace {
    fn size(&self) -> (i32, i32) {
        self.size
    }
    fn measure(&mut self, width: i32, height: i32) {
        self.size = (width, height);
    }
    fn layout(&mut self) {}
    fn draw(&self, ctx: &Context) -> Result<(), cairo::Error> {
        let (w, h) = (self.size.0 as f64, self.size.1 as f64);
        let half = h / 2.;

        let photo = LinearGradient::new(Z, Z, w, half);
        photo.add_color_stop_rgba(0., 0.27, 0.51, 0.71, 1.);
        photo.add_color_stop_rgba(1., 0.96, 0.76, 0.45, 1.);
        ctx.set_source(&photo)?;
        fill_rect(ctx, (w, half))?;

        CARD.set_source(ctx);
        ctx.rectangle(Z, half, w, half);
        ctx.fill()?;

        INK.set_source(ctx);
        let line = half / 8.;
        for i in 0..4 {
            let y = half + line * (1.5 + i as f64 * 1.6);
            let len = if i == 3 { 0.45 } else { 0.8 };
            ctx.rectangle(w * 0.1, y, w * len, line * 0.6);
        }
        ctx.fill()
    }
}
