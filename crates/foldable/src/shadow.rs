use cairo::Context;
use util::color::Color;
use util::draw::fill_rect;

/// Darkening drawn over a layer image. `alpha` scales the configured color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    color: Color,
    alpha: u8,
}
impl Shadow {
    pub fn acquire(color: Color) -> Self {
        Self { color, alpha: 0 }
    }
    pub fn alpha(&self) -> u8 {
        self.alpha
    }
    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    pub fn paint(&self, ctx: &Context, size: (f64, f64)) -> Result<(), cairo::Error> {
        if self.alpha == 0 {
            return Ok(());
        }
        self.color
            .with_alpha_scaled(self.alpha as f64 / 255.)
            .set_source(ctx);
        fill_rect(ctx, size)
    }
}
