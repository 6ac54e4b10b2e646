use cairo::ImageSurface;
use util::draw::{new_surface, new_surface_with_context};

use crate::content::ContentView;
use crate::error::Result;

pub const PLACEHOLDER_SIZE: (i32, i32) = (2, 2);

/// Pixels of a face at one point in time. Never written to after creation.
#[derive(Debug, Clone)]
pub struct Snapshot(ImageSurface);
impl Snapshot {
    pub(crate) fn from_surface(surf: ImageSurface) -> Self {
        surf.flush();
        Self(surf)
    }

    pub fn placeholder() -> Result<Self> {
        Ok(Self::from_surface(new_surface(PLACEHOLDER_SIZE)?))
    }

    pub fn width(&self) -> i32 {
        self.0.width()
    }
    pub fn height(&self) -> i32 {
        self.0.height()
    }
    pub fn size(&self) -> (i32, i32) {
        (self.width(), self.height())
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.0
    }

    /// Premultiplied ARGB of one pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let index = y as usize * self.0.stride() as usize + x as usize * 4;
        let mut px = None;
        self.0
            .with_data(|data| {
                px = data
                    .get(index..index + 4)
                    .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]));
            })
            .ok()?;
        px
    }
}

fn render(view: &ContentView) -> Option<Snapshot> {
    let size = view.size();
    if size.0 <= 0 || size.1 <= 0 {
        return None;
    }

    let draw = || -> Result<Snapshot> {
        let (surf, ctx) = new_surface_with_context(size)?;
        view.content().draw(&ctx)?;
        drop(ctx);
        Ok(Snapshot::from_surface(surf))
    };
    match draw() {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("failed to draw face into snapshot: {e}");
            None
        }
    }
}

/// Snapshot a face. A face with no size is measured at
/// `(parent_width, 2 * cover_height)` and laid out first; if there is still
/// nothing to draw this falls back to a 2x2 transparent placeholder.
pub fn capture(view: &mut ContentView, parent_width: i32, cover_height: i32) -> Result<Snapshot> {
    if let Some(s) = render(view) {
        return Ok(s);
    }

    log::debug!("face has no size, forcing measure and layout");
    let content = view.content_mut();
    content.measure(parent_width, cover_height * 2);
    content.layout();

    if let Some(s) = render(view) {
        return Ok(s);
    }

    log::warn!("face could not be captured, using placeholder");
    Snapshot::placeholder()
}
