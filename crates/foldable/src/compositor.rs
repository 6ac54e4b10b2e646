use cairo::Context;
use util::Z;

use crate::content::ContentView;
use crate::error::{FoldError, Result};
use crate::shadow::Shadow;
use crate::snapshot::Snapshot;

/// Transient image surface used while a run is in flight.
#[derive(Debug, Default, Clone)]
pub struct Layer {
    pub image: Option<Snapshot>,
    pub shadow: Option<Shadow>,
}
impl Layer {
    pub fn set(&mut self, image: Snapshot, shadow: Shadow) {
        self.image = Some(image);
        self.shadow = Some(shadow);
    }
    pub fn clear(&mut self) {
        self.image = None;
        self.shadow = None;
    }
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.shadow.is_none()
    }
    pub fn set_shadow_alpha(&mut self, alpha: u8) {
        if let Some(s) = self.shadow.as_mut() {
            s.set_alpha(alpha);
        }
    }

    fn paint(&self, ctx: &Context) -> Result<()> {
        let Some(image) = self.image.as_ref() else {
            return Ok(());
        };
        let size = (image.width() as f64, image.height() as f64);
        ctx.set_source_surface(image.surface(), Z, Z)?;
        util::draw::fill_rect(ctx, size)?;
        if let Some(shadow) = self.shadow.as_ref() {
            shadow.paint(ctx, size)?;
        }
        Ok(())
    }
}

/// Owns everything the panel draws.
///
/// The card is split at the hinge (`y = cover height`). The `below` layer
/// sits above the hinge and never moves. The flap rotates around the hinge:
/// at `0` degrees it lies over the `below` layer, at `-180` it hangs under
/// the hinge. Its face is the cover content while that is visible, otherwise
/// the `above` layer image.
#[derive(Debug)]
pub struct Compositor {
    pub below: Layer,
    pub above: Layer,
    pub cover: ContentView,
    pub detail: ContentView,
    /// degrees around the horizontal hinge axis
    pub rotation: f64,
}
impl Compositor {
    pub fn new() -> Self {
        Self {
            below: Layer::default(),
            above: Layer::default(),
            cover: ContentView::empty(),
            detail: ContentView::empty(),
            rotation: Z,
        }
    }

    pub fn clear_layers(&mut self) {
        self.above.clear();
        self.below.clear();
    }

    /// Show exactly one of the real faces.
    pub fn show_cover(&mut self, show: bool) {
        self.cover.visible = show;
        self.detail.visible = !show;
    }

    /// Paint the card into `size`, clipped to it.
    pub fn paint(&self, ctx: &Context, size: (i32, i32), hinge: i32) -> Result<()> {
        ctx.save()?;
        ctx.rectangle(Z, Z, size.0 as f64, size.1 as f64);
        ctx.clip();
        let res = self.paint_inner(ctx, hinge);
        ctx.restore()?;
        res
    }

    fn paint_inner(&self, ctx: &Context, hinge: i32) -> Result<()> {
        if self.detail.visible {
            self.detail.content().draw(ctx)?;
        }

        ctx.save()?;
        let res = self.below.paint(ctx);
        ctx.restore()?;
        res?;

        let projection = self.rotation.to_radians().cos();
        if projection.abs() < 1e-3 {
            // edge on, nothing to see
            return Ok(());
        }

        ctx.save()?;
        let hinge = hinge as f64;
        ctx.translate(Z, hinge);
        ctx.scale(1., projection);
        ctx.translate(Z, -hinge);
        let res = if self.cover.visible {
            self.cover.content().draw(ctx).map_err(FoldError::from)
        } else {
            self.above.paint(ctx)
        };
        ctx.restore()?;
        res
    }
}
impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}
