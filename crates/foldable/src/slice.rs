use cairo::Operator;
use util::{draw::new_surface_with_context, Z};

use crate::error::Result;
use crate::snapshot::Snapshot;

fn crop(src: &Snapshot, y: i32, height: i32) -> Result<Snapshot> {
    let (surf, ctx) = new_surface_with_context((src.width(), height))?;
    ctx.set_operator(Operator::Source);
    ctx.set_source_surface(src.surface(), Z, -(y as f64))?;
    ctx.paint()?;
    drop(ctx);
    Ok(Snapshot::from_surface(surf))
}

/// Rows `[0, H/2)` and `[H/2, H)` as independent buffers.
pub fn split_halves(src: &Snapshot) -> Result<(Snapshot, Snapshot)> {
    let half = src.height() / 2;
    let top = crop(src, 0, half)?;
    let bottom = crop(src, half, src.height() - half)?;
    Ok((top, bottom))
}

/// Upside down copy.
pub fn mirror(src: &Snapshot) -> Result<Snapshot> {
    let (surf, ctx) = new_surface_with_context(src.size())?;
    ctx.set_operator(Operator::Source);
    ctx.translate(Z, src.height() as f64);
    ctx.scale(1., -1.);
    ctx.set_source_surface(src.surface(), Z, Z)?;
    ctx.paint()?;
    drop(ctx);
    Ok(Snapshot::from_surface(surf))
}
