use cairo::{Context, Format, ImageSurface};

pub fn new_surface(size: (i32, i32)) -> Result<ImageSurface, cairo::Error> {
    ImageSurface::create(Format::ARgb32, size.0.max(0), size.1.max(0))
}

pub fn new_surface_with_context(size: (i32, i32)) -> Result<(ImageSurface, Context), cairo::Error> {
    let surf = new_surface(size)?;
    let ctx = Context::new(&surf)?;
    Ok((surf, ctx))
}

/// Fill `(0, 0, size)` with whatever source is set on the context.
pub fn fill_rect(ctx: &Context, size: (f64, f64)) -> Result<(), cairo::Error> {
    ctx.rectangle(crate::Z, crate::Z, size.0, size.1);
    ctx.fill()
}
