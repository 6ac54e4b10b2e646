use cairo::Context;

/// A face the panel can show and take snapshots of.
///
/// `size` is the laid out size. A face that was never laid out (or was
/// collapsed) reports `(0, 0)`; the snapshot capturer then forces
/// `measure` + `layout` before drawing.
pub trait Content {
    fn size(&self) -> (i32, i32);
    fn measure(&mut self, width: i32, height: i32);
    fn layout(&mut self);
    fn draw(&self, ctx: &Context) -> Result<(), cairo::Error>;
}

/// Face installed until `setup` provides the real ones.
#[derive(Debug, Default)]
pub struct EmptyContent;
impl Content for EmptyContent {
    fn size(&self) -> (i32, i32) {
        (0, 0)
    }
    fn measure(&mut self, _: i32, _: i32) {}
    fn layout(&mut self) {}
    fn draw(&self, _: &Context) -> Result<(), cairo::Error> {
        Ok(())
    }
}

pub struct ContentView {
    content: Box<dyn Content>,
    pub visible: bool,
}
impl ContentView {
    pub fn new(content: Box<dyn Content>, visible: bool) -> Self {
        Self { content, visible }
    }
    pub fn empty() -> Self {
        Self::new(Box::new(EmptyContent), false)
    }
    pub fn content(&self) -> &dyn Content {
        self.content.as_ref()
    }
    pub fn content_mut(&mut self) -> &mut dyn Content {
        self.content.as_mut()
    }
    pub fn size(&self) -> (i32, i32) {
        self.content.size()
    }
}
impl std::fmt::Debug for ContentView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentView")
            .field("size", &self.size())
            .field("visible", &self.visible)
            .finish()
    }
}
