/// Raw pointer input as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter((f64, f64)),
    Leave,
    Motion((f64, f64)),
    Press((f64, f64), u32),
    Release((f64, f64), u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseEvent {
    Press((f64, f64), u32),
    Release((f64, f64), u32),
    /// press and release of the same button
    Click((f64, f64), u32),
    Enter((f64, f64)),
    Leave,
    Motion((f64, f64)),
}

#[derive(Debug, Default)]
pub struct MouseStateData {
    pub hovering: bool,
    pub pressing: Option<u32>,
}

#[derive(Debug, Default)]
pub struct MouseState {
    pub data: MouseStateData,
    mouse_debug: bool,
}
impl MouseState {
    pub fn new(mouse_debug: bool) -> Self {
        Self {
            data: MouseStateData::default(),
            mouse_debug,
        }
    }

    pub fn is_hovering(&self) -> bool {
        self.data.hovering
    }

    /// Forget any press in progress, e.g. when input gets suppressed midway.
    pub fn reset_press(&mut self) {
        self.data.pressing = None;
    }

    pub fn feed(&mut self, event: PointerEvent) -> Vec<MouseEvent> {
        use PointerEvent::*;
        match event {
            Enter(pos) => {
                self.data.hovering = true;
                vec![MouseEvent::Enter(pos)]
            }
            Leave => {
                self.data.hovering = false;
                vec![MouseEvent::Leave]
            }
            Motion(pos) => vec![MouseEvent::Motion(pos)],
            Press(pos, button) => self.press(button, pos).into_iter().collect(),
            Release(pos, button) => self.unpress(button, pos),
        }
    }

    fn press(&mut self, p: u32, pos: (f64, f64)) -> Option<MouseEvent> {
        if self.mouse_debug {
            log::debug!("Mouse Debug info: key pressed: {p}");
        };

        if self.data.pressing.is_none() {
            self.data.pressing = Some(p);
            Some(MouseEvent::Press(pos, p))
        } else {
            None
        }
    }
    fn unpress(&mut self, p: u32, pos: (f64, f64)) -> Vec<MouseEvent> {
        if self.mouse_debug {
            log::debug!("Mouse Debug info: key released: {p}");
        };

        if self.data.pressing.eq(&Some(p)) {
            self.data.pressing = None;
            vec![MouseEvent::Release(pos, p), MouseEvent::Click(pos, p)]
        } else {
            vec![]
        }
    }
}
