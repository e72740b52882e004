use super::types::PointerEvent;

/// Last known pointer position for the window.
///
/// Overwritten by every motion, read on button press. No history, no bounds
/// checking.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct InputState {
    pointer: (i32, i32),
}

impl InputState {
    #[inline]
    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    #[inline]
    pub fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
    }

    /// Applies the parts of `event` that carry state. Only motion does.
    pub fn apply(&mut self, event: &PointerEvent) {
        if let PointerEvent::Motion { x, y } = *event {
            self.set_pointer(x, y);
        }
    }
}
