/// Linux evdev code for the primary button (`BTN_LEFT`).
pub const BTN_LEFT: u32 = 0x110;
const BTN_RIGHT: u32 = 0x111;
const BTN_MIDDLE: u32 = 0x112;
const BTN_SIDE: u32 = 0x113;
const BTN_EXTRA: u32 = 0x114;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u32),
}

impl MouseButton {
    /// Maps a `wl_pointer.button` code (Linux evdev numbering).
    pub fn from_evdev(code: u32) -> Self {
        match code {
            BTN_LEFT => MouseButton::Left,
            BTN_RIGHT => MouseButton::Right,
            BTN_MIDDLE => MouseButton::Middle,
            BTN_SIDE => MouseButton::Back,
            BTN_EXTRA => MouseButton::Forward,
            other => MouseButton::Other(other),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Scroll axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Pointer event in surface coordinates (integer pixels, origin top-left).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Enter { x: i32, y: i32 },
    Leave,
    Motion { x: i32, y: i32 },
    Button { button: MouseButton, state: ButtonState },
    Axis { axis: Axis, value: f64 },
}

impl PointerEvent {
    /// Motion from fractional surface coordinates, truncated toward zero the
    /// way `wl_fixed_to_int` does.
    #[inline]
    pub fn motion(x: f64, y: f64) -> Self {
        PointerEvent::Motion {
            x: x as i32,
            y: y as i32,
        }
    }
}
