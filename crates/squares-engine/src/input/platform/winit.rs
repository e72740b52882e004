use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};

use crate::input::{Axis, ButtonState, MouseButton, PointerEvent};

/// Translates a winit `WindowEvent` into a [`PointerEvent`].
///
/// Positions are converted to logical pixels with `scale_factor`, matching
/// the surface coordinates a Wayland compositor reports. Returns `None` for
/// events the input subsystem does not represent.
pub fn translate_window_event(scale_factor: f64, event: &WindowEvent) -> Option<PointerEvent> {
    match event {
        WindowEvent::CursorLeft { .. } => Some(PointerEvent::Leave),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical(scale_factor, *position);
            Some(PointerEvent::motion(x, y))
        }

        WindowEvent::MouseInput { state, button, .. } => Some(PointerEvent::Button {
            button: map_mouse_button(*button),
            state: match state {
                ElementState::Pressed => ButtonState::Pressed,
                ElementState::Released => ButtonState::Released,
            },
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x as f64, *y as f64),
                MouseScrollDelta::PixelDelta(p) => to_logical(scale_factor, *p),
            };
            if y != 0.0 {
                Some(PointerEvent::Axis {
                    axis: Axis::Vertical,
                    value: y,
                })
            } else if x != 0.0 {
                Some(PointerEvent::Axis {
                    axis: Axis::Horizontal,
                    value: x,
                })
            } else {
                None
            }
        }

        _ => None,
    }
}

fn to_logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f64, f64) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x, logical.y)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(u32::from(v)),
    }
}
