//! `wl_pointer` decoding.

use squares_engine::input::{Axis, ButtonState, MouseButton, PointerEvent};
use wayland_client::WEnum;
use wayland_client::protocol::wl_pointer;

/// Decodes one `wl_pointer` event. Frame grouping and the v5 axis detail
/// events carry nothing the router uses and decode to `None`.
pub fn translate(event: wl_pointer::Event) -> Option<PointerEvent> {
    match event {
        wl_pointer::Event::Enter {
            surface_x,
            surface_y,
            ..
        } => Some(PointerEvent::Enter {
            x: surface_x as i32,
            y: surface_y as i32,
        }),
        wl_pointer::Event::Leave { .. } => Some(PointerEvent::Leave),
        wl_pointer::Event::Motion {
            surface_x,
            surface_y,
            ..
        } => Some(PointerEvent::motion(surface_x, surface_y)),
        wl_pointer::Event::Button { button, state, .. } => {
            let state = match state {
                WEnum::Value(wl_pointer::ButtonState::Pressed) => ButtonState::Pressed,
                WEnum::Value(wl_pointer::ButtonState::Released) => ButtonState::Released,
                other => {
                    log::debug!("unknown button state {other:?}");
                    return None;
                }
            };
            Some(PointerEvent::Button {
                button: MouseButton::from_evdev(button),
                state,
            })
        }
        wl_pointer::Event::Axis { axis, value, .. } => {
            let axis = match axis {
                WEnum::Value(wl_pointer::Axis::VerticalScroll) => Axis::Vertical,
                WEnum::Value(wl_pointer::Axis::HorizontalScroll) => Axis::Horizontal,
                _ => return None,
            };
            Some(PointerEvent::Axis { axis, value })
        }
        _ => None,
    }
}
