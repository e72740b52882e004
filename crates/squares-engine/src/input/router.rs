use std::fmt;
use std::io::{self, Write};

use crate::core::{AppContext, PointerObserver};

use super::types::{ButtonState, MouseButton, PointerEvent};

/// Column and row boundary in surface pixels.
pub const QUADRANT_SPLIT: i32 = 128;

/// Screen quadrant, named by the square drawn there.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// `x < 128` is the left column and `y < 128` the top row; the split
    /// lines themselves belong to the right column and the bottom row.
    pub fn classify(x: i32, y: i32) -> Self {
        match (x < QUADRANT_SPLIT, y < QUADRANT_SPLIT) {
            (true, true) => Quadrant::TopLeft,
            (false, true) => Quadrant::TopRight,
            (true, false) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "cyan",
            Quadrant::TopRight => "yellow",
            Quadrant::BottomLeft => "magenta",
            Quadrant::BottomRight => "white",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tracks the pointer and reports the quadrant of each primary click as a
/// plain line on `out`.
pub struct ClickRouter<W: Write = io::Stdout> {
    out: W,
}

impl ClickRouter {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ClickRouter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn report(&mut self, quadrant: Quadrant) {
        let res = writeln!(self.out, "{quadrant}").and_then(|_| self.out.flush());
        if let Err(e) = res {
            log::warn!("failed to report click: {e}");
        }
    }
}

impl<W: Write> PointerObserver for ClickRouter<W> {
    fn pointer(&mut self, ctx: &mut AppContext, event: PointerEvent) {
        match event {
            PointerEvent::Motion { .. } => ctx.input_mut().apply(&event),
            PointerEvent::Button {
                button: MouseButton::Left,
                state: ButtonState::Pressed,
            } => {
                let (x, y) = ctx.input().pointer();
                let quadrant = Quadrant::classify(x, y);
                log::debug!("click at ({x}, {y}) -> {quadrant}");
                self.report(quadrant);
            }
            PointerEvent::Enter { .. }
            | PointerEvent::Leave
            | PointerEvent::Button { .. }
            | PointerEvent::Axis { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_at(x: i32, y: i32) -> String {
        let mut ctx = AppContext::detached();
        let mut router = ClickRouter::new(Vec::new());
        router.pointer(&mut ctx, PointerEvent::Motion { x, y });
        router.pointer(
            &mut ctx,
            PointerEvent::Button {
                button: MouseButton::Left,
                state: ButtonState::Pressed,
            },
        );
        String::from_utf8(router.into_inner()).unwrap()
    }

    #[test]
    fn clicks_name_the_square_under_the_pointer() {
        assert_eq!(click_at(50, 50), "cyan\n");
        assert_eq!(click_at(50, 200), "magenta\n");
        assert_eq!(click_at(200, 50), "yellow\n");
        assert_eq!(click_at(200, 200), "white\n");
    }

    #[test]
    fn split_lines_go_right_and_down() {
        assert_eq!(click_at(128, 128), "white\n");
        assert_eq!(click_at(127, 128), "magenta\n");
        assert_eq!(click_at(128, 127), "yellow\n");
        assert_eq!(click_at(127, 127), "cyan\n");
    }

    #[test]
    fn outside_the_window_still_classifies() {
        assert_eq!(click_at(-10, -10), "cyan\n");
        assert_eq!(click_at(4000, 4000), "white\n");
    }

    #[test]
    fn only_primary_presses_report() {
        let mut ctx = AppContext::detached();
        let mut router = ClickRouter::new(Vec::new());
        router.pointer(&mut ctx, PointerEvent::Motion { x: 10, y: 10 });
        for (button, state) in [
            (MouseButton::Left, ButtonState::Released),
            (MouseButton::Right, ButtonState::Pressed),
            (MouseButton::Middle, ButtonState::Pressed),
        ] {
            router.pointer(&mut ctx, PointerEvent::Button { button, state });
        }
        let scroll = PointerEvent::Axis {
            axis: crate::input::Axis::Vertical,
            value: 10.0,
        };
        router.pointer(&mut ctx, scroll);
        router.pointer(&mut ctx, PointerEvent::Leave);
        assert!(router.into_inner().is_empty());
    }

    #[test]
    fn last_motion_wins() {
        let mut ctx = AppContext::detached();
        let mut router = ClickRouter::new(Vec::new());
        router.pointer(&mut ctx, PointerEvent::Motion { x: 10, y: 10 });
        router.pointer(&mut ctx, PointerEvent::Motion { x: 250, y: 10 });
        router.pointer(
            &mut ctx,
            PointerEvent::Button {
                button: MouseButton::Left,
                state: ButtonState::Pressed,
            },
        );
        assert_eq!(ctx.input().pointer(), (250, 10));
        assert_eq!(String::from_utf8(router.into_inner()).unwrap(), "yellow\n");
    }
}
