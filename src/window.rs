// The on-screen window and its input, translated into session events.
// Visual: one window at the image's native size showing whatever the session renders.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::session::Event;
use crate::types::{FrameBuffer, Point};

pub struct Drawer {
    window: Window,           // the on-screen window you see
    last_mouse: Option<Point>,
    left_was_down: bool,      // click = press edge, not held button
}

impl Drawer {
    /// Create a window sized to the image.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // ~20 ms per tick, same cadence as a waitKey(20) loop
        window.set_target_fps(50);
        Ok(Self { window, last_mouse: None, left_was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Everything that happened since the last `present`, in dispatch order.
    /// `brush` is the current size, needed to turn wheel notches into an absolute value.
    pub fn poll_events(&mut self, brush: u32) -> Vec<Event> {
        let mut events = Vec::new();

        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            events.push(Event::Quit);
            return events;
        }

        // Pointer first, so a click in the same tick lands where the cursor is now.
        let mouse = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x.floor() as i32, y.floor() as i32));
        if let Some(p) = mouse {
            if self.last_mouse != Some(p) {
                events.push(Event::PointerMove(p));
            }
        }
        self.last_mouse = mouse;

        let left_down = self.window.get_mouse_down(MouseButton::Left);
        if left_down && !self.left_was_down {
            if let Some(p) = mouse {
                events.push(Event::Click(p));
            }
        }
        self.left_was_down = left_down;

        if self.window.is_key_pressed(Key::Z, KeyRepeat::No) {
            events.push(Event::Undo);
        }
        if self.window.is_key_pressed(Key::S, KeyRepeat::No) {
            events.push(Event::Save);
        }
        if self.window.is_key_pressed(Key::RightBracket, KeyRepeat::Yes) {
            events.push(Event::BrushUp);
        }
        if self.window.is_key_pressed(Key::LeftBracket, KeyRepeat::Yes) {
            events.push(Event::BrushDown);
        }

        // Wheel is the continuous control: one notch, one pixel of radius.
        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            if dy != 0.0 {
                events.push(Event::SetBrush(brush as i64 + dy.signum() as i64));
            }
        }

        events
    }
}
