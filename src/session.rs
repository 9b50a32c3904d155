// The healing-brush state machine.
//
// What you SEE:
// • Waiting for a target: a red circle follows the pointer. Click on the blemish.
// • Waiting for a source: the red circle stays on the blemish, a blue circle follows
//   the pointer, a blue line joins them, and the blemish already shows the heal you
//   would get from the blue spot. Click to keep it.
//
// Nothing here touches a window; the driver turns input into `Event`s and shows `view()`.
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::brush::BrushSize;
use crate::clone::{seamless_clone, CloneParams};
use crate::draw::{draw_circle, draw_line, guide_segment, SOURCE_COLOR, TARGET_COLOR};
use crate::error::Error;
use crate::history::EditHistory;
use crate::io::save_image;
use crate::region::{check_bounds, extract};
use crate::types::{FrameBuffer, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    AwaitingTarget,
    AwaitingSource { target: Point },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    PointerMove(Point),
    /// Primary button pressed at this position.
    Click(Point),
    Undo,
    Save,
    BrushUp,
    BrushDown,
    /// Continuous control; clamped into range.
    SetBrush(i64),
    Quit,
}

/// What a dispatched event did. `view()` is already updated when this is returned.
#[derive(Debug)]
pub enum Outcome {
    Redrawn,
    TargetSelected(Point),
    Committed { history_len: usize },
    /// Click refused because a region would leave the image.
    Rejected(Error),
    Undone { history_len: usize },
    NothingToUndo,
    Saved(PathBuf),
    SaveFailed(Error),
    BrushChanged(u32),
    BrushUnchanged(u32),
    Quit,
}

/// Clone the region around `source` onto `target` in a copy of `image`.
pub fn heal(
    image: &FrameBuffer,
    source: Point,
    target: Point,
    brush: u32,
    params: &CloneParams,
) -> Result<FrameBuffer, Error> {
    check_bounds(image.width, image.height, target, brush)?;
    let (patch, mask) = extract(image, source, brush)?;
    seamless_clone(&patch, &mask, image, target, params)
}

/// Build the frame to show for `state` with the pointer at `pointer`.
/// `current` is only read; every overlay goes onto a fresh copy.
pub fn render(
    current: &FrameBuffer,
    state: SessionState,
    brush: u32,
    pointer: Option<Point>,
    params: &CloneParams,
) -> FrameBuffer {
    match state {
        SessionState::AwaitingTarget => {
            let mut frame = current.clone();
            if let Some(p) = pointer {
                draw_circle(&mut frame, p, brush, TARGET_COLOR);
            }
            frame
        }
        SessionState::AwaitingSource { target } => {
            let Some(mouse) = pointer else {
                let mut frame = current.clone();
                draw_circle(&mut frame, target, brush, TARGET_COLOR);
                return frame;
            };
            let mut frame = heal(current, mouse, target, brush, params).unwrap_or_else(|e| {
                debug!("preview skipped: {e}");
                current.clone()
            });
            draw_circle(&mut frame, target, brush, TARGET_COLOR);
            draw_circle(&mut frame, mouse, brush, SOURCE_COLOR);
            if let Some((start, end)) = guide_segment(target, mouse, brush) {
                draw_line(&mut frame, start, end, SOURCE_COLOR);
            }
            frame
        }
    }
}

pub struct Session {
    history: EditHistory,
    brush: BrushSize,
    state: SessionState,
    pointer: Option<Point>,
    view: FrameBuffer,
    output: PathBuf,
    params: CloneParams,
}

impl Session {
    pub fn new(original: FrameBuffer, brush: BrushSize, output: PathBuf, params: CloneParams) -> Self {
        let view = original.clone();
        Self {
            history: EditHistory::new(original),
            brush,
            state: SessionState::AwaitingTarget,
            pointer: None,
            view,
            output,
            params,
        }
    }

    /// Run one event through the state machine.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        match event {
            Event::PointerMove(p) => {
                self.pointer = Some(p);
                self.redraw();
                Outcome::Redrawn
            }
            Event::Click(p) => {
                self.pointer = Some(p);
                match self.state {
                    SessionState::AwaitingTarget => self.select_target(p),
                    SessionState::AwaitingSource { target } => self.commit_clone(p, target),
                }
            }
            Event::Undo => {
                if self.history.undo() {
                    info!("undo, {} state(s) left", self.history.len());
                    self.redraw();
                    Outcome::Undone { history_len: self.history.len() }
                } else {
                    Outcome::NothingToUndo
                }
            }
            Event::Save => match save_image(self.history.current(), &self.output) {
                Ok(()) => {
                    info!("saved image as '{}'", self.output.display());
                    Outcome::Saved(self.output.clone())
                }
                Err(e) => {
                    warn!("{e}");
                    Outcome::SaveFailed(e)
                }
            },
            Event::BrushUp => {
                let changed = self.brush.increment();
                self.brush_outcome(changed)
            }
            Event::BrushDown => {
                let changed = self.brush.decrement();
                self.brush_outcome(changed)
            }
            Event::SetBrush(value) => {
                let before = self.brush.get();
                let changed = self.brush.set(value) != before;
                self.brush_outcome(changed)
            }
            Event::Quit => Outcome::Quit,
        }
    }

    fn select_target(&mut self, p: Point) -> Outcome {
        let current = self.history.current();
        if let Err(e) = check_bounds(current.width, current.height, p, self.brush.get()) {
            warn!("target rejected: {e}");
            self.redraw();
            return Outcome::Rejected(e);
        }
        info!("target selected at {p}");
        self.state = SessionState::AwaitingSource { target: p };
        // confirmation: only the target circle until the pointer moves again
        self.pointer = None;
        self.view = render(current, self.state, self.brush.get(), None, &self.params);
        Outcome::TargetSelected(p)
    }

    fn commit_clone(&mut self, source: Point, target: Point) -> Outcome {
        match heal(self.history.current(), source, target, self.brush.get(), &self.params) {
            Ok(healed) => {
                self.view = healed.clone();
                self.history.commit(healed);
                self.state = SessionState::AwaitingTarget;
                info!("cloned {source} onto {target}, history has {} state(s)", self.history.len());
                Outcome::Committed { history_len: self.history.len() }
            }
            Err(e) => {
                warn!("source rejected: {e}");
                self.redraw();
                Outcome::Rejected(e)
            }
        }
    }

    fn brush_outcome(&mut self, changed: bool) -> Outcome {
        let size = self.brush.get();
        if changed {
            info!("brush size {size}");
            self.redraw();
            Outcome::BrushChanged(size)
        } else {
            Outcome::BrushUnchanged(size)
        }
    }

    fn redraw(&mut self) {
        self.view = render(self.history.current(), self.state, self.brush.get(), self.pointer, &self.params);
    }

    /// The frame to present right now.
    pub fn view(&self) -> &FrameBuffer {
        &self.view
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn brush(&self) -> BrushSize {
        self.brush
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }
}
