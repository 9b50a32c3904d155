use crate::types::FrameBuffer;

/// Committed image states. Index 0 is the loaded image and is never removed,
/// so there is always a current frame to show.
pub struct EditHistory {
    states: Vec<FrameBuffer>,
}

impl EditHistory {
    pub fn new(original: FrameBuffer) -> Self {
        Self { states: vec![original] }
    }

    pub fn commit(&mut self, image: FrameBuffer) {
        self.states.push(image);
    }

    /// Drop the newest state. Returns false (and does nothing) when only the original is left.
    pub fn undo(&mut self) -> bool {
        if self.states.len() > 1 {
            self.states.pop();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> &FrameBuffer {
        // len >= 1 always holds
        &self.states[self.states.len() - 1]
    }

    #[cfg(test)]
    pub fn original(&self) -> &FrameBuffer {
        &self.states[0]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
}
