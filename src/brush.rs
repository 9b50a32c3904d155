// Brush radius in pixels. One value per session, read fresh on every event.

pub const DEFAULT_BRUSH: u32 = 20;
pub const DEFAULT_MAX_BRUSH: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrushSize {
    value: u32,
    max: u32,
}

impl Default for BrushSize {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH, DEFAULT_MAX_BRUSH)
    }
}

impl BrushSize {
    /// Initial value is clamped into [0, max].
    pub fn new(value: u32, max: u32) -> Self {
        Self { value: value.min(max), max }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Continuous control (slider / wheel): any value, clamped into range.
    pub fn set(&mut self, value: i64) -> u32 {
        self.value = value.clamp(0, self.max as i64) as u32;
        self.value
    }

    /// One step up; refused at the maximum.
    pub fn increment(&mut self) -> bool {
        if self.value < self.max {
            self.value += 1;
            true
        } else {
            false
        }
    }

    /// One step down; refused at zero.
    pub fn decrement(&mut self) -> bool {
        if self.value > 0 {
            self.value -= 1;
            true
        } else {
            false
        }
    }
}
