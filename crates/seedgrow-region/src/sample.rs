//! Growth queue entries

/// A grid position with its intensity and the region label it carries
/// through the growth queue.
///
/// The label is the region that claimed the position when it was
/// enqueued. Ownership decisions always re-read the label grid, never
/// this copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Region id
    pub label: u32,
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// Intensity at `(x, y)`
    pub intensity: u8,
}

impl Sample {
    /// Create a sample.
    pub fn new(label: u32, x: u32, y: u32, intensity: u8) -> Self {
        Self {
            label,
            x,
            y,
            intensity,
        }
    }

    /// Absolute intensity difference to another sample.
    #[inline]
    pub fn intensity_diff(&self, other: &Sample) -> u8 {
        self.intensity.abs_diff(other.intensity)
    }
}
