use std::ops::RangeInclusive;

/// Inclusive generation range picked by the UI.
/// Stored unclamped; the history length is only known at sync time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayWindow {
    pub start: i64,
    pub end: i64,
}

impl DisplayWindow {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Window covering every generation in a history of `len`
    pub const fn full(len: usize) -> Self {
        Self::new(0, len as i64 - 1)
    }

    /// Indices to walk once clamped to `[0, len - 1]`.
    /// None for reversed ranges, negative indices, or a start past the end.
    pub fn resolve(&self, len: usize) -> Option<RangeInclusive<usize>> {
        if self.start < 0 || self.end < self.start {
            return None;
        }
        let start = self.start as usize;
        if start >= len {
            return None;
        }
        Some(start..=(self.end as usize).min(len - 1))
    }

    /// `[minY, maxY]` for shader uniforms. Always at least one unit tall.
    pub fn y_range(&self) -> (usize, usize) {
        let min_y = self.start.max(0) as usize;
        let max_y = (self.end.max(0) as usize).max(min_y + 1);
        (min_y, max_y)
    }

    /// Move the window by `delta` generations, keeping its span and
    /// staying inside a history of `len`.
    pub fn slide(&self, delta: i64, len: usize) -> Self {
        let span = (self.end - self.start).max(0);
        let last_start = (len as i64 - 1 - span).max(0);
        let start = (self.start + delta).clamp(0, last_start);
        Self::new(start, start + span)
    }
}
