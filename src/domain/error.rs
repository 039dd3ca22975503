use thiserror::Error;

/// Failures raised by the stepping engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Pattern bounding box does not fit on the grid.
    #[error("pattern spans {width}x{height} cells and does not fit a {grid_size}x{grid_size} grid")]
    InvalidPattern { width: u64, height: u64, grid_size: u32 },

    /// A birth or survival entry lies outside 0..=8.
    #[error("neighbor count {value} in {set} set is outside 0..=8")]
    InvalidRule { set: &'static str, value: u8 },

    /// Text could not be read as `B{digits}/S{digits}`.
    #[error("malformed rule notation: {0:?}")]
    RuleNotation(String),
}
