/// Cell is a live coordinate on the N×N grid.
/// Generations store sets of these; dead cells are implicit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offsets of the 8 Moore neighbors
    pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
        (-1, -1), (0, -1), (1, -1),
        (-1, 0),           (1, 0),
        (-1, 1),  (0, 1),  (1, 1),
    ];

    /// Shift by (dx, dy) without any grid knowledge.
    /// Returns signed coordinates so callers can decide how to treat edges.
    pub const fn offset(self, dx: i64, dy: i64) -> (i64, i64) {
        (self.x as i64 + dx, self.y as i64 + dy)
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}
