use serde::{Deserialize, Serialize};

use super::Cell;

/// Grid holds the board metadata: an N×N extent and whether the
/// edges wrap. Live cells themselves live in generations, not here.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Grid {
    size: u32,
    toroidal: bool,
}

impl Grid {
    pub const fn new(size: u32, toroidal: bool) -> Self {
        Self { size, toroidal }
    }

    /// Side length N
    pub const fn size(&self) -> u32 {
        self.size
    }

    pub const fn is_toroidal(&self) -> bool {
        self.toroidal
    }

    pub fn set_toroidal(&mut self, toroidal: bool) {
        self.toroidal = toroidal;
    }

    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    /// Packed counter key `y * N + x`
    #[inline]
    pub const fn key(&self, cell: Cell) -> u64 {
        cell.y as u64 * self.size as u64 + cell.x as u64
    }

    /// Inverse of [`Grid::key`]
    #[inline]
    pub const fn cell_at(&self, key: u64) -> Cell {
        let n = self.size as u64;
        Cell::new((key % n) as u32, (key / n) as u32)
    }

    /// Resolve a signed coordinate to a cell on this grid.
    /// Toroidal grids wrap modulo N; bounded grids return None off the edge.
    #[inline]
    pub fn resolve(&self, x: i64, y: i64) -> Option<Cell> {
        let n = self.size as i64;
        if n == 0 {
            return None;
        }
        if self.toroidal {
            Some(Cell::new(x.rem_euclid(n) as u32, y.rem_euclid(n) as u32))
        } else if (0..n).contains(&x) && (0..n).contains(&y) {
            Some(Cell::new(x as u32, y as u32))
        } else {
            None
        }
    }

    /// The 8 neighbors of a cell as seen by this grid's edge policy
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Cell::NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| {
                let (x, y) = cell.offset(dx, dy);
                self.resolve(x, y)
            })
    }
}
