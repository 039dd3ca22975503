use rand::Rng;

/// A named seed pattern expressed as live-cell coordinates in its own
/// local frame. The engine centers it on the grid.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: u32,
    pub height: u32,
    pub cells: Vec<(i32, i32)>,
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(i32, i32)>) -> Self {
        let span = |coords: Vec<i32>| match (coords.iter().min(), coords.iter().max()) {
            (Some(&lo), Some(&hi)) => u32::try_from(hi as i64 - lo as i64 + 1).unwrap_or(u32::MAX),
            _ => 0,
        };
        let width = span(cells.iter().map(|&(x, _)| x).collect());
        let height = span(cells.iter().map(|&(_, y)| y).collect());
        Self { name, description, width, height, cells }
    }
}

/// Uniform random soup of `width`×`height` with the given live density
pub fn random_soup<R: Rng + ?Sized>(width: u32, height: u32, density: f64, rng: &mut R) -> Vec<(i32, i32)> {
    let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
    (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| (x, y)))
        .filter(|_| rng.random_bool(density))
        .collect()
}

/// Small seed table used by the viewer, benchmark and tests
pub mod presets {
    use super::Pattern;

    /// Glider - moves one cell diagonally every 4 generations
    pub fn glider() -> Pattern {
        Pattern::new("Glider", "Spaceship, period 4", vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
    }

    pub fn blinker() -> Pattern {
        Pattern::new("Blinker", "Oscillator, period 2", vec![(0, 1), (1, 1), (2, 1)])
    }

    pub fn block() -> Pattern {
        Pattern::new("Block", "Still life", vec![(0, 0), (1, 0), (0, 1), (1, 1)])
    }

    /// Lightweight spaceship, travels along x
    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            "Spaceship, period 4",
            vec![(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
        )
    }

    /// R-pentomino - settles after 1103 generations, so it fills the whole history
    pub fn r_pentomino() -> Pattern {
        Pattern::new("R-pentomino", "Methuselah", vec![(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)])
    }

    pub fn acorn() -> Pattern {
        Pattern::new(
            "Acorn",
            "Methuselah",
            vec![(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
        )
    }

    /// Gosper glider gun - emits a glider every 30 generations
    pub fn glider_gun() -> Pattern {
        #[rustfmt::skip]
        let cells = vec![
            (0, 4), (0, 5), (1, 4), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8), (13, 2), (13, 8),
            (14, 5), (15, 3), (15, 7), (16, 4), (16, 5), (16, 6), (17, 5),
            (20, 2), (20, 3), (20, 4), (21, 2), (21, 3), (21, 4), (22, 1), (22, 5),
            (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ];
        Pattern::new("Gosper Glider Gun", "Gun, period 30", cells)
    }

    /// Look up a preset by name, ignoring case
    pub fn by_name(name: &str) -> Option<Pattern> {
        all_patterns()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            glider(),
            blinker(),
            block(),
            lwss(),
            r_pentomino(),
            acorn(),
            glider_gun(),
        ]
    }
}
