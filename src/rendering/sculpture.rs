//! Immediate-mode drawing of the published instance buffer with macroquad.
//! Each record becomes one unit cube; height encodes the generation.

use macroquad::prelude::*;

use super::InstanceRecord;

/// Edge length of a drawn cell, leaving a small gap between neighbors
const CUBE_SIZE: f32 = 0.9;

/// Ramp from the oldest generation in view (teal) to the newest (amber)
pub fn generation_color(generation_t: f32, min_y: f32, max_y: f32) -> Color {
    let t = ((generation_t - min_y) / (max_y - min_y)).clamp(0.0, 1.0);
    Color::new(0.1 + 0.9 * t, 0.8 - 0.2 * t, 0.7 - 0.6 * t, 1.0)
}

/// Camera looking at the sculpture from a corner, framing the grid and the
/// stacked generations
pub fn sculpture_camera(grid_size: u32, min_y: usize, max_y: usize) -> Camera3D {
    let extent = grid_size as f32;
    let height = max_y.saturating_sub(min_y) as f32;
    Camera3D {
        position: vec3(extent * 0.9, height * 0.5 + extent * 0.6, extent * 0.9),
        up: vec3(0.0, 1.0, 0.0),
        target: vec3(0.0, height * 0.4, 0.0),
        ..Default::default()
    }
}

/// Draw every record, shifting the window so its oldest generation sits on y = 0
pub fn draw_instances(records: &[InstanceRecord], min_y: usize, max_y: usize) {
    let (low, high) = (min_y as f32, max_y as f32);
    let size = vec3(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE);
    for record in records {
        let [x, y, z] = record.position;
        let color = generation_color(record.generation_t, low, high);
        draw_cube(vec3(x, y - low, z), size, None, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_ramp_endpoints() {
        let oldest = generation_color(10.0, 10.0, 20.0);
        let newest = generation_color(20.0, 10.0, 20.0);
        assert!((oldest.r - 0.1).abs() < 1e-6);
        assert!((newest.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_clamps_outside_window() {
        assert_eq!(generation_color(-5.0, 0.0, 1.0), generation_color(0.0, 0.0, 1.0));
        assert_eq!(generation_color(50.0, 0.0, 1.0), generation_color(1.0, 0.0, 1.0));
    }
}
