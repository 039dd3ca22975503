use bytemuck::{Pod, Zeroable};

use crate::domain::Cell;

/// Per-instance data consumed by the cube shader.
/// Layout matches a `vec4<f32>` vertex attribute: xyz position, w generation.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    /// x = cell.x - N/2, y = generation index, z = cell.y - N/2
    pub position: [f32; 3],
    /// Generation index, drives the time-based color cycle
    pub generation_t: f32,
}

impl InstanceRecord {
    pub fn new(cell: Cell, generation: usize, half_extent: f32) -> Self {
        let height = generation as f32;
        Self {
            position: [cell.x as f32 - half_extent, height, cell.y as f32 - half_extent],
            generation_t: height,
        }
    }

    /// View a record slice as raw bytes for buffer upload
    pub fn as_bytes(records: &[Self]) -> &[u8] {
        bytemuck::cast_slice(records)
    }
}
