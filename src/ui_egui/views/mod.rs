//! Grid views: the cell index, the pure grid layout and its egui painter.

pub mod palette;
pub mod slot_index;
pub mod week_grid;
