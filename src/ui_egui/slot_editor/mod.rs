//! Slot editing window: form state and its egui rendering.

mod render;
mod state;

pub use render::{render_slot_editor, EditorRequest};
pub use state::{EditorError, EditorField, EditorStatus, FieldError, SlotEditorState};
