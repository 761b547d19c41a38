//! Drag-to-relocate for slot blocks.
//!
//! The controller is a plain state machine so the grid painter only feeds it
//! pointer events; it never touches the store itself. A drop either cancels
//! or yields a [`RelocationRequest`] which the app sends to the store worker
//! and later reports back through [`DragController::finish`].

use anyhow::Result;

use crate::models::grid::{CellKey, TimeGridDefinition};
use crate::models::slot::{Slot, SlotChanges};
use crate::services::store::SlotStore;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        slot: Slot,
        source: CellKey,
    },
    Targeting {
        slot: Slot,
        source: CellKey,
        target: CellKey,
    },
    Committing {
        slot: Slot,
        source: CellKey,
        destination: CellKey,
    },
}

/// Move of one slot to a new day and row window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRequest {
    pub slot_id: i64,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl RelocationRequest {
    /// Only day and times change; type, student, coach and notes stay as stored.
    pub fn into_changes(self) -> SlotChanges {
        SlotChanges::relocation(self.day_of_week, &self.start_time, &self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Commit(RelocationRequest),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationOutcome {
    Relocated { slot_id: i64, destination: CellKey },
    Failed(String),
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Start dragging `slot`. Ignored unless idle or when the slot was never saved.
    pub fn begin_drag(&mut self, slot: &Slot) -> bool {
        if !matches!(self.state, DragState::Idle) || slot.id.is_none() {
            return false;
        }

        let source = CellKey::new(slot.day_of_week, slot.start_time.clone());
        log::debug!("Drag started for slot {:?} at {}", slot.id, source);
        self.state = DragState::Dragging {
            slot: slot.clone(),
            source,
        };
        true
    }

    /// Pointer is over `key`; it becomes the tentative destination.
    pub fn enter_cell(&mut self, key: CellKey) {
        self.state = match std::mem::take(&mut self.state) {
            DragState::Dragging { slot, source } | DragState::Targeting { slot, source, .. } => {
                DragState::Targeting {
                    slot,
                    source,
                    target: key,
                }
            }
            other => other,
        };
    }

    /// Pointer left the grid without a destination.
    pub fn leave_grid(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            DragState::Targeting { slot, source, .. } => DragState::Dragging { slot, source },
            other => other,
        };
    }

    /// Release the drag over `destination`.
    ///
    /// Dropping outside the grid, onto the source cell or onto a row the
    /// definition does not contain cancels without touching the store.
    pub fn drop(
        &mut self,
        destination: Option<CellKey>,
        definition: &TimeGridDefinition,
    ) -> DropOutcome {
        let (slot, source) = match std::mem::take(&mut self.state) {
            DragState::Dragging { slot, source } | DragState::Targeting { slot, source, .. } => {
                (slot, source)
            }
            other => {
                self.state = other;
                return DropOutcome::Cancelled;
            }
        };

        let Some(destination) = destination else {
            return DropOutcome::Cancelled;
        };
        if destination == source {
            return DropOutcome::Cancelled;
        }

        let (Some(slot_id), Some(row), Some(_)) = (
            slot.id,
            definition.row_starting_at(&destination.start_time),
            definition.column(destination.day_of_week),
        ) else {
            log::warn!("Dropped slot {:?} outside the grid at {}", slot.id, destination);
            return DropOutcome::Cancelled;
        };

        let request = RelocationRequest {
            slot_id,
            day_of_week: destination.day_of_week,
            start_time: row.start_time.clone(),
            end_time: row.end_time.clone(),
        };
        self.state = DragState::Committing {
            slot,
            source,
            destination,
        };
        DropOutcome::Commit(request)
    }

    /// Abandon a drag that has not been dropped yet.
    ///
    /// A commit already handed to the store stays until [`Self::finish`].
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            log::debug!("Drag cancelled");
            self.state = DragState::Idle;
        }
    }

    /// Report the store result for the commit of `slot_id`.
    ///
    /// Returns `None`, leaving the state alone, when no commit for that slot
    /// is outstanding.
    pub fn finish(&mut self, slot_id: i64, result: Result<(), String>) -> Option<RelocationOutcome> {
        let destination = match &self.state {
            DragState::Committing {
                slot, destination, ..
            } if slot.id == Some(slot_id) => destination.clone(),
            _ => {
                log::warn!("Relocation result for slot {} has no matching commit", slot_id);
                return None;
            }
        };

        self.state = DragState::Idle;
        Some(match result {
            Ok(()) => RelocationOutcome::Relocated {
                slot_id,
                destination,
            },
            Err(message) => RelocationOutcome::Failed(message),
        })
    }

    /// Drop and apply the move synchronously against `store`.
    pub fn relocate(
        &mut self,
        store: &dyn SlotStore,
        destination: Option<CellKey>,
        definition: &TimeGridDefinition,
    ) -> Option<RelocationOutcome> {
        match self.drop(destination, definition) {
            DropOutcome::Cancelled => None,
            DropOutcome::Commit(request) => {
                let slot_id = request.slot_id;
                let result: Result<()> = store.update_slot(slot_id, &request.into_changes());
                self.finish(
                    slot_id,
                    result.map_err(|err| {
                        log::error!("Failed to relocate slot {}: {:#}", slot_id, err);
                        err.to_string()
                    }),
                )
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            DragState::Dragging { .. } | DragState::Targeting { .. }
        )
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.state, DragState::Committing { .. })
    }

    pub fn source(&self) -> Option<&CellKey> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { source, .. }
            | DragState::Targeting { source, .. }
            | DragState::Committing { source, .. } => Some(source),
        }
    }

    pub fn target(&self) -> Option<&CellKey> {
        match &self.state {
            DragState::Targeting { target, .. } => Some(target),
            DragState::Committing { destination, .. } => Some(destination),
            _ => None,
        }
    }

    pub fn dragged_slot(&self) -> Option<&Slot> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { slot, .. }
            | DragState::Targeting { slot, .. }
            | DragState::Committing { slot, .. } => Some(slot),
        }
    }

    pub fn dragged_slot_id(&self) -> Option<i64> {
        self.dragged_slot().and_then(|slot| slot.id)
    }
}
