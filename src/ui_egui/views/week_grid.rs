//! Weekly scheduling grid.
//!
//! [`GridLayout`] is the pure description of what every cell shows and what
//! activating it means. [`WeekGridView`] paints a layout with egui and feeds
//! pointer gestures into the [`DragController`].

use std::collections::HashSet;

use chrono::NaiveDate;
use egui::{Align2, CursorIcon, FontId, Id, LayerId, Order, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::GridPalette;
use super::slot_index::{CoachFilter, SlotIndex};
use crate::models::coach::Coach;
use crate::models::grid::{CellKey, TimeGridDefinition, TimeRow};
use crate::models::slot::Slot;
use crate::ui_egui::drag::{DragController, DropOutcome, RelocationRequest};
use crate::utils::date::column_date;

const ROW_HEIGHT: f32 = 46.0;
const HEADER_HEIGHT: f32 = 38.0;
const TIME_COLUMN_WIDTH: f32 = 56.0;
const MIN_COLUMN_WIDTH: f32 = 96.0;

/// Result of activating a cell or a slot block.
#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    Create {
        day_of_week: u8,
        start_time: String,
        end_time: String,
    },
    Edit(Slot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeader {
    pub day_of_week: u8,
    pub name: String,
    pub date: NaiveDate,
    pub is_today: bool,
}

impl ColumnHeader {
    pub fn label(&self) -> String {
        let short: String = self.name.chars().take(3).collect();
        format!("{} {}", short, self.date.format("%-d %b"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccupantView {
    pub slot: Slot,
    /// Set when the cell is shared; only type code and student are shown.
    pub compact: bool,
}

impl OccupantView {
    pub fn lines(&self) -> Vec<String> {
        let slot = &self.slot;
        let student = slot.student_display();

        if self.compact {
            let line = if student.is_empty() {
                slot.slot_type.code().to_string()
            } else {
                format!("{} {}", slot.slot_type.code(), student)
            };
            return vec![line];
        }

        let mut lines = vec![slot.slot_type.label().to_string()];
        if !student.is_empty() {
            lines.push(student.to_string());
        }
        lines.push(slot.coach_name.clone());
        lines.push(slot.time_range_label());
        lines
    }

    pub fn tooltip(&self) -> String {
        let slot = &self.slot;
        let mut lines = vec![
            slot.slot_type.label().to_string(),
            format!("Coach: {}", slot.coach_name),
            slot.time_range_label(),
        ];
        if !slot.student_display().is_empty() {
            lines.insert(1, format!("Student: {}", slot.student_display()));
        }
        if !slot.notes.trim().is_empty() {
            lines.push(slot.notes.trim().to_string());
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Empty,
    Occupied(Vec<OccupantView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub key: CellKey,
    pub end_time: String,
    pub is_today: bool,
    pub content: CellContent,
}

impl CellView {
    /// Clicking the cell background. Only empty cells create.
    pub fn activate(&self) -> Option<GridAction> {
        match self.content {
            CellContent::Empty => Some(GridAction::Create {
                day_of_week: self.key.day_of_week,
                start_time: self.key.start_time.clone(),
                end_time: self.end_time.clone(),
            }),
            CellContent::Occupied(_) => None,
        }
    }

    pub fn activate_occupant(&self, position: usize) -> Option<GridAction> {
        self.occupants()
            .get(position)
            .map(|occupant| GridAction::Edit(occupant.slot.clone()))
    }

    pub fn occupants(&self) -> &[OccupantView] {
        match &self.content {
            CellContent::Empty => &[],
            CellContent::Occupied(occupants) => occupants,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub row: TimeRow,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub week_start: NaiveDate,
    pub headers: Vec<ColumnHeader>,
    pub rows: Vec<RowView>,
    /// Indexed slots whose start is not on any row or column of the grid.
    pub off_grid: usize,
}

impl GridLayout {
    pub fn build(
        definition: &TimeGridDefinition,
        index: &SlotIndex,
        week_start: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        let headers: Vec<ColumnHeader> = definition
            .days
            .iter()
            .map(|day| {
                let date = column_date(week_start, day.day_of_week);
                ColumnHeader {
                    day_of_week: day.day_of_week,
                    name: day.name.clone(),
                    date,
                    is_today: date == today,
                }
            })
            .collect();

        let mut shown = 0;
        let rows = definition
            .rows
            .iter()
            .map(|row| {
                let cells = headers
                    .iter()
                    .map(|header| {
                        let key = CellKey::new(header.day_of_week, row.start_time.clone());
                        let slots = index.slots_in(&key);
                        shown += slots.len();
                        let compact = slots.len() > 1;
                        let content = if slots.is_empty() {
                            CellContent::Empty
                        } else {
                            CellContent::Occupied(
                                slots
                                    .iter()
                                    .map(|slot| OccupantView {
                                        slot: slot.clone(),
                                        compact,
                                    })
                                    .collect(),
                            )
                        };
                        CellView {
                            key,
                            end_time: row.end_time.clone(),
                            is_today: header.is_today,
                            content,
                        }
                    })
                    .collect();
                RowView {
                    row: row.clone(),
                    cells,
                }
            })
            .collect();

        Self {
            week_start,
            headers,
            rows,
            off_grid: index.len().saturating_sub(shown),
        }
    }

    pub fn cell(&self, key: &CellKey) -> Option<&CellView> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .find(|cell| &cell.key == key)
    }
}

/// Why a slot block is not fully interactive this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLock {
    /// A write for the slot is with the store: drawn dimmed, no click or drag.
    InFlight,
    /// The slot is open in the editor: it can be clicked but not dragged.
    Editing,
}

/// Slots the grid must not hand out for another write.
#[derive(Debug, Clone, Copy)]
pub struct SlotLocks<'a> {
    pub in_flight: &'a HashSet<i64>,
    pub editing: Option<i64>,
}

impl SlotLocks<'_> {
    pub fn lock_for(&self, slot: &Slot) -> Option<BlockLock> {
        let id = slot.id?;
        if self.in_flight.contains(&id) {
            Some(BlockLock::InFlight)
        } else if self.editing == Some(id) {
            Some(BlockLock::Editing)
        } else {
            None
        }
    }

    pub fn can_drag(&self, slot: &Slot) -> bool {
        slot.id.is_some() && self.lock_for(slot).is_none()
    }
}

/// What happened in the grid this frame.
#[derive(Debug, Default)]
pub struct GridInteraction {
    pub action: Option<GridAction>,
    pub relocation: Option<RelocationRequest>,
}

pub struct WeekGridView;

impl WeekGridView {
    pub fn show(
        ui: &mut egui::Ui,
        layout: &GridLayout,
        definition: &TimeGridDefinition,
        palette: &GridPalette,
        drag: &mut DragController,
        locks: SlotLocks<'_>,
    ) -> GridInteraction {
        let mut interaction = GridInteraction::default();

        if drag.is_dragging() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            drag.cancel();
        }

        let columns = layout.headers.len().max(1) as f32;
        let col_width =
            ((ui.available_width() - TIME_COLUMN_WIDTH) / columns).max(MIN_COLUMN_WIDTH);
        let pointer = ui
            .ctx()
            .pointer_interact_pos()
            .or_else(|| ui.input(|i| i.pointer.hover_pos()));
        let mut hovered: Option<CellKey> = None;

        egui::ScrollArea::both()
            .id_source("week_grid_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing = Vec2::ZERO;

                render_header_row(ui, layout, col_width, palette);

                for row in &layout.rows {
                    ui.horizontal(|ui| {
                        render_time_label(ui, &row.row, palette);
                        for cell in &row.cells {
                            render_cell(
                                ui,
                                cell,
                                col_width,
                                palette,
                                drag,
                                locks,
                                pointer,
                                &mut hovered,
                                &mut interaction,
                            );
                        }
                    });
                }
            });

        if drag.is_dragging() {
            match hovered.clone() {
                Some(key) if drag.target() != Some(&key) => drag.enter_cell(key),
                Some(_) => {}
                None => drag.leave_grid(),
            }
            render_drag_ghost(ui, drag, pointer, col_width, palette);
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            ui.ctx().request_repaint();

            if ui.input(|i| i.pointer.primary_released()) {
                if let DropOutcome::Commit(request) = drag.drop(hovered, definition) {
                    interaction.relocation = Some(request);
                }
            }
        }

        interaction
    }
}

/// Coach selector above the grid. Returns true when the filter changed.
pub fn coach_filter_combo(ui: &mut egui::Ui, filter: &mut CoachFilter, coaches: &[Coach]) -> bool {
    let before = *filter;
    let selected = match filter {
        CoachFilter::All => "All coaches".to_string(),
        CoachFilter::Coach(id) => coaches
            .iter()
            .find(|coach| coach.id == *id)
            .map(|coach| coach.name.clone())
            .unwrap_or_else(|| format!("Coach #{}", id)),
    };

    ui.label("Coach:");
    egui::ComboBox::from_id_source("coach_filter")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            ui.selectable_value(filter, CoachFilter::All, "All coaches");
            for coach in coaches {
                let label = if coach.active {
                    coach.name.clone()
                } else {
                    format!("{} (inactive)", coach.name)
                };
                ui.selectable_value(filter, CoachFilter::Coach(coach.id), label);
            }
        });

    *filter != before
}

fn render_header_row(ui: &mut egui::Ui, layout: &GridLayout, col_width: f32, palette: &GridPalette) {
    ui.horizontal(|ui| {
        let (corner, _) =
            ui.allocate_exact_size(Vec2::new(TIME_COLUMN_WIDTH, HEADER_HEIGHT), Sense::hover());
        ui.painter().rect_filled(corner, 0.0, palette.header_bg);

        for header in &layout.headers {
            let (rect, _) =
                ui.allocate_exact_size(Vec2::new(col_width, HEADER_HEIGHT), Sense::hover());
            let (fill, text_color) = if header.is_today {
                (palette.today_bg, palette.today_border)
            } else {
                (palette.header_bg, palette.header_text)
            };
            ui.painter().rect_filled(rect, 0.0, fill);
            if header.is_today {
                ui.painter().line_segment(
                    [rect.left_bottom(), rect.right_bottom()],
                    Stroke::new(2.0, palette.today_border),
                );
            }
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                header.label(),
                FontId::proportional(14.0),
                text_color,
            );
        }
    });
}

fn render_time_label(ui: &mut egui::Ui, row: &TimeRow, palette: &GridPalette) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(TIME_COLUMN_WIDTH, ROW_HEIGHT), Sense::hover());
    ui.painter().rect_filled(rect, 0.0, palette.background);
    ui.painter().text(
        Pos2::new(rect.right() - 6.0, rect.top() + 4.0),
        Align2::RIGHT_TOP,
        &row.label,
        FontId::proportional(11.0),
        palette.time_text,
    );
}

#[allow(clippy::too_many_arguments)]
fn render_cell(
    ui: &mut egui::Ui,
    cell: &CellView,
    col_width: f32,
    palette: &GridPalette,
    drag: &mut DragController,
    locks: SlotLocks<'_>,
    pointer: Option<Pos2>,
    hovered: &mut Option<CellKey>,
    interaction: &mut GridInteraction,
) {
    let (rect, response) = ui.allocate_exact_size(Vec2::new(col_width, ROW_HEIGHT), Sense::click());
    let dragging = drag.is_dragging();

    let bg = if cell.is_today {
        palette.today_bg
    } else {
        palette.cell_bg
    };
    ui.painter().rect_filled(rect, 0.0, bg);
    ui.painter().line_segment(
        [rect.left_top(), rect.right_top()],
        Stroke::new(1.0, palette.row_line),
    );
    ui.painter().line_segment(
        [rect.right_top(), rect.right_bottom()],
        Stroke::new(1.0, palette.divider),
    );

    if pointer.is_some_and(|pos| rect.contains(pos)) {
        *hovered = Some(cell.key.clone());
    }

    if dragging && drag.target() == Some(&cell.key) {
        let highlight = rect.shrink2(Vec2::new(3.0, 2.0));
        ui.painter().rect_filled(
            highlight,
            2.0,
            egui::Color32::from_rgba_unmultiplied(120, 200, 120, 35),
        );
        ui.painter()
            .rect_stroke(highlight, 2.0, Stroke::new(1.5, palette.drop_target));
    }

    let occupants = cell.occupants();
    if occupants.is_empty() {
        if response.hovered() && !dragging {
            ui.painter().rect_filled(rect, 0.0, palette.hover_overlay);
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }
        if response.clicked() && !dragging {
            interaction.action = cell.activate();
        }
        return;
    }

    let block_width = rect.width() / occupants.len() as f32;
    for (position, occupant) in occupants.iter().enumerate() {
        let slot = &occupant.slot;
        let block_rect = Rect::from_min_size(
            Pos2::new(rect.left() + block_width * position as f32, rect.top()),
            Vec2::new(block_width, rect.height()),
        )
        .shrink(2.0);

        let lock = locks.lock_for(slot);
        let is_pending = lock == Some(BlockLock::InFlight);
        let is_dragged = dragging && drag.dragged_slot_id() == slot.id;
        let fill = if is_pending || is_dragged {
            palette.pending_fill(slot.slot_type)
        } else {
            palette.slot_fill(slot.slot_type)
        };
        render_block(ui, block_rect, occupant, fill, palette);

        let block_id = Id::new(("slot_block", cell.key.to_string(), position, slot.id));
        let block_response = ui
            .interact(block_rect, block_id, Sense::click_and_drag())
            .on_hover_text(occupant.tooltip());

        if lock == Some(BlockLock::Editing) {
            ui.painter()
                .rect_stroke(block_rect, 4.0, Stroke::new(2.0, palette.today_border));
        }

        if is_pending {
            continue;
        }
        if block_response.drag_started() {
            if locks.can_drag(slot) {
                drag.begin_drag(slot);
            }
        } else if block_response.clicked() && !dragging {
            interaction.action = cell.activate_occupant(position);
        }
    }
}

fn render_block(
    ui: &egui::Ui,
    rect: Rect,
    occupant: &OccupantView,
    fill: egui::Color32,
    palette: &GridPalette,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, fill);

    let font = if occupant.compact {
        FontId::proportional(11.0)
    } else {
        FontId::proportional(10.5)
    };
    let line_height = font.size + 1.0;
    for (i, line) in occupant.lines().iter().enumerate() {
        painter.text(
            Pos2::new(rect.left() + 4.0, rect.top() + 2.0 + line_height * i as f32),
            Align2::LEFT_TOP,
            line,
            font.clone(),
            palette.block_text,
        );
    }
}

fn render_drag_ghost(
    ui: &egui::Ui,
    drag: &DragController,
    pointer: Option<Pos2>,
    col_width: f32,
    palette: &GridPalette,
) {
    let (Some(slot), Some(pointer)) = (drag.dragged_slot(), pointer) else {
        return;
    };
    let painter = ui
        .ctx()
        .layer_painter(LayerId::new(Order::Tooltip, Id::new("slot_drag_ghost")));
    let rect = Rect::from_center_size(pointer, Vec2::new(col_width - 8.0, ROW_HEIGHT - 8.0));
    painter.rect_filled(rect, 4.0, palette.pending_fill(slot.slot_type));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        format!("{} {}", slot.slot_type.code(), slot.student_display()),
        FontId::proportional(11.0),
        palette.block_text,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()
    }

    fn grid() -> TimeGridDefinition {
        TimeGridDefinition::with_interval(&[0, 1, 2, 3, 4], "15:00", "17:00", 30).unwrap()
    }

    fn slot(id: i64, coach_id: i64, day: u8, start: &str, end: &str) -> Slot {
        let mut slot = Slot::builder()
            .student(format!("Student {}", id))
            .coach(coach_id, "Sam")
            .day(day)
            .times(start, end)
            .week_start(week())
            .build()
            .unwrap();
        slot.id = Some(id);
        slot
    }

    fn layout(slots: &[Slot], today: NaiveDate) -> GridLayout {
        let index = SlotIndex::build(slots, CoachFilter::All);
        GridLayout::build(&grid(), &index, week(), today)
    }

    #[test]
    fn one_cell_per_row_and_column() {
        let layout = layout(&[], week());
        assert_eq!(layout.headers.len(), 5);
        assert_eq!(layout.rows.len(), 4);
        assert!(layout.rows.iter().all(|row| row.cells.len() == 5));
    }

    #[test]
    fn empty_cell_creates_with_row_window() {
        let layout = layout(&[], week());
        let cell = layout.cell(&CellKey::new(2, "16:00")).unwrap();
        assert_eq!(
            cell.activate(),
            Some(GridAction::Create {
                day_of_week: 2,
                start_time: "16:00".to_string(),
                end_time: "16:30".to_string(),
            })
        );
    }

    #[test]
    fn single_occupant_is_full_and_edits() {
        let maya = slot(1, 4, 1, "15:30", "16:00");
        let layout = layout(std::slice::from_ref(&maya), week());
        let cell = layout.cell(&CellKey::new(1, "15:30")).unwrap();

        assert_eq!(cell.activate(), None);
        assert_eq!(cell.activate_occupant(0), Some(GridAction::Edit(maya)));
        assert_eq!(
            cell.occupants()[0].lines(),
            vec!["1-2-1", "Student 1", "Sam", "15:30–16:00"]
        );
    }

    #[test]
    fn shared_cell_renders_compact() {
        let layout = layout(
            &[slot(1, 4, 0, "15:00", "15:30"), slot(2, 5, 0, "15:00", "16:00")],
            week(),
        );
        let cell = layout.cell(&CellKey::new(0, "15:00")).unwrap();
        let occupants = cell.occupants();

        assert_eq!(occupants.len(), 2);
        assert!(occupants.iter().all(|o| o.compact));
        assert_eq!(occupants[1].lines(), vec!["121 Student 2"]);
    }

    #[test]
    fn headers_carry_dates_and_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let layout = layout(&[], today);

        assert_eq!(layout.headers[0].date, week());
        assert!(layout.headers[2].is_today);
        assert_eq!(layout.headers.iter().filter(|h| h.is_today).count(), 1);
        assert_eq!(layout.headers[2].label(), "Wed 28 Jan");
        assert!(layout.rows[0].cells[2].is_today);
    }

    #[test]
    fn slots_off_the_grid_are_counted() {
        let layout = layout(
            &[slot(1, 4, 0, "09:00", "09:30"), slot(2, 4, 6, "15:00", "15:30")],
            week(),
        );
        assert_eq!(layout.off_grid, 2);
    }

    #[test]
    fn slot_open_in_editor_cannot_be_dragged() {
        let in_flight = HashSet::new();
        let locks = SlotLocks {
            in_flight: &in_flight,
            editing: Some(9),
        };

        assert_eq!(locks.lock_for(&slot(9, 4, 1, "15:00", "15:30")), Some(BlockLock::Editing));
        assert!(!locks.can_drag(&slot(9, 4, 1, "15:00", "15:30")));
        assert!(locks.can_drag(&slot(10, 4, 1, "15:00", "15:30")));
    }

    #[test]
    fn in_flight_wins_over_editing() {
        let in_flight = HashSet::from([9]);
        let locks = SlotLocks {
            in_flight: &in_flight,
            editing: Some(9),
        };

        assert_eq!(locks.lock_for(&slot(9, 4, 1, "15:00", "15:30")), Some(BlockLock::InFlight));
        assert!(!locks.can_drag(&slot(9, 4, 1, "15:00", "15:30")));
    }

    #[test]
    fn unsaved_slot_has_no_lock_but_cannot_drag() {
        let in_flight = HashSet::new();
        let locks = SlotLocks {
            in_flight: &in_flight,
            editing: None,
        };
        let mut unsaved = slot(1, 4, 0, "15:00", "15:30");
        unsaved.id = None;

        assert_eq!(locks.lock_for(&unsaved), None);
        assert!(!locks.can_drag(&unsaved));
    }
}
