use egui::{Color32, RichText};

use super::state::{EditorField, SlotEditorState};
use crate::models::coach::Coach;
use crate::models::grid::{TimeGridDefinition, TimeRow};
use crate::models::slot::SlotType;
use crate::services::store::SlotMutation;

const FORM_LABEL_WIDTH: f32 = 120.0;

/// What the user asked for this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorRequest {
    /// A save or delete ready for the store worker.
    Submit(SlotMutation),
    Close,
}

pub fn render_slot_editor(
    ctx: &egui::Context,
    state: &mut SlotEditorState,
    coaches: &[Coach],
    definition: &TimeGridDefinition,
) -> Option<EditorRequest> {
    let mut request = None;
    let mut window_open = true;

    egui::Window::new(state.title())
        .open(&mut window_open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            render_error_banner(ui, state);
            render_warning_banner(ui, state);

            ui.add_enabled_ui(!state.is_busy(), |ui| {
                render_type_row(ui, state);
                render_student_row(ui, state);
                render_coach_row(ui, state, coaches);
                render_when_rows(ui, state, definition);

                labeled_row(ui, "Notes:", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut state.notes)
                            .desired_rows(3)
                            .desired_width(240.0),
                    );
                });
            });

            ui.separator();
            request = render_action_buttons(ui, state, coaches);
        });

    if !window_open {
        request = Some(EditorRequest::Close);
    }
    request
}

fn render_error_banner(ui: &mut egui::Ui, state: &SlotEditorState) {
    if let Some(ref error) = state.error_message {
        ui.colored_label(Color32::RED, RichText::new(error).strong());
        ui.add_space(8.0);
    }
}

fn render_warning_banner(ui: &mut egui::Ui, state: &SlotEditorState) {
    if state.warning_messages.is_empty() {
        return;
    }

    let warning_color = Color32::from_rgb(200, 140, 0);
    for warning in &state.warning_messages {
        ui.horizontal(|ui| {
            ui.label(RichText::new("⚠").color(warning_color));
            ui.colored_label(warning_color, warning);
        });
    }
    ui.add_space(4.0);
}

fn render_type_row(ui: &mut egui::Ui, state: &mut SlotEditorState) {
    labeled_row(ui, "Type:", |ui| {
        egui::ComboBox::from_id_source("slot_editor_type")
            .selected_text(state.slot_type.label())
            .show_ui(ui, |ui| {
                for slot_type in SlotType::ALL {
                    ui.selectable_value(&mut state.slot_type, slot_type, slot_type.label());
                }
            });
    });
}

fn render_student_row(ui: &mut egui::Ui, state: &mut SlotEditorState) {
    let requires_student = state.slot_type.requires_student();
    labeled_row(ui, "Student:", |ui| {
        ui.add_enabled(
            requires_student,
            egui::TextEdit::singleline(&mut state.student_name).desired_width(240.0),
        );
    });
    if requires_student {
        field_errors(ui, state, EditorField::Student);
    }
}

fn render_coach_row(ui: &mut egui::Ui, state: &mut SlotEditorState, coaches: &[Coach]) {
    let selected = state
        .selected_coach_name(coaches)
        .unwrap_or("Select a coach")
        .to_string();

    labeled_row(ui, "Coach:", |ui| {
        egui::ComboBox::from_id_source("slot_editor_coach")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for coach in coaches {
                    ui.selectable_value(&mut state.coach_id, Some(coach.id), &coach.name);
                }
            });
    });
    field_errors(ui, state, EditorField::Coach);
}

fn render_when_rows(
    ui: &mut egui::Ui,
    state: &mut SlotEditorState,
    definition: &TimeGridDefinition,
) {
    let day_name = definition
        .column(state.day_of_week)
        .map(|day| day.name.clone())
        .unwrap_or_else(|| format!("Day {}", state.day_of_week));

    labeled_row(ui, "Day:", |ui| {
        egui::ComboBox::from_id_source("slot_editor_day")
            .selected_text(day_name)
            .show_ui(ui, |ui| {
                for day in &definition.days {
                    ui.selectable_value(&mut state.day_of_week, day.day_of_week, &day.name);
                }
            });
    });

    labeled_row(ui, "Time:", |ui| {
        time_combo(ui, "slot_editor_start", &mut state.start_time, definition, |row| {
            row.start_time.clone()
        });
        ui.label("to");
        time_combo(ui, "slot_editor_end", &mut state.end_time, definition, |row| {
            row.end_time.clone()
        });
    });
    field_errors(ui, state, EditorField::Time);
}

fn time_combo(
    ui: &mut egui::Ui,
    id: &str,
    value: &mut String,
    definition: &TimeGridDefinition,
    pick: impl Fn(&TimeRow) -> String,
) {
    let selected = if value.is_empty() {
        "--:--".to_string()
    } else {
        value.clone()
    };
    egui::ComboBox::from_id_source(id)
        .selected_text(selected)
        .width(80.0)
        .show_ui(ui, |ui| {
            for row in &definition.rows {
                let time = pick(row);
                ui.selectable_value(value, time.clone(), time);
            }
        });
}

fn field_errors(ui: &mut egui::Ui, state: &SlotEditorState, field: EditorField) {
    for error in state.errors_for(field) {
        indented_row(ui, |ui| {
            ui.label(RichText::new(error.to_string()).small().color(Color32::RED));
        });
    }
}

fn render_action_buttons(
    ui: &mut egui::Ui,
    state: &mut SlotEditorState,
    coaches: &[Coach],
) -> Option<EditorRequest> {
    let mut request = None;

    indented_row(ui, |ui| {
        let can_save = !state.is_busy() && state.validate().is_empty();
        let save_button = egui::Button::new("Save").fill(if can_save {
            Color32::from_rgb(70, 120, 200)
        } else {
            Color32::from_gray(60)
        });

        if ui.add_enabled(can_save, save_button).clicked() {
            match state.prepare_save(coaches) {
                Ok(mutation) => request = Some(EditorRequest::Submit(mutation)),
                Err(err) => state.error_message = Some(err.to_string()),
            }
        }

        if ui.button("Cancel").clicked() {
            request = Some(EditorRequest::Close);
        }

        if state.is_editing() && state.allow_delete {
            ui.add_space(20.0);
            let delete = egui::Button::new(RichText::new("Delete").color(Color32::RED));
            if ui.add_enabled(!state.is_busy(), delete).clicked() {
                match state.prepare_delete() {
                    Ok(mutation) => request = Some(EditorRequest::Submit(mutation)),
                    Err(err) => state.error_message = Some(err.to_string()),
                }
            }
        }

        if state.pending {
            ui.spinner();
        } else if state.slot_in_flight {
            ui.spinner();
            ui.label(RichText::new("Slot is being moved…").small());
        }
    });

    ui.add_space(8.0);
    request
}

fn labeled_row<F>(ui: &mut egui::Ui, label: impl Into<egui::WidgetText>, add_contents: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.horizontal(|ui| {
        render_form_label(ui, label);
        add_contents(ui);
    });
}

fn render_form_label(ui: &mut egui::Ui, label: impl Into<egui::WidgetText>) {
    let text = label.into();
    ui.allocate_ui_with_layout(
        egui::Vec2::new(FORM_LABEL_WIDTH, 24.0),
        egui::Layout::right_to_left(egui::Align::Center),
        move |ui| {
            ui.label(text);
        },
    );
}

fn indented_row<F>(ui: &mut egui::Ui, add_contents: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.horizontal(|ui| {
        ui.add_space(FORM_LABEL_WIDTH);
        add_contents(ui);
    });
}
