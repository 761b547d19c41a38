//! Status bar showing the week's slot counts and store activity.

use super::SchedulerApp;
use egui::{Color32, RichText};

const SEPARATOR_WIDTH: f32 = 8.0;

fn secondary_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_gray(160)
    } else {
        Color32::from_gray(100)
    }
}

impl SchedulerApp {
    pub(super) fn render_status_bar(&self, ctx: &egui::Context) {
        let secondary = secondary_text_color(self.theme.is_dark);

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new(self.summary_text()).small());

                    if self.layout.off_grid > 0 {
                        ui.add_space(SEPARATOR_WIDTH);
                        ui.label(
                            RichText::new(format!("{} outside grid hours", self.layout.off_grid))
                                .small()
                                .color(secondary),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(error) = &self.last_error {
                            ui.label(RichText::new(error).small().color(Color32::from_rgb(200, 60, 60)));
                        } else if !self.pending.is_empty() {
                            ui.label(
                                RichText::new(format!("Saving {} slot(s)…", self.pending.len()))
                                    .small()
                                    .color(secondary),
                            );
                        } else {
                            ui.label(
                                RichText::new("Click an empty cell to add a slot, drag a slot to move it")
                                    .small()
                                    .color(secondary),
                            );
                        }
                    });
                });
            });
    }

    /// "12 slots · 1-2-1: 8 · Available: 4"
    fn summary_text(&self) -> String {
        let mut parts = vec![format!("{} slot(s)", self.index.len())];
        parts.extend(
            self.index
                .type_counts()
                .into_iter()
                .map(|(slot_type, count)| format!("{}: {}", slot_type.label(), count)),
        );
        parts.join(" · ")
    }
}
