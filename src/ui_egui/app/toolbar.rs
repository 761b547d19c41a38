//! Week navigation and coach filter bar above the grid.

use super::SchedulerApp;
use crate::ui_egui::views::week_grid::coach_filter_combo;
use chrono::Local;
use egui::RichText;
use egui_extras::DatePickerButton;

impl SchedulerApp {
    pub(super) fn render_toolbar(&mut self, ctx: &egui::Context) {
        let today = Local::now().date_naive();

        egui::TopBottomPanel::top("week_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("◀").on_hover_text("Previous week (←)").clicked() {
                    self.navigate_previous();
                }

                let on_current = self.navigator.is_current_week(today);
                if ui
                    .add_enabled(!on_current, egui::Button::new("Today"))
                    .on_hover_text("Jump to the current week (T)")
                    .clicked()
                {
                    self.jump_to_today();
                }

                if ui.button("▶").on_hover_text("Next week (→)").clicked() {
                    self.navigate_next();
                }

                ui.add_space(12.0);
                ui.label(RichText::new(self.navigator.label()).heading());
                if self.week_loading {
                    ui.spinner();
                }

                ui.add_space(12.0);
                let before = self.jump_date;
                ui.add(DatePickerButton::new(&mut self.jump_date).id_source("week_jump_picker"));
                if self.jump_date != before {
                    let target = self.jump_date;
                    self.jump_to_date(target);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut filter = self.filter;
                    ui.horizontal(|ui| {
                        if coach_filter_combo(ui, &mut filter, &self.coaches) {
                            log::info!("Coach filter changed to {:?}", filter);
                            self.filter = filter;
                            self.rebuild_index();
                        }
                    });
                });
            });
        });
    }
}
