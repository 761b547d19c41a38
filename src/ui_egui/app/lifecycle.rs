use super::navigation::WeekNavigator;
use super::toast::ToastManager;
use super::SchedulerApp;
use crate::models::grid::TimeGridDefinition;
use crate::models::settings::Settings;
use crate::services::worker::StoreWorker;
use crate::ui_egui::drag::DragController;
use crate::ui_egui::theme::SchedulerTheme;
use crate::ui_egui::views::palette::GridPalette;
use crate::ui_egui::views::slot_index::{CoachFilter, SlotIndex};
use crate::ui_egui::views::week_grid::GridLayout;
use chrono::Local;
use std::collections::HashSet;

impl SchedulerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, worker: StoreWorker) -> Self {
        let definition = settings.grid_definition().unwrap_or_else(|err| {
            log::warn!("Invalid grid settings ({}), using the default grid", err);
            TimeGridDefinition::default()
        });
        log::info!(
            "Grid has {} day column(s) and {} row(s)",
            definition.days.len(),
            definition.rows.len()
        );

        let theme = SchedulerTheme::from_settings(&settings);
        theme.apply_to_context(&cc.egui_ctx);

        let today = Local::now().date_naive();
        let navigator = WeekNavigator::new(today);
        let index = SlotIndex::default();
        let layout = GridLayout::build(&definition, &index, navigator.week_start(), today);

        let mut app = Self {
            palette: GridPalette::from_theme(&theme),
            theme,
            settings,
            definition,
            worker,
            navigator,
            week_slots: Vec::new(),
            week_loading: false,
            coaches: Vec::new(),
            filter: CoachFilter::All,
            index,
            layout,
            layout_day: today,
            drag: DragController::new(),
            editor: None,
            pending: HashSet::new(),
            jump_date: today,
            toast_manager: ToastManager::new(),
            last_error: None,
        };

        app.request_coaches();
        app.request_week();
        app
    }
}
